//! Data-provider seam: raw FPL payloads in, a resolved [`Snapshot`] out.

pub mod snapshot;
pub mod types;
pub mod understat;

pub use snapshot::Snapshot;
pub use types::FplBundle;
