//! Type-safe wrappers and enums for Fantasy Premier League data.

pub mod filters;
pub mod ids;
pub mod position;

pub use filters::PlayerQuery;
pub use ids::{Gameweek, PlayerId, TeamId};
pub use position::Position;
