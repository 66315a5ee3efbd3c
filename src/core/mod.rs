//! Core utilities shared across commands
//!
//! - `paths`: on-disk locations and small file helpers

pub mod paths;

pub use paths::{default_config_path, try_read_to_string};
