//! Error types for the FPL expected-points toolkit
//!
//! The scoring engine itself is total and never fails; these errors only come
//! from the edges (loading snapshots and config files, resolving players typed
//! on the command line).

use thiserror::Error;


pub type Result<T> = std::result::Result<T, XptsError>;

#[derive(Error, Debug)]
pub enum XptsError {
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot path not provided and {env_var} environment variable not set")]
    MissingSnapshot { env_var: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Player not found: {query}")]
    PlayerNotFound { query: String },

    #[error("Player query '{query}' is ambiguous, matches: {}", matches.join(", "))]
    AmbiguousPlayer { query: String, matches: Vec<String> },

    #[error("Invalid model configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid transfer: {message}")]
    InvalidTransfer { message: String },
}
