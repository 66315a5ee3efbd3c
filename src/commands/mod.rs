//! Command implementations for the fpl-xpts CLI

pub mod common;
pub mod player_xpts;
pub mod squad;
pub mod targets;
pub mod transfer;

use std::path::PathBuf;

use crate::{
    core::paths::{default_config_path, try_read_to_string},
    engine::ModelConfig,
    error::XptsError,
    Result, CONFIG_ENV_VAR, SNAPSHOT_ENV_VAR,
};

#[cfg(test)]
mod tests;

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Resolve the snapshot path from option or environment variable
pub fn resolve_snapshot_path(snapshot: Option<PathBuf>) -> Result<PathBuf> {
    snapshot
        .or_else(|| env_path(SNAPSHOT_ENV_VAR))
        .ok_or_else(|| XptsError::MissingSnapshot {
            env_var: SNAPSHOT_ENV_VAR.to_string(),
        })
}

/// Resolve the model config: `--config`, then the environment variable, then
/// the default config file if present, else built-in defaults.
///
/// An explicitly named file must exist; the default file is optional.
pub fn resolve_config(config: Option<PathBuf>) -> Result<ModelConfig> {
    if let Some(path) = config.or_else(|| env_path(CONFIG_ENV_VAR)) {
        return ModelConfig::from_path(&path);
    }

    let default_path = default_config_path();
    match try_read_to_string(&default_path) {
        Some(raw) => {
            tracing::debug!("Using model config at {}", default_path.display());
            ModelConfig::from_json_str(&raw)
        }
        None => Ok(ModelConfig::default()),
    }
}
