//! On-disk locations used by the CLI.

use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

/// Directory name under the platform config dir.
pub const APP_DIR: &str = "fpl-xpts";

pub const MODEL_CONFIG_FILE: &str = "model.json";

/// Path: ~/.config/fpl-xpts/model.json (or the platform equivalent)
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".config");
        home
    });
    base.join(APP_DIR).join(MODEL_CONFIG_FILE)
}

/// Try to read a file into a String; `None` if it is missing or unreadable.
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_path_shape() {
        let path = default_config_path();
        assert!(path.ends_with("fpl-xpts/model.json"));
    }

    #[test]
    fn test_try_read_to_string() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"default_horizon\": 4}}").unwrap();
        assert_eq!(
            try_read_to_string(file.path()).as_deref(),
            Some("{\"default_horizon\": 4}")
        );
        assert!(try_read_to_string(Path::new("/no/such/file.json")).is_none());
    }
}
