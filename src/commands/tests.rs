//! Tests for snapshot and config resolution

use super::*;

#[cfg(test)]
mod resolve_tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_resolve_snapshot_path_from_option() {
        let path = resolve_snapshot_path(Some(PathBuf::from("/tmp/snap.json"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/snap.json"));
    }

    #[test]
    fn test_resolve_snapshot_path_from_env_and_missing() {
        std::env::set_var(SNAPSHOT_ENV_VAR, "/tmp/from-env.json");
        let path = resolve_snapshot_path(None).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/from-env.json"));

        // an explicit path still wins
        let path = resolve_snapshot_path(Some(PathBuf::from("/tmp/cli.json"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/cli.json"));

        std::env::set_var(SNAPSHOT_ENV_VAR, "");
        assert!(resolve_snapshot_path(None).is_err());

        std::env::remove_var(SNAPSHOT_ENV_VAR);
        match resolve_snapshot_path(None).unwrap_err() {
            XptsError::MissingSnapshot { env_var } => assert_eq!(env_var, SNAPSHOT_ENV_VAR),
            other => panic!("Expected MissingSnapshot error, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_config_from_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_horizon": 5, "scoring": {{"points_scale": 1.0}}}}"#).unwrap();

        let config = resolve_config(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.default_horizon, 5);
        assert_eq!(config.scoring.points_scale, 1.0);
        assert_eq!(config.scoring.max_reasons, 3);
    }

    #[test]
    fn test_resolve_config_rejects_bad_weights() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"weights": {{"attacking": {{"form": 0.5, "ppg": 0.14, "ict": 0.18, "fdr": 0.14,
                "home_away": 0.10, "team_strength": 0.12, "availability": 0.09, "bonus": 0.05}}}}}}"#
        )
        .unwrap();

        let err = resolve_config(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, XptsError::InvalidConfig { .. }));
    }

    #[test]
    fn test_resolve_config_missing_explicit_file_is_error() {
        let err = resolve_config(Some(PathBuf::from("/no/such/model.json"))).unwrap_err();
        assert!(matches!(err, XptsError::Io(_)));
    }

    #[test]
    fn test_resolve_config_from_env() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_horizon": 2}}"#).unwrap();

        std::env::set_var(CONFIG_ENV_VAR, file.path());
        let config = resolve_config(None).unwrap();
        assert_eq!(config.default_horizon, 2);
        std::env::remove_var(CONFIG_ENV_VAR);
    }
}
