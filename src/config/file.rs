//! Optional TOML configuration file

use crate::types::SyncError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk defaults; every field optional, unknown keys rejected
///
/// ```toml
/// source = "/data/photos"
/// replica = "/mnt/backup/photos"
/// interval_secs = 300
/// log_file = "/var/log/replika.log"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub source: Option<PathBuf>,
    pub replica: Option<PathBuf>,
    pub interval_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let content = fs::read_to_string(path).map_err(|e| {
            SyncError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
            .map_err(|e| SyncError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> Result<Self, SyncError> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| SyncError::Config(format!("Invalid config file: {e}")))?;
        if file.interval_secs == Some(0) {
            return Err(SyncError::Config(
                "interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let file = ConfigFile::parse(
            r#"
            source = "/data/src"
            replica = "/data/rep"
            interval_secs = 10
            log_file = "sync.log"
            "#,
        )
        .expect("parse");

        assert_eq!(file.source, Some(PathBuf::from("/data/src")));
        assert_eq!(file.replica, Some(PathBuf::from("/data/rep")));
        assert_eq!(file.interval_secs, Some(10));
        assert_eq!(file.log_file, Some(PathBuf::from("sync.log")));
    }

    #[test]
    fn test_parse_empty_is_all_defaults() {
        assert_eq!(ConfigFile::parse("").expect("parse"), ConfigFile::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = ConfigFile::parse("destination = \"/x\"\n");
        assert!(matches!(result, Err(SyncError::Config(_))));
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(ConfigFile::parse("interval_secs = 0\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigFile::load(Path::new("/nonexistent/replika.toml"));
        assert!(matches!(result, Err(SyncError::Config(_))));
    }
}
