//! coolcall configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name of the internal roster copy inside `data_dir`.
pub const ROSTER_FILE: &str = "roster.txt";

/// File name of the queue snapshot inside `data_dir`.
pub const QUEUE_FILE: &str = "queue.json";

/// File name of the summary performance file inside `log_dir`.
pub const SUMMARY_FILE: &str = "summary.txt";

/// Top-level coolcall configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoolCallConfig {
    /// Number of students shown on deck at once.
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Fraction of the queue, from the front, a called student may not be reinserted into.
    #[serde(default = "default_insert_delay")]
    pub insert_delay: f64,
    /// Roster field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Accepted email address endings.
    #[serde(default = "default_email_suffixes")]
    pub email_suffixes: Vec<String>,
    /// Internal storage for the roster copy and queue snapshot.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Where summary, daily log, and verification files are written.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_window_size() -> usize {
    4
}
fn default_insert_delay() -> f64 {
    0.35
}
fn default_delimiter() -> String {
    "\t".to_string()
}
fn default_email_suffixes() -> Vec<String> {
    vec!["@uoregon.edu".to_string(), "cs.uoregon.edu".to_string()]
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./coolcall-data")
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("./coolcall-logs")
}

impl Default for CoolCallConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            insert_delay: default_insert_delay(),
            delimiter: default_delimiter(),
            email_suffixes: default_email_suffixes(),
            data_dir: default_data_dir(),
            log_dir: default_log_dir(),
        }
    }
}

/// Settings the roster store needs for parsing and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterSettings {
    pub delimiter: String,
    pub email_suffixes: Vec<String>,
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            email_suffixes: default_email_suffixes(),
        }
    }
}

/// Settings the fairness queue needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueSettings {
    pub window_size: usize,
    pub insert_delay: f64,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            insert_delay: default_insert_delay(),
        }
    }
}

impl CoolCallConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.window_size >= 1, "window_size must be at least 1");
        anyhow::ensure!(
            (0.0..1.0).contains(&self.insert_delay),
            "insert_delay must be in [0, 1), got {}",
            self.insert_delay
        );
        anyhow::ensure!(!self.delimiter.is_empty(), "delimiter must not be empty");
        anyhow::ensure!(
            !self.email_suffixes.is_empty(),
            "email_suffixes must list at least one accepted domain"
        );
        Ok(())
    }

    pub fn roster_settings(&self) -> RosterSettings {
        RosterSettings {
            delimiter: self.delimiter.clone(),
            email_suffixes: self.email_suffixes.clone(),
        }
    }

    pub fn queue_settings(&self) -> QueueSettings {
        QueueSettings {
            window_size: self.window_size,
            insert_delay: self.insert_delay,
        }
    }

    /// Location of the internal roster copy.
    pub fn roster_path(&self) -> PathBuf {
        self.data_dir.join(ROSTER_FILE)
    }

    /// Location of the queue snapshot.
    pub fn queue_path(&self) -> PathBuf {
        self.data_dir.join(QUEUE_FILE)
    }

    /// Location of the summary performance file.
    pub fn summary_path(&self) -> PathBuf {
        self.log_dir.join(SUMMARY_FILE)
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `coolcall.toml` in the current directory
/// 2. `~/.config/coolcall/config.toml`
///
/// Environment variable overrides: `COOLCALL_DATA_DIR`, `COOLCALL_LOG_DIR`.
pub fn load_config() -> Result<CoolCallConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<CoolCallConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("coolcall.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<CoolCallConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => CoolCallConfig::default(),
    };

    if let Ok(dir) = std::env::var("COOLCALL_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var("COOLCALL_LOG_DIR") {
        config.log_dir = PathBuf::from(dir);
    }

    config.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("coolcall"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CoolCallConfig::default();
        assert_eq!(config.window_size, 4);
        assert!((config.insert_delay - 0.35).abs() < f64::EPSILON);
        assert_eq!(config.delimiter, "\t");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
window_size = 3
delimiter = ","
data_dir = "/tmp/coolcall"
"#;
        let config: CoolCallConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.window_size, 3);
        assert_eq!(config.delimiter, ",");
        assert_eq!(config.queue_path(), PathBuf::from("/tmp/coolcall/queue.json"));
        assert!((config.insert_delay - 0.35).abs() < f64::EPSILON);
        assert_eq!(config.email_suffixes.len(), 2);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = CoolCallConfig::default();
        config.window_size = 0;
        assert!(config.validate().is_err());

        let mut config = CoolCallConfig::default();
        config.insert_delay = 1.0;
        assert!(config.validate().is_err());

        let mut config = CoolCallConfig::default();
        config.delimiter.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/coolcall.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coolcall.toml");
        std::fs::write(&path, "window_size = 2\ninsert_delay = 0.5\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.queue_settings().window_size, 2);
        assert!((config.queue_settings().insert_delay - 0.5).abs() < f64::EPSILON);
    }
}
