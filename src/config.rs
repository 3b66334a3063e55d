//! Player configuration: optional ~/.laras/config.yaml.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Settings for `laras play`, all optional.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the instrument WAV samples.
    pub sounds_dir: Option<PathBuf>,
    /// Master volume, 0.0 to 1.0.
    pub master_volume: f32,
    /// How far ahead of the audio clock ticks are scheduled.
    pub lookahead_ms: u64,
    /// Labels muted when a session starts.
    pub muted: Vec<String>,
    /// Seed for synthesized stand-in voices.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sounds_dir: None,
            master_volume: 0.8,
            lookahead_ms: 100,
            muted: Vec::new(),
            seed: 42,
        }
    }
}

/// Default config file location.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".laras").join("config.yaml"))
}

impl Config {
    /// Load ~/.laras/config.yaml. Returns None if it doesn't exist or doesn't parse.
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }
        Self::load_from(&path)
            .map_err(|e| warn!(error = %e, "ignoring config"))
            .ok()
    }

    /// Load a config file, reporting why it could not be used.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// How far ahead of the audio clock ticks are scheduled.
    pub fn lookahead_seconds(&self) -> f64 {
        self.lookahead_ms as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.sounds_dir.is_none());
        assert_eq!(config.master_volume, 0.8);
        assert_eq!(config.lookahead_seconds(), 0.1);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str("muted: [kkr, rs]\n").unwrap();
        assert_eq!(config.muted, vec!["kkr", "rs"]);
        assert_eq!(config.lookahead_ms, 100);
    }

    #[test]
    fn empty_mapping_is_default() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sounds_dir: /srv/sounds\nmaster_volume: 0.5\nseed: 7").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.sounds_dir, Some(PathBuf::from("/srv/sounds")));
        assert_eq!(config.master_volume, 0.5);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn bad_yaml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "master_volume: [loud]").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config"));
    }

    #[test]
    fn round_trips_through_yaml() {
        let config = Config {
            muted: vec!["tr".into()],
            ..Config::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(serde_yaml::from_str::<Config>(&yaml).unwrap(), config);
    }

    #[test]
    fn load_does_not_panic() {
        let _ = Config::load();
    }
}
