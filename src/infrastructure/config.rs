use crate::domain::ConfigError;
use crate::infrastructure::{
    DEFAULT_STORAGE_KEY, JsonFileStore, KeyValueStore, SubmissionSimulator,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "signup.toml";
pub const DEFAULT_STORAGE_FILE: &str = "signup-storage.json";

/// Runtime settings, read from `signup.toml` when present.
///
/// Every key is optional; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignupConfig {
    pub submit_delay_ms: u64,
    pub storage_key: String,
    pub storage_path: PathBuf,
    pub storage_quota_bytes: Option<usize>,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 3000,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_FILE),
            storage_quota_bytes: None,
        }
    }
}

impl SignupConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads the config file, returning defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads `signup.toml` from the working directory, falling back to
    /// defaults on any error.
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        match Self::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "using default config");
                Self::default()
            }
        }
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn build_store(&self) -> JsonFileStore {
        let store = JsonFileStore::new(&self.storage_path);
        match self.storage_quota_bytes {
            Some(quota) => store.with_quota(quota),
            None => store,
        }
    }

    pub fn build_simulator<S: KeyValueStore>(&self, store: S) -> SubmissionSimulator<S> {
        SubmissionSimulator::new(store)
            .with_key(self.storage_key.clone())
            .with_delay(self.submit_delay())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = SignupConfig::default();
        assert_eq!(config.submit_delay(), Duration::from_millis(3000));
        assert_eq!(config.storage_key, "userData");
        assert_eq!(config.storage_path, PathBuf::from("signup-storage.json"));
        assert_eq!(config.storage_quota_bytes, None);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = SignupConfig::parse("submit_delay_ms = 250\n").unwrap();
        assert_eq!(config.submit_delay_ms, 250);
        assert_eq!(config.storage_key, "userData");
    }

    #[test]
    fn test_full_config() {
        let config = SignupConfig::parse(
            r#"
submit_delay_ms = 0
storage_key = "signup"
storage_path = "/tmp/store.json"
storage_quota_bytes = 1024
"#,
        )
        .unwrap();

        assert_eq!(config.submit_delay(), Duration::ZERO);
        assert_eq!(config.storage_key, "signup");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/store.json"));
        assert_eq!(config.storage_quota_bytes, Some(1024));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(matches!(
            SignupConfig::parse("submit_delay_ms = \"soon\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = SignupConfig::load_from(&dir.path().join("signup.toml")).unwrap();
        assert_eq!(config, SignupConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("signup.toml");
        fs::write(&path, "storage_key = \"alt\"\n").unwrap();

        let config = SignupConfig::load_from(&path).unwrap();
        assert_eq!(config.storage_key, "alt");
    }

    #[test]
    fn test_build_simulator_uses_settings() {
        let config = SignupConfig {
            submit_delay_ms: 10,
            storage_key: "k".to_string(),
            ..SignupConfig::default()
        };
        let simulator = config.build_simulator(crate::infrastructure::MemoryStore::new());
        assert_eq!(simulator.key(), "k");
        assert_eq!(simulator.delay(), Duration::from_millis(10));
    }
}
