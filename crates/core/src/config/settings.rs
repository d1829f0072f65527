use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::keys;

/// Flat key/value configuration for the metamodel.
///
/// Serialized as a single JSON object of string values; see [`keys`] for the
/// recognized entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaModelConfig {
    entries: BTreeMap<String, String>,
}

impl MetaModelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Walk up from `start_path` looking for `.metamodel.json` or `metamodel.json`
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let config_path = current.join(".metamodel.json");
            if config_path.exists() {
                return Some(config_path);
            }

            let config_path = current.join("metamodel.json");
            if config_path.exists() {
                return Some(config_path);
            }

            current = current.parent()?;
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key).map(|v| v.trim().to_ascii_lowercase()) {
            None => default,
            Some(v) if v == "true" => true,
            Some(v) if v == "false" => false,
            Some(v) => {
                warn!("Config key '{key}' has non-boolean value '{v}', using {default}");
                default
            }
        }
    }

    pub fn get_u32(&self, key: &str, default: u32) -> u32 {
        match self.get(key) {
            None => default,
            Some(v) => v.trim().parse().unwrap_or_else(|_| {
                warn!("Config key '{key}' has non-numeric value '{v}', using {default}");
                default
            }),
        }
    }

    /// Comma-separated list; blank items are dropped
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Keys present in this config that the metamodel does not recognize
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.entries
            .keys()
            .map(String::as_str)
            .filter(|k| !keys::ALL.contains(k))
            .collect()
    }

    pub fn filter_visibility(&self) -> bool {
        self.get_bool(keys::FILTER_VISIBILITY, true)
    }

    pub fn layout_reload(&self) -> bool {
        self.get_bool(keys::LAYOUT_RELOAD, false)
    }

    pub fn excluded_factories(&self) -> Vec<String> {
        self.get_list(keys::FACETS_EXCLUDE)
    }

    pub fn validate_orphaned_methods(&self) -> bool {
        self.get_bool(keys::VALIDATE_ORPHANED_METHODS, true)
    }

    pub fn validate_unique_object_types(&self) -> bool {
        self.get_bool(keys::VALIDATE_UNIQUE_OBJECT_TYPES, true)
    }

    pub fn auto_complete_min_length(&self) -> u32 {
        self.get_u32(keys::AUTO_COMPLETE_MIN_LENGTH, 1)
    }

    pub fn substitutor_ignored_classes(&self) -> Vec<String> {
        self.get_list(keys::SUBSTITUTOR_IGNORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = MetaModelConfig::new();
        assert!(config.filter_visibility());
        assert!(!config.layout_reload());
        assert!(config.excluded_factories().is_empty());
        assert_eq!(config.auto_complete_min_length(), 1);
    }

    #[test]
    fn test_typed_getters_fall_back_on_bad_values() {
        let config = MetaModelConfig::new()
            .with(keys::FILTER_VISIBILITY, "maybe")
            .with(keys::AUTO_COMPLETE_MIN_LENGTH, "three")
            .with(keys::LAYOUT_RELOAD, " TRUE ");

        assert!(config.filter_visibility());
        assert_eq!(config.auto_complete_min_length(), 1);
        assert!(config.layout_reload());
    }

    #[test]
    fn test_list_values() {
        let config = MetaModelConfig::new().with(keys::FACETS_EXCLUDE, "regex, ,max-length");
        assert_eq!(config.excluded_factories(), vec!["regex", "max-length"]);
    }

    #[test]
    fn test_file_round_trip_and_discovery() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested)?;

        let config = MetaModelConfig::new()
            .with(keys::LAYOUT_RELOAD, "true")
            .with("metamodel.unheard.of", "x");
        let path = temp_dir.path().join(".metamodel.json");
        config.save_to_file(&path)?;

        assert_eq!(MetaModelConfig::find_config_file(&nested), Some(path.clone()));
        let loaded = MetaModelConfig::load_from_file(&path)?;
        assert_eq!(loaded, config);
        assert_eq!(loaded.unknown_keys(), vec!["metamodel.unheard.of"]);
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("metamodel.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = MetaModelConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }
}
