use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mapping::validate_iri;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Where the graph lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub data_dir: PathBuf,
    /// Namespace under which new resources are minted.
    pub default_namespace: String,
    pub backend: Backend,
}

impl GraphConfig {
    /// Reads a TOML config file. Missing keys take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let config: GraphConfig = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {e}", path.as_ref().display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let raw = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;
        fs::write(path, raw)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate_iri(&self.default_namespace).map_err(Error::Config)?;
        if !self.default_namespace.ends_with(['/', '#']) {
            return Err(Error::Config(format!(
                "namespace '{}' must end with '/' or '#'",
                self.default_namespace
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("graph.db")
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            default_namespace: "http://vivo.example.org/individual/".to_string(),
            backend: Backend::Sqlite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_valid() {
        let config = GraphConfig::default();
        config.validate().unwrap();
        assert_eq!(config.db_path(), PathBuf::from("./data/graph.db"));
    }

    #[test]
    fn test_load_fills_missing_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "default_namespace = \"http://example.org/ns#\"\n").unwrap();

        let config = GraphConfig::load(&path).unwrap();
        assert_eq!(config.default_namespace, "http://example.org/ns#");
        assert_eq!(config.backend, Backend::Sqlite);
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let config = GraphConfig {
            data_dir: temp.path().to_path_buf(),
            backend: Backend::Memory,
            ..Default::default()
        };
        config.save(config.config_path()).unwrap();

        assert_eq!(GraphConfig::load(config.config_path()).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_namespace() {
        let relative = GraphConfig {
            default_namespace: "individual/".to_string(),
            ..Default::default()
        };
        assert!(matches!(relative.validate(), Err(Error::Config(_))));

        let no_separator = GraphConfig {
            default_namespace: "http://example.org/individual".to_string(),
            ..Default::default()
        };
        assert!(no_separator.validate().is_err());
    }

    #[test]
    fn test_unknown_backend_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "backend = \"postgres\"\n").unwrap();
        assert!(matches!(GraphConfig::load(&path), Err(Error::Config(_))));
    }
}
