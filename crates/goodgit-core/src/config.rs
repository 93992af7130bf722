use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::GoodgitError;

/// Top-level goodgit configuration, stored at `~/.goodgit.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodgitConfig {
    /// Identity store location. Defaults to `~/.goodgit.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    /// Directory holding SSH keys. Defaults to `~/.ssh`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_dir: Option<PathBuf>,

    /// SSH client configuration file. Defaults to `<ssh_dir>/config`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_config_path: Option<PathBuf>,

    /// Real upstream hostname that alias-qualified hosts route to.
    #[serde(default = "default_canonical_host")]
    pub canonical_host: String,

    /// Remote rewritten by `set user`.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Fail registration when no SSH keys are discoverable instead of warning.
    #[serde(default)]
    pub strict_keys: bool,
}

fn default_canonical_host() -> String {
    "github.com".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for GoodgitConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            ssh_dir: None,
            ssh_config_path: None,
            canonical_host: default_canonical_host(),
            remote: default_remote(),
            strict_keys: false,
        }
    }
}

impl GoodgitConfig {
    /// Returns the operator's home directory.
    pub fn home_dir() -> Result<PathBuf, GoodgitError> {
        dirs::home_dir().ok_or_else(|| GoodgitError::Config {
            message: "could not determine home directory".into(),
        })
    }

    /// Returns the path to the config file.
    pub fn config_path() -> Result<PathBuf, GoodgitError> {
        Ok(Self::home_dir()?.join(".goodgit.toml"))
    }

    /// Load config from the default location, or return defaults if not found.
    pub fn load() -> Result<Self, GoodgitError> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, GoodgitError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| GoodgitError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), GoodgitError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| GoodgitError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "wrote config");
        Ok(())
    }

    /// Write a default config file unless one already exists.
    pub fn init() -> Result<PathBuf, GoodgitError> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            Self::default().save_to(&config_path)?;
        }
        Ok(config_path)
    }

    fn validate(&self) -> Result<(), GoodgitError> {
        let host = self.canonical_host.trim();
        if host.is_empty() || host.contains(char::is_whitespace) || host.contains('/') {
            return Err(GoodgitError::Config {
                message: format!("invalid canonical_host '{}'", self.canonical_host),
            });
        }
        if self.remote.trim().is_empty() {
            return Err(GoodgitError::Config {
                message: "remote cannot be empty".into(),
            });
        }
        Ok(())
    }

    /// Resolved identity store path.
    pub fn store_path(&self) -> Result<PathBuf, GoodgitError> {
        match &self.store_path {
            Some(p) => Ok(p.clone()),
            None => Ok(Self::home_dir()?.join(".goodgit.json")),
        }
    }

    /// Resolved SSH key directory.
    pub fn ssh_dir(&self) -> Result<PathBuf, GoodgitError> {
        match &self.ssh_dir {
            Some(p) => Ok(p.clone()),
            None => Ok(Self::home_dir()?.join(".ssh")),
        }
    }

    /// Resolved SSH client configuration path.
    pub fn ssh_config_path(&self) -> Result<PathBuf, GoodgitError> {
        match &self.ssh_config_path {
            Some(p) => Ok(p.clone()),
            None => Ok(self.ssh_dir()?.join("config")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrip() {
        let config = GoodgitConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: GoodgitConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: GoodgitConfig = toml::from_str("").unwrap();
        assert_eq!(config.canonical_host, "github.com");
        assert_eq!(config.remote, "origin");
        assert!(!config.strict_keys);
    }

    #[test]
    fn test_ssh_config_follows_ssh_dir() {
        let config = GoodgitConfig {
            ssh_dir: Some("/srv/keys".into()),
            ..Default::default()
        };
        assert_eq!(
            config.ssh_config_path().unwrap(),
            PathBuf::from("/srv/keys/config")
        );
    }

    #[test]
    fn test_load_from_rejects_bad_host() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goodgit.toml");
        std::fs::write(&path, "canonical_host = \"git hub.com\"\n").unwrap();
        assert!(matches!(
            GoodgitConfig::load_from(&path),
            Err(GoodgitError::Config { .. })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("goodgit.toml");
        let config = GoodgitConfig {
            canonical_host: "gitlab.com".into(),
            strict_keys: true,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(GoodgitConfig::load_from(&path).unwrap(), config);
    }
}
