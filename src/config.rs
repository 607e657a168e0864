// src/config.rs
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::BuildInfoError;

pub const DEFAULT_RELATIVE_DIR: &str = "meta";
pub const DEFAULT_FILE_NAME: &str = "build_info.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub relative_dir: String,
    pub file_name: String,
    pub source: SourceConfig,
}

/// Where the descriptor comes from. Picked once when the service is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Blocking read from `<base_dir>/<relative_dir>/<file_name>`.
    LocalFile { base_dir: PathBuf },
    /// HTTP GET of `<base_url>/<relative_dir>/<file_name>`.
    Network { base_url: String },
    /// No descriptor at all; values come from here or the environment.
    FixedEnvironment {
        id: Option<String>,
        tag: Option<String>,
        branch: Option<String>,
        bundle_version: Option<String>,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::LocalFile {
            base_dir: PathBuf::from("."),
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            relative_dir: DEFAULT_RELATIVE_DIR.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            source: SourceConfig::default(),
        }
    }
}

impl LoaderConfig {
    pub fn local(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: SourceConfig::LocalFile {
                base_dir: base_dir.into(),
            },
            ..Self::default()
        }
    }

    pub fn network(base_url: impl Into<String>) -> Self {
        Self {
            source: SourceConfig::Network {
                base_url: base_url.into(),
            },
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self, BuildInfoError> {
        let content = std::fs::read_to_string(path)?;
        let config: LoaderConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded loader config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BuildInfoError> {
        if self.file_name.trim().is_empty() {
            return Err(BuildInfoError::ConfigError(
                "file_name must not be empty".to_string(),
            ));
        }
        if let SourceConfig::Network { base_url } = &self.source {
            if base_url.trim().is_empty() {
                return Err(BuildInfoError::ConfigError(
                    "network source needs a base_url".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Descriptor path relative to the source base, always `/` separated.
    pub fn relative_path(&self) -> String {
        let dir = self.relative_dir.trim_matches('/');
        if dir.is_empty() {
            self.file_name.clone()
        } else {
            format!("{}/{}", dir, self.file_name)
        }
    }

    pub fn local_path(&self, base_dir: &Path) -> PathBuf {
        let dir = self.relative_dir.trim_matches('/');
        if dir.is_empty() {
            base_dir.join(&self.file_name)
        } else {
            base_dir.join(dir).join(&self.file_name)
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.relative_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config: LoaderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.relative_dir, DEFAULT_RELATIVE_DIR);
        assert_eq!(config.file_name, DEFAULT_FILE_NAME);
        assert_eq!(config.source, SourceConfig::default());
    }

    #[test]
    fn tagged_sources_deserialize() {
        let config: LoaderConfig = serde_json::from_str(
            r#"{ "source": { "kind": "network", "base_url": "http://cdn.local/game" } }"#,
        )
        .unwrap();
        assert_eq!(config.url("http://cdn.local/game/"), "http://cdn.local/game/meta/build_info.txt");

        let config: LoaderConfig = serde_json::from_str(
            r#"{ "source": { "kind": "fixed_environment", "id": "dev" } }"#,
        )
        .unwrap();
        assert_eq!(
            config.source,
            SourceConfig::FixedEnvironment {
                id: Some("dev".to_string()),
                tag: None,
                branch: None,
                bundle_version: None,
            }
        );
    }

    #[test]
    fn empty_relative_dir_points_at_base() {
        let config = LoaderConfig {
            relative_dir: "/".to_string(),
            ..LoaderConfig::local("assets")
        };
        assert_eq!(config.relative_path(), DEFAULT_FILE_NAME);
        assert_eq!(
            config.local_path(Path::new("assets")),
            Path::new("assets").join(DEFAULT_FILE_NAME)
        );
    }

    #[test]
    fn validation_rejects_blank_values() {
        let mut config = LoaderConfig::network(" ");
        assert!(matches!(
            config.validate(),
            Err(BuildInfoError::ConfigError(_))
        ));

        config = LoaderConfig::default();
        config.file_name = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_json_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loader.json");
        std::fs::write(&path, r#"{ "file_name": "stamp.txt" }"#).unwrap();

        let config = LoaderConfig::load(&path).unwrap();
        assert_eq!(config.file_name, "stamp.txt");
        assert!(LoaderConfig::load(&dir.path().join("absent.json")).is_err());
    }
}
