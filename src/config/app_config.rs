use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

use crate::core::errors::{CreateConfigError, Result};
use crate::core::services::materializer::{DEFAULT_BASE_NAMES, DEFAULT_EXTENSION};

/// Manifest file looked up in the target directory when `--config` is not given.
pub const MANIFEST_FILE: &str = "createconfig.toml";

/// Top-level configuration, read from `createconfig.toml` when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub materialize: MaterializeSection,
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `createconfig.toml` in
    /// `dir` is used if present and the built-in defaults otherwise.
    /// Names and extension are validated after parsing because they are
    /// joined into file paths.
    pub fn load(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CreateConfigError::InvalidConfig {
                        detail: format!("{} not found", path.display()),
                    });
                }
                path.to_path_buf()
            }
            None => {
                let path = dir.join(MANIFEST_FILE);
                if !path.exists() {
                    log::debug!("no {MANIFEST_FILE} in {}, using defaults", dir.display());
                    return Ok(Self::default());
                }
                path
            }
        };

        log::debug!("loading manifest {}", config_path.display());
        let content = std::fs::read_to_string(&config_path).map_err(|source| {
            CreateConfigError::ConfigReadFailed {
                path: config_path.clone(),
                source,
            }
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| CreateConfigError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", config_path.display()),
        })?;

        config.materialize.validate()?;
        Ok(config)
    }
}

/// The `[materialize]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterializeSection {
    #[serde(default = "default_names")]
    pub names: Vec<String>,
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for MaterializeSection {
    fn default() -> Self {
        Self {
            names: default_names(),
            extension: default_extension(),
        }
    }
}

impl MaterializeSection {
    fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for name in &self.names {
            validate_file_stem(name, "base name")?;
            if !seen.insert(name.as_str()) {
                return Err(CreateConfigError::InvalidConfig {
                    detail: format!("duplicate base name '{name}'"),
                });
            }
        }

        validate_file_stem(&self.extension, "extension")?;
        if self.extension.starts_with('.') {
            return Err(CreateConfigError::InvalidConfig {
                detail: format!(
                    "extension '{}' must not start with a dot",
                    self.extension
                ),
            });
        }
        Ok(())
    }
}

fn default_names() -> Vec<String> {
    DEFAULT_BASE_NAMES.iter().map(|n| n.to_string()).collect()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

/// Reject values that would escape the target directory once joined.
fn validate_file_stem(value: &str, what: &str) -> Result<()> {
    if value.is_empty()
        || value == "."
        || value == ".."
        || value.contains('/')
        || value.contains('\\')
        || value.contains('\0')
    {
        return Err(CreateConfigError::InvalidConfig {
            detail: format!("invalid {what} '{value}': must be a plain file name"),
        });
    }
    Ok(())
}
