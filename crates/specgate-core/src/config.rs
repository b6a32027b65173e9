use crate::catalog::PatternCatalog;
use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ValidationConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// In strict mode a report becomes `warn` once the number of failed
    /// recommended checks exceeds this value.
    #[serde(default = "default_warn_tolerance")]
    pub warn_tolerance: usize,
}

fn default_warn_tolerance() -> usize {
    0
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            warn_tolerance: default_warn_tolerance(),
        }
    }
}

// ---------------------------------------------------------------------------
// DelegationConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegationConfig {
    /// Minimum distinct keyword matches for a domain to be significant.
    #[serde(default = "default_significance_threshold")]
    pub significance_threshold: usize,
    /// Replaces the catalog's orchestrator id when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orchestrator_agent: Option<String>,
}

fn default_significance_threshold() -> usize {
    2
}

impl Default for DelegationConfig {
    fn default() -> Self {
        Self {
            significance_threshold: default_significance_threshold(),
            orchestrator_agent: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub delegation: DelegationConfig,
    /// External catalog file, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            validation: ValidationConfig::default(),
            delegation: DelegationConfig::default(),
            catalog: None,
        }
    }
}

impl Config {
    /// Load `.specgate/config.yaml`. A missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Pick the effective pattern catalog.
    ///
    /// Order: `explicit` (the `--catalog` flag), `config.catalog`,
    /// `.specgate/catalog.yaml`, then the builtin catalog.
    pub fn load_catalog(&self, root: &Path, explicit: Option<&Path>) -> Result<PatternCatalog> {
        let external = explicit
            .map(|p| paths::resolve(root, p))
            .or_else(|| self.catalog.as_deref().map(|p| paths::resolve(root, p)))
            .or_else(|| {
                let default = paths::catalog_path(root);
                default.exists().then_some(default)
            });

        let mut catalog = match external {
            Some(path) => PatternCatalog::load(&path)?,
            None => {
                tracing::debug!("using builtin pattern catalog");
                PatternCatalog::builtin()
            }
        };
        if let Some(orchestrator) = &self.delegation.orchestrator_agent {
            catalog.orchestrator_agent = orchestrator.clone();
        }
        Ok(catalog)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self, root: &Path) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unknown config version {} (expected 1)", self.version),
            });
        }

        if self.delegation.significance_threshold == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "delegation.significance_threshold must be at least 1".to_string(),
            });
        }

        if let Some(orchestrator) = &self.delegation.orchestrator_agent {
            if orchestrator.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: "delegation.orchestrator_agent is empty".to_string(),
                });
            }
        }

        if self.validation.warn_tolerance > 20 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "validation.warn_tolerance={} (>20 is unusual; strict mode will rarely warn)",
                    self.validation.warn_tolerance
                ),
            });
        }

        if let Some(catalog) = &self.catalog {
            let path = paths::resolve(root, catalog);
            if !path.exists() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("catalog file '{}' does not exist", path.display()),
                });
            } else if let Err(e) = PatternCatalog::load(&path) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("catalog file '{}' is invalid: {e}", path.display()),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
