//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the rota
//! catalogs from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Group, Role, SegmentDefinition, SegmentName};

use super::types::{OrganizationConfig, RotaConfig, RulesConfig, SegmentsConfig};

/// Loads and provides access to the rota catalogs.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── segments.yaml      # Segment catalog: nominal windows and order
/// ├── rules.yaml         # Adjustment rules
/// └── organization.yaml  # Groups and roles
/// ```
///
/// # Example
///
/// ```no_run
/// use rota_engine::config::ConfigLoader;
/// use rota_engine::models::SegmentName;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let early = loader.segment(&SegmentName::Early).unwrap();
/// println!("Early starts at {}", early.start);
/// # Ok::<(), rota_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RotaConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing ([`EngineError::ConfigNotFound`])
    /// - Any file contains invalid YAML ([`EngineError::ConfigParseError`])
    /// - The catalogs are inconsistent ([`EngineError::InvalidConfig`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let segments = Self::load_yaml::<SegmentsConfig>(&path.join("segments.yaml"))?;
        let rules = Self::load_yaml::<RulesConfig>(&path.join("rules.yaml"))?;
        let organization = Self::load_yaml::<OrganizationConfig>(&path.join("organization.yaml"))?;

        let config = RotaConfig::new(
            segments.segments,
            rules.rules,
            organization.groups,
            organization.roles,
        )?;

        info!(
            path = %path.display(),
            rules = config.rules().len(),
            roles = config.roles().len(),
            "Loaded rota configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: RotaConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &RotaConfig {
        &self.config
    }

    /// Gets a segment catalog entry.
    pub fn segment(&self, name: &SegmentName) -> Option<&SegmentDefinition> {
        self.config.segment(name)
    }

    /// Gets a role by id.
    pub fn role(&self, id: &str) -> Option<&Role> {
        self.config.role(id)
    }

    /// Gets a group by id.
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.config.group(id)
    }
}
