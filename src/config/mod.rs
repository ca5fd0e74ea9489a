//! Configuration loading and management for the rota engine.
//!
//! This module loads the admin-configured catalogs from YAML files: the
//! segment catalog, the adjustment rules, and the groups and roles.
//!
//! # Example
//!
//! ```no_run
//! use rota_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("{} adjustment rules", loader.config().rules().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{OrganizationConfig, RotaConfig, RulesConfig, SegmentsConfig};
