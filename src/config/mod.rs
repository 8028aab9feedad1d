//! Configuration loading and management for the performance engine.
//!
//! This module loads company metadata, input clamping policy and the initial
//! employee roster from a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use performance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/acme").unwrap();
//! println!("Loaded company: {}", config.company().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CompanyMetadata, EngineConfig, FieldRange, InputLimits, PolicyConfig, RosterConfig,
};
