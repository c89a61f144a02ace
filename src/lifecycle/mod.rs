//! Runtime orchestration and lifecycle management.
//!
//! - [`TabemapSystem`] - Starts both contexts, wires them together, shuts them down
//! - [`config`] - YAML configuration with defaults for every field
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod tabemap_system;
pub mod tracing;

pub use config::{load_config, ConfigError, TabemapConfig};
pub use tabemap_system::*;
pub use self::tracing::setup_tracing;
