//! Configuration management
//!
//! Layered configuration (defaults, TOML file, environment) loaded with
//! Figment and validated before use.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, validate_app_config};
pub use types::*;
