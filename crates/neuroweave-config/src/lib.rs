// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neuroweave Configuration System
//!
//! Type-safe configuration loader for Neuroweave with support for:
//! - TOML file parsing
//! - Environment variable overrides
//! - CLI argument overrides
//! - Range validation of every tunable
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neuroweave_config::{load_config, NeuroweaveConfig};
//!
//! // Load configuration with automatic file discovery and overrides
//! let config = load_config(None, None).expect("Failed to load config");
//!
//! println!("Membrane threshold: {}", config.neuron.threshold);
//! println!("Learning rate: {}", config.plasticity.learning_rate);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "std")]
pub mod loader;

pub mod types;
pub mod validation;

#[cfg(feature = "std")]
pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    load_config_or_default,
};

pub use types::*;
pub use validation::{collect_violations, validate_config, ConfigValidationError};

/// Re-export for convenience
pub use serde;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[cfg(feature = "std")]
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[cfg(feature = "std")]
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "std")]
    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(feature = "std")]
impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let config = NeuroweaveConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: NeuroweaveConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let parsed: NeuroweaveConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, NeuroweaveConfig::default());
        assert_eq!(parsed.neuron.resolved_initial_potential(), -70.0);
    }
}
