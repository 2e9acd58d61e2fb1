// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, NeuroweaveConfig, PlacementShape};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name searched for by [`find_config_file`]
pub const CONFIG_FILE_NAME: &str = "neuroweave.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "NEUROWEAVE_CONFIG_PATH";

/// Find the Neuroweave configuration file
///
/// Search order:
/// 1. `NEUROWEAVE_CONFIG_PATH` environment variable
/// 2. Current working directory: `./neuroweave.toml`
/// 3. Parent directories (up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by {} not found: {}",
                CONFIG_PATH_ENV,
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Configuration file '{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeuroweaveConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: NeuroweaveConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    crate::validate_config(&config)?;
    Ok(config)
}

/// Like [`load_config`], but falls back to defaults (plus overrides) when no
/// file can be found
pub fn load_config_or_default(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeuroweaveConfig> {
    match load_config(config_path, cli_args) {
        Err(ConfigError::FileNotFound(_)) if config_path.is_none() => {
            let mut config = NeuroweaveConfig::default();
            apply_environment_overrides(&mut config);
            if let Some(cli) = cli_args {
                apply_cli_overrides(&mut config, cli);
            }
            crate::validate_config(&config)?;
            Ok(config)
        }
        other => other,
    }
}

fn parse_bool(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower == "true" || value == "1" || lower == "yes"
}

fn set_parsed<T: FromStr>(slot: &mut T, value: &str) {
    if let Ok(parsed) = value.parse::<T>() {
        *slot = parsed;
    }
}

/// Apply one override `key` (flat `section_field` naming) to `config`
///
/// Unknown keys and unparsable values are ignored. Returns whether the key
/// was recognised.
fn apply_override(config: &mut NeuroweaveConfig, key: &str, value: &str) -> bool {
    match key {
        // Simulation
        "initial_neurons" => set_parsed(&mut config.simulation.initial_neurons, value),
        "seed" => {
            if let Ok(seed) = value.parse::<u64>() {
                config.simulation.seed = Some(seed);
            }
        }
        "run_speed" => set_parsed(&mut config.simulation.run_speed, value),
        "run_all" => config.simulation.run_all = parse_bool(value),
        "resync_latency" => set_parsed(&mut config.simulation.resync_latency, value),

        // Neuron
        "baseline" => set_parsed(&mut config.neuron.baseline, value),
        "threshold" => set_parsed(&mut config.neuron.threshold, value),
        "recharge_rate" => set_parsed(&mut config.neuron.recharge_rate, value),
        "refractory_cutoff" => set_parsed(&mut config.neuron.refractory_cutoff, value),

        // Synapse
        "conduction_delay" => set_parsed(&mut config.synapse.conduction_delay, value),
        "gain" => set_parsed(&mut config.synapse.gain, value),
        "connectivity_radius" => set_parsed(&mut config.synapse.connectivity_radius, value),
        "inhibitory_fraction" => set_parsed(&mut config.synapse.inhibitory_fraction, value),

        // Plasticity
        "learning_rate" => set_parsed(&mut config.plasticity.learning_rate, value),
        "plasticity" => config.plasticity.enabled = parse_bool(value),
        "tau_pre" => set_parsed(&mut config.plasticity.tau_pre, value),
        "tau_post" => set_parsed(&mut config.plasticity.tau_post, value),

        // Placement
        "density" => set_parsed(&mut config.placement.density, value),
        "shape" => match value.to_lowercase().as_str() {
            "sphere" => config.placement.shape = PlacementShape::Sphere,
            "cube" => config.placement.shape = PlacementShape::Cube,
            _ => {}
        },

        // Input
        "input_kick" => set_parsed(&mut config.input.kick, value),
        "input_radius" => set_parsed(&mut config.input.default_radius, value),

        // Telemetry / logging
        "timeline_window" => set_parsed(&mut config.telemetry.timeline_window, value),
        "log_level" => config.logging.level = value.to_string(),

        _ => return false,
    }
    true
}

/// Apply environment variable overrides to configuration
///
/// Every key accepted by [`apply_cli_overrides`] is also read from the
/// environment as `NEUROWEAVE_<KEY>` in upper case, e.g.
/// - `NEUROWEAVE_SEED` -> `simulation.seed`
/// - `NEUROWEAVE_RUN_SPEED` -> `simulation.run_speed`
/// - `NEUROWEAVE_LEARNING_RATE` -> `plasticity.learning_rate`
/// - `NEUROWEAVE_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut NeuroweaveConfig) {
    for key in OVERRIDE_KEYS {
        let var = format!("NEUROWEAVE_{}", key.to_uppercase());
        if let Ok(value) = env::var(&var) {
            apply_override(config, key, &value);
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"seed": "7", "run_speed": "0.5"}`)
pub fn apply_cli_overrides(config: &mut NeuroweaveConfig, cli_args: &HashMap<String, String>) {
    for (key, value) in cli_args {
        apply_override(config, key, value);
    }
}

/// Keys understood by the override layers
pub const OVERRIDE_KEYS: &[&str] = &[
    "initial_neurons",
    "seed",
    "run_speed",
    "run_all",
    "resync_latency",
    "baseline",
    "threshold",
    "recharge_rate",
    "refractory_cutoff",
    "conduction_delay",
    "gain",
    "connectivity_radius",
    "inhibitory_fraction",
    "learning_rate",
    "plasticity",
    "tau_pre",
    "tau_post",
    "density",
    "shape",
    "input_kick",
    "input_radius",
    "timeline_window",
    "log_level",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var(CONFIG_PATH_ENV, config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var(CONFIG_PATH_ENV);

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("does_not_exist.toml");

        env::set_var(CONFIG_PATH_ENV, config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var(CONFIG_PATH_ENV);

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let saved_seed = env::var("NEUROWEAVE_SEED").ok();
        env::remove_var("NEUROWEAVE_SEED");
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[simulation]").unwrap();
        writeln!(file, "initial_neurons = 40").unwrap();
        writeln!(file, "seed = 11").unwrap();
        writeln!(file, "[placement]").unwrap();
        writeln!(file, "shape = \"cube\"").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.simulation.initial_neurons, 40);
        assert_eq!(config.simulation.seed, Some(11));
        assert_eq!(config.placement.shape, PlacementShape::Cube);
        // Untouched sections keep their defaults
        assert_eq!(config.plasticity.tau_pre, 16.8);

        if let Some(value) = saved_seed {
            env::set_var("NEUROWEAVE_SEED", value);
        }
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[simulation\nseed = ").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[neuron]\nrecharge_rate = 0.0\n").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = NeuroweaveConfig::default();

        env::set_var("NEUROWEAVE_LEARNING_RATE", "0.5");
        env::set_var("NEUROWEAVE_RUN_ALL", "yes");

        apply_environment_overrides(&mut config);

        env::remove_var("NEUROWEAVE_LEARNING_RATE");
        env::remove_var("NEUROWEAVE_RUN_ALL");

        assert_eq!(config.plasticity.learning_rate, 0.5);
        assert!(config.simulation.run_all);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = NeuroweaveConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("seed".to_string(), "99".to_string());
        cli_args.insert("run_speed".to_string(), "0.25".to_string());
        cli_args.insert("shape".to_string(), "CUBE".to_string());
        cli_args.insert("unknown".to_string(), "ignored".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.simulation.seed, Some(99));
        assert_eq!(config.simulation.run_speed, 0.25);
        assert_eq!(config.placement.shape, PlacementShape::Cube);
    }

    #[test]
    fn test_unparsable_override_is_ignored() {
        let mut config = NeuroweaveConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("tau_post".to_string(), "slow".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.plasticity.tau_post, 33.7);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        // CLI overrides take precedence over environment variables
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[simulation]").unwrap();
        writeln!(file, "seed = 1").unwrap();
        writeln!(file, "run_speed = 2.0").unwrap();

        env::set_var("NEUROWEAVE_SEED", "2");
        env::set_var("NEUROWEAVE_RUN_SPEED", "3.0");

        let mut cli_args = HashMap::new();
        cli_args.insert("seed".to_string(), "3".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("NEUROWEAVE_SEED");
        env::remove_var("NEUROWEAVE_RUN_SPEED");

        // CLI wins for seed, env wins for run speed (no CLI override)
        assert_eq!(config.simulation.seed, Some(3));
        assert_eq!(config.simulation.run_speed, 3.0);
    }

    #[test]
    fn test_every_override_key_is_recognised() {
        let mut config = NeuroweaveConfig::default();
        for key in OVERRIDE_KEYS {
            assert!(apply_override(&mut config, key, "1"), "{key}");
        }
    }
}
