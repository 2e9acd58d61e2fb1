//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! within the ranges the simulation can honour.

use crate::{ConfigError, ConfigResult, NeuroweaveConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    NotPositive { field: &'static str, value: f64 },
    Negative { field: &'static str, value: f64 },
    OutOfRange { field: &'static str, value: f64, range: &'static str },
    InvalidValue { field: &'static str, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPositive { field, value } => {
                write!(f, "{} = {} must be positive", field, value)
            }
            Self::Negative { field, value } => {
                write!(f, "{} = {} must not be negative", field, value)
            }
            Self::OutOfRange {
                field,
                value,
                range,
            } => {
                write!(f, "{} = {} is outside {}", field, value, range)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation found
pub fn validate_config(config: &NeuroweaveConfig) -> ConfigResult<()> {
    let errors = collect_violations(config);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

/// Every violation in `config`, in section order
pub fn collect_violations(config: &NeuroweaveConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    validate_simulation(config, &mut errors);
    validate_neuron(config, &mut errors);
    validate_synapse(config, &mut errors);
    validate_plasticity(config, &mut errors);
    validate_placement_and_input(config, &mut errors);

    errors
}

fn positive(field: &'static str, value: f64, errors: &mut Vec<ConfigValidationError>) {
    if !(value > 0.0) || !value.is_finite() {
        errors.push(ConfigValidationError::NotPositive { field, value });
    }
}

fn non_negative(field: &'static str, value: f64, errors: &mut Vec<ConfigValidationError>) {
    if !(value >= 0.0) || !value.is_finite() {
        errors.push(ConfigValidationError::Negative { field, value });
    }
}

fn unit_interval(field: &'static str, value: f64, errors: &mut Vec<ConfigValidationError>) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(ConfigValidationError::OutOfRange {
            field,
            value,
            range: "[0, 1]",
        });
    }
}

fn validate_simulation(config: &NeuroweaveConfig, errors: &mut Vec<ConfigValidationError>) {
    let sim = &config.simulation;
    non_negative("simulation.run_speed", sim.run_speed, errors);
    non_negative("simulation.resync_latency", sim.resync_latency, errors);
    positive("telemetry.timeline_window", config.telemetry.timeline_window, errors);
}

fn validate_neuron(config: &NeuroweaveConfig, errors: &mut Vec<ConfigValidationError>) {
    let n = &config.neuron;

    if !(n.recharge_rate > 0.0 && n.recharge_rate <= 1.0) {
        errors.push(ConfigValidationError::OutOfRange {
            field: "neuron.recharge_rate",
            value: n.recharge_rate as f64,
            range: "(0, 1]",
        });
    }
    if !(n.threshold > n.baseline) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "neuron.threshold",
            reason: format!(
                "threshold {} must be above baseline {}",
                n.threshold, n.baseline
            ),
        });
    }

    positive("neuron.capacity", n.capacity as f64, errors);
    non_negative("neuron.refill_rate", n.refill_rate as f64, errors);
    unit_interval("neuron.initial_fill", n.initial_fill as f64, errors);
    non_negative("neuron.release_cost", n.release_cost as f64, errors);

    positive("neuron.height", n.height as f64, errors);
    positive("neuron.rise_width", n.rise_width as f64, errors);
    positive("neuron.fall_width", n.fall_width as f64, errors);
    non_negative("neuron.peak_offset", n.peak_offset as f64, errors);
    if n.trough_offset < n.peak_offset {
        errors.push(ConfigValidationError::InvalidValue {
            field: "neuron.trough_offset",
            reason: "must not precede peak_offset".to_string(),
        });
    }
    unit_interval(
        "neuron.afterhyperpolarization",
        n.afterhyperpolarization as f64,
        errors,
    );
    positive("neuron.refractory_cutoff", n.refractory_cutoff as f64, errors);
    positive("neuron.activity_unit", n.activity_unit, errors);
}

fn validate_synapse(config: &NeuroweaveConfig, errors: &mut Vec<ConfigValidationError>) {
    let s = &config.synapse;
    non_negative("synapse.conduction_delay", s.conduction_delay, errors);
    non_negative("synapse.gain", s.gain as f64, errors);
    positive("synapse.connectivity_radius", s.connectivity_radius as f64, errors);
    unit_interval("synapse.inhibitory_fraction", s.inhibitory_fraction, errors);
    unit_interval("synapse.initial_weight_min", s.initial_weight_min as f64, errors);
    unit_interval("synapse.initial_weight_max", s.initial_weight_max as f64, errors);
    if s.initial_weight_min > s.initial_weight_max {
        errors.push(ConfigValidationError::InvalidValue {
            field: "synapse.initial_weight_min",
            reason: format!(
                "{} exceeds initial_weight_max {}",
                s.initial_weight_min, s.initial_weight_max
            ),
        });
    }
}

fn validate_plasticity(config: &NeuroweaveConfig, errors: &mut Vec<ConfigValidationError>) {
    let p = &config.plasticity;
    non_negative("plasticity.learning_rate", p.learning_rate as f64, errors);
    positive("plasticity.tau_pre", p.tau_pre as f64, errors);
    positive("plasticity.tau_post", p.tau_post as f64, errors);
}

fn validate_placement_and_input(config: &NeuroweaveConfig, errors: &mut Vec<ConfigValidationError>) {
    positive("placement.density", config.placement.density as f64, errors);
    non_negative("input.default_radius", config.input.default_radius as f64, errors);
    if !config.input.kick.is_finite() {
        errors.push(ConfigValidationError::InvalidValue {
            field: "input.kick",
            reason: "must be finite".to_string(),
        });
    }
}
