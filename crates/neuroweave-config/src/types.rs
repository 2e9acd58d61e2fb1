// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `neuroweave.toml`. Every section is `#[serde(default)]`, so a file only
//! needs to name the values it changes.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuroweaveConfig {
    pub simulation: SimulationConfig,
    pub neuron: NeuronConfig,
    pub synapse: SynapseConfig,
    pub plasticity: PlasticityConfig,
    pub placement: PlacementConfig,
    pub input: InputConfig,
    pub telemetry: TelemetryConfig,
    pub logging: LoggingConfig,
}

/// Scheduler and driving-loop configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Neurons placed at construction
    pub initial_neurons: usize,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Simulated ms advanced per `tick()`
    pub run_speed: f64,
    /// Resynchronise every live neuron at the end of each budget
    pub run_all: bool,
    /// Delay before the follow-up resynchronisation of a kicked neuron (ms)
    pub resync_latency: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_neurons: 0,
            seed: None,
            run_speed: 1.0,
            run_all: false,
            resync_latency: 0.1,
        }
    }
}

/// Membrane, vesicle and action-potential parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuronConfig {
    pub baseline: f32,
    pub threshold: f32,
    /// Fraction of (V - baseline) retained per ms
    pub recharge_rate: f32,
    /// Potential of a freshly created neuron; `None` means baseline
    pub initial_potential: Option<f32>,

    // Vesicle pool
    pub capacity: f32,
    pub refill_rate: f32,
    pub initial_fill: f32,
    pub release_cost: f32,

    // Action-potential waveform
    pub height: f32,
    pub rise_width: f32,
    pub fall_width: f32,
    pub peak_offset: f32,
    pub trough_offset: f32,
    pub afterhyperpolarization: f32,
    pub refractory_cutoff: f32,

    /// Activity is reported as fires per `activity_unit` ms
    pub activity_unit: f64,
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            baseline: -70.0,
            threshold: -55.0,
            recharge_rate: 0.99,
            initial_potential: None,
            capacity: 5.0,
            refill_rate: 0.5,
            initial_fill: 0.75,
            release_cost: 1.0,
            height: 100.0,
            rise_width: 0.5,
            fall_width: 1.5,
            peak_offset: 1.0,
            trough_offset: 2.5,
            afterhyperpolarization: 0.15,
            refractory_cutoff: 4.0,
            activity_unit: 1000.0,
        }
    }
}

impl NeuronConfig {
    /// Initial potential with the baseline fallback applied
    pub fn resolved_initial_potential(&self) -> f32 {
        self.initial_potential.unwrap_or(self.baseline)
    }
}

/// Synapse geometry, gain and random-wiring configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SynapseConfig {
    /// Conduction delay per unit of synapse length (ms)
    pub conduction_delay: f64,
    /// Kernel amplitude per unit weight (mV/ms)
    pub gain: f32,
    /// Pairs closer than this are wired by `make_connections`
    pub connectivity_radius: f32,
    /// Probability that a randomly wired synapse is inhibitory
    pub inhibitory_fraction: f64,
    pub initial_weight_min: f32,
    pub initial_weight_max: f32,
}

impl Default for SynapseConfig {
    fn default() -> Self {
        Self {
            conduction_delay: 6.0,
            gain: 6.0,
            connectivity_radius: 1.0,
            inhibitory_fraction: 0.2,
            initial_weight_min: 0.1,
            initial_weight_max: 0.6,
        }
    }
}

/// STDP configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlasticityConfig {
    pub enabled: bool,
    pub learning_rate: f32,
    pub tau_pre: f32,
    pub tau_post: f32,
}

impl Default for PlasticityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            learning_rate: 0.02,
            tau_pre: 16.8,
            tau_post: 33.7,
        }
    }
}

/// Region shape used for random neuron placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementShape {
    #[default]
    Sphere,
    Cube,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub shape: PlacementShape,
    /// Neurons per unit volume
    pub density: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            shape: PlacementShape::Sphere,
            density: 8.0,
        }
    }
}

/// Frequency-driven input adapter configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// Potential added to every neuron inside an input's radius per input event (mV)
    pub kick: f32,
    /// Radius used when the caller passes none
    pub default_radius: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            kick: 20.0,
            default_radius: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Simulated ms of history kept per selected neuron
    pub timeline_window: f64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            timeline_window: 2000.0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
