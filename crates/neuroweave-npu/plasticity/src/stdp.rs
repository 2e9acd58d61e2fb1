/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Pure trace-based STDP computation
//!
//! ```text
//! pre  = exp(-(now - last_arrival) / τ_pre)     (0 if nothing ever arrived)
//! post = exp(-(now - last_fire)    / τ_post)    (0 if the target never fired)
//!
//! Δw = learning_rate × (post - pre)
//! ```
//!
//! When the target fired recently relative to the last arrival the
//! postsynaptic trace dominates and the weight grows; otherwise it shrinks.
//! The result is clamped to the synapse's sign class.

use neuroweave_neural::{apply_weight_change, SimTime, SynapseType};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Errors raised while validating plasticity parameters
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlasticityError {
    #[error("STDP time constant `{name}` must be positive, got {value}")]
    InvalidTimeConstant { name: &'static str, value: f32 },
}

/// STDP configuration parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StdpConfig {
    /// Presynaptic trace decay constant (τ_pre, ms)
    pub tau_pre: f32,
    /// Postsynaptic trace decay constant (τ_post, ms)
    pub tau_post: f32,
}

impl Default for StdpConfig {
    fn default() -> Self {
        Self {
            tau_pre: 16.8,
            tau_post: 33.7,
        }
    }
}

impl StdpConfig {
    pub fn validate(&self) -> Result<(), PlasticityError> {
        for (name, value) in [("tau_pre", self.tau_pre), ("tau_post", self.tau_post)] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(PlasticityError::InvalidTimeConstant { name, value });
            }
        }
        Ok(())
    }
}

#[inline]
fn trace_since(now: SimTime, stamp: Option<SimTime>, tau: f32) -> f32 {
    match stamp {
        Some(at) => (-(now - at) / tau as f64).exp() as f32,
        None => 0.0,
    }
}

/// Presynaptic trace at `now` given the last spike arrival on the synapse
#[inline]
pub fn presynaptic_trace(now: SimTime, last_arrival: Option<SimTime>, config: &StdpConfig) -> f32 {
    trace_since(now, last_arrival, config.tau_pre)
}

/// Postsynaptic trace at `now` given the target's last fire
#[inline]
pub fn postsynaptic_trace(now: SimTime, last_fire: Option<SimTime>, config: &StdpConfig) -> f32 {
    trace_since(now, last_fire, config.tau_post)
}

/// Weight change for one update
///
/// # Example
/// ```
/// use neuroweave_plasticity::compute_weight_change;
///
/// // Target fired more recently than the spike arrived: potentiation
/// assert!(compute_weight_change(0.02, 0.9, 0.3) > 0.0);
///
/// // Arrival dominates: depression
/// assert!(compute_weight_change(0.02, 0.1, 1.0) < 0.0);
/// ```
#[inline]
pub fn compute_weight_change(learning_rate: f32, post_trace: f32, pre_trace: f32) -> f32 {
    learning_rate * (post_trace - pre_trace)
}

/// Full STDP update of a synaptic weight at `now`
///
/// Returns the new weight, clamped to `[0, 1]` for excitatory and `[-1, 0]`
/// for inhibitory synapses.
///
/// # Example
/// ```
/// use neuroweave_neural::SynapseType;
/// use neuroweave_plasticity::{update_weight, StdpConfig};
///
/// let config = StdpConfig::default();
///
/// // Spike just arrived, target fired long ago: the weight shrinks
/// let w = update_weight(0.5, SynapseType::Excitatory, 100.0, Some(100.0), Some(10.0), 0.02, &config);
/// assert!(w < 0.5);
/// ```
pub fn update_weight(
    weight: f32,
    class: SynapseType,
    now: SimTime,
    last_arrival: Option<SimTime>,
    target_last_fire: Option<SimTime>,
    learning_rate: f32,
    config: &StdpConfig,
) -> f32 {
    let pre = presynaptic_trace(now, last_arrival, config);
    let post = postsynaptic_trace(now, target_last_fire, config);
    let delta = compute_weight_change(learning_rate, post, pre);
    let updated = apply_weight_change(weight, delta, class);
    trace!(
        target: "neuroweave-plasticity",
        "[STDP] t={:.3} pre={:.4} post={:.4} dw={:+.5} w: {:.4} -> {:.4}",
        now,
        pre,
        post,
        delta,
        weight,
        updated
    );
    updated
}
