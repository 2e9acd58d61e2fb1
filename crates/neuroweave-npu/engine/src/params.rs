// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Resolved runtime parameters
//!
//! Built once from a validated [`NeuroweaveConfig`]. Everything the dynamics
//! read on the hot path is copied in here in the numeric types the neural
//! models expect.

use neuroweave_config::{validate_config, NeuroweaveConfig, PlacementShape};
use neuroweave_neural::{ActionPotentialShape, MembraneParameters, SimTime, VesiclePool};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkParameters {
    pub membrane: MembraneParameters,
    pub action_potential: ActionPotentialShape,
    /// Template copied into every new neuron
    pub vesicles: VesiclePool,
    pub initial_potential: f32,
    /// Activity is reported as fires per this many ms
    pub activity_unit: SimTime,

    /// ms of delay per unit of synapse length
    pub conduction_delay: SimTime,
    pub gain: f32,
    pub connectivity_radius: f32,
    pub inhibitory_fraction: f64,
    pub initial_weight_range: (f32, f32),

    pub plasticity_enabled: bool,
    pub tau_pre: f32,
    pub tau_post: f32,

    pub placement_shape: PlacementShape,
    pub placement_density: f32,

    pub input_kick: f32,
    pub default_input_radius: f32,
    /// Delay of the follow-up resync after an injected kick
    pub resync_latency: SimTime,

    pub timeline_window: SimTime,
}

impl NetworkParameters {
    pub fn from_config(config: &NeuroweaveConfig) -> Result<Self> {
        validate_config(config)?;

        let n = &config.neuron;
        let membrane = MembraneParameters::new(n.baseline, n.threshold, n.recharge_rate);
        membrane.validate()?;

        let action_potential = ActionPotentialShape {
            height: n.height,
            rise_width: n.rise_width,
            fall_width: n.fall_width,
            peak_offset: n.peak_offset,
            trough_offset: n.trough_offset,
            afterhyperpolarization: n.afterhyperpolarization,
            refractory_cutoff: n.refractory_cutoff,
        };
        action_potential.validate()?;

        let vesicles = VesiclePool::new(n.capacity, n.refill_rate, n.initial_fill, n.release_cost);
        vesicles.validate()?;

        let s = &config.synapse;
        Ok(Self {
            membrane,
            action_potential,
            vesicles,
            initial_potential: n.resolved_initial_potential(),
            activity_unit: n.activity_unit,
            conduction_delay: s.conduction_delay,
            gain: s.gain,
            connectivity_radius: s.connectivity_radius,
            inhibitory_fraction: s.inhibitory_fraction,
            initial_weight_range: (s.initial_weight_min, s.initial_weight_max),
            plasticity_enabled: config.plasticity.enabled,
            tau_pre: config.plasticity.tau_pre,
            tau_post: config.plasticity.tau_post,
            placement_shape: config.placement.shape,
            placement_density: config.placement.density,
            input_kick: config.input.kick,
            default_input_radius: config.input.default_radius,
            resync_latency: config.simulation.resync_latency,
            timeline_window: config.telemetry.timeline_window,
        })
    }

    #[cfg(feature = "plasticity")]
    pub(crate) fn stdp(&self) -> neuroweave_plasticity::StdpConfig {
        neuroweave_plasticity::StdpConfig {
            tau_pre: self.tau_pre,
            tau_post: self.tau_post,
        }
    }
}
