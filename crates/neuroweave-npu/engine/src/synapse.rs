// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Runtime state of one directed synapse
//!
//! A synapse is owned by its parent's outgoing list. Its pending spike moves
//! through `None -> InFlight -> Live -> None`: accepted on a parent fire,
//! delivered after `length × conduction_delay`, and consumed by the target
//! once the kernel window has elapsed.

use neuroweave_neural::{NeuronId, PostsynapticKernel, SimTime, SynapseId, SynapseType};

/// Delivery state of the spike a synapse is carrying
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingSpike {
    None,
    InFlight {
        fired_at: SimTime,
        deliver_at: SimTime,
        kernel: PostsynapticKernel,
    },
    Live {
        arrived_at: SimTime,
        kernel: PostsynapticKernel,
    },
}

#[derive(Debug, Clone)]
pub struct Synapse {
    pub(crate) id: SynapseId,
    pub(crate) target: NeuronId,
    pub(crate) weight: f32,
    pub(crate) class: SynapseType,
    pub(crate) length: f32,
    pub(crate) pending: PendingSpike,
    pub(crate) last_arrival: Option<SimTime>,
}

impl Synapse {
    pub(crate) fn new(id: SynapseId, target: NeuronId, weight: f32, length: f32) -> Self {
        let class = SynapseType::from_weight(weight);
        Self {
            id,
            target,
            weight: neuroweave_neural::clamp_weight(weight, class),
            class,
            length,
            pending: PendingSpike::None,
            last_arrival: None,
        }
    }

    pub fn id(&self) -> SynapseId {
        self.id
    }

    pub fn target(&self) -> NeuronId {
        self.target
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Sign class fixed at creation
    pub fn class(&self) -> SynapseType {
        self.class
    }

    /// Endpoint distance at creation
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn pending(&self) -> &PendingSpike {
        &self.pending
    }

    pub fn last_arrival(&self) -> Option<SimTime> {
        self.last_arrival
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.pending, PendingSpike::None)
    }

    /// Conduction delay of this synapse for a given speed constant (ms per unit length)
    #[inline]
    pub fn delay(&self, conduction_delay: SimTime) -> SimTime {
        self.length as f64 * conduction_delay
    }

    /// Where the carried spike is, as `(pre, post)` fractions
    ///
    /// In flight the spike travels from `(1, 0)` at the parent to `(0, 1)` at
    /// the target. While live, `pre` is 0 and `post` counts down the part of
    /// the kernel window still to come. Idle synapses report `(0, 0)`.
    pub fn phase(&self, now: SimTime) -> (f32, f32) {
        match self.pending {
            PendingSpike::None => (0.0, 0.0),
            PendingSpike::InFlight {
                fired_at,
                deliver_at,
                ..
            } => {
                let span = deliver_at - fired_at;
                let p = if span > 0.0 {
                    ((now - fired_at) / span).clamp(0.0, 1.0) as f32
                } else {
                    1.0
                };
                (1.0 - p, p)
            }
            PendingSpike::Live { arrived_at, kernel } => {
                let remaining = if kernel.duration > 0.0 {
                    1.0 - ((now - arrived_at) / kernel.duration as f64).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                (0.0, remaining as f32)
            }
        }
    }
}
