// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Synaptic contribution calculation
//!
//! A delivered spike injects current into its target for a bounded window
//! after arrival. The current follows an exponential kernel:
//!
//! ```text
//! i(s) = A × e^(-s/τ)          for 0 ≤ s ≤ D   (s = t - arrival)
//!
//! ∫ i(s) ds over [s0, s1] = A × τ × (e^(-s0/τ) - e^(-s1/τ))
//! ```
//!
//! The engine asks for the integral over the interval between two
//! resynchronisations of the target, clipped to the kernel's window, so the
//! depolarisation a spike delivers does not depend on how often the target
//! is resynchronised.

use crate::models::ActionPotentialShape;
use crate::types::SimTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Synapse type (excitatory or inhibitory), fixed at creation by the sign of
/// the initial weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SynapseType {
    Excitatory = 0,
    Inhibitory = 1,
}

impl SynapseType {
    /// Sign class of a weight; exactly zero counts as excitatory
    #[inline]
    pub fn from_weight(weight: f32) -> Self {
        if weight < 0.0 {
            SynapseType::Inhibitory
        } else {
            SynapseType::Excitatory
        }
    }

    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            SynapseType::Excitatory => 1.0,
            SynapseType::Inhibitory => -1.0,
        }
    }

    /// Inclusive weight range of this sign class
    #[inline]
    pub fn weight_bounds(&self) -> (f32, f32) {
        match self {
            SynapseType::Excitatory => (0.0, 1.0),
            SynapseType::Inhibitory => (-1.0, 0.0),
        }
    }
}

/// Parent waveform captured by a synapse when it accepts a spike, re-scaled
/// by the synapse's weight and gain
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PostsynapticKernel {
    /// Peak current at arrival (mV per ms, signed)
    pub amplitude: f32,
    /// Exponential decay constant (ms)
    pub decay: f32,
    /// Length of the contribution window (ms)
    pub duration: f32,
}

impl PostsynapticKernel {
    /// Spike height the gain is calibrated against (mV)
    pub const REFERENCE_SPIKE_HEIGHT: f32 = 100.0;

    pub fn from_action_potential(shape: &ActionPotentialShape, weight: f32, gain: f32) -> Self {
        Self {
            amplitude: weight * gain * shape.height / Self::REFERENCE_SPIKE_HEIGHT,
            decay: shape.fall_width,
            duration: shape.refractory_cutoff,
        }
    }

    /// Whole-window depolarisation of one delivered spike (mV)
    pub fn total(&self) -> f32 {
        self.amplitude * self.decay * (1.0 - (-self.duration / self.decay).exp())
    }

    /// True once the window that started at `arrival` has fully elapsed by `now`
    #[inline]
    pub fn is_exhausted(&self, arrival: SimTime, now: SimTime) -> bool {
        now >= arrival + self.duration as f64
    }
}

/// Integral of `kernel` (arrived at `arrival`) over `[from, to]`
///
/// # Example
/// ```
/// use neuroweave_neural::synapse::{integrate_kernel, PostsynapticKernel};
///
/// let kernel = PostsynapticKernel { amplitude: 2.0, decay: 1.0, duration: 4.0 };
///
/// // Nothing before arrival
/// assert_eq!(integrate_kernel(&kernel, 10.0, 0.0, 10.0), 0.0);
///
/// // Split windows add up to the whole
/// let a = integrate_kernel(&kernel, 10.0, 9.0, 11.5);
/// let b = integrate_kernel(&kernel, 10.0, 11.5, 20.0);
/// assert!((a + b - kernel.total()).abs() < 1e-5);
/// ```
#[inline]
pub fn integrate_kernel(
    kernel: &PostsynapticKernel,
    arrival: SimTime,
    from: SimTime,
    to: SimTime,
) -> f32 {
    let lo = from.max(arrival);
    let hi = to.min(arrival + kernel.duration as f64);
    if hi <= lo {
        return 0.0;
    }
    let tau = kernel.decay as f64;
    let s0 = lo - arrival;
    let s1 = hi - arrival;
    (kernel.amplitude as f64 * tau * ((-s0 / tau).exp() - (-s1 / tau).exp())) as f32
}
