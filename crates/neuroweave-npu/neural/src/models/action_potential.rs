// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Action Potential Waveform
//!
//! For `τ = t - last_fire` inside the refractory window `[0, cutoff]` the
//! membrane potential is not integrated but synthesised:
//!
//! ```text
//! V(τ) = V_base + pull(τ) + H × g(τ; o1, w1) - a × H × g(τ; o2, w2)
//!
//!     g(τ; o, w) = exp(-((τ - o) / w)²)          Gaussian pulse
//!     pull(τ)    = (V_thr - V_base)              for τ ≤ o1
//!                = (V_thr - V_base) × e^-(τ-o1)/w1  after the peak
//!
//!     Where:
//!     - H  = height of the spike above the pulled level
//!     - o1, w1 = peak offset / rise width of the depolarising pulse
//!     - o2, w2 = trough offset / fall width of the afterhyperpolarisation
//!     - a  = afterhyperpolarisation depth as a fraction of H
//! ```
//!
//! `V(τ)` depends on `τ` only, so the visible trajectory is the same however
//! often the neuron happens to be resynchronised during the window.

use super::membrane::MembraneParameters;
use crate::types::{NeuralError, Result, SimTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stereotyped action-potential shape parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionPotentialShape {
    /// Peak height of the depolarising pulse (mV)
    pub height: f32,

    /// Width of the depolarising pulse (ms)
    pub rise_width: f32,

    /// Width of the afterhyperpolarising pulse (ms)
    pub fall_width: f32,

    /// Time from fire to spike peak (ms)
    pub peak_offset: f32,

    /// Time from fire to afterhyperpolarisation trough (ms)
    pub trough_offset: f32,

    /// Trough depth as a fraction of `height`
    pub afterhyperpolarization: f32,

    /// Length of the shaping/refractory window (ms)
    pub refractory_cutoff: f32,
}

impl ActionPotentialShape {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("height", self.height),
            ("rise_width", self.rise_width),
            ("fall_width", self.fall_width),
            ("refractory_cutoff", self.refractory_cutoff),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(NeuralError::invalid(
                    "action_potential",
                    name,
                    value,
                    "must be positive",
                ));
            }
        }
        if self.peak_offset < 0.0 {
            return Err(NeuralError::invalid(
                "action_potential",
                "peak_offset",
                self.peak_offset,
                "must not be negative",
            ));
        }
        if self.trough_offset < self.peak_offset {
            return Err(NeuralError::invalid(
                "action_potential",
                "trough_offset",
                self.trough_offset,
                "must not precede the peak",
            ));
        }
        if !(0.0..=1.0).contains(&self.afterhyperpolarization) {
            return Err(NeuralError::invalid(
                "action_potential",
                "afterhyperpolarization",
                self.afterhyperpolarization,
                "must be in [0, 1]",
            ));
        }
        Ok(())
    }

    /// True while `elapsed` ms after a fire lies in the shaping window
    #[inline]
    pub fn in_window(&self, elapsed: SimTime) -> bool {
        elapsed >= 0.0 && elapsed <= self.refractory_cutoff as f64
    }

    /// Synthesised membrane potential `elapsed` ms after firing
    pub fn waveform(&self, elapsed: SimTime, membrane: &MembraneParameters) -> f32 {
        let tau = elapsed as f32;
        let gap = membrane.threshold_gap();
        let pull = if tau <= self.peak_offset {
            gap
        } else {
            gap * (-(tau - self.peak_offset) / self.rise_width).exp()
        };
        let spike = self.height * gaussian(tau, self.peak_offset, self.rise_width);
        let trough = self.afterhyperpolarization
            * self.height
            * gaussian(tau, self.trough_offset, self.fall_width);
        membrane.baseline + pull + spike - trough
    }
}

impl Default for ActionPotentialShape {
    fn default() -> Self {
        Self {
            height: 100.0,
            rise_width: 0.5,
            fall_width: 1.5,
            peak_offset: 1.0,
            trough_offset: 2.5,
            afterhyperpolarization: 0.15,
            refractory_cutoff: 4.0,
        }
    }
}

#[inline(always)]
fn gaussian(t: f32, center: f32, width: f32) -> f32 {
    let z = (t - center) / width;
    (-z * z).exp()
}
