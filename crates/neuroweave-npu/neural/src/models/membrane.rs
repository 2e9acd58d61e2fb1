// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Passive Membrane Model
//!
//! ```text
//! Passive relaxation over an elapsed interval Δ (ms):
//!     V(t+Δ) = (V(t) - V_base) × r^Δ + V_base
//!
//!     Where:
//!     - V_base = baseline (resting) potential
//!     - r      = recharge rate per ms, in (0, 1]
//!
//! Because r^(a+b) = r^a × r^b, relaxing over Δ in one call or in any
//! number of smaller calls gives the same potential.
//! ```

use crate::types::{NeuralError, Result, SimTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Membrane parameters shared by every neuron in a network
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MembraneParameters {
    /// Resting potential the membrane relaxes towards (mV)
    pub baseline: f32,

    /// Firing threshold (mV), strictly above baseline
    pub threshold: f32,

    /// Fraction of (V - baseline) retained per ms
    pub recharge_rate: f32,
}

impl MembraneParameters {
    pub fn new(baseline: f32, threshold: f32, recharge_rate: f32) -> Self {
        Self {
            baseline,
            threshold,
            recharge_rate,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.recharge_rate > 0.0 && self.recharge_rate <= 1.0) {
            return Err(NeuralError::invalid(
                "membrane",
                "recharge_rate",
                self.recharge_rate,
                "must be in (0, 1]",
            ));
        }
        if !(self.threshold > self.baseline) {
            return Err(NeuralError::invalid(
                "membrane",
                "threshold",
                self.threshold,
                "must be above baseline",
            ));
        }
        Ok(())
    }

    /// Distance from baseline to threshold (mV)
    #[inline]
    pub fn threshold_gap(&self) -> f32 {
        self.threshold - self.baseline
    }
}

impl Default for MembraneParameters {
    fn default() -> Self {
        Self {
            baseline: -70.0,
            threshold: -55.0,
            recharge_rate: 0.99,
        }
    }
}

/// Exponential relaxation of `potential` towards baseline over `dt` ms
#[inline]
pub fn passive_relaxation(potential: f32, params: &MembraneParameters, dt: SimTime) -> f32 {
    let retained = (params.recharge_rate as f64).powf(dt) as f32;
    (potential - params.baseline) * retained + params.baseline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relaxation_matches_closed_form() {
        let params = MembraneParameters::new(-70.0, -55.0, 0.9);
        let p0 = -40.0_f32;
        for dt in [0.0, 0.5, 1.0, 7.25, 100.0] {
            let expected = (p0 - -70.0) * 0.9_f64.powf(dt) as f32 + -70.0;
            let actual = passive_relaxation(p0, &params, dt);
            assert!((actual - expected).abs() < 1e-4, "dt={dt}");
        }
    }

    #[test]
    fn test_relaxation_is_split_invariant() {
        let params = MembraneParameters::default();
        let once = passive_relaxation(-20.0, &params, 10.0);
        let mut stepped = -20.0;
        for _ in 0..40 {
            stepped = passive_relaxation(stepped, &params, 0.25);
        }
        assert!((once - stepped).abs() < 1e-3);
    }

    #[test]
    fn test_baseline_is_fixed_point() {
        let params = MembraneParameters::default();
        assert_eq!(passive_relaxation(params.baseline, &params, 123.0), params.baseline);
    }

    #[test]
    fn test_validation() {
        assert!(MembraneParameters::default().validate().is_ok());
        assert!(MembraneParameters::new(-70.0, -55.0, 0.0).validate().is_err());
        assert!(MembraneParameters::new(-70.0, -55.0, 1.5).validate().is_err());
        assert!(MembraneParameters::new(-70.0, -80.0, 0.9).validate().is_err());
    }
}
