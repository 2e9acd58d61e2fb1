// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Synaptic weight clamping
//!
//! Excitatory weights live in `[0, 1]`, inhibitory weights in `[-1, 0]`.
//! Nothing in this module can move a weight across zero into the other class.

use super::contribution::SynapseType;

/// Clamp `weight` into the range of `class`
///
/// # Example
/// ```
/// use neuroweave_neural::synapse::{clamp_weight, SynapseType};
///
/// assert_eq!(clamp_weight(1.4, SynapseType::Excitatory), 1.0);
/// assert_eq!(clamp_weight(-0.2, SynapseType::Excitatory), 0.0);
/// assert_eq!(clamp_weight(0.3, SynapseType::Inhibitory), 0.0);
/// assert_eq!(clamp_weight(-3.0, SynapseType::Inhibitory), -1.0);
/// ```
#[inline]
pub fn clamp_weight(weight: f32, class: SynapseType) -> f32 {
    let (lo, hi) = class.weight_bounds();
    weight.clamp(lo, hi)
}

/// Apply a plasticity delta, clamping to the class range
#[inline]
pub fn apply_weight_change(weight: f32, delta: f32, class: SynapseType) -> f32 {
    clamp_weight(weight + delta, class)
}
