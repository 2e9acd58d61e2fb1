// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Neuroweave Neural Computation (Platform-Agnostic)
//!
//! All closed-form neural math in one place:
//! - **Types**: identities (`NeuronId`, `SynapseId`), 3-D coordinates, errors
//! - **Models**: passive membrane relaxation, action-potential waveform,
//!   vesicle resource pool
//! - **Synapse**: postsynaptic kernel integral, sign class, weight clamping
//!
//! Nothing in this crate schedules, stores or owns neurons. The engine crate
//! calls these functions with the elapsed interval between two
//! resynchronisations, so every formula here must give the same answer no
//! matter how that interval is split.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core type definitions
pub mod types;

// Neuron models
pub mod models;

// Synaptic algorithms
pub mod synapse;

// Re-export types
pub use types::{Coord3, NeuralError, NeuronId, Result, SimTime, SynapseId};

// Re-export synapse module
pub use synapse::{
    apply_weight_change, clamp_weight, integrate_kernel, PostsynapticKernel, SynapseType,
};

// Re-export neuron models
pub use models::{passive_relaxation, ActionPotentialShape, MembraneParameters, VesiclePool};
