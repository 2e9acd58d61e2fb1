// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Neuron models
//!
//! Each model is a set of parameters plus closed-form functions of elapsed
//! time, so the engine can jump from one resynchronisation to the next
//! without stepping.

pub mod action_potential;
pub mod membrane;
pub mod vesicles;

pub use action_potential::ActionPotentialShape;
pub use membrane::{passive_relaxation, MembraneParameters};
pub use vesicles::VesiclePool;
