// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Neuroweave Plasticity Module
//!
//! Trace-based STDP for event-driven networks:
//! - no spike history is stored; the time since the last presynaptic arrival
//!   and the time since the last postsynaptic fire are the whole state
//! - the weight change is the difference between two exponential traces
//! - the sign class a synapse was created with is never crossed
//!
//! ## Architecture
//! - Pure functions of (now, timestamps, config)
//! - No allocation, no scheduling
//! - The engine calls [`update_weight`] on every delivery and on every
//!   postsynaptic fire

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod stdp;

pub use stdp::{
    compute_weight_change, postsynaptic_trace, presynaptic_trace, update_weight,
    PlasticityError, StdpConfig,
};
