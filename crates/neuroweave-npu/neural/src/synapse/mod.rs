// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synaptic computation module
//!
//! Platform-agnostic synaptic algorithms: kernel integration and weight
//! clamping.

pub mod contribution;
pub mod weight;

pub use contribution::*;
pub use weight::*;
