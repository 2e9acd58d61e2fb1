// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neural Types Module
//!
//! Core type definitions shared by the neural math and the engine.

pub mod error;
pub mod ids;
pub mod spatial;

pub use error::{NeuralError, Result};
pub use ids::{NeuronId, SynapseId};
pub use spatial::Coord3;

/// Simulated time in milliseconds.
///
/// Kept in double precision: the clock only grows, and the waveform and
/// trace formulas take differences of two large timestamps.
pub type SimTime = f64;
