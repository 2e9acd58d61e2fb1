// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Setup-time errors of the engine
//!
//! Only malformed configuration is reported through these types. Stale or
//! out-of-range neuron ids are programming errors and panic; duplicate
//! synapses and stale scheduler events are silent no-ops.

use neuroweave_config::ConfigError;
use neuroweave_neural::NeuralError;

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),

    #[error("neural parameter rejected: {0}")]
    Neural(#[from] NeuralError),

    #[error("input arrays disagree: {rates} rates but {other} {what}")]
    InputLengthMismatch {
        rates: usize,
        other: usize,
        what: &'static str,
    },

    #[error("input {index} radius {radius} must be finite and non-negative")]
    InvalidInputRadius { index: usize, radius: f32 },

    #[error("input {index} rate {rate} Hz must be finite and within [0, {max}]")]
    InvalidInputRate { index: usize, rate: f32, max: f32 },

    #[error("input {index} position {position} is not a finite coordinate")]
    InvalidInputPosition { index: usize, position: String },

    #[error("input index {index} out of range ({count} inputs bound)")]
    UnknownInput { index: usize, count: usize },

    #[error("voltage detector radius {radius} must be finite and non-negative")]
    InvalidDetectorRadius { radius: f32 },

    #[error("run budget {budget} ms must be finite and non-negative")]
    InvalidBudget { budget: f64 },

    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, NetworkError>;
