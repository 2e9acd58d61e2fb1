// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for neural parameter validation

/// Error types for neural model operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NeuralError {
    #[error("Invalid {model} parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        model: &'static str,
        name: &'static str,
        value: f32,
        reason: &'static str,
    },
}

impl NeuralError {
    pub(crate) fn invalid(
        model: &'static str,
        name: &'static str,
        value: f32,
        reason: &'static str,
    ) -> Self {
        NeuralError::InvalidParameter {
            model,
            name,
            value,
            reason,
        }
    }
}

pub type Result<T> = core::result::Result<T, NeuralError>;
