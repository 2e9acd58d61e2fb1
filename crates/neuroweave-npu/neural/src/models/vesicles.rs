// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Vesicle (neurotransmitter) resource pool
//!
//! A neuron may only fire while its pool is non-empty. Each fire releases a
//! fixed quantum; the pool refills linearly towards capacity.

use crate::types::{NeuralError, Result, SimTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VesiclePool {
    pub level: f32,
    pub capacity: f32,
    /// Refill per ms
    pub refill_rate: f32,
    /// Amount released by one fire
    pub release_cost: f32,
}

impl VesiclePool {
    /// Pool starting at `initial_fill` (fraction of capacity)
    pub fn new(capacity: f32, refill_rate: f32, initial_fill: f32, release_cost: f32) -> Self {
        Self {
            level: capacity * initial_fill.clamp(0.0, 1.0),
            capacity,
            refill_rate,
            release_cost,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.capacity > 0.0) {
            return Err(NeuralError::invalid(
                "vesicles",
                "capacity",
                self.capacity,
                "must be positive",
            ));
        }
        if self.refill_rate < 0.0 {
            return Err(NeuralError::invalid(
                "vesicles",
                "refill_rate",
                self.refill_rate,
                "must not be negative",
            ));
        }
        if self.release_cost < 0.0 {
            return Err(NeuralError::invalid(
                "vesicles",
                "release_cost",
                self.release_cost,
                "must not be negative",
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn has_resources(&self) -> bool {
        self.level > 0.0
    }

    /// Release one quantum (never below empty)
    #[inline]
    pub fn release(&mut self) {
        self.level = (self.level - self.release_cost).max(0.0);
    }

    /// Linear refill over `dt` ms, capped at capacity
    #[inline]
    pub fn refill(&mut self, dt: SimTime) {
        self.level = (self.level + self.refill_rate * dt as f32).min(self.capacity);
    }
}

impl Default for VesiclePool {
    fn default() -> Self {
        Self::new(5.0, 0.5, 0.75, 1.0)
    }
}
