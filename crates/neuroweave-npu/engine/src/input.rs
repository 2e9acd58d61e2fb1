// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
External input and readout adapters.

An [`InputAdapter`] turns a firing rate (Hz) into a spike train: each input
event kicks every live neuron inside its sphere. Rates come from a shared
[`InputRates`] handle that the caller keeps and mutates between ticks; the
network reads it at the start of every `run()`.

A [`VoltageDetector`] is the readout counterpart: the mean membrane potential
of the neurons inside a probe sphere.
*/

use std::cell::RefCell;
use std::rc::Rc;

use neuroweave_neural::{Coord3, NeuronId, SimTime};

/// Highest rate an input is driven at (one event per 0.1 ms)
pub const MAX_INPUT_RATE_HZ: f32 = 10_000.0;

/// Caller-owned, live-mutable input rates in Hz
#[derive(Debug, Clone, Default)]
pub struct InputRates(Rc<RefCell<Vec<f32>>>);

impl InputRates {
    pub fn new(rates: Vec<f32>) -> Self {
        Self(Rc::new(RefCell::new(rates)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Rate of input `index`; 0 when out of range
    pub fn get(&self, index: usize) -> f32 {
        self.0.borrow().get(index).copied().unwrap_or(0.0)
    }

    /// Set the rate of an existing input; returns false when out of range
    pub fn set(&self, index: usize, hz: f32) -> bool {
        match self.0.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = hz;
                true
            }
            None => false,
        }
    }

    /// Mutate every rate at once
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Vec<f32>) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    pub fn snapshot(&self) -> Vec<f32> {
        self.0.borrow().clone()
    }
}

impl From<Vec<f32>> for InputRates {
    fn from(rates: Vec<f32>) -> Self {
        Self::new(rates)
    }
}

/// Frequency-driven spike injector tied to a spatial region
#[derive(Debug, Clone)]
pub struct InputAdapter {
    pub(crate) position: Coord3,
    pub(crate) radius: f32,
    /// ms elapsed since the last scheduled event
    pub(crate) phase: SimTime,
    pub(crate) enabled: bool,
    pub(crate) last_fire: Option<SimTime>,
    /// Live neurons inside the sphere, ascending slot order
    pub(crate) members: Vec<NeuronId>,
    pub(crate) fire_count: u64,
}

impl InputAdapter {
    pub(crate) fn new(position: Coord3, radius: f32) -> Self {
        Self {
            position,
            radius,
            phase: 0.0,
            enabled: true,
            last_fire: None,
            members: Vec::new(),
            fire_count: 0,
        }
    }

    pub fn position(&self) -> Coord3 {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn last_fire(&self) -> Option<SimTime> {
        self.last_fire
    }

    pub fn fire_count(&self) -> u64 {
        self.fire_count
    }

    pub fn members(&self) -> &[NeuronId] {
        &self.members
    }

    /// Offsets (from now) of the events due within `budget` at `rate_hz`
    ///
    /// Advances the phase counter so that consecutive budgets produce an
    /// evenly spaced train regardless of how time is sliced. Rates above
    /// [`MAX_INPUT_RATE_HZ`] are planned at that maximum.
    pub(crate) fn plan(&mut self, rate_hz: f32, budget: SimTime) -> Vec<SimTime> {
        if !self.enabled || !rate_hz.is_finite() || rate_hz <= 0.0 {
            self.phase += budget;
            return Vec::new();
        }
        let period = 1000.0 / rate_hz.min(MAX_INPUT_RATE_HZ) as f64;
        let first = (period - self.phase).max(0.0);
        if first > budget {
            self.phase += budget;
            return Vec::new();
        }
        let count = ((budget - first) / period).floor() as usize + 1;
        let offsets: Vec<SimTime> = (0..count).map(|k| first + k as f64 * period).collect();
        self.phase = budget - offsets[count - 1];
        offsets
    }
}

/// Mean-potential probe over a sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageDetector {
    pub position: Coord3,
    pub radius: f32,
}

impl VoltageDetector {
    pub fn new(position: Coord3, radius: f32) -> Self {
        Self { position, radius }
    }

    #[inline]
    pub(crate) fn covers(&self, point: &Coord3) -> bool {
        point.is_set() && point.distance_squared(&self.position) < self.radius * self.radius
    }
}
