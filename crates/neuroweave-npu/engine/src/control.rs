// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shared tuning knobs
//!
//! A [`SimulationControl`] is a cheap clonable handle. The network keeps one
//! clone and reads it on every tick; a driver or UI keeps another and writes
//! run speed, learning rate, pause and run-all through it. These are the only
//! non-structural mutations allowed from outside the engine.

use std::cell::Cell;
use std::rc::Rc;

use neuroweave_config::NeuroweaveConfig;
use tracing::{debug, warn};

#[derive(Debug)]
struct ControlState {
    run_speed: Cell<f64>,
    learning_rate: Cell<f32>,
    paused: Cell<bool>,
    run_all: Cell<bool>,
}

#[derive(Debug, Clone)]
pub struct SimulationControl {
    inner: Rc<ControlState>,
}

impl SimulationControl {
    pub fn new(run_speed: f64, learning_rate: f32, run_all: bool) -> Self {
        Self {
            inner: Rc::new(ControlState {
                run_speed: Cell::new(run_speed.max(0.0)),
                learning_rate: Cell::new(learning_rate.max(0.0)),
                paused: Cell::new(false),
                run_all: Cell::new(run_all),
            }),
        }
    }

    pub fn from_config(config: &NeuroweaveConfig) -> Self {
        Self::new(
            config.simulation.run_speed,
            config.plasticity.learning_rate,
            config.simulation.run_all,
        )
    }

    /// Simulated ms advanced per tick
    pub fn run_speed(&self) -> f64 {
        self.inner.run_speed.get()
    }

    /// Ignores negative and non-finite values
    pub fn set_run_speed(&self, ms_per_tick: f64) {
        if ms_per_tick.is_finite() && ms_per_tick >= 0.0 {
            debug!(target: "neuroweave-engine", "run speed -> {} ms/tick", ms_per_tick);
            self.inner.run_speed.set(ms_per_tick);
        } else {
            warn!(target: "neuroweave-engine", "ignoring run speed {}", ms_per_tick);
        }
    }

    pub fn learning_rate(&self) -> f32 {
        self.inner.learning_rate.get()
    }

    /// Ignores negative and non-finite values
    pub fn set_learning_rate(&self, rate: f32) {
        if rate.is_finite() && rate >= 0.0 {
            debug!(target: "neuroweave-engine", "learning rate -> {}", rate);
            self.inner.learning_rate.set(rate);
        } else {
            warn!(target: "neuroweave-engine", "ignoring learning rate {}", rate);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.inner.paused.get()
    }

    pub fn set_paused(&self, paused: bool) {
        self.inner.paused.set(paused);
    }

    /// Flip the pause flag; returns the new state
    pub fn toggle_pause(&self) -> bool {
        let paused = !self.inner.paused.get();
        self.inner.paused.set(paused);
        paused
    }

    pub fn run_all(&self) -> bool {
        self.inner.run_all.get()
    }

    pub fn set_run_all(&self, run_all: bool) {
        self.inner.run_all.set(run_all);
    }
}

impl Default for SimulationControl {
    fn default() -> Self {
        Self::from_config(&NeuroweaveConfig::default())
    }
}
