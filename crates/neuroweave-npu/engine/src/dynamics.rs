// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Event Dynamics
//!
//! Everything that happens while the scheduler drains: neuron
//! resynchronisation, firing, spike delivery, input events and plasticity.
//!
//! ## Resynchronisation
//! A neuron is only touched when an event names it. On each visit it
//! integrates the live postsynaptic kernels of its incoming synapses over the
//! interval since its previous visit, relaxes towards baseline, checks the
//! firing condition, overwrites its potential with the action-potential
//! waveform while inside the shaping window, refills vesicles and updates its
//! activity. All of these are closed-form in the elapsed interval.
//!
//! ## Delivery
//! A fire puts every idle outgoing synapse in flight and queues its delivery
//! after `length × conduction_delay`. Delivery makes the kernel live and
//! queues the target at arrival, at one decay constant, and at the end of the
//! kernel window, where the kernel is consumed.

use neuroweave_neural::{integrate_kernel, passive_relaxation, NeuronId, PostsynapticKernel, SimTime, SynapseId};
use tracing::trace;

use crate::error::{NetworkError, Result};
use crate::network::Network;
use crate::scheduler::{Event, Schedulable};
use crate::synapse::PendingSpike;
use crate::telemetry::NeuronSnapshot;

impl Network {
    /// Advance simulated time by `budget` ms
    ///
    /// Applies queued direction flips, schedules the input events due in the
    /// budget, drains every event up to `now + budget` and snaps the clock to
    /// that target even if the queue ran dry earlier.
    pub fn run(&mut self, budget: SimTime) -> Result<()> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(NetworkError::InvalidBudget { budget });
        }

        self.apply_flips();
        if self.topology_dirty {
            self.refresh_input_membership();
        }
        self.drive_inputs(budget);

        let target = self.scheduler.now() + budget;
        self.drain(target);
        self.scheduler.finish(target);

        if self.control.run_all() {
            let ids: Vec<NeuronId> = self.neuron_ids().collect();
            for id in ids {
                self.scheduler.schedule(Schedulable::Neuron(id), 0.0);
            }
            self.drain(target);
        }

        self.record_snapshots();
        Ok(())
    }

    /// One tick of `control.run_speed()` ms; false while paused
    pub fn tick(&mut self) -> Result<bool> {
        if self.control.is_paused() {
            return Ok(false);
        }
        let budget = self.control.run_speed();
        self.run(budget)?;
        Ok(true)
    }

    fn drain(&mut self, target: SimTime) {
        while let Some(event) = self.scheduler.pop_due(target) {
            self.execute(event);
        }
    }

    fn execute(&mut self, event: Event) {
        match event.entity {
            Schedulable::Neuron(id) => match self.live_index(id) {
                Some(idx) => self.resync(idx),
                None => trace!(target: "neuroweave-engine", "Skipping stale event for {}", id),
            },
            Schedulable::Synapse {
                parent,
                target,
                serial,
            } => self.deliver(parent, target, serial),
            Schedulable::Input(index) => self.fire_input(index),
        }
    }

    fn drive_inputs(&mut self, budget: SimTime) {
        let Some(rates) = self.input_rates.clone() else {
            return;
        };
        for index in 0..self.inputs.len() {
            let rate = rates.get(index);
            for offset in self.inputs[index].plan(rate, budget) {
                self.scheduler.schedule(Schedulable::Input(index), offset);
            }
        }
    }

    /// Bring the neuron in `idx` up to the current time
    pub(crate) fn resync(&mut self, idx: usize) {
        let now = self.scheduler.now();
        let (id, last_update) = {
            let n = self.neuron_at(idx);
            (n.id, n.last_update)
        };
        let dt = now - last_update;
        if dt <= 0.0 {
            return;
        }

        // Synaptic input over [last_update, now]
        let mut input = 0.0f32;
        for k in 0..self.neuron_at(idx).incoming.len() {
            let parent = self.neuron_at(idx).incoming[k];
            let Some(pi) = self.live_index(parent) else {
                continue;
            };
            let Some(syn) = self.neuron_at_mut(pi).synapse_to_mut(id) else {
                continue;
            };
            if let PendingSpike::Live { arrived_at, kernel } = syn.pending {
                input += integrate_kernel(&kernel, arrived_at, last_update, now);
                if kernel.is_exhausted(arrived_at, now) {
                    syn.pending = PendingSpike::None;
                }
            }
        }

        let membrane = self.params.membrane;
        let shape = self.params.action_potential;
        let p = 2 * idx;
        let potential = passive_relaxation(self.pot_act[p] + input, &membrane, dt);
        self.pot_act[p] = potential;

        let neuron = self.neuron_at_mut(idx);
        neuron.last_update = now;
        let refractory_over = neuron
            .last_fire
            .map_or(true, |at| now - at > shape.refractory_cutoff as f64);
        if potential > membrane.threshold && refractory_over && neuron.vesicles.has_resources() {
            self.fire(idx);
        }

        if let Some(at) = self.neuron_at(idx).last_fire {
            let elapsed = now - at;
            if shape.in_window(elapsed) {
                self.pot_act[p] = shape.waveform(elapsed, &membrane);
            }
        }

        let unit = self.params.activity_unit;
        let neuron = self.neuron_at_mut(idx);
        neuron.vesicles.refill(dt);
        let span = now - neuron.window_start;
        let activity = if span > 0.0 {
            (neuron.firing_count as f64 / (span / unit)) as f32
        } else {
            0.0
        };
        self.pot_act[p + 1] = activity;
    }

    fn fire(&mut self, idx: usize) {
        let now = self.scheduler.now();
        let shape = self.params.action_potential;
        let gain = self.params.gain;
        let conduction_delay = self.params.conduction_delay;

        let Some(neuron) = self.slots[idx].neuron.as_mut() else {
            return;
        };
        neuron.last_fire = Some(now);
        neuron.firing_count += 1;
        neuron.vesicles.release();
        let parent = neuron.id;

        let mut launched = 0usize;
        for syn in neuron.outgoing.iter_mut() {
            if !syn.is_idle() {
                continue;
            }
            let kernel = PostsynapticKernel::from_action_potential(&shape, syn.weight, gain);
            let delay = syn.delay(conduction_delay);
            syn.pending = PendingSpike::InFlight {
                fired_at: now,
                deliver_at: now + delay,
                kernel,
            };
            self.scheduler.schedule(
                Schedulable::Synapse {
                    parent,
                    target: syn.target,
                    serial: syn.id,
                },
                delay,
            );
            launched += 1;
        }
        trace!(
            target: "neuroweave-engine",
            "[FIRE] {} t={:.3} launched={} vesicles={:.2}",
            parent,
            now,
            launched,
            neuron.vesicles.level
        );

        // Postsynaptic side of STDP on every incoming synapse
        let incoming = neuron.incoming.clone();
        for parent_id in incoming {
            if let Some(pi) = self.live_index(parent_id) {
                self.plasticity(pi, parent, Some(now));
            }
        }

        self.scheduler.schedule(
            Schedulable::Neuron(parent),
            shape.refractory_cutoff as f64,
        );
    }

    fn deliver(&mut self, parent: NeuronId, target: NeuronId, serial: SynapseId) {
        let (Some(pi), Some(ti)) = (self.live_index(parent), self.live_index(target)) else {
            trace!(target: "neuroweave-engine", "Skipping delivery {} -> {}: endpoint gone", parent, target);
            return;
        };
        let now = self.scheduler.now();
        let Some(syn) = self
            .neuron_at_mut(pi)
            .synapse_to_mut(target)
            .filter(|s| s.id == serial)
        else {
            trace!(target: "neuroweave-engine", "Skipping delivery of stale {}", serial);
            return;
        };
        let PendingSpike::InFlight { kernel, .. } = syn.pending else {
            trace!(target: "neuroweave-engine", "Skipping delivery of {}: nothing in flight", serial);
            return;
        };
        syn.pending = PendingSpike::Live {
            arrived_at: now,
            kernel,
        };
        syn.last_arrival = Some(now);
        trace!(
            target: "neuroweave-engine",
            "[DELIVER] {} {} -> {} t={:.3} amp={:.3}",
            serial,
            parent,
            target,
            now,
            kernel.amplitude
        );

        let target_last_fire = self.neuron_at(ti).last_fire;
        self.plasticity(pi, target, target_last_fire);

        for delay in [0.0, kernel.decay as f64, kernel.duration as f64] {
            self.scheduler.schedule(Schedulable::Neuron(target), delay);
        }
    }

    fn fire_input(&mut self, index: usize) {
        let Some(adapter) = self.inputs.get(index) else {
            trace!(target: "neuroweave-engine", "Skipping event for unbound input {}", index);
            return;
        };
        let members = adapter.members.clone();
        let kick = self.params.input_kick;
        let latency = self.params.resync_latency;
        for id in members {
            if let Some(idx) = self.live_index(id) {
                self.resync(idx);
                self.pot_act[2 * idx] += kick;
                self.scheduler.schedule(Schedulable::Neuron(id), latency);
            }
        }
        let now = self.scheduler.now();
        let adapter = &mut self.inputs[index];
        adapter.last_fire = Some(now);
        adapter.fire_count += 1;
    }

    /// STDP update of the synapse from the neuron in `parent_idx` to `target`
    #[cfg(feature = "plasticity")]
    fn plasticity(&mut self, parent_idx: usize, target: NeuronId, target_last_fire: Option<SimTime>) {
        if !self.params.plasticity_enabled {
            return;
        }
        let learning_rate = self.control.learning_rate();
        if learning_rate == 0.0 {
            return;
        }
        let now = self.scheduler.now();
        let config = self.params.stdp();
        if let Some(syn) = self.neuron_at_mut(parent_idx).synapse_to_mut(target) {
            syn.weight = neuroweave_plasticity::update_weight(
                syn.weight,
                syn.class,
                now,
                syn.last_arrival,
                target_last_fire,
                learning_rate,
                &config,
            );
        }
    }

    #[cfg(not(feature = "plasticity"))]
    #[inline]
    fn plasticity(&mut self, _parent_idx: usize, _target: NeuronId, _target_last_fire: Option<SimTime>) {}

    fn record_snapshots(&mut self) {
        let selected = self.snapshots.selected().to_vec();
        if selected.is_empty() {
            return;
        }
        let now = self.scheduler.now();
        for id in selected {
            let Some(idx) = self.live_index(id) else {
                continue;
            };
            let synapse_weights = self
                .neuron_at(idx)
                .outgoing
                .iter()
                .map(|s| (s.target, s.weight))
                .collect();
            let voltage = self.pot_act[2 * idx];
            self.snapshots.record(
                id,
                NeuronSnapshot {
                    time: now,
                    voltage,
                    synapse_weights,
                },
            );
        }
        self.snapshots.trim(now, self.params.timeline_window);
    }
}
