// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Network Arena
//!
//! Owns every neuron, the parallel position and potential/activity arrays,
//! the event scheduler, input adapters and voltage detectors.
//!
//! ## Identity
//! Neurons live in a slot vector. A slot is reused (LIFO) after its occupant
//! is deleted, and its generation is bumped on every deletion, so a
//! [`NeuronId`] held by a synapse, an input or a queued event never resolves
//! to the wrong neuron. Synapse events additionally carry the synapse serial.
//!
//! ## Shared arrays
//! `positions[slot]` and `pot_act[2 * slot .. 2 * slot + 2]` (potential,
//! activity) are kept in lockstep with the slot vector so a renderer can
//! stream them without walking the arena.
//!
//! ## Errors
//! Using a stale or out-of-range [`NeuronId`] panics. Malformed setup
//! (input arrays, detector radii) returns [`NetworkError`]. Duplicate
//! synapses, self-synapses and absent edges are quiet no-ops.

use neuroweave_config::NeuroweaveConfig;
use neuroweave_neural::{Coord3, NeuronId, SimTime, SynapseId, SynapseType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use crate::control::SimulationControl;
use crate::error::{NetworkError, Result};
use crate::input::{InputAdapter, InputRates, VoltageDetector, MAX_INPUT_RATE_HZ};
use crate::neuron::Neuron;
use crate::params::NetworkParameters;
use crate::placement;
use crate::scheduler::{Schedulable, Scheduler};
use crate::spatial::SpatialGrid;
use crate::synapse::{PendingSpike, Synapse};
use crate::telemetry::{NetworkStats, SnapshotLog};

#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) neuron: Option<Neuron>,
}

pub struct Network {
    pub(crate) slots: Vec<Slot>,
    pub(crate) positions: Vec<Coord3>,
    /// Interleaved (potential, activity), two entries per slot
    pub(crate) pot_act: Vec<f32>,
    pub(crate) free_slots: Vec<u32>,
    pub(crate) scheduler: Scheduler,
    pub(crate) params: NetworkParameters,
    pub(crate) control: SimulationControl,
    pub(crate) rng: StdRng,
    pub(crate) next_synapse_serial: u64,
    pub(crate) pending_flips: Vec<(NeuronId, NeuronId)>,
    pub(crate) inputs: Vec<InputAdapter>,
    pub(crate) input_rates: Option<InputRates>,
    pub(crate) detectors: Vec<VoltageDetector>,
    pub(crate) snapshots: SnapshotLog,
    pub(crate) live_count: usize,
    pub(crate) synapse_count: usize,
    /// Input membership must be recomputed before the next run
    pub(crate) topology_dirty: bool,
}

impl Network {
    /// Build a network from a configuration
    ///
    /// Creates `simulation.initial_neurons` randomly placed neurons and wires
    /// them by proximity.
    pub fn new(config: &NeuroweaveConfig) -> Result<Self> {
        Self::with_control(config, SimulationControl::from_config(config))
    }

    /// Build a network that reads its tunables from an existing control handle
    pub fn with_control(config: &NeuroweaveConfig, control: SimulationControl) -> Result<Self> {
        let params = NetworkParameters::from_config(config)?;
        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let count = config.simulation.initial_neurons;

        let mut network = Self {
            slots: Vec::with_capacity(count),
            positions: Vec::with_capacity(count),
            pot_act: Vec::with_capacity(count * 2),
            free_slots: Vec::new(),
            scheduler: Scheduler::new(),
            params,
            control,
            rng,
            next_synapse_serial: 0,
            pending_flips: Vec::new(),
            inputs: Vec::new(),
            input_rates: None,
            detectors: Vec::new(),
            snapshots: SnapshotLog::new(),
            live_count: 0,
            synapse_count: 0,
            topology_dirty: false,
        };

        if count > 0 {
            for _ in 0..count {
                // Region sized for the final population so density is uniform
                let pos = placement::random_position(
                    &mut network.rng,
                    network.params.placement_shape,
                    network.params.placement_density,
                    count,
                );
                network.create_neuron(pos);
            }
            network.make_connections();
        }

        info!(
            target: "neuroweave-engine",
            "Network built: {} neurons, {} synapses",
            network.live_count,
            network.synapse_count
        );
        Ok(network)
    }

    /// Default configuration with `count` initial neurons and a fixed seed
    pub fn with_initial_neurons(count: usize, seed: u64) -> Result<Self> {
        let mut config = NeuroweaveConfig::default();
        config.simulation.initial_neurons = count;
        config.simulation.seed = Some(seed);
        Self::new(&config)
    }

    // ------------------------------------------------------------------
    // Slot resolution
    // ------------------------------------------------------------------

    /// Slot index of a live neuron, `None` if the id is stale or out of range
    #[inline]
    pub(crate) fn live_index(&self, id: NeuronId) -> Option<usize> {
        let slot = self.slots.get(id.index())?;
        if slot.generation == id.generation && slot.neuron.is_some() {
            Some(id.index())
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn expect_live(&self, id: NeuronId) -> usize {
        self.live_index(id).unwrap_or_else(|| {
            panic!(
                "Invariant violation: {} is not a live neuron ({} slots)",
                id,
                self.slots.len()
            )
        })
    }

    #[inline]
    pub(crate) fn neuron_at(&self, idx: usize) -> &Neuron {
        self.slots[idx]
            .neuron
            .as_ref()
            .unwrap_or_else(|| panic!("Invariant violation: slot {} is vacant", idx))
    }

    #[inline]
    pub(crate) fn neuron_at_mut(&mut self, idx: usize) -> &mut Neuron {
        self.slots[idx]
            .neuron
            .as_mut()
            .unwrap_or_else(|| panic!("Invariant violation: slot {} is vacant", idx))
    }

    fn live_slots(&self) -> impl Iterator<Item = (usize, &Neuron)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.neuron.as_ref().map(|n| (idx, n)))
    }

    fn next_serial(&mut self) -> SynapseId {
        let serial = SynapseId(self.next_synapse_serial);
        self.next_synapse_serial += 1;
        serial
    }

    fn random_position(&mut self) -> Coord3 {
        placement::random_position(
            &mut self.rng,
            self.params.placement_shape,
            self.params.placement_density,
            self.live_count + 1,
        )
    }

    // ------------------------------------------------------------------
    // Topology
    // ------------------------------------------------------------------

    /// Create a neuron at `position`, or at a random position if unset
    ///
    /// Reuses the most recently freed slot when one exists.
    pub fn create_neuron(&mut self, position: Coord3) -> NeuronId {
        let position = if position.is_set() {
            position
        } else {
            self.random_position()
        };
        let now = self.scheduler.now();
        let vesicles = self.params.vesicles;
        let potential = self.params.initial_potential;

        let id = match self.free_slots.pop() {
            Some(slot) => {
                let idx = slot as usize;
                let id = NeuronId::new(slot, self.slots[idx].generation);
                self.slots[idx].neuron = Some(Neuron::new(id, now, vesicles));
                self.positions[idx] = position;
                self.pot_act[2 * idx] = potential;
                self.pot_act[2 * idx + 1] = 0.0;
                id
            }
            None => {
                let id = NeuronId::new(self.slots.len() as u32, 0);
                self.slots.push(Slot {
                    generation: 0,
                    neuron: Some(Neuron::new(id, now, vesicles)),
                });
                self.positions.push(position);
                self.pot_act.push(potential);
                self.pot_act.push(0.0);
                id
            }
        };

        self.live_count += 1;
        self.topology_dirty = true;
        debug!(target: "neuroweave-engine", "Created {} at {:?}", id, position);
        id
    }

    pub fn create_random_neuron(&mut self) -> NeuronId {
        self.create_neuron(Coord3::UNSET)
    }

    /// Delete a neuron and every synapse touching it
    ///
    /// # Panics
    /// If `id` is not a live neuron.
    pub fn delete_neuron(&mut self, id: NeuronId) {
        let idx = self.expect_live(id);
        let neuron = match self.slots[idx].neuron.take() {
            Some(n) => n,
            None => return,
        };

        let mut removed = 0usize;
        for syn in &neuron.outgoing {
            if let Some(t) = self.live_index(syn.target) {
                self.neuron_at_mut(t).remove_incoming(id);
            }
            removed += 1;
        }
        for parent in &neuron.incoming {
            if let Some(p) = self.live_index(*parent) {
                if self.neuron_at_mut(p).remove_outgoing(id).is_some() {
                    removed += 1;
                }
            }
        }
        self.synapse_count -= removed;

        self.positions[idx] = Coord3::UNSET;
        self.pot_act[2 * idx] = self.params.membrane.baseline;
        self.pot_act[2 * idx + 1] = 0.0;
        self.slots[idx].generation = self.slots[idx].generation.wrapping_add(1);
        self.free_slots.push(id.slot);
        self.live_count -= 1;
        self.topology_dirty = true;

        self.snapshots.deselect(id);
        self.pending_flips.retain(|(a, b)| *a != id && *b != id);

        debug!(
            target: "neuroweave-engine",
            "Deleted {} and {} synapses, slot {} freed",
            id,
            removed,
            id.slot
        );
    }

    /// Create the synapse `from -> to`; false if it already exists
    ///
    /// The weight is clamped into the sign class it implies and the length is
    /// the current endpoint distance.
    ///
    /// # Panics
    /// If either id is not a live neuron.
    pub fn create_synapse(&mut self, from: NeuronId, to: NeuronId, weight: f32) -> bool {
        let fi = self.expect_live(from);
        let ti = self.expect_live(to);
        if fi == ti {
            trace!(target: "neuroweave-engine", "Ignoring self-synapse on {}", from);
            return false;
        }
        if !weight.is_finite() {
            warn!(target: "neuroweave-engine", "Ignoring synapse {} -> {} with weight {}", from, to, weight);
            return false;
        }
        if self.neuron_at(fi).synapse_to(to).is_some() {
            trace!(target: "neuroweave-engine", "Synapse {} -> {} already exists", from, to);
            return false;
        }

        let length = self.positions[fi].distance(&self.positions[ti]);
        let serial = self.next_serial();
        let synapse = Synapse::new(serial, to, weight, length);
        debug!(
            target: "neuroweave-engine",
            "Created {} {} -> {} w={:.3} len={:.3}",
            serial,
            from,
            to,
            synapse.weight,
            length
        );
        self.neuron_at_mut(fi).outgoing.push(synapse);
        self.neuron_at_mut(ti).incoming.push(from);
        self.synapse_count += 1;
        true
    }

    /// Remove the synapse `from -> to`; false if there is none
    ///
    /// # Panics
    /// If either id is not a live neuron.
    pub fn delete_synapse(&mut self, from: NeuronId, to: NeuronId) -> bool {
        let fi = self.expect_live(from);
        let ti = self.expect_live(to);
        match self.neuron_at_mut(fi).remove_outgoing(to) {
            Some(syn) => {
                self.neuron_at_mut(ti).remove_incoming(from);
                self.synapse_count -= 1;
                debug!(target: "neuroweave-engine", "Deleted {} {} -> {}", syn.id, from, to);
                true
            }
            None => false,
        }
    }

    /// Queue a direction flip of `from -> to`, applied at the start of the next run
    ///
    /// Returns false (and queues nothing) when the edge does not exist.
    ///
    /// # Panics
    /// If either id is not a live neuron.
    pub fn flip_synapse(&mut self, from: NeuronId, to: NeuronId) -> bool {
        let fi = self.expect_live(from);
        self.expect_live(to);
        if self.neuron_at(fi).synapse_to(to).is_none() {
            return false;
        }
        self.pending_flips.push((from, to));
        true
    }

    pub(crate) fn apply_flips(&mut self) {
        for (from, to) in std::mem::take(&mut self.pending_flips) {
            let (Some(fi), Some(ti)) = (self.live_index(from), self.live_index(to)) else {
                continue;
            };
            if self.neuron_at(ti).synapse_to(from).is_some() {
                trace!(target: "neuroweave-engine", "Flip {} -> {} blocked by reverse edge", from, to);
                continue;
            }
            let Some(mut syn) = self.neuron_at_mut(fi).remove_outgoing(to) else {
                continue;
            };
            self.neuron_at_mut(ti).remove_incoming(from);
            syn.target = from;
            syn.pending = PendingSpike::None;
            self.neuron_at_mut(ti).outgoing.push(syn);
            self.neuron_at_mut(fi).incoming.push(to);
            debug!(target: "neuroweave-engine", "Flipped {} -> {} to {} -> {}", from, to, to, from);
        }
    }

    /// Wire every pair of live neurons closer than the connectivity radius
    ///
    /// A pair that already has an edge in either direction is skipped, so at
    /// most one synapse joins any two neurons. Returns the number created.
    pub fn make_connections(&mut self) -> usize {
        let radius = self.params.connectivity_radius;
        let live: Vec<(u32, Coord3)> = self
            .live_slots()
            .map(|(idx, _)| (idx as u32, self.positions[idx]))
            .collect();
        let grid = SpatialGrid::build(radius, live.iter().copied());

        let mut made = 0usize;
        for &(slot, pos) in &live {
            let from = self.neuron_at(slot as usize).id;
            for other in grid.within(&pos, radius) {
                if other == slot {
                    continue;
                }
                let to = self.neuron_at(other as usize).id;
                if self.neuron_at(slot as usize).synapse_to(to).is_some()
                    || self.neuron_at(other as usize).synapse_to(from).is_some()
                {
                    continue;
                }
                let weight = self.random_weight();
                if self.create_synapse(from, to, weight) {
                    made += 1;
                }
            }
        }

        info!(
            target: "neuroweave-engine",
            "Connected {} neurons within radius {}: {} new synapses",
            live.len(),
            radius,
            made
        );
        made
    }

    fn random_weight(&mut self) -> f32 {
        let (min, max) = self.params.initial_weight_range;
        let magnitude = if max > min {
            self.rng.gen_range(min..=max)
        } else {
            min
        };
        if self.rng.gen_bool(self.params.inhibitory_fraction) {
            -magnitude
        } else {
            magnitude
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// # Panics
    /// If `id` is not a live neuron.
    pub fn neuron(&self, id: NeuronId) -> &Neuron {
        self.neuron_at(self.expect_live(id))
    }

    pub fn try_neuron(&self, id: NeuronId) -> Option<&Neuron> {
        self.live_index(id).map(|idx| self.neuron_at(idx))
    }

    pub fn contains_neuron(&self, id: NeuronId) -> bool {
        self.live_index(id).is_some()
    }

    /// Synapse `from -> to`, if both neurons are live and the edge exists
    pub fn synapse(&self, from: NeuronId, to: NeuronId) -> Option<&Synapse> {
        self.try_neuron(from)?.synapse_to(to)
    }

    /// Potential as of the neuron's last resynchronisation
    pub fn potential(&self, id: NeuronId) -> f32 {
        self.pot_act[2 * self.expect_live(id)]
    }

    pub fn activity(&self, id: NeuronId) -> f32 {
        self.pot_act[2 * self.expect_live(id) + 1]
    }

    pub fn position(&self, id: NeuronId) -> Coord3 {
        self.positions[self.expect_live(id)]
    }

    /// Positions by slot; vacant slots are [`Coord3::UNSET`]
    pub fn positions(&self) -> &[Coord3] {
        &self.positions
    }

    /// Interleaved (potential, activity) by slot
    pub fn potentials_and_activities(&self) -> &[f32] {
        &self.pot_act
    }

    /// Current simulated time (ms)
    pub fn time(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn neuron_count(&self) -> usize {
        self.live_count
    }

    pub fn synapse_count(&self) -> usize {
        self.synapse_count
    }

    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    /// Live neuron ids in ascending slot order
    pub fn neuron_ids(&self) -> impl Iterator<Item = NeuronId> + '_ {
        self.live_slots().map(|(_, n)| n.id)
    }

    /// Every synapse with its parent
    pub fn synapses(&self) -> impl Iterator<Item = (NeuronId, &Synapse)> + '_ {
        self.live_slots()
            .flat_map(|(_, n)| n.outgoing.iter().map(move |s| (n.id, s)))
    }

    pub fn weights(&self) -> impl Iterator<Item = f32> + '_ {
        self.synapses().map(|(_, s)| s.weight)
    }

    /// Activities of live neurons in ascending slot order
    pub fn activities(&self) -> impl Iterator<Item = f32> + '_ {
        self.live_slots().map(|(idx, _)| self.pot_act[2 * idx + 1])
    }

    pub fn params(&self) -> &NetworkParameters {
        &self.params
    }

    pub fn control(&self) -> &SimulationControl {
        &self.control
    }

    // ------------------------------------------------------------------
    // Direct manipulation
    // ------------------------------------------------------------------

    /// Bring a neuron up to the current time and overwrite its potential
    ///
    /// A follow-up resync is queued so the threshold is checked.
    pub fn set_potential(&mut self, id: NeuronId, millivolts: f32) {
        let idx = self.expect_live(id);
        self.resync(idx);
        self.pot_act[2 * idx] = millivolts;
        self.scheduler
            .schedule(Schedulable::Neuron(id), self.params.resync_latency);
    }

    /// Inject `millivolts` into a neuron's potential
    pub fn stimulate(&mut self, id: NeuronId, millivolts: f32) {
        let idx = self.expect_live(id);
        self.resync(idx);
        self.pot_act[2 * idx] += millivolts;
        self.scheduler
            .schedule(Schedulable::Neuron(id), self.params.resync_latency);
    }

    /// Resynchronise a neuron to the current time
    pub fn refresh_neuron(&mut self, id: NeuronId) {
        let idx = self.expect_live(id);
        self.resync(idx);
    }

    /// Zero every firing counter and restart activity windows now
    pub fn reset_activities(&mut self) {
        let now = self.scheduler.now();
        for idx in 0..self.slots.len() {
            if let Some(neuron) = self.slots[idx].neuron.as_mut() {
                neuron.firing_count = 0;
                neuron.window_start = now;
                self.pot_act[2 * idx + 1] = 0.0;
            }
        }
        debug!(target: "neuroweave-engine", "Activity windows reset at t={:.3}", now);
    }

    // ------------------------------------------------------------------
    // Inputs and detectors
    // ------------------------------------------------------------------

    /// Bind a live rate array to a set of input spheres
    ///
    /// `positions` default to random placement and `radii` to the configured
    /// default radius. The rates handle is read on every run, so mutations
    /// made through the caller's clone take effect on the next tick. Rates
    /// must lie in `[0, MAX_INPUT_RATE_HZ]` when bound; a live value above the
    /// maximum is driven at the maximum.
    pub fn set_input_rate_array(
        &mut self,
        rates: InputRates,
        positions: Option<Vec<Coord3>>,
        radii: Option<Vec<f32>>,
    ) -> Result<()> {
        let count = rates.len();
        if let Some(p) = &positions {
            if p.len() != count {
                return Err(NetworkError::InputLengthMismatch {
                    rates: count,
                    other: p.len(),
                    what: "positions",
                });
            }
        }
        if let Some(r) = &radii {
            if r.len() != count {
                return Err(NetworkError::InputLengthMismatch {
                    rates: count,
                    other: r.len(),
                    what: "radii",
                });
            }
            if let Some((index, radius)) = r
                .iter()
                .enumerate()
                .find(|(_, r)| !r.is_finite() || **r < 0.0)
            {
                return Err(NetworkError::InvalidInputRadius {
                    index,
                    radius: *radius,
                });
            }
        }
        if let Some(p) = &positions {
            if let Some((index, pos)) = p.iter().enumerate().find(|(_, c)| {
                c.is_set() && !(c.x.is_finite() && c.y.is_finite() && c.z.is_finite())
            }) {
                return Err(NetworkError::InvalidInputPosition {
                    index,
                    position: format!("{:?}", pos),
                });
            }
        }
        if let Some((index, rate)) = rates
            .snapshot()
            .into_iter()
            .enumerate()
            .find(|(_, r)| !r.is_finite() || *r < 0.0 || *r > MAX_INPUT_RATE_HZ)
        {
            return Err(NetworkError::InvalidInputRate {
                index,
                rate,
                max: MAX_INPUT_RATE_HZ,
            });
        }

        let mut adapters = Vec::with_capacity(count);
        for i in 0..count {
            let position = match positions.as_ref().map(|p| p[i]) {
                Some(pos) if pos.is_set() => pos,
                _ => self.random_position(),
            };
            let radius = radii
                .as_ref()
                .map_or(self.params.default_input_radius, |r| r[i]);
            adapters.push(InputAdapter::new(position, radius));
        }

        self.inputs = adapters;
        self.input_rates = Some(rates);
        self.refresh_input_membership();
        info!(target: "neuroweave-engine", "Bound {} inputs", count);
        Ok(())
    }

    /// Recompute which live neurons lie inside each input sphere
    pub(crate) fn refresh_input_membership(&mut self) {
        self.topology_dirty = false;
        if self.inputs.is_empty() {
            return;
        }
        let grid = SpatialGrid::build(
            self.params.connectivity_radius,
            self.live_slots()
                .map(|(idx, _)| (idx as u32, self.positions[idx])),
        );
        for i in 0..self.inputs.len() {
            let members: Vec<NeuronId> = grid
                .within(&self.inputs[i].position, self.inputs[i].radius)
                .into_iter()
                .map(|slot| self.neuron_at(slot as usize).id)
                .collect();
            trace!(target: "neuroweave-engine", "Input {} covers {} neurons", i, members.len());
            self.inputs[i].members = members;
        }
    }

    /// Shared rates handle, if inputs are bound
    pub fn input_rates(&self) -> Option<&InputRates> {
        self.input_rates.as_ref()
    }

    pub fn inputs(&self) -> &[InputAdapter] {
        &self.inputs
    }

    pub fn set_input_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        let count = self.inputs.len();
        let input = self
            .inputs
            .get_mut(index)
            .ok_or(NetworkError::UnknownInput { index, count })?;
        input.enabled = enabled;
        Ok(())
    }

    /// Shift an input's spike train by pretending `ms` extra have elapsed
    pub fn add_input_offset(&mut self, index: usize, ms: SimTime) -> Result<()> {
        if !ms.is_finite() {
            return Err(NetworkError::NonFinite {
                what: "input offset",
                value: ms,
            });
        }
        let count = self.inputs.len();
        let input = self
            .inputs
            .get_mut(index)
            .ok_or(NetworkError::UnknownInput { index, count })?;
        input.phase += ms;
        Ok(())
    }

    /// Register a mean-potential probe; returns its index
    pub fn add_voltage_detector(&mut self, position: Coord3, radius: f32) -> Result<usize> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(NetworkError::InvalidDetectorRadius { radius });
        }
        for (what, value) in [
            ("detector x", position.x),
            ("detector y", position.y),
            ("detector z", position.z),
        ] {
            if !value.is_finite() {
                return Err(NetworkError::NonFinite {
                    what,
                    value: value as f64,
                });
            }
        }
        self.detectors.push(VoltageDetector::new(position, radius));
        Ok(self.detectors.len() - 1)
    }

    pub fn detectors(&self) -> &[VoltageDetector] {
        &self.detectors
    }

    /// Mean potential of the live neurons inside detector `index`
    pub fn detector_voltage(&self, index: usize) -> Option<f32> {
        let detector = self.detectors.get(index)?;
        let (sum, n) = self
            .live_slots()
            .filter(|(idx, _)| detector.covers(&self.positions[*idx]))
            .fold((0.0f64, 0usize), |(sum, n), (idx, _)| {
                (sum + self.pot_act[2 * idx] as f64, n + 1)
            });
        (n > 0).then(|| (sum / n as f64) as f32)
    }

    pub fn detector_voltages(&self) -> Vec<Option<f32>> {
        (0..self.detectors.len())
            .map(|i| self.detector_voltage(i))
            .collect()
    }

    // ------------------------------------------------------------------
    // Telemetry
    // ------------------------------------------------------------------

    /// Start recording a neuron's voltage and outgoing weights after every run
    pub fn select_neuron(&mut self, id: NeuronId) -> bool {
        self.expect_live(id);
        self.snapshots.select(id)
    }

    pub fn deselect_neuron(&mut self, id: NeuronId) -> bool {
        self.snapshots.deselect(id)
    }

    pub fn snapshots(&self) -> &SnapshotLog {
        &self.snapshots
    }

    pub fn stats(&self) -> NetworkStats {
        let mut excitatory = 0usize;
        let mut inhibitory = 0usize;
        let mut abs_weight = 0.0f64;
        for (_, syn) in self.synapses() {
            match syn.class {
                SynapseType::Excitatory => excitatory += 1,
                SynapseType::Inhibitory => inhibitory += 1,
            }
            abs_weight += syn.weight.abs() as f64;
        }
        let mut activity = 0.0f64;
        let mut total_fires = 0u64;
        for (idx, neuron) in self.live_slots() {
            activity += self.pot_act[2 * idx + 1] as f64;
            total_fires += neuron.firing_count;
        }
        let mean = |sum: f64, n: usize| if n > 0 { (sum / n as f64) as f32 } else { 0.0 };

        NetworkStats {
            time: self.scheduler.now(),
            neurons: self.live_count,
            synapses: self.synapse_count,
            excitatory,
            inhibitory,
            pending_events: self.scheduler.len(),
            mean_activity: mean(activity, self.live_count),
            mean_abs_weight: mean(abs_weight, self.synapse_count),
            total_fires,
        }
    }
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("time", &self.scheduler.now())
            .field("neurons", &self.live_count)
            .field("synapses", &self.synapse_count)
            .field("pending_events", &self.scheduler.len())
            .field("inputs", &self.inputs.len())
            .finish()
    }
}
