// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Runtime state of one neuron
//!
//! Potential and activity live in the network's flat `pot_act` array and the
//! position in `positions`, both indexed by slot. Everything else is here.

use neuroweave_neural::{NeuronId, SimTime, VesiclePool};

use crate::synapse::Synapse;

#[derive(Debug, Clone)]
pub struct Neuron {
    pub(crate) id: NeuronId,
    /// Time of the last resynchronisation
    pub(crate) last_update: SimTime,
    pub(crate) last_fire: Option<SimTime>,
    pub(crate) firing_count: u64,
    /// Start of the activity window
    pub(crate) window_start: SimTime,
    pub(crate) vesicles: VesiclePool,
    /// Owned outgoing synapses, at most one per target
    pub(crate) outgoing: Vec<Synapse>,
    /// Parents holding a synapse onto this neuron, in wiring order
    pub(crate) incoming: Vec<NeuronId>,
}

impl Neuron {
    pub(crate) fn new(id: NeuronId, now: SimTime, vesicles: VesiclePool) -> Self {
        Self {
            id,
            last_update: now,
            last_fire: None,
            firing_count: 0,
            window_start: now,
            vesicles,
            outgoing: Vec::with_capacity(8),
            incoming: Vec::new(),
        }
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    pub fn last_update(&self) -> SimTime {
        self.last_update
    }

    pub fn last_fire(&self) -> Option<SimTime> {
        self.last_fire
    }

    /// Fires since creation or the last activity reset
    pub fn firing_count(&self) -> u64 {
        self.firing_count
    }

    pub fn vesicles(&self) -> &VesiclePool {
        &self.vesicles
    }

    pub fn outgoing(&self) -> &[Synapse] {
        &self.outgoing
    }

    pub fn incoming(&self) -> &[NeuronId] {
        &self.incoming
    }

    pub fn synapse_to(&self, target: NeuronId) -> Option<&Synapse> {
        self.outgoing.iter().find(|s| s.target == target)
    }

    pub(crate) fn synapse_to_mut(&mut self, target: NeuronId) -> Option<&mut Synapse> {
        self.outgoing.iter_mut().find(|s| s.target == target)
    }

    pub(crate) fn remove_outgoing(&mut self, target: NeuronId) -> Option<Synapse> {
        let idx = self.outgoing.iter().position(|s| s.target == target)?;
        Some(self.outgoing.remove(idx))
    }

    pub(crate) fn remove_incoming(&mut self, parent: NeuronId) -> bool {
        match self.incoming.iter().position(|p| *p == parent) {
            Some(idx) => {
                self.incoming.remove(idx);
                true
            }
            None => false,
        }
    }
}
