// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Identity types for neurons and synapses

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Neuron handle: arena slot plus the generation of the slot's occupant.
///
/// Slots are recycled after deletion; the generation is bumped on every
/// deletion so a handle to the old occupant never resolves to the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NeuronId {
    pub slot: u32,
    pub generation: u32,
}

impl NeuronId {
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Slot index into the network's parallel arrays
    #[inline]
    pub fn index(&self) -> usize {
        self.slot as usize
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Neuron({}#{})", self.slot, self.generation)
    }
}

/// Synapse serial, unique for the lifetime of a network (never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SynapseId(pub u64);

impl fmt::Display for SynapseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Synapse({})", self.0)
    }
}
