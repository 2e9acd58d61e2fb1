// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! # Neuroweave Engine
//!
//! Discrete-event simulation of spiking, plastic, spatially-embedded neurons.
//!
//! ## Architecture
//! - **Scheduler**: time-ordered queue of [`Schedulable`] references with a
//!   monotonic clock
//! - **Network**: slot arena of neurons with generation-tagged ids, parallel
//!   position and potential/activity arrays, free-slot pool, flip queue
//! - **Dynamics**: closed-form resynchronisation, firing, delayed delivery,
//!   trace-based STDP (feature `plasticity`)
//! - **Inputs**: frequency-driven injectors fed by a caller-owned rate array,
//!   plus mean-voltage probes
//! - **Telemetry**: snapshot log, histograms, summary statistics
//!
//! Single-threaded: the caller drives pacing by choosing the budget passed
//! to [`Network::run`] (or by calling [`Network::tick`]).
//!
//! ```
//! use neuroweave_engine::{Coord3, Network};
//!
//! let mut net = Network::with_initial_neurons(0, 1).unwrap();
//! let a = net.create_neuron(Coord3::ORIGIN);
//! let b = net.create_neuron(Coord3::new(2.0, 0.0, 0.0));
//! assert!(net.create_synapse(a, b, 0.5));
//!
//! net.stimulate(a, 30.0);
//! net.run(20.0).unwrap();
//! assert_eq!(net.neuron(a).firing_count(), 1);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod control;
pub mod dynamics;
pub mod error;
pub mod input;
pub mod network;
pub mod neuron;
pub mod params;
pub mod placement;
pub mod scheduler;
pub mod spatial;
pub mod synapse;
pub mod telemetry;

pub use control::SimulationControl;
pub use error::{NetworkError, Result};
pub use input::{InputAdapter, InputRates, VoltageDetector, MAX_INPUT_RATE_HZ};
pub use network::Network;
pub use neuron::Neuron;
pub use params::NetworkParameters;
pub use scheduler::{Event, Schedulable, Scheduler};
pub use synapse::{PendingSpike, Synapse};
pub use telemetry::{histogram, NetworkStats, NeuronSnapshot, SnapshotLog};

// Re-export the neural vocabulary used by the public API
pub use neuroweave_neural::{Coord3, NeuronId, SimTime, SynapseId, SynapseType};
