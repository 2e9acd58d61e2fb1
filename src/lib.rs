//! # Neuroweave
//!
//! Event-driven simulation of spiking, plastic, spatially-embedded neurons.
//! Neurons integrate voltage, fire stereotyped action potentials and adapt
//! their synapses by spike timing, while the topology can change at runtime.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! neuroweave = "0.1"  # Default: plasticity + observability
//! ```
//!
//! ## Feature Flags
//!
//! - **`plasticity`** (default): trace-based STDP on every delivery and
//!   postsynaptic fire
//! - **`observability`** (default): `tracing-subscriber` initialisation and
//!   per-crate debug flags
//! - **`file-logging`**: rolling log files for long headless runs
//!
//! ## Usage
//!
//! ```rust
//! use neuroweave::prelude::*;
//!
//! let mut config = NeuroweaveConfig::default();
//! config.simulation.seed = Some(42);
//! let mut net = Network::new(&config)?;
//!
//! let a = net.create_neuron(Coord3::ORIGIN);
//! let b = net.create_neuron(Coord3::new(2.0, 0.0, 0.0));
//! net.create_synapse(a, b, 0.5);
//!
//! // Live rates: keep a clone and change it between ticks
//! let rates = InputRates::new(vec![40.0]);
//! net.set_input_rate_array(rates.clone(), Some(vec![Coord3::ORIGIN]), None)?;
//!
//! for _ in 0..100 {
//!     net.tick()?;
//! }
//! rates.set(0, 0.0);
//! println!("{:?}", net.stats());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: neuroweave-config, neuroweave-observability│
//! │  (TOML + overrides, tracing initialisation)             │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Math: neuroweave-neural, neuroweave-plasticity         │
//! │  (membrane, waveform, kernels, STDP; no state)          │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Engine: neuroweave-engine                              │
//! │  (scheduler, neuron arena, dynamics, inputs, telemetry) │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use neuroweave_config as config;
pub use neuroweave_neural as neural;

// Re-export algorithms
pub use neuroweave_engine as engine;
pub use neuroweave_plasticity as plasticity;

#[cfg(feature = "observability")]
pub use neuroweave_observability as observability;

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::config::{NeuroweaveConfig, PlacementShape};
    pub use crate::engine::{
        histogram, InputRates, Network, NetworkError, NetworkStats, PendingSpike,
        SimulationControl,
    };
    pub use crate::neural::{Coord3, NeuronId, SimTime, SynapseId, SynapseType};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let id = NeuronId::new(0, 0);
        assert_eq!(id.index(), 0);
        assert!(!Coord3::UNSET.is_set());
    }
}
