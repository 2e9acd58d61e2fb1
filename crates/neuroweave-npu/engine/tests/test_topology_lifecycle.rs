// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0
//! Topology integration tests: wiring, deletion cascades, slot reuse, flips.

use neuroweave_config::NeuroweaveConfig;
use neuroweave_engine::{Coord3, Network, NeuronId, PendingSpike};

fn empty_network() -> Network {
    let mut config = NeuroweaveConfig::default();
    config.simulation.seed = Some(11);
    Network::new(&config).unwrap()
}

/// Every incoming entry has a matching outgoing synapse and vice versa.
fn assert_adjacency_consistent(net: &Network) {
    let mut counted = 0;
    for id in net.neuron_ids() {
        let neuron = net.neuron(id);
        for parent in neuron.incoming() {
            assert!(
                net.synapse(*parent, id).is_some(),
                "{} lists {} as parent without an edge",
                id,
                parent
            );
        }
        for syn in neuron.outgoing() {
            assert!(net.contains_neuron(syn.target()));
            assert!(net.neuron(syn.target()).incoming().contains(&id));
            counted += 1;
        }
    }
    assert_eq!(counted, net.synapse_count());
}

#[test]
fn test_create_synapse_is_idempotent() {
    let mut net = empty_network();
    let a = net.create_neuron(Coord3::ORIGIN);
    let b = net.create_neuron(Coord3::new(0.5, 0.0, 0.0));

    assert!(net.create_synapse(a, b, 0.4));
    assert!(!net.create_synapse(a, b, 0.9));
    assert_eq!(net.synapse(a, b).unwrap().weight(), 0.4);

    // Reverse direction is a distinct edge for the explicit API
    assert!(net.create_synapse(b, a, -0.2));
    assert_eq!(net.synapse_count(), 2);
    assert_adjacency_consistent(&net);
}

#[test]
fn test_make_connections_never_duplicates() {
    let mut net = Network::with_initial_neurons(120, 5).unwrap();
    let ids: Vec<NeuronId> = net.neuron_ids().collect();

    // Explicit edges on top of proximity wiring, then wire again
    for pair in ids.windows(2) {
        net.create_synapse(pair[0], pair[1], 0.3);
    }
    net.make_connections();
    net.make_connections();

    for (parent, syn) in net.synapses() {
        let parallel = net
            .neuron(parent)
            .outgoing()
            .iter()
            .filter(|s| s.target() == syn.target())
            .count();
        assert_eq!(parallel, 1, "duplicate edge {} -> {}", parent, syn.target());
    }
    assert_adjacency_consistent(&net);
}

#[test]
fn test_make_connections_skips_reverse_pairs() {
    let mut net = empty_network();
    let a = net.create_neuron(Coord3::ORIGIN);
    let b = net.create_neuron(Coord3::new(0.3, 0.0, 0.0));
    assert!(net.create_synapse(b, a, 0.5));
    assert_eq!(net.make_connections(), 0);
    assert!(net.synapse(a, b).is_none());
}

#[test]
fn test_initial_wiring_respects_radius_and_sign() {
    let net = Network::with_initial_neurons(200, 9).unwrap();
    assert_eq!(net.neuron_count(), 200);
    assert!(net.synapse_count() > 0);
    let radius = net.params().connectivity_radius;
    for (parent, syn) in net.synapses() {
        let d = net.position(parent).distance(&net.position(syn.target()));
        assert!(d <= radius);
        assert!((syn.length() - d).abs() < 1e-5);
        let (lo, hi) = syn.class().weight_bounds();
        assert!(syn.weight() >= lo && syn.weight() <= hi);
    }
}

#[test]
fn test_delete_cascades_and_slot_is_reused() {
    let mut net = empty_network();
    let a = net.create_neuron(Coord3::ORIGIN);
    let n = net.create_neuron(Coord3::new(0.5, 0.0, 0.0));
    let c = net.create_neuron(Coord3::new(0.0, 0.5, 0.0));
    net.create_synapse(a, n, 0.5);
    net.create_synapse(n, c, 0.5);
    net.create_synapse(c, n, -0.5);
    net.select_neuron(n);
    net.set_potential(n, -40.0);
    assert_eq!(net.synapse_count(), 3);

    net.delete_neuron(n);
    assert_eq!(net.synapse_count(), 0);
    let baseline = net.params().membrane.baseline;
    assert_eq!(net.potentials_and_activities()[2 * n.index()], baseline);
    assert_eq!(net.potentials_and_activities()[2 * n.index() + 1], 0.0);
    assert_eq!(net.neuron_count(), 2);
    assert!(!net.positions()[n.index()].is_set());
    assert!(net.neuron(a).outgoing().is_empty());
    assert!(net.neuron(c).incoming().is_empty());
    assert!(net.snapshots().selected().is_empty());

    let fresh = net.create_neuron(Coord3::new(0.5, 0.0, 0.0));
    assert_eq!(fresh.slot, n.slot);
    assert_ne!(fresh, n);
    assert!(net.neuron(fresh).incoming().is_empty());
    assert!(net.neuron(fresh).outgoing().is_empty());
    assert!(net.synapse(a, fresh).is_none());
    assert_adjacency_consistent(&net);
}

#[test]
fn test_stale_events_are_skipped_after_reuse() {
    let mut net = empty_network();
    let a = net.create_neuron(Coord3::ORIGIN);
    let b = net.create_neuron(Coord3::new(2.0, 0.0, 0.0));
    net.create_synapse(a, b, 0.8);
    net.stimulate(a, 30.0);
    net.run(1.0).unwrap();
    assert_eq!(net.neuron(a).firing_count(), 1);

    // Spike is in flight to b; replace b with a new occupant of the same slot
    net.delete_neuron(b);
    let b2 = net.create_neuron(Coord3::new(2.0, 0.0, 0.0));
    assert_eq!(b2.slot, b.slot);
    net.run(20.0).unwrap();

    net.refresh_neuron(b2);
    assert_eq!(net.potential(b2), net.params().membrane.baseline);
}

#[test]
fn test_delivery_of_replaced_synapse_is_skipped() {
    let mut net = empty_network();
    let a = net.create_neuron(Coord3::ORIGIN);
    let b = net.create_neuron(Coord3::new(2.0, 0.0, 0.0));
    let baseline = net.params().membrane.baseline;
    net.create_synapse(a, b, 0.5);
    let old_serial = net.synapse(a, b).unwrap().id();

    // First spike leaves at 0.1 and is due at 12.1
    net.stimulate(a, 30.0);
    net.run(1.0).unwrap();
    assert!(matches!(net.synapse(a, b).unwrap().pending(), PendingSpike::InFlight { .. }));

    net.delete_synapse(a, b);
    assert!(net.create_synapse(a, b, 0.5));
    assert_ne!(net.synapse(a, b).unwrap().id(), old_serial);

    // Second spike leaves at 5.1 and is due at 17.1
    net.run(4.0).unwrap();
    net.stimulate(a, 30.0);
    net.run(12.0).unwrap();
    assert_eq!(net.neuron(a).firing_count(), 2);

    let syn = net.synapse(a, b).unwrap();
    assert!(matches!(syn.pending(), PendingSpike::InFlight { .. }));
    assert_eq!(syn.last_arrival(), None);
    net.refresh_neuron(b);
    assert_eq!(net.potential(b), baseline);

    net.run(1.0).unwrap();
    let arrived = net.synapse(a, b).unwrap().last_arrival().expect("delivered once");
    assert!((arrived - 17.1).abs() < 1e-9);
    net.refresh_neuron(b);
    assert!(net.potential(b) > baseline);
}

#[test]
fn test_flip_drops_in_flight_delivery() {
    let mut net = empty_network();
    let a = net.create_neuron(Coord3::ORIGIN);
    let b = net.create_neuron(Coord3::new(2.0, 0.0, 0.0));
    let baseline = net.params().membrane.baseline;
    net.create_synapse(a, b, 0.5);

    net.stimulate(a, 30.0);
    net.run(1.0).unwrap();
    let weight = net.synapse(a, b).unwrap().weight();
    assert!(net.flip_synapse(a, b));

    // Old arrival time was 12.1
    net.run(20.0).unwrap();
    let flipped = net.synapse(b, a).unwrap();
    assert_eq!(flipped.weight(), weight);
    assert_eq!(flipped.last_arrival(), None);
    assert_eq!(*flipped.pending(), PendingSpike::None);

    net.refresh_neuron(b);
    assert_eq!(net.potential(b), baseline);
    assert_eq!(net.neuron(b).firing_count(), 0);
}

#[test]
#[should_panic(expected = "Invariant violation")]
fn test_stale_id_panics() {
    let mut net = empty_network();
    let a = net.create_neuron(Coord3::ORIGIN);
    net.delete_neuron(a);
    net.create_neuron(Coord3::ORIGIN);
    let _ = net.potential(a);
}

#[test]
#[should_panic(expected = "Invariant violation")]
fn test_out_of_range_id_panics() {
    let mut net = empty_network();
    let a = net.create_neuron(Coord3::ORIGIN);
    net.create_synapse(a, NeuronId::new(99, 0), 0.5);
}

#[test]
fn test_try_neuron_does_not_panic() {
    let mut net = empty_network();
    let a = net.create_neuron(Coord3::ORIGIN);
    net.delete_neuron(a);
    assert!(net.try_neuron(a).is_none());
    assert!(!net.contains_neuron(NeuronId::new(42, 0)));
}

#[test]
fn test_delete_synapse() {
    let mut net = empty_network();
    let a = net.create_neuron(Coord3::ORIGIN);
    let b = net.create_neuron(Coord3::new(0.5, 0.0, 0.0));
    net.create_synapse(a, b, 0.5);
    assert!(net.delete_synapse(a, b));
    assert!(!net.delete_synapse(a, b));
    assert_eq!(net.synapse_count(), 0);
    assert!(net.neuron(b).incoming().is_empty());
}

#[test]
fn test_flip_applies_between_ticks() {
    let mut net = empty_network();
    let a = net.create_neuron(Coord3::ORIGIN);
    let b = net.create_neuron(Coord3::new(0.5, 0.0, 0.0));
    net.create_synapse(a, b, 0.7);
    let serial = net.synapse(a, b).unwrap().id();

    assert!(net.flip_synapse(a, b));
    // Queued, not yet applied
    assert!(net.synapse(a, b).is_some());

    net.run(0.0).unwrap();
    assert!(net.synapse(a, b).is_none());
    let flipped = net.synapse(b, a).unwrap();
    assert_eq!(flipped.id(), serial);
    assert_eq!(flipped.weight(), 0.7);
    assert_eq!(*flipped.pending(), PendingSpike::None);
    assert_eq!(net.synapse_count(), 1);
    assert_adjacency_consistent(&net);
}

#[test]
fn test_flip_onto_existing_reverse_edge_is_noop() {
    let mut net = empty_network();
    let a = net.create_neuron(Coord3::ORIGIN);
    let b = net.create_neuron(Coord3::new(0.5, 0.0, 0.0));
    net.create_synapse(a, b, 0.7);
    net.create_synapse(b, a, 0.2);
    assert!(net.flip_synapse(a, b));
    net.run(0.0).unwrap();
    assert_eq!(net.synapse(a, b).unwrap().weight(), 0.7);
    assert_eq!(net.synapse(b, a).unwrap().weight(), 0.2);
    assert_eq!(net.synapse_count(), 2);
}

#[test]
fn test_flip_of_missing_edge_is_rejected() {
    let mut net = empty_network();
    let a = net.create_neuron(Coord3::ORIGIN);
    let b = net.create_neuron(Coord3::new(0.5, 0.0, 0.0));
    assert!(!net.flip_synapse(a, b));
}

#[test]
fn test_random_neurons_fill_region() {
    let mut net = empty_network();
    for _ in 0..50 {
        let id = net.create_random_neuron();
        assert!(net.position(id).is_set());
    }
    assert_eq!(net.neuron_count(), 50);
    assert_eq!(net.positions().len(), 50);
}
