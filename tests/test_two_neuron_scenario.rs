// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
End-to-end two-neuron scenario.

A single excitatory synapse A -> B of weight 0.5 and length 2. A is pushed
over threshold; B must stay at baseline until the spike arrives after
`length × conduction_delay`, then rise. Plasticity must move the weight in
the direction set by the relative fire order, never leaving its sign class.
*/

use neuroweave::prelude::*;

const LEARNING_RATE: f32 = 0.02;

fn two_neurons(weight: f32) -> (Network, NeuronId, NeuronId) {
    let mut config = NeuroweaveConfig::default();
    config.simulation.seed = Some(2025);
    config.plasticity.learning_rate = LEARNING_RATE;
    let mut net = Network::new(&config).expect("default config is valid");
    let a = net.create_neuron(Coord3::ORIGIN);
    let b = net.create_neuron(Coord3::new(2.0, 0.0, 0.0));
    assert!(net.create_synapse(a, b, weight));
    (net, a, b)
}

#[test]
fn test_target_rises_only_after_delay() {
    let (mut net, a, b) = two_neurons(0.5);
    let baseline = net.params().membrane.baseline;
    let delay = 2.0 * net.params().conduction_delay;

    net.stimulate(a, 30.0);
    net.run(1.0).unwrap();
    let fired_at = net.neuron(a).last_fire().expect("A fired");

    // Sample B on a fine grid up to just before arrival
    while net.time() + 0.5 < fired_at + delay {
        net.run(0.5).unwrap();
        net.refresh_neuron(b);
        assert_eq!(net.potential(b), baseline, "B moved early at t={}", net.time());
    }

    net.run(fired_at + delay + 2.0 - net.time()).unwrap();
    net.refresh_neuron(b);
    assert!(net.potential(b) > baseline);
    assert_eq!(net.neuron(b).firing_count(), 0);
}

#[test]
fn test_pre_without_post_depresses() {
    let (mut net, a, b) = two_neurons(0.5);
    net.stimulate(a, 30.0);
    net.run(13.0).unwrap();

    // Delivery: pre trace 1, post trace 0 (B never fired)
    let weight = net.synapse(a, b).unwrap().weight();
    assert!((weight - (0.5 - LEARNING_RATE)).abs() < 1e-6, "weight {weight}");
    assert!(weight >= 0.0);
}

#[test]
fn test_post_after_pre_potentiates() {
    let (mut net, a, b) = two_neurons(0.5);
    net.stimulate(a, 30.0);
    net.run(14.0).unwrap();
    let after_delivery = net.synapse(a, b).unwrap().weight();

    net.stimulate(b, 30.0);
    net.run(1.0).unwrap();
    assert_eq!(net.neuron(b).firing_count(), 1);

    let potentiated = net.synapse(a, b).unwrap().weight();
    assert!(potentiated > after_delivery);
    assert!((0.0..=1.0).contains(&potentiated));
    assert_eq!(net.synapse(a, b).unwrap().class(), SynapseType::Excitatory);
}

#[test]
fn test_pre_after_post_depresses_less_than_unpaired() {
    let (mut net, a, b) = two_neurons(0.5);

    // B fires first; with no presynaptic history this only potentiates
    net.stimulate(b, 30.0);
    net.run(5.0).unwrap();
    assert_eq!(net.neuron(b).firing_count(), 1);
    let before = net.synapse(a, b).unwrap().weight();
    assert!(before > 0.5);

    // Then A; its spike lands on a recently active B
    net.stimulate(a, 30.0);
    net.run(14.0).unwrap();
    let weight = net.synapse(a, b).unwrap().weight();
    assert!(weight < before);
    assert!(weight > before - LEARNING_RATE);
}

#[test]
fn test_inhibitory_weight_never_turns_excitatory() {
    let (mut net, a, b) = two_neurons(-0.01);
    net.control().set_learning_rate(0.5);

    for round in 0..5 {
        net.stimulate(b, 30.0);
        net.run(6.0).unwrap();
        net.stimulate(a, 30.0);
        net.run(20.0).unwrap();
        let syn = net.synapse(a, b).unwrap();
        assert_eq!(syn.class(), SynapseType::Inhibitory, "round {round}");
        assert!((-1.0..=0.0).contains(&syn.weight()), "round {round}: {}", syn.weight());
    }
}

#[test]
fn test_deleting_target_mid_flight_is_harmless() {
    let (mut net, a, b) = two_neurons(0.5);
    net.stimulate(a, 30.0);
    net.run(5.0).unwrap();
    net.delete_neuron(b);
    net.run(20.0).unwrap();
    assert_eq!(net.synapse_count(), 0);
    assert_eq!(net.neuron(a).firing_count(), 1);
}
