// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Network tick benchmarks
//!
//! Measures one 1 ms tick of a proximity-wired network driven by three
//! inputs, after a warm-up so the queue holds a steady mix of events.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use neuroweave_config::NeuroweaveConfig;
use neuroweave_engine::{InputRates, Network};

fn build_network(neurons: usize) -> Network {
    let mut config = NeuroweaveConfig::default();
    config.simulation.initial_neurons = neurons;
    config.simulation.seed = Some(0xBEEF);
    let mut net = Network::new(&config).expect("valid default config");
    net.set_input_rate_array(InputRates::new(vec![80.0, 40.0, 40.0]), None, Some(vec![1.2; 3]))
        .expect("input arrays agree");
    for _ in 0..200 {
        net.run(1.0).expect("finite budget");
    }
    net
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_tick");
    for &size in &[100usize, 750, 3000] {
        let mut net = build_network(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                net.run(black_box(1.0)).expect("finite budget");
            });
        });
    }
    group.finish();
}

fn bench_make_connections(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_connections");
    group.sample_size(20);
    for &size in &[750usize, 3000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut config = NeuroweaveConfig::default();
                config.simulation.initial_neurons = size;
                config.simulation.seed = Some(7);
                black_box(Network::new(&config).expect("valid default config").synapse_count())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tick, bench_make_connections);
criterion_main!(benches);
