// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Read-only exports for plotting and reporting

use std::collections::VecDeque;

use ahash::AHashMap;
use neuroweave_neural::{NeuronId, SimTime};
use serde::Serialize;

/// One sample of a selected neuron
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronSnapshot {
    pub time: SimTime,
    pub voltage: f32,
    /// Weight of every outgoing synapse, by target
    pub synapse_weights: Vec<(NeuronId, f32)>,
}

/// Bounded per-neuron history of the selected neurons
#[derive(Debug, Clone, Default)]
pub struct SnapshotLog {
    selected: Vec<NeuronId>,
    history: AHashMap<NeuronId, VecDeque<NeuronSnapshot>>,
}

impl SnapshotLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected neurons in selection order
    pub fn selected(&self) -> &[NeuronId] {
        &self.selected
    }

    pub fn is_selected(&self, id: NeuronId) -> bool {
        self.selected.contains(&id)
    }

    /// Returns false if already selected
    pub fn select(&mut self, id: NeuronId) -> bool {
        if self.is_selected(id) {
            return false;
        }
        self.selected.push(id);
        self.history.entry(id).or_default();
        true
    }

    /// Stop recording `id` and drop its history
    pub fn deselect(&mut self, id: NeuronId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| *s != id);
        self.history.remove(&id);
        self.selected.len() != before
    }

    pub fn history(&self, id: NeuronId) -> Option<&VecDeque<NeuronSnapshot>> {
        self.history.get(&id)
    }

    pub(crate) fn record(&mut self, id: NeuronId, snapshot: NeuronSnapshot) {
        self.history.entry(id).or_default().push_back(snapshot);
    }

    /// Drop samples older than `now - window`
    pub(crate) fn trim(&mut self, now: SimTime, window: SimTime) {
        let horizon = now - window;
        for samples in self.history.values_mut() {
            while samples.front().map_or(false, |s| s.time < horizon) {
                samples.pop_front();
            }
        }
    }
}

/// Count `values` into `bins` equal-width buckets over `[min, max]`
///
/// Values outside the range land in the edge buckets; NaN is ignored.
pub fn histogram<I>(values: I, bins: usize, min: f32, max: f32) -> Vec<usize>
where
    I: IntoIterator<Item = f32>,
{
    let mut counts = vec![0usize; bins];
    if bins == 0 || !(max > min) {
        return counts;
    }
    let width = (max - min) / bins as f32;
    for v in values {
        if v.is_nan() {
            continue;
        }
        let idx = ((v - min) / width).floor();
        let idx = if idx < 0.0 {
            0
        } else {
            (idx as usize).min(bins - 1)
        };
        counts[idx] += 1;
    }
    counts
}

/// Summary of a network at one point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub time: SimTime,
    pub neurons: usize,
    pub synapses: usize,
    pub excitatory: usize,
    pub inhibitory: usize,
    pub pending_events: usize,
    pub mean_activity: f32,
    pub mean_abs_weight: f32,
    pub total_fires: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_edges_and_nan() {
        let counts = histogram(vec![-5.0, 0.0, 0.24, 0.5, 0.99, 1.0, 7.0, f32::NAN], 4, 0.0, 1.0);
        assert_eq!(counts, vec![3, 0, 1, 3]);
    }

    #[test]
    fn test_histogram_degenerate_range() {
        assert_eq!(histogram(vec![1.0], 3, 1.0, 1.0), vec![0, 0, 0]);
        assert!(histogram(vec![1.0], 0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn test_snapshot_trim_and_deselect() {
        let id = NeuronId::new(0, 0);
        let mut log = SnapshotLog::new();
        assert!(log.select(id));
        assert!(!log.select(id));
        for t in 0..10 {
            log.record(
                id,
                NeuronSnapshot {
                    time: t as f64,
                    voltage: -70.0,
                    synapse_weights: Vec::new(),
                },
            );
        }
        log.trim(9.0, 3.0);
        let times: Vec<f64> = log.history(id).unwrap().iter().map(|s| s.time).collect();
        assert_eq!(times, vec![6.0, 7.0, 8.0, 9.0]);

        assert!(log.deselect(id));
        assert!(log.history(id).is_none());
        assert!(log.selected().is_empty());
    }
}
