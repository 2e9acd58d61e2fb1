// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Event Scheduler
//!
//! A min-heap of `(time, seq, entity)` events over a monotonic simulated
//! clock.
//!
//! - Events pop in ascending time; equal times pop in insertion order.
//! - An event is removed before it is handed to the caller, so the handler
//!   may schedule the same entity again.
//! - Only events with `time <= target` are released. The queue may run dry
//!   before the target; [`Scheduler::finish`] then snaps the clock forward.
//! - Zero and negative delays are accepted and run in the current advance.
//!   They never move the clock backwards.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use neuroweave_neural::{NeuronId, SimTime, SynapseId};

/// Closed set of things that can be resynchronised at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schedulable {
    /// Resynchronise a neuron
    Neuron(NeuronId),
    /// Deliver the in-flight spike of the synapse `parent -> target`
    Synapse {
        parent: NeuronId,
        target: NeuronId,
        serial: SynapseId,
    },
    /// Fire input adapter `n`
    Input(usize),
}

/// One queued resynchronisation
#[derive(Debug, Clone, Copy)]
pub struct Event {
    pub time: SimTime,
    pub seq: u64,
    pub entity: Schedulable,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then(self.seq.cmp(&other.seq))
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: SimTime,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Event>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time (ms)
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Number of queued events
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queue `entity` at `now + delay`; returns the absolute event time
    pub fn schedule(&mut self, entity: Schedulable, delay: SimTime) -> SimTime {
        let time = self.now + delay;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Event { time, seq, entity }));
        time
    }

    /// Time of the earliest queued event
    pub fn peek_time(&self) -> Option<SimTime> {
        self.queue.peek().map(|Reverse(ev)| ev.time)
    }

    /// Remove and return the earliest event if it is due by `target`
    ///
    /// The clock moves to the event's time unless that would move it
    /// backwards.
    pub fn pop_due(&mut self, target: SimTime) -> Option<Event> {
        match self.queue.peek() {
            Some(Reverse(ev)) if ev.time <= target => {}
            _ => return None,
        }
        let Reverse(event) = self.queue.pop()?;
        if event.time > self.now {
            self.now = event.time;
        }
        Some(event)
    }

    /// Snap the clock to `target` (never backwards)
    pub fn finish(&mut self, target: SimTime) {
        if target > self.now {
            self.now = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(n: usize) -> Schedulable {
        Schedulable::Input(n)
    }

    /// Pop every event due within `budget`, then snap the clock
    fn advance<F>(s: &mut Scheduler, budget: SimTime, mut handler: F)
    where
        F: FnMut(&mut Scheduler, Event),
    {
        let target = s.now() + budget;
        while let Some(event) = s.pop_due(target) {
            handler(s, event);
        }
        s.finish(target);
    }

    fn drain(s: &mut Scheduler, budget: SimTime) -> Vec<(SimTime, usize)> {
        let mut seen = Vec::new();
        advance(s, budget, |_, ev| {
            if let Schedulable::Input(n) = ev.entity {
                seen.push((ev.time, n));
            }
        });
        seen
    }

    #[test]
    fn test_time_order() {
        let mut s = Scheduler::new();
        s.schedule(input(3), 3.0);
        s.schedule(input(1), 1.0);
        s.schedule(input(2), 2.0);
        let seen = drain(&mut s, 5.0);
        assert_eq!(seen, vec![(1.0, 1), (2.0, 2), (3.0, 3)]);
        assert_eq!(s.now(), 5.0);
    }

    #[test]
    fn test_ties_are_fifo() {
        let mut s = Scheduler::new();
        for n in 0..10 {
            s.schedule(input(n), 1.0);
        }
        let order: Vec<usize> = drain(&mut s, 1.0).into_iter().map(|(_, n)| n).collect();
        assert_eq!(order, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_events_after_target_stay_queued() {
        let mut s = Scheduler::new();
        s.schedule(input(0), 1.0);
        s.schedule(input(1), 1.5);
        let seen = drain(&mut s, 1.0);
        assert_eq!(seen, vec![(1.0, 0)]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.now(), 1.0);
        assert_eq!(s.peek_time(), Some(1.5));
    }

    #[test]
    fn test_clock_snaps_when_queue_runs_dry() {
        let mut s = Scheduler::new();
        s.schedule(input(0), 0.25);
        drain(&mut s, 10.0);
        assert_eq!(s.now(), 10.0);
        assert!(s.is_empty());
    }

    #[test]
    fn test_zero_delay_cascade_runs_in_same_advance() {
        let mut s = Scheduler::new();
        s.schedule(input(0), 1.0);
        let mut seen = Vec::new();
        advance(&mut s, 2.0, |s, ev| {
            if let Schedulable::Input(n) = ev.entity {
                seen.push((s.now(), n));
                if n < 3 {
                    s.schedule(input(n + 1), 0.0);
                }
            }
        });
        assert_eq!(seen, vec![(1.0, 0), (1.0, 1), (1.0, 2), (1.0, 3)]);
    }

    #[test]
    fn test_negative_delay_never_rewinds_clock() {
        let mut s = Scheduler::new();
        s.schedule(input(0), 2.0);
        let mut times = Vec::new();
        advance(&mut s, 3.0, |s, ev| {
            times.push(s.now());
            if ev.entity == input(0) {
                s.schedule(input(1), -1.5);
            }
        });
        assert_eq!(times, vec![2.0, 2.0]);
        assert_eq!(s.now(), 3.0);
    }

    #[test]
    fn test_self_reschedule_beyond_target_waits() {
        let mut s = Scheduler::new();
        s.schedule(input(7), 0.5);
        let mut count = 0;
        advance(&mut s, 1.0, |s, ev| {
            count += 1;
            s.schedule(ev.entity, 1.0);
        });
        assert_eq!(count, 1);
        assert_eq!(s.peek_time(), Some(1.5));
    }
}
