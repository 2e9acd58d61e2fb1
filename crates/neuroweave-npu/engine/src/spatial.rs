// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Uniform grid hash over neuron positions.

Neurons are bucketed into cubic cells keyed by integer cell coordinates. A
radius query visits only the cells the query sphere can touch, then filters by
exact distance. Results are returned sorted by slot so callers iterate in a
deterministic order.
*/

use ahash::AHashMap;
use neuroweave_neural::Coord3;

type CellKey = (i32, i32, i32);

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: AHashMap<CellKey, Vec<(u32, Coord3)>>,
}

impl SpatialGrid {
    /// Build a grid over `(slot, position)` pairs; unset positions are skipped
    pub fn build<I>(cell_size: f32, points: I) -> Self
    where
        I: IntoIterator<Item = (u32, Coord3)>,
    {
        let cell_size = if cell_size > 0.0 && cell_size.is_finite() {
            cell_size
        } else {
            1.0
        };
        let mut grid = Self {
            cell_size,
            cells: AHashMap::new(),
        };
        for (slot, pos) in points {
            grid.insert(slot, pos);
        }
        grid
    }

    #[inline]
    fn key(&self, pos: &Coord3) -> CellKey {
        (
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
            (pos.z / self.cell_size).floor() as i32,
        )
    }

    pub fn insert(&mut self, slot: u32, pos: Coord3) {
        if !pos.is_set() {
            return;
        }
        let key = self.key(&pos);
        self.cells.entry(key).or_default().push((slot, pos));
    }

    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Slots strictly closer than `radius` to `center`, ascending
    ///
    /// Falls back to scanning every bucket when the query box spans more
    /// cells than the grid holds.
    pub fn within(&self, center: &Coord3, radius: f32) -> Vec<u32> {
        let mut found = Vec::new();
        if !center.is_set() || !(radius > 0.0) {
            return found;
        }
        let r2 = radius * radius;
        let mut collect = |bucket: &Vec<(u32, Coord3)>| {
            found.extend(
                bucket
                    .iter()
                    .filter(|(_, p)| p.distance_squared(center) < r2)
                    .map(|(slot, _)| *slot),
            );
        };

        let reach = (radius as f64 / self.cell_size as f64).ceil();
        let span = 2.0 * reach + 1.0;
        if !(span * span * span <= self.cells.len() as f64) {
            self.cells.values().for_each(&mut collect);
        } else {
            let reach = reach as i32;
            let (cx, cy, cz) = self.key(center);
            for dx in -reach..=reach {
                for dy in -reach..=reach {
                    for dz in -reach..=reach {
                        let key = (
                            cx.saturating_add(dx),
                            cy.saturating_add(dy),
                            cz.saturating_add(dz),
                        );
                        if let Some(bucket) = self.cells.get(&key) {
                            collect(bucket);
                        }
                    }
                }
            }
        }
        found.sort_unstable();
        found.dedup();
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_matches_brute_force() {
        let points: Vec<(u32, Coord3)> = (0..200u32)
            .map(|i| {
                let f = i as f32;
                (
                    i,
                    Coord3::new((f * 0.37).sin() * 3.0, (f * 0.91).cos() * 3.0, (f * 0.13).sin() * 3.0),
                )
            })
            .collect();
        let grid = SpatialGrid::build(1.0, points.iter().copied());
        assert_eq!(grid.len(), 200);

        for radius in [0.3_f32, 1.0, 2.5] {
            for (_, center) in points.iter().step_by(17) {
                let mut expected: Vec<u32> = points
                    .iter()
                    .filter(|(_, p)| p.distance_squared(center) < radius * radius)
                    .map(|(s, _)| *s)
                    .collect();
                expected.sort_unstable();
                assert_eq!(grid.within(center, radius), expected);
            }
        }
    }

    #[test]
    fn test_unset_positions_are_not_indexed() {
        let grid = SpatialGrid::build(1.0, vec![(0, Coord3::UNSET), (1, Coord3::ORIGIN)]);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.within(&Coord3::ORIGIN, 0.5), vec![1]);
        assert!(grid.within(&Coord3::UNSET, 0.5).is_empty());
    }

    #[test]
    fn test_radius_is_strict() {
        let grid = SpatialGrid::build(
            1.0,
            vec![(0, Coord3::ORIGIN), (1, Coord3::new(1.0, 0.0, 0.0))],
        );
        assert_eq!(grid.within(&Coord3::ORIGIN, 1.0), vec![0]);
    }

    #[test]
    fn test_huge_radius_scans_every_bucket() {
        let points = vec![
            (0, Coord3::new(-5.0, 0.0, 0.0)),
            (1, Coord3::new(40.0, -3.0, 2.0)),
            (2, Coord3::new(1e6, 1e6, -1e6)),
        ];
        let grid = SpatialGrid::build(1.0, points);
        assert_eq!(grid.within(&Coord3::new(-5.0, 0.0, 0.0), 1e10), vec![0, 1, 2]);
        assert_eq!(grid.within(&Coord3::new(-5.0, 0.0, 0.0), f32::MAX), vec![0, 1, 2]);
        assert_eq!(grid.within(&Coord3::ORIGIN, 100.0), vec![0, 1]);
    }

    #[test]
    fn test_far_center_does_not_overflow_cell_keys() {
        let grid = SpatialGrid::build(1e-3, (0..64u32).map(|i| (i, Coord3::new(i as f32, 0.0, 0.0))));
        assert!(grid.within(&Coord3::new(3e9, 0.0, 0.0), 0.001).is_empty());
        assert_eq!(grid.within(&Coord3::new(2.0, 0.0, 0.0), 0.001), vec![2]);
    }
}
