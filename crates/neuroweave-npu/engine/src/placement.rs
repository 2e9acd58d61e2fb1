// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Random neuron placement at constant density.

The placement region is a sphere (or cube) whose volume is
`population / density`, so the region grows with the population and the
expected number of neighbours inside the connectivity radius stays roughly
constant.
*/

use neuroweave_config::PlacementShape;
use neuroweave_neural::Coord3;
use rand::Rng;

/// Radius (sphere) or half side (cube) of the region holding `population`
pub fn region_extent(shape: PlacementShape, density: f32, population: usize) -> f32 {
    let volume = population.max(1) as f32 / density;
    match shape {
        PlacementShape::Sphere => (3.0 * volume / (4.0 * std::f32::consts::PI)).cbrt(),
        PlacementShape::Cube => volume.cbrt() * 0.5,
    }
}

/// Uniform random position inside the region sized for `population`
pub fn random_position<R: Rng + ?Sized>(
    rng: &mut R,
    shape: PlacementShape,
    density: f32,
    population: usize,
) -> Coord3 {
    let extent = region_extent(shape, density, population);
    loop {
        let p = Coord3::new(
            rng.gen_range(-extent..=extent),
            rng.gen_range(-extent..=extent),
            rng.gen_range(-extent..=extent),
        );
        match shape {
            PlacementShape::Cube => return p,
            // Rejection sampling; accepts ~52% of draws
            PlacementShape::Sphere => {
                if p.distance_squared(&Coord3::ORIGIN) <= extent * extent {
                    return p;
                }
            }
        }
    }
}
