// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spatial types for 3D brain coordinates

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 3D position (x, y, z) in brain space.
///
/// A coordinate whose components are NaN is "unset": callers pass
/// [`Coord3::UNSET`] to ask the network to pick a random position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Coord3 {
    pub const UNSET: Coord3 = Coord3 {
        x: f32::NAN,
        y: f32::NAN,
        z: f32::NAN,
    };

    pub const ORIGIN: Coord3 = Coord3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// True when every component is a real number
    #[inline]
    pub fn is_set(&self) -> bool {
        !(self.x.is_nan() || self.y.is_nan() || self.z.is_nan())
    }

    #[inline]
    pub fn distance_squared(&self, other: &Coord3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Euclidean distance. NaN if either side is unset.
    #[inline]
    pub fn distance(&self, other: &Coord3) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Linear interpolation towards `other` (`t = 0` is `self`)
    #[inline]
    pub fn lerp(&self, other: &Coord3, t: f32) -> Coord3 {
        Coord3 {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

impl From<[f32; 3]> for Coord3 {
    fn from(v: [f32; 3]) -> Self {
        Coord3::new(v[0], v[1], v[2])
    }
}

impl From<(f32, f32, f32)> for Coord3 {
    fn from(v: (f32, f32, f32)) -> Self {
        Coord3::new(v.0, v.1, v.2)
    }
}
