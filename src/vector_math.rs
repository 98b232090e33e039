/*
vector_math.rs

Copyright 2025 Hervé Quatremain

This file is part of Variaine.

Variaine is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Variaine is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Variaine. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Vector math in color space.
//!
//! Colors are points in a three dimensional space (see [`GradientColor`]).
//! The corner-sampling strategies of the generator use vectors between those points, and
//! points sampled on a circle, to place the four corners of a palette.

use rand::Rng;
use std::error::Error;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::colors::{ColorError, GradientColor};

/// Angles closer than this to a multiple of 45 degrees are not used by [`points_on_circle`].
pub const WIGGLE_DEGREES: u32 = 3;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum VectorError {
    /// The vector has a zero length and cannot be normalized.
    DegenerateVector,
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VectorError::DegenerateVector => write!(f, "cannot normalize a zero-length vector"),
        }
    }
}

impl Error for VectorError {}

/// Three dimensional vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Unit vector along the x axis.
    pub const X: Vector3 = Vector3::new(1.0, 0.0, 0.0);

    /// Unit vector along the y axis.
    pub const Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);

    /// Create a [`Vector3`] object.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a vector from the coordinates of a color.
    pub fn from_color<C: GradientColor>(color: &C) -> Self {
        let [x, y, z] = color.components();
        Self { x, y, z }
    }

    /// Return the coordinates as an array.
    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        dot(self, self).sqrt()
    }

    /// Return the unit vector with the same direction.
    ///
    /// # Errors
    ///
    /// Return [`VectorError::DegenerateVector`] when the length is zero.
    pub fn normalize(&self) -> Result<Vector3, VectorError> {
        let length: f64 = self.length();
        if length == 0.0 || !length.is_finite() {
            return Err(VectorError::DegenerateVector);
        }
        Ok(Vector3::new(self.x / length, self.y / length, self.z / length))
    }

    /// Round every coordinate to the nearest integer.
    pub fn round(&self) -> Vector3 {
        Vector3::new(self.x.round(), self.y.round(), self.z.round())
    }

    /// Translate a color by the vector.
    pub fn translate<C: GradientColor>(&self, color: &C) -> Result<C, ColorError> {
        C::from_components((Vector3::from_color(color) + *self).as_array())
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, factor: f64) -> Vector3 {
        Vector3::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        self * -1.0
    }
}

/// Return the vector that goes from `tail` to `head`.
pub fn vector_between<C: GradientColor>(head: &C, tail: &C) -> Vector3 {
    Vector3::from_color(head) - Vector3::from_color(tail)
}

/// Dot product.
pub fn dot(one: &Vector3, two: &Vector3) -> f64 {
    one.x * two.x + one.y * two.y + one.z * two.z
}

/// Cross product.
pub fn cross(one: &Vector3, two: &Vector3) -> Vector3 {
    Vector3::new(
        one.y * two.z - one.z * two.y,
        one.z * two.x - one.x * two.z,
        one.x * two.y - one.y * two.x,
    )
}

/// Whether the angle is within [`WIGGLE_DEGREES`] of a multiple of 45 degrees.
///
/// Multiples of 45 cover both the axis-aligned (90) and the diagonal (45) positions.
fn near_aligned(angle: u32) -> bool {
    let offset: u32 = angle % 45;
    offset < WIGGLE_DEGREES || 45 - offset < WIGGLE_DEGREES
}

/// Return the point of the circle at the given angle, rounded to integer coordinates.
pub fn point_on_circle(center: (f64, f64), radius: f64, degrees: f64) -> (f64, f64) {
    let angle: f64 = degrees.to_radians();
    (
        (radius * angle.cos() + center.0).round(),
        (radius * angle.sin() + center.1).round(),
    )
}

/// Pick four points of a circle, a quarter turn apart.
///
/// The starting angle is a random integer number of degrees that is not close to a multiple of
/// 45: corners aligned with an axis or a diagonal give colors that only differ by lightness.
/// The points are returned in circle order (starting angle + 0, 90, 180, and 270 degrees).
pub fn points_on_circle<R: Rng + ?Sized>(
    center: (f64, f64),
    radius: f64,
    rng: &mut R,
) -> [(f64, f64); 4] {
    // Draw directly from the allowed angles instead of resampling until one fits
    let allowed: Vec<u32> = (0..360).filter(|a| !near_aligned(*a)).collect();
    let start: u32 = allowed[rng.random_range(0..allowed.len())];

    [0, 90, 180, 270].map(|delta: u32| point_on_circle(center, radius, (start + delta) as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{Hsl, Rgb};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn vector_between_colors() {
        let head: Rgb = Rgb::from_bytes(10, 20, 30);
        let tail: Rgb = Rgb::from_bytes(15, 5, 30);
        assert_eq!(vector_between(&head, &tail), Vector3::new(-5.0, 15.0, 0.0));

        let head: Hsl = Hsl::new(200.0, 50.0, 60.0).unwrap();
        let tail: Hsl = Hsl::new(100.0, 50.0, 40.0).unwrap();
        assert_eq!(vector_between(&head, &tail), Vector3::new(100.0, 0.0, 20.0));
    }

    #[test]
    fn dot_and_cross() {
        let a: Vector3 = Vector3::new(1.0, 2.0, 3.0);
        let b: Vector3 = Vector3::new(4.0, -5.0, 6.0);
        assert_eq!(dot(&a, &b), 12.0);
        let c: Vector3 = cross(&a, &b);
        assert_eq!(c, Vector3::new(27.0, 6.0, -13.0));
        assert_eq!(dot(&c, &a), 0.0);
        assert_eq!(dot(&c, &b), 0.0);
        assert_eq!(cross(&Vector3::X, &Vector3::Y), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn length_and_normalize() {
        let v: Vector3 = Vector3::new(3.0, 0.0, 4.0);
        assert_eq!(v.length(), 5.0);
        let n: Vector3 = v.normalize().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert_eq!(n, Vector3::new(0.6, 0.0, 0.8));
    }

    #[test]
    fn zero_vector_cannot_be_normalized() {
        assert_eq!(
            Vector3::default().normalize(),
            Err(VectorError::DegenerateVector)
        );
    }

    #[test]
    fn translate_validates_the_color() {
        let c: Rgb = Rgb::from_bytes(250, 0, 0);
        assert_eq!(
            Vector3::new(5.0, 1.0, 2.0).translate(&c),
            Ok(Rgb::from_bytes(255, 1, 2))
        );
        assert!(Vector3::new(6.0, 0.0, 0.0).translate(&c).is_err());
        assert!((-Vector3::new(0.0, 1.0, 0.0)).translate(&c).is_err());
    }

    #[test]
    fn aligned_angles_are_detected() {
        for a in [0, 1, 2, 43, 44, 45, 47, 88, 90, 92, 135, 180, 270, 359] {
            assert!(near_aligned(a), "{a}");
        }
        for a in [3, 10, 22, 42, 48, 100, 200, 357] {
            assert!(!near_aligned(a), "{a}");
        }
    }

    #[test]
    fn circle_points_are_a_quarter_turn_apart() {
        let mut rng: StdRng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let center: (f64, f64) = (180.0, 50.0);
            let radius: f64 = 40.0;
            let points: [(f64, f64); 4] = points_on_circle(center, radius, &mut rng);

            for (x, y) in points {
                assert_eq!(x, x.round());
                assert_eq!(y, y.round());
                let d: f64 = ((x - center.0).powi(2) + (y - center.1).powi(2)).sqrt();
                assert!((d - radius).abs() <= 1.0, "{d}");
            }
            // Opposite points are symmetric around the center (up to rounding)
            assert!((points[0].0 + points[2].0 - 2.0 * center.0).abs() <= 1.0);
            assert!((points[1].1 + points[3].1 - 2.0 * center.1).abs() <= 1.0);
            // Never aligned with the axes: no two points share a coordinate
            assert!(points[0].0 != points[1].0 && points[0].1 != points[1].1);
        }
    }
}
