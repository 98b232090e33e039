/*
gradient.rs

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

//! Linear and bilinear color gradients.

use super::GeneratorError;
use super::corners::Corners;
use crate::colors::GradientColor;
use crate::vector_math::{self, Vector3};

/// Return `steps` colors going from `from` to `to`, both included.
///
/// Each intermediate color is rounded to integer components and validated.
///
/// # Errors
///
/// Return [`GeneratorError::DegenerateSize`] when `steps` is lower than 2, and
/// [`GeneratorError::Color`] if an intermediate color is out of range.
pub fn linear_gradient<C: GradientColor>(
    from: &C,
    to: &C,
    steps: usize,
) -> Result<Vec<C>, GeneratorError> {
    if steps <= 1 {
        return Err(GeneratorError::DegenerateSize(steps));
    }
    let start: Vector3 = Vector3::from_color(from);
    let delta: Vector3 = vector_math::vector_between(to, from);
    let intervals: f64 = (steps - 1) as f64;
    let step: Vector3 = Vector3::new(
        delta.x / intervals,
        delta.y / intervals,
        delta.z / intervals,
    );

    (0..steps)
        .map(|i| {
            C::from_components((start + step * i as f64).as_array()).map_err(GeneratorError::from)
        })
        .collect()
}

/// Fill a `size` x `size` grid from its four corners.
///
/// The left and right columns are interpolated first, and then every row is interpolated
/// between its left and right cells.
pub fn bilinear<C: GradientColor>(
    corners: &Corners<C>,
    size: usize,
) -> Result<Vec<Vec<C>>, GeneratorError> {
    let left: Vec<C> = linear_gradient(&corners.top_left, &corners.bottom_left, size)?;
    let right: Vec<C> = linear_gradient(&corners.top_right, &corners.bottom_right, size)?;

    left.iter()
        .zip(right.iter())
        .map(|(l, r)| linear_gradient(l, r, size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{Hsl, Rgb};

    fn gray(v: u8) -> Rgb {
        Rgb::from_bytes(v, v, v)
    }

    #[test]
    fn gradient_includes_both_ends() {
        let g: Vec<Rgb> = linear_gradient(&gray(0), &gray(100), 5).unwrap();
        assert_eq!(g, vec![gray(0), gray(25), gray(50), gray(75), gray(100)]);
    }

    #[test]
    fn gradient_rounds_steps() {
        let from: Hsl = Hsl::new(10.0, 50.0, 20.0).unwrap();
        let to: Hsl = Hsl::new(20.0, 50.0, 21.0).unwrap();
        let g: Vec<Hsl> = linear_gradient(&from, &to, 4).unwrap();
        let hues: Vec<f64> = g.iter().map(|c| c.h()).collect();
        assert_eq!(hues, vec![10.0, 13.0, 17.0, 20.0]);
        assert_eq!(g[3], to);
    }

    #[test]
    fn gradient_needs_two_steps() {
        assert_eq!(
            linear_gradient(&gray(0), &gray(1), 1),
            Err(GeneratorError::DegenerateSize(1))
        );
        assert_eq!(
            linear_gradient(&gray(0), &gray(1), 0),
            Err(GeneratorError::DegenerateSize(0))
        );
        assert_eq!(linear_gradient(&gray(0), &gray(1), 2).unwrap().len(), 2);
    }

    #[test]
    fn random_gradients_stay_in_range() {
        // Every step lies between the two ends, so no gradient between valid colors fails
        for a in (0..=255).step_by(17) {
            for b in (0..=255).step_by(51) {
                for steps in 2..50 {
                    let from: Rgb = Rgb::from_bytes(a as u8, b as u8, 255 - a as u8);
                    let to: Rgb = Rgb::from_bytes(b as u8, 255 - a as u8, a as u8);
                    assert_eq!(linear_gradient(&from, &to, steps).unwrap().len(), steps);
                }
            }
        }
    }

    #[test]
    fn bilinear_keeps_corners() {
        let corners: Corners<Rgb> = Corners {
            top_left: Rgb::from_bytes(0, 0, 0),
            top_right: Rgb::from_bytes(200, 0, 0),
            bottom_left: Rgb::from_bytes(0, 200, 0),
            bottom_right: Rgb::from_bytes(200, 200, 200),
        };
        let grid: Vec<Vec<Rgb>> = bilinear(&corners, 5).unwrap();
        assert_eq!(grid.len(), 5);
        assert!(grid.iter().all(|row| row.len() == 5));
        assert_eq!(grid[0][0], corners.top_left);
        assert_eq!(grid[0][4], corners.top_right);
        assert_eq!(grid[4][0], corners.bottom_left);
        assert_eq!(grid[4][4], corners.bottom_right);
        assert_eq!(grid[2][2], Rgb::from_bytes(100, 100, 50));
        assert_eq!(grid[0][1], Rgb::from_bytes(50, 0, 0));
    }
}
