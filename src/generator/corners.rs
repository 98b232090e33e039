/*
corners.rs

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

//! Sample the four corner colors of a palette.
//!
//! Every [`Strategy`] returns the corners in the color space in which the gradient must be
//! interpolated. A strategy only performs one sampling attempt: when the sample does not meet
//! its constraints, it returns an error and [`super::random_palette::RandomPalette`] tries
//! again.

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::GeneratorError;
use crate::colors::{GradientColor, Hsl, Rgb};
use crate::vector_math::{self, Vector3};

/// Smallest circle radius for the circle strategies.
const MIN_RADIUS: u32 = 30;

/// Smallest circle radius for [`Strategy::WideCircle`].
const WIDE_MIN_RADIUS: u32 = 10;

/// The largest possible radius must exceed the smallest radius by more than this margin.
const RADIUS_MARGIN: u32 = 4;

/// Palettes with a saturation below this value look washed out.
const MIN_SATURATION: f64 = 20.0;

/// Range of the pinned saturation for [`Strategy::WideCircle`].
const WIDE_SATURATION: (u32, u32) = (5, 90);

/// Smallest distance between the two top corners for the RGB vector strategies.
const MIN_EDGE_LENGTH: f64 = 60.0;

/// Preferred smallest channel step between two cells for [`Strategy::UniformStep`].
const UNIFORM_MIN_STEP: i32 = 15;

/// Algorithm used to pick the corner colors.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Display, Default,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Strategy {
    /// Four points a quarter turn apart on a circle in the hue/lightness plane, with a pinned
    /// saturation.
    #[default]
    Circle,

    /// Like [`Strategy::Circle`], but the circle is sampled on a square plane that is stretched
    /// over the whole hue range.
    WideCircle,

    /// Four random hue/lightness points, sorted by lightness and hue, then rotated.
    Scattered,

    /// Two random RGB top corners; the sides mirror the top edge on the green axis.
    Square,

    /// Two random RGB top corners; the sides are perpendicular to the top edge.
    PlaneNormal,

    /// The same RGB step between every pair of adjacent cells.
    UniformStep,

    /// One random color and its three quarter-turn hue rotations.
    SplitComplementary,
}

/// The four corners of a palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners<C> {
    pub top_left: C,
    pub top_right: C,
    pub bottom_left: C,
    pub bottom_right: C,
}

impl<C: GradientColor> Corners<C> {
    /// Return the corners as an array, in row-major order.
    pub fn as_array(&self) -> [C; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Whether the four corners have four different RGB values.
    pub fn are_distinct(&self) -> bool {
        let rgb: [Rgb; 4] = self.as_array().map(|c| c.to_rgb());
        (0..4).all(|i| (i + 1..4).all(|j| rgb[i] != rgb[j]))
    }

    /// Rotate the corners clockwise by the given number of quarter turns.
    pub fn rotate(self, quarter_turns: u32) -> Self {
        let mut corners: Corners<C> = self;
        for _ in 0..quarter_turns % 4 {
            corners = Corners {
                top_left: corners.bottom_left,
                top_right: corners.top_left,
                bottom_right: corners.top_right,
                bottom_left: corners.bottom_right,
            };
        }
        corners
    }
}

/// Corners in the color space where the gradient is interpolated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerSet {
    Hsl(Corners<Hsl>),
    Rgb(Corners<Rgb>),
}

impl CornerSet {
    /// Whether the four corners have four different RGB values.
    pub fn are_distinct(&self) -> bool {
        match self {
            CornerSet::Hsl(c) => c.are_distinct(),
            CornerSet::Rgb(c) => c.are_distinct(),
        }
    }
}

impl Strategy {
    /// Perform one sampling attempt for a board of the given size.
    ///
    /// # Errors
    ///
    /// Return an error when the sample does not meet the strategy constraints or produces an
    /// out-of-range color. The caller is expected to retry.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        size: usize,
        rng: &mut R,
    ) -> Result<CornerSet, GeneratorError> {
        match self {
            Strategy::Circle => circle(rng).map(CornerSet::Hsl),
            Strategy::WideCircle => wide_circle(rng).map(CornerSet::Hsl),
            Strategy::Scattered => scattered(rng).map(CornerSet::Hsl),
            Strategy::Square => square(rng).map(CornerSet::Rgb),
            Strategy::PlaneNormal => plane_normal(rng).map(CornerSet::Rgb),
            Strategy::UniformStep => uniform_step(size, rng).map(CornerSet::Rgb),
            Strategy::SplitComplementary => split_complementary(rng).map(CornerSet::Rgb),
        }
    }
}

/// Return a random HSL color with integer components.
fn random_hsl<R: Rng + ?Sized>(rng: &mut R) -> Result<Hsl, GeneratorError> {
    Ok(Hsl::new(
        rng.random_range(0..=360) as f64,
        rng.random_range(0..=100) as f64,
        rng.random_range(0..=100) as f64,
    )?)
}

/// Return a random RGB color.
fn random_rgb<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::from_bytes(rng.random(), rng.random(), rng.random())
}

/// Build the corners from four circle points given in circle order.
///
/// Walking around the circle visits top-left, top-right, bottom-right, and then bottom-left,
/// so that the gradient does not fold over itself.
fn corners_from_circle(
    points: [(f64, f64); 4],
    to_color: impl Fn((f64, f64)) -> Result<Hsl, GeneratorError>,
) -> Result<Corners<Hsl>, GeneratorError> {
    Ok(Corners {
        top_left: to_color(points[0])?,
        top_right: to_color(points[1])?,
        bottom_right: to_color(points[2])?,
        bottom_left: to_color(points[3])?,
    })
}

/// Corners on a circle around a random HSL center, with the saturation of the center.
fn circle<R: Rng + ?Sized>(rng: &mut R) -> Result<Corners<Hsl>, GeneratorError> {
    let centre: Hsl = random_hsl(rng)?;
    let pin: f64 = centre.s();

    // Largest circle before reaching the HSL limits
    let max_radius: u32 = centre.min_distance_to_bounds() as u32;
    if max_radius <= MIN_RADIUS + RADIUS_MARGIN {
        return Err(GeneratorError::Rejected("center too close to the bounds"));
    }
    if pin <= MIN_SATURATION {
        return Err(GeneratorError::Rejected("saturation too low"));
    }
    let radius: u32 = rng.random_range(MIN_RADIUS + 1..max_radius);

    let points: [(f64, f64); 4] =
        vector_math::points_on_circle((centre.h(), centre.l()), radius as f64, rng);
    corners_from_circle(points, |(h, l)| Ok(Hsl::new(h, pin, l)?))
}

/// Corners on a circle drawn on a 100x100 plane, the x axis being stretched to the hue range.
fn wide_circle<R: Rng + ?Sized>(rng: &mut R) -> Result<Corners<Hsl>, GeneratorError> {
    let x: u32 = rng.random_range(0..=100);
    let y: u32 = rng.random_range(0..=100);
    let pin: u32 = rng.random_range(WIDE_SATURATION.0..=WIDE_SATURATION.1);

    // The saturation is also a bound so that light and dark palettes keep some color
    let max_radius: u32 = [x, y, 100 - x, 100 - y, pin, 100 - pin]
        .into_iter()
        .min()
        .unwrap_or(0);
    if max_radius <= WIDE_MIN_RADIUS + RADIUS_MARGIN {
        return Err(GeneratorError::Rejected("center too close to the bounds"));
    }
    let radius: u32 = rng.random_range(WIDE_MIN_RADIUS + 1..max_radius);

    let points: [(f64, f64); 4] =
        vector_math::points_on_circle((x as f64, y as f64), radius as f64, rng);
    corners_from_circle(points, |(h, l)| {
        Ok(Hsl::new((h * 3.6).round(), pin as f64, l)?)
    })
}

/// Four random points sorted into a non-crossing quadrilateral, then rotated.
fn scattered<R: Rng + ?Sized>(rng: &mut R) -> Result<Corners<Hsl>, GeneratorError> {
    let saturation: f64 = rng.random_range(0..=100) as f64;
    let mut points: Vec<(u32, u32)> = (0..4)
        .map(|_| (rng.random_range(0..=360), rng.random_range(0..=100)))
        .collect();

    // The two lightest points form the top row, each row in increasing hue
    points.sort_by_key(|p| p.1);
    let mut bottom: Vec<(u32, u32)> = points[..2].to_vec();
    let mut top: Vec<(u32, u32)> = points[2..].to_vec();
    bottom.sort_by_key(|p| p.0);
    top.sort_by_key(|p| p.0);

    let hsl = |p: (u32, u32)| Hsl::new(p.0 as f64, saturation, p.1 as f64);
    let corners: Corners<Hsl> = Corners {
        top_left: hsl(top[0])?,
        top_right: hsl(top[1])?,
        bottom_left: hsl(bottom[0])?,
        bottom_right: hsl(bottom[1])?,
    };
    Ok(corners.rotate(rng.random_range(0..4)))
}

/// Return two random RGB colors that are far enough from each other, and the vector between
/// them.
fn top_edge<R: Rng + ?Sized>(rng: &mut R) -> Result<(Rgb, Rgb, Vector3), GeneratorError> {
    let top_left: Rgb = random_rgb(rng);
    let top_right: Rgb = random_rgb(rng);
    let edge: Vector3 = vector_math::vector_between(&top_right, &top_left);
    if edge.length() < MIN_EDGE_LENGTH {
        return Err(GeneratorError::Rejected("top corners too close"));
    }
    Ok((top_left, top_right, edge))
}

/// Parallelogram whose left edge is the top edge mirrored on the green axis.
fn square<R: Rng + ?Sized>(rng: &mut R) -> Result<Corners<Rgb>, GeneratorError> {
    let (top_left, top_right, edge) = top_edge(rng)?;
    let side: Vector3 = Vector3::new(edge.x, -edge.y, edge.z);
    let bottom_left: Rgb = side.translate(&top_left)?;
    Ok(Corners {
        top_left,
        top_right,
        bottom_left,
        bottom_right: edge.translate(&bottom_left)?,
    })
}

/// Rectangle whose left edge is perpendicular to the top edge and has the same length.
fn plane_normal<R: Rng + ?Sized>(rng: &mut R) -> Result<Corners<Rgb>, GeneratorError> {
    let (top_left, top_right, edge) = top_edge(rng)?;
    let length: f64 = edge.length();

    // The cross product with an axis parallel to the edge would be the zero vector
    let axis: Vector3 = if vector_math::dot(&edge, &Vector3::X).abs() == length {
        Vector3::Y
    } else {
        Vector3::X
    };
    let side: Vector3 = (vector_math::cross(&edge, &axis).normalize()? * length).round();

    let bottom_left: Rgb = (-side).translate(&top_left)?;
    Ok(Corners {
        top_left,
        top_right,
        bottom_left,
        bottom_right: edge.translate(&bottom_left)?,
    })
}

/// Cell (i, j) is RGB(i * step + shift, j * step + shift, (i + j) * step + shift).
///
/// The grid is linear in i and j, so its four corners describe it completely.
fn uniform_step<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Corners<Rgb>, GeneratorError> {
    let span: i32 = size as i32 - 1;
    // The blue channel of the bottom-right cell grows by 2 * span steps
    let max_step: i32 = 255 / (2 * span).max(1);
    if max_step == 0 {
        return Err(GeneratorError::Rejected("board too large for a uniform step"));
    }
    let step: i32 = rng.random_range(UNIFORM_MIN_STEP.min(max_step)..=max_step);
    let shift: i32 = rng.random_range(0..=255 - 2 * span * step);
    let far: i32 = span * step + shift;

    Ok(Corners {
        top_left: Rgb::new(shift, shift, shift)?,
        top_right: Rgb::new(shift, far, far)?,
        bottom_left: Rgb::new(far, shift, far)?,
        bottom_right: Rgb::new(far, far, far + span * step)?,
    })
}

/// A random color and its hue rotated by 90, 180, and 270 degrees.
fn split_complementary<R: Rng + ?Sized>(rng: &mut R) -> Result<Corners<Rgb>, GeneratorError> {
    let base: Hsl = Hsl::from(random_rgb(rng));
    let rotate = |degrees: f64| -> Result<Rgb, GeneratorError> {
        let hsl: Hsl = Hsl::new((base.h() + degrees) % 360.0, base.s(), base.l())?;
        Ok(hsl.to_rgb())
    };
    Ok(Corners {
        top_left: base.to_rgb(),
        top_right: rotate(90.0)?,
        bottom_left: rotate(180.0)?,
        bottom_right: rotate(270.0)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ALL: [Strategy; 7] = [
        Strategy::Circle,
        Strategy::WideCircle,
        Strategy::Scattered,
        Strategy::Square,
        Strategy::PlaneNormal,
        Strategy::UniformStep,
        Strategy::SplitComplementary,
    ];

    fn rgb(v: u8) -> Rgb {
        Rgb::from_bytes(v, v, v)
    }

    #[test]
    fn rotate_clockwise() {
        let c: Corners<Rgb> = Corners {
            top_left: rgb(1),
            top_right: rgb(2),
            bottom_left: rgb(3),
            bottom_right: rgb(4),
        };
        let once: Corners<Rgb> = c.rotate(1);
        assert_eq!(once.as_array(), [rgb(3), rgb(1), rgb(4), rgb(2)]);
        assert_eq!(c.rotate(2).as_array(), [rgb(4), rgb(3), rgb(2), rgb(1)]);
        assert_eq!(c.rotate(4), c);
        assert_eq!(c.rotate(0), c);
    }

    #[test]
    fn distinct_corners() {
        let mut c: Corners<Rgb> = Corners {
            top_left: rgb(1),
            top_right: rgb(2),
            bottom_left: rgb(3),
            bottom_right: rgb(4),
        };
        assert!(c.are_distinct());
        c.bottom_right = rgb(1);
        assert!(!c.are_distinct());
    }

    #[test]
    fn strategy_names() {
        assert_eq!(Strategy::Circle.to_string(), "circle");
        assert_eq!(Strategy::SplitComplementary.to_string(), "split-complementary");
        assert_eq!(Strategy::default(), Strategy::Circle);
    }

    #[test]
    fn circle_corners_share_the_saturation() {
        let mut rng: StdRng = StdRng::seed_from_u64(1);
        let mut accepted: usize = 0;
        for _ in 0..2000 {
            if let Ok(c) = circle(&mut rng) {
                accepted += 1;
                let s: f64 = c.top_left.s();
                assert!(s > MIN_SATURATION);
                for corner in c.as_array() {
                    assert_eq!(corner.s(), s);
                }
                // Opposite corners are on opposite sides of the center
                let centre_h: f64 = (c.top_left.h() + c.bottom_right.h()) / 2.0;
                let other_h: f64 = (c.top_right.h() + c.bottom_left.h()) / 2.0;
                assert!((centre_h - other_h).abs() <= 1.0);
            }
        }
        assert!(accepted > 100, "only {accepted} samples accepted");
    }

    #[test]
    fn uniform_step_stays_in_range_for_large_boards() {
        let mut rng: StdRng = StdRng::seed_from_u64(2);
        for size in [3, 10, 50, 128] {
            for _ in 0..50 {
                let c: Corners<Rgb> = uniform_step(size, &mut rng).unwrap();
                assert!(c.are_distinct());
            }
        }
        assert!(uniform_step(129, &mut rng).is_err());
    }

    #[test]
    fn plane_normal_sides_are_perpendicular() {
        let mut rng: StdRng = StdRng::seed_from_u64(3);
        let mut accepted: usize = 0;
        for _ in 0..5000 {
            if let Ok(c) = plane_normal(&mut rng) {
                accepted += 1;
                let top: Vector3 = vector_math::vector_between(&c.top_right, &c.top_left);
                let left: Vector3 = vector_math::vector_between(&c.bottom_left, &c.top_left);
                // Rounding the side vector leaves a small residue
                let cosine: f64 = vector_math::dot(&top, &left) / (top.length() * left.length());
                assert!(cosine.abs() < 0.05, "{cosine}");
            }
        }
        assert!(accepted > 0);
    }

    #[test]
    fn every_strategy_eventually_samples() {
        let mut rng: StdRng = StdRng::seed_from_u64(4);
        for strategy in ALL {
            let found: bool = (0..5000).any(|_| {
                strategy
                    .sample(6, &mut rng)
                    .map(|c| c.are_distinct())
                    .unwrap_or(false)
            });
            assert!(found, "{strategy} never produced corners");
        }
    }
}
