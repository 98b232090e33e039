/*
colors.rs

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

//! Color values in the RGB and HSL color spaces.
//!
//! Both representations are immutable value types.
//! Constructors validate every component, so an out-of-range color can never exist.
//! The palette generator relies on this: it builds colors through the constructors and treats
//! a [`ColorError`] as a rejected sample.
//!
//! [`Hsl`] stores real-valued components so that an RGB to HSL to RGB conversion is stable
//! once the RGB channels are rounded.

use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt;

/// Largest hue value, in degrees.
pub const HUE_MAX: f64 = 360.0;

/// Largest saturation and lightness value, in percent.
pub const PERCENT_MAX: f64 = 100.0;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum ColorError {
    /// A color component is outside of its valid range.
    OutOfRange {
        /// Name of the component ("r", "g", "b", "h", "s", or "l").
        component: &'static str,

        /// The rejected value.
        value: f64,
    },

    /// A hexadecimal color string cannot be decoded.
    ParseError(String),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColorError::OutOfRange { component, value } => {
                write!(f, "color component {component} out of range: {value}")
            }
            ColorError::ParseError(s) => write!(f, "invalid hexadecimal color: {s:?}"),
        }
    }
}

impl Error for ColorError {}

/// Color that the gradient routine and the vector math can work with.
///
/// A color is seen as a point in a three dimensional space.
pub trait GradientColor: Copy + fmt::Debug {
    /// Return the three coordinates of the color.
    fn components(&self) -> [f64; 3];

    /// Build a color from three coordinates, rounding them to the nearest integer.
    fn from_components(components: [f64; 3]) -> Result<Self, ColorError>;

    /// Convert the color to RGB.
    fn to_rgb(&self) -> Rgb;
}

/// Verify that a component is in the `0..=max` range.
fn check_range(component: &'static str, value: f64, max: f64) -> Result<f64, ColorError> {
    if (0.0..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ColorError::OutOfRange { component, value })
    }
}

/// RGB color. Channels are integers between 0 and 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    /// Create an [`Rgb`] object.
    ///
    /// # Errors
    ///
    /// Return [`ColorError::OutOfRange`] if a channel is not between 0 and 255.
    pub fn new(r: i32, g: i32, b: i32) -> Result<Self, ColorError> {
        let channel = |component: &'static str, value: i32| -> Result<u8, ColorError> {
            u8::try_from(value).map_err(|_| ColorError::OutOfRange {
                component,
                value: value as f64,
            })
        };
        Ok(Self {
            r: channel("r", r)?,
            g: channel("g", g)?,
            b: channel("b", b)?,
        })
    }

    /// Create an [`Rgb`] object from channels that are already in range.
    pub const fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Red channel.
    pub fn r(&self) -> u8 {
        self.r
    }

    /// Green channel.
    pub fn g(&self) -> u8 {
        self.g
    }

    /// Blue channel.
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Return the channels as an array, in the order expected by pixel buffers.
    pub fn as_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Return the `#rrggbb` lowercase representation of the color.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse a `#rrggbb` string.
    ///
    /// # Errors
    ///
    /// Return [`ColorError::ParseError`] if the string does not start with `#` followed by
    /// exactly six hexadecimal digits.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits: &str = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorError::ParseError(hex.to_string()))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::ParseError(hex.to_string()));
        }
        let channel = |i: usize| -> Result<u8, ColorError> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::ParseError(hex.to_string()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Return the rounded midpoint of two colors.
    pub fn average(one: Rgb, two: Rgb) -> Rgb {
        let mid = |a: u8, b: u8| -> u8 { ((a as u16 + b as u16 + 1) / 2) as u8 };
        Rgb {
            r: mid(one.r, two.r),
            g: mid(one.g, two.g),
            b: mid(one.b, two.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Serialize an [`Rgb`] object as its hexadecimal string.
impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl GradientColor for Rgb {
    fn components(&self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    fn from_components(components: [f64; 3]) -> Result<Self, ColorError> {
        let [r, g, b] = components.map(|c| c.round());
        // Reject before casting: `as i32` saturates and would hide huge values
        check_range("r", r, 255.0)?;
        check_range("g", g, 255.0)?;
        check_range("b", b, 255.0)?;
        Rgb::new(r as i32, g as i32, b as i32)
    }

    fn to_rgb(&self) -> Rgb {
        *self
    }
}

/// HSL color.
///
/// The hue is in degrees, between 0 and 360.
/// The saturation and the lightness are percentages, between 0 and 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    h: f64,
    s: f64,
    l: f64,
}

impl Hsl {
    /// Create an [`Hsl`] object.
    ///
    /// # Errors
    ///
    /// Return [`ColorError::OutOfRange`] if a component is outside of its range (NaN values
    /// are always out of range).
    pub fn new(h: f64, s: f64, l: f64) -> Result<Self, ColorError> {
        Ok(Self {
            h: check_range("h", h, HUE_MAX)?,
            s: check_range("s", s, PERCENT_MAX)?,
            l: check_range("l", l, PERCENT_MAX)?,
        })
    }

    /// Hue, in degrees.
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Saturation, in percent.
    pub fn s(&self) -> f64 {
        self.s
    }

    /// Lightness, in percent.
    pub fn l(&self) -> f64 {
        self.l
    }

    /// Return the `#rrggbb` representation of the color.
    pub fn to_hex(&self) -> String {
        self.to_rgb().to_hex()
    }

    /// Parse a `#rrggbb` string.
    ///
    /// # Errors
    ///
    /// Return [`ColorError::ParseError`] on malformed input.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        Rgb::from_hex(hex).map(Hsl::from)
    }

    /// Distance between the color and the closest hue or lightness bound.
    ///
    /// The saturation is ignored because the generator pins it for the whole palette.
    /// The result is the radius of the largest circle, centered on the color in the
    /// hue/lightness plane, that stays inside the valid ranges.
    pub fn min_distance_to_bounds(&self) -> f64 {
        self.h
            .min(HUE_MAX - self.h)
            .min(self.l)
            .min(PERCENT_MAX - self.l)
    }

    /// Return the rounded midpoint of two colors.
    pub fn average(one: Hsl, two: Hsl) -> Hsl {
        // Identical components are returned untouched so that average(a, a) == a
        let mid = |a: f64, b: f64| -> f64 { if a == b { a } else { ((a + b) / 2.0).round() } };
        Hsl {
            h: mid(one.h, two.h),
            s: mid(one.s, two.s),
            l: mid(one.l, two.l),
        }
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        let r: f64 = rgb.r as f64 / 255.0;
        let g: f64 = rgb.g as f64 / 255.0;
        let b: f64 = rgb.b as f64 / 255.0;

        let max: f64 = r.max(g).max(b);
        let min: f64 = r.min(g).min(b);
        let l: f64 = (max + min) / 2.0;
        let delta: f64 = max - min;

        // Shades of gray
        if delta == 0.0 {
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: l * PERCENT_MAX,
            };
        }

        let s: f64 = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h: f64 = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        Hsl {
            h: h.rem_euclid(HUE_MAX),
            s: (s * PERCENT_MAX).clamp(0.0, PERCENT_MAX),
            l: (l * PERCENT_MAX).clamp(0.0, PERCENT_MAX),
        }
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}

impl GradientColor for Hsl {
    fn components(&self) -> [f64; 3] {
        [self.h, self.s, self.l]
    }

    fn from_components(components: [f64; 3]) -> Result<Self, ColorError> {
        let [h, s, l] = components.map(|c| c.round());
        Hsl::new(h, s, l)
    }

    fn to_rgb(&self) -> Rgb {
        let s: f64 = self.s / PERCENT_MAX;
        let l: f64 = self.l / PERCENT_MAX;
        let chroma: f64 = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let sector: f64 = self.h.rem_euclid(HUE_MAX) / 60.0;
        let x: f64 = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
        let m: f64 = l - chroma / 2.0;

        let (r, g, b) = match sector as u8 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let channel = |v: f64| -> u8 { ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8 };
        Rgb {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}
