use crate::foundation::error::{ActDrawError, ActDrawResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Straight (non-premultiplied) RGBA8 color, used for palette entries and
/// per-layer tints.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully opaque white; the identity tint for recoloring.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Construct from individual channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Device pixels per logical unit (DPI scale of the presenting surface).
///
/// Translations are snapped to multiples of `1 / scale` at draw time so
/// adjacent sprites do not open 1-pixel seams at fractional zoom levels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64")]
pub struct DeviceScale(f64);

impl TryFrom<f64> for DeviceScale {
    type Error = ActDrawError;

    fn try_from(scale: f64) -> ActDrawResult<Self> {
        Self::new(scale)
    }
}

impl DeviceScale {
    /// Scale of exactly one device pixel per logical unit.
    pub const ONE: Self = Self(1.0);

    /// Construct a validated scale; must be finite and > 0.
    pub fn new(scale: f64) -> ActDrawResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ActDrawError::validation(
                "DeviceScale must be finite and > 0",
            ));
        }
        Ok(Self(scale))
    }

    /// Raw scale factor.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Round `v` to the nearest multiple of `1 / scale`.
    pub fn snap(self, v: f64) -> f64 {
        (v * self.0).round() / self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
