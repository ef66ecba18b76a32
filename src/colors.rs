//! Named 8-bit colours and color space conversion helpers.
//!
//! HSV (Hue, Saturation, Value) is more intuitive than RGB for color wheels
//! and hue rotations. All functions return `palette::Srgb<u8>` for direct use
//! with [`RgbFader`](crate::fader::RgbFader).

use palette::{FromColor, Hsv, Srgb};

pub const OFF: Srgb<u8> = Srgb::new(0, 0, 0);
pub const RED: Srgb<u8> = Srgb::new(255, 0, 0);
pub const GREEN: Srgb<u8> = Srgb::new(0, 255, 0);
pub const BLUE: Srgb<u8> = Srgb::new(0, 0, 255);
pub const YELLOW: Srgb<u8> = Srgb::new(255, 255, 0);
pub const CYAN: Srgb<u8> = Srgb::new(0, 255, 255);
pub const MAGENTA: Srgb<u8> = Srgb::new(255, 0, 255);
pub const WHITE: Srgb<u8> = Srgb::new(255, 255, 255);

/// Creates an 8-bit RGB color from HSV components.
///
/// `hue` in degrees, `saturation` and `value` in 0.0-1.0.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Srgb<u8> {
    let hsv = Hsv::new(hue, saturation, value);
    Srgb::<f32>::from_color(hsv).into_format()
}

/// Creates an 8-bit RGB color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> Srgb<u8> {
    hsv(hue, 1.0, 1.0)
}
