//! Integration tests for colors module

use palette::Srgb;
use ramp_drive::colors;

fn colors_equal(a: Srgb<u8>, b: Srgb<u8>) -> bool {
    a.red.abs_diff(b.red) <= 1 && a.green.abs_diff(b.green) <= 1 && a.blue.abs_diff(b.blue) <= 1
}

#[test]
fn hsv_creates_primary_colors() {
    assert!(colors_equal(colors::hsv(0.0, 1.0, 1.0), colors::RED));
    assert!(colors_equal(colors::hsv(120.0, 1.0, 1.0), colors::GREEN));
    assert!(colors_equal(colors::hsv(240.0, 1.0, 1.0), colors::BLUE));
}

#[test]
fn hsv_handles_saturation_and_value() {
    // Zero saturation (gray)
    let gray = colors::hsv(0.0, 0.0, 0.5);
    assert!(colors_equal(gray, Srgb::new(128, 128, 128)));

    // Zero value (black)
    assert!(colors_equal(colors::hsv(0.0, 1.0, 0.0), colors::OFF));
}

#[test]
fn hue_creates_fully_saturated_colors() {
    assert!(colors_equal(colors::hue(60.0), colors::YELLOW));
    assert!(colors_equal(colors::hue(180.0), colors::CYAN));
    assert!(colors_equal(colors::hue(300.0), colors::MAGENTA));
}
