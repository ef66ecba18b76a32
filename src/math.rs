//! Numeric helpers.

/// Maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Inputs outside the source range saturate at the matching end.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if value >= in_max {
        out_max
    } else if value <= in_min {
        out_min
    } else {
        (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
    }
}
