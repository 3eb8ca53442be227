//! Pure data-space to pixel-space mapping.
//!
//! These functions are stateless and deterministic. Degenerate inputs
//! (zero-range axis, non-positive pixel span) map to `0.0` instead of
//! dividing by zero; callers treat that as an explicit policy, not an error.

/// Maps a data value onto a horizontal pixel offset.
///
/// Values at or below `min_x` clamp to `0.0`. `max_x` maps exactly to
/// `pixel_width`.
#[must_use]
pub fn data_to_pixel_x(value: f64, min_x: f64, max_x: f64, pixel_width: f64) -> f64 {
    let span = max_x - min_x;
    if !span.is_finite() || span <= 0.0 || !pixel_width.is_finite() || pixel_width <= 0.0 {
        return 0.0;
    }

    let relative = value - min_x;
    if relative <= 0.0 {
        return 0.0;
    }

    pixel_width * relative / span
}

/// Maps a data value onto a vertical pixel offset.
///
/// Data y grows upward while pixel y grows downward (origin top-left), so
/// `min_y` maps to `pixel_height` and `max_y` maps to `0.0`.
#[must_use]
pub fn data_to_pixel_y(value: f64, min_y: f64, max_y: f64, pixel_height: f64) -> f64 {
    let span = max_y - min_y;
    if !span.is_finite() || span <= 0.0 || !pixel_height.is_finite() || pixel_height <= 0.0 {
        return 0.0;
    }

    pixel_height - (value - min_y) * pixel_height / span
}

/// Algebraic inverse of [`data_to_pixel_x`], used for hit-testing.
///
/// Round-trips within floating-point tolerance for values inside
/// `[min_x, max_x]`. Degenerate ranges and spans return `min_x`.
#[must_use]
pub fn pixel_to_data_x(pixel: f64, min_x: f64, max_x: f64, pixel_width: f64) -> f64 {
    let span = max_x - min_x;
    if !span.is_finite() || span <= 0.0 || !pixel_width.is_finite() || pixel_width <= 0.0 {
        return min_x;
    }

    min_x + (pixel / pixel_width) * span
}
