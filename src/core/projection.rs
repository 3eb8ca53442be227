//! Series geometry projection consumed by path/shape rendering.

use crate::core::mapper::{data_to_pixel_x, data_to_pixel_y};
use crate::core::series::Series;
use crate::core::types::{PixelPosition, ScreenFrame, ViewportBounds};

/// Projects every sample of `series` into pixel space against `bounds`.
///
/// Deterministic and side-effect free so rendering and tests consume the
/// exact same geometry output.
#[must_use]
pub fn project_points(
    series: &Series,
    bounds: ViewportBounds,
    frame: ScreenFrame,
) -> Vec<PixelPosition> {
    series
        .x_points()
        .iter()
        .zip(series.y_points())
        .map(|(&x, &y)| PixelPosition {
            x: data_to_pixel_x(x, bounds.min_x, bounds.max_x, frame.width),
            y: data_to_pixel_y(y, bounds.min_y, bounds.max_y, frame.height),
        })
        .collect()
}

/// Projects only the samples covering the visible x window, with one sample
/// of padding on each side so lines are not clipped at the viewport edges.
#[must_use]
pub fn project_visible_points(
    series: &Series,
    bounds: ViewportBounds,
    frame: ScreenFrame,
) -> Vec<PixelPosition> {
    let visible = series.slice(bounds.min_x, bounds.max_x);
    project_points(&visible, bounds, frame)
}
