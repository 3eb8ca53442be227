//! Nearest-point highlight resolution and tap-toggle state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::mapper::{data_to_pixel_x, data_to_pixel_y};
use crate::core::series::SeriesCollection;
use crate::core::types::{ChartInsets, PixelPosition, Point, ScreenFrame, ViewportBounds};

/// Formatter hooks used to build highlight labels.
///
/// Formatting is injected by the host; the engine never consults ambient
/// locale or formatter singletons.
pub struct LabelFormat {
    pub x_label: Box<dyn Fn(f64) -> String>,
    pub y_label: Box<dyn Fn(f64) -> String>,
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self {
            x_label: Box::new(|x| format!("{x:.0}")),
            y_label: Box::new(|y| format!("{y:.2}")),
        }
    }
}

/// Formatted label payload handed back to tooltip rendering unexamined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightLabels {
    pub x_text: String,
    pub y_text: String,
}

/// One data point marked for tooltip/popover display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub point: Point,
    pub series_id: String,
    pub pixel_position: PixelPosition,
    pub labels: HighlightLabels,
}

/// Inputs for one highlight resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightRequest<'a> {
    /// Pointer x in frame-local pixel coordinates.
    pub pointer_x: f64,
    /// Current horizontal scroll offset in pixels.
    pub scroll_offset: f64,
    /// Total pixel width of the scrollable content.
    pub content_width: f64,
    pub insets: ChartInsets,
    /// Bounds and frame used to place the resolved point in pixel space.
    pub bounds: ViewportBounds,
    pub frame: ScreenFrame,
    /// Series consulted for the highlighted y value.
    pub target_series_id: &'a str,
}

/// Resolves the data point nearest to a pointer location.
///
/// Pure and read-only so it is independently testable; callers own any state
/// changes. Returns `None` when the target series is missing or the content
/// width is not positive. The proportion is deliberately not clamped: a
/// pointer outside the content frame extrapolates past the data range and
/// still snaps to the boundary sample.
#[must_use]
pub fn resolve_highlight(
    collection: &SeriesCollection,
    request: HighlightRequest<'_>,
    format: &LabelFormat,
) -> Option<Highlight> {
    let usable_width = request.content_width - request.insets.sum();
    if request.content_width <= 0.0 || usable_width <= 0.0 {
        return None;
    }

    let target = collection.get(request.target_series_id)?;
    let global = collection.bounds();

    let adjusted_x = request.pointer_x + request.scroll_offset - request.insets.leading;
    let proportion = adjusted_x / usable_width;
    let target_x = global.min_x + proportion * (global.max_x - global.min_x);

    let snapped_x = collection.nearest_x(target_x)?;
    let index = target.nearest_index(snapped_x)?;
    let point = target.point(index)?;

    let pixel_position = PixelPosition {
        x: data_to_pixel_x(
            point.x,
            request.bounds.min_x,
            request.bounds.max_x,
            request.frame.width,
        ),
        y: data_to_pixel_y(
            point.y,
            request.bounds.min_y,
            request.bounds.max_y,
            request.frame.height,
        ),
    };

    Some(Highlight {
        point,
        series_id: target.id().to_owned(),
        pixel_position,
        labels: HighlightLabels {
            x_text: (format.x_label)(point.x),
            y_text: (format.y_label)(point.y),
        },
    })
}

/// Container for the currently active highlight.
///
/// Tapping the already-highlighted x clears it; a different x replaces it.
/// Scrolling (a committed viewport change) also clears it.
#[derive(Debug, Default)]
pub struct HighlightState {
    active: Option<Highlight>,
}

impl HighlightState {
    #[must_use]
    pub fn active(&self) -> Option<&Highlight> {
        self.active.as_ref()
    }

    pub fn clear(&mut self) {
        if self.active.take().is_some() {
            debug!("highlight cleared");
        }
    }

    /// Replaces the active highlight without toggle semantics; used for
    /// continuous pointer drags.
    pub fn replace(&mut self, resolved: Option<Highlight>) -> Option<&Highlight> {
        self.active = resolved;
        self.active.as_ref()
    }

    /// Applies tap-toggle semantics to a freshly resolved highlight.
    pub fn on_tap(&mut self, resolved: Option<Highlight>) -> Option<&Highlight> {
        let toggles_off = matches!(
            (&resolved, &self.active),
            (Some(new), Some(current)) if new.point.x == current.point.x
        );

        if toggles_off {
            debug!("highlight toggled off");
            self.active = None;
        } else {
            self.active = resolved;
        }
        self.active.as_ref()
    }
}
