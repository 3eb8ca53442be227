//! Scroll-driven viewport state.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::series::SeriesCollection;
use crate::core::types::{PixelPosition, ScreenFrame, ViewportBounds};
use crate::error::{ChartError, ChartResult};

/// How much of the x axis is visible per screen width of scroll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum VisiblePortion {
    /// The full data x range fits on one screen; no scrolling.
    #[default]
    All,
    /// A fixed x-range width in data units per screen width.
    Width(f64),
}

/// Tuning controls for viewport recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTuning {
    /// When true the y axis follows the visible window; otherwise it stays
    /// fixed to the global data bounds.
    pub dynamic_axis: bool,
    /// Symmetric y padding as a proportion of the visible y range.
    pub padding_proportion: f64,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            dynamic_axis: true,
            padding_proportion: 0.01,
        }
    }
}

impl ViewportTuning {
    fn validate(self) -> ChartResult<Self> {
        if !self.padding_proportion.is_finite() || self.padding_proportion < 0.0 {
            return Err(ChartError::InvalidConfig(
                "padding proportion must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

type BoundsSubscriber = Box<dyn FnMut(ViewportBounds)>;

/// Owns the visible data window and recomputes axis bounds from scroll
/// positions.
///
/// The controller is the sole mutator of its bounds. Committing bounds equal
/// by value to the previous ones produces no subscriber notification, so
/// redundant scroll samples cause no re-render churn downstream.
pub struct ViewportController {
    portion: VisiblePortion,
    tuning: ViewportTuning,
    frame: ScreenFrame,
    bounds: ViewportBounds,
    subscribers: Vec<BoundsSubscriber>,
}

impl fmt::Debug for ViewportController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportController")
            .field("portion", &self.portion)
            .field("tuning", &self.tuning)
            .field("frame", &self.frame)
            .field("bounds", &self.bounds)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl ViewportController {
    pub fn new(tuning: ViewportTuning) -> ChartResult<Self> {
        Ok(Self {
            portion: VisiblePortion::All,
            tuning: tuning.validate()?,
            frame: ScreenFrame::default(),
            bounds: ViewportBounds::zero(),
            subscribers: Vec::new(),
        })
    }

    #[must_use]
    pub fn bounds(&self) -> ViewportBounds {
        self.bounds
    }

    #[must_use]
    pub fn portion(&self) -> VisiblePortion {
        self.portion
    }

    #[must_use]
    pub fn tuning(&self) -> ViewportTuning {
        self.tuning
    }

    #[must_use]
    pub fn frame(&self) -> ScreenFrame {
        self.frame
    }

    pub fn set_frame(&mut self, frame: ScreenFrame) -> ChartResult<()> {
        if !frame.is_valid() {
            return Err(ChartError::InvalidFrame {
                width: frame.width,
                height: frame.height,
            });
        }
        self.frame = frame;
        Ok(())
    }

    pub fn set_visible_portion(&mut self, portion: VisiblePortion) -> ChartResult<()> {
        if let VisiblePortion::Width(width) = portion {
            if !width.is_finite() || width <= 0.0 {
                return Err(ChartError::InvalidConfig(
                    "visible portion width must be finite and > 0".to_owned(),
                ));
            }
        }
        self.portion = portion;
        Ok(())
    }

    /// Registers a bounds subscriber. Subscribers fire on committed changes
    /// only, in registration order.
    pub fn subscribe(&mut self, subscriber: impl FnMut(ViewportBounds) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Resolves the visible portion into x units against the collection's
    /// full data range.
    #[must_use]
    pub fn portion_width(&self, collection: &SeriesCollection) -> f64 {
        match self.portion {
            VisiblePortion::All => collection.bounds().x_range(),
            VisiblePortion::Width(width) => width,
        }
    }

    /// Total horizontal pixel extent of the scrollable content:
    /// `frame.width * max(1, total_x_range / portion)`.
    ///
    /// Hosts use this to size the scrollable surface. Degenerate data
    /// collapses to one screen width.
    #[must_use]
    pub fn scroll_width(&self, collection: &SeriesCollection, frame: ScreenFrame) -> f64 {
        if !frame.is_valid() {
            return 0.0;
        }

        let full_range = collection.bounds().x_range();
        let portion = self.portion_width(collection);
        if portion <= 0.0 || full_range <= 0.0 {
            return frame.width;
        }

        frame.width * (full_range / portion).max(1.0)
    }

    /// Recomputes the visible bounds for a scroll position.
    ///
    /// The scroll surface is treated as pages of one frame width each: the
    /// integral page index plus the fractional in-page offset together decide
    /// how far into the data the window starts. Each series contributes its
    /// own window edges; y bounds come from the samples inside the padded
    /// window when the dynamic axis is enabled, otherwise from the global
    /// data bounds. The result is not committed; see [`Self::commit`].
    #[must_use]
    pub fn recompute_bounds(
        &self,
        collection: &SeriesCollection,
        position: PixelPosition,
        frame: ScreenFrame,
    ) -> ViewportBounds {
        if !frame.is_valid() || collection.has_no_points() {
            return ViewportBounds::zero();
        }

        let global = collection.bounds();
        let portion = self.portion_width(collection);
        if portion <= 0.0 {
            // Single-x data: the window collapses onto the global bounds.
            return self.padded(global.min_x, global.max_x, global.min_y, global.max_y);
        }

        let screen_index = (position.x.max(0.0) / frame.width).floor();
        let fractional = (position.x - screen_index * frame.width) / frame.width;
        let x_addition = fractional * portion;

        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut any_y = false;

        for series in collection.iter() {
            if series.is_empty() {
                continue;
            }

            let window_min = series.min_x() + screen_index * portion + x_addition;
            let window_max = window_min + portion;
            min_x = min_x.min(window_min);
            max_x = max_x.max(window_max);

            for &y in series.window_y_values(window_min, window_max) {
                min_y = min_y.min(y);
                max_y = max_y.max(y);
                any_y = true;
            }
        }

        let (min_y, max_y) = if self.tuning.dynamic_axis && any_y {
            (min_y, max_y)
        } else {
            (global.min_y, global.max_y)
        };

        self.padded(min_x, max_x, min_y, max_y)
    }

    fn padded(&self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> ViewportBounds {
        let padding = (max_y - min_y) * self.tuning.padding_proportion;
        ViewportBounds::new(min_x, max_x, min_y - padding, max_y + padding)
    }

    /// Commits freshly recomputed bounds.
    ///
    /// Returns `None` and stays silent when the bounds equal the current ones
    /// by value; otherwise stores them, notifies subscribers and returns the
    /// committed value.
    pub fn commit(&mut self, bounds: ViewportBounds) -> Option<ViewportBounds> {
        if bounds == self.bounds {
            debug!(?bounds, "viewport bounds unchanged, update suppressed");
            return None;
        }

        self.bounds = bounds;
        for subscriber in &mut self.subscribers {
            subscriber(bounds);
        }
        Some(bounds)
    }
}
