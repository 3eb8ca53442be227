//! Host-facing orchestration facade.

use std::time::Instant;

use tracing::debug;

use crate::core::projection::project_visible_points;
use crate::core::series::SeriesCollection;
use crate::core::types::{ChartInsets, PixelPosition, ScreenFrame, ViewportBounds};
use crate::core::{mapper, types::Point};
use crate::error::ChartResult;
use crate::interaction::{
    Highlight, HighlightRequest, HighlightState, LabelFormat, resolve_highlight,
};
use crate::viewport::{ScrollEvent, ScrollThrottle, ViewportController, VisiblePortion};

use super::ChartEngineConfig;

/// Orchestrates series data, the scroll viewport, throttled recomputation and
/// highlight state for one chart instance.
///
/// All methods run on the host's event loop; recomputation is O(points in
/// the visible window) and safe to drive at interactive frame rates.
pub struct ChartEngine {
    collection: SeriesCollection,
    controller: ViewportController,
    throttle: ScrollThrottle,
    highlight: HighlightState,
    labels: LabelFormat,
    highlight_series_id: String,
    insets: ChartInsets,
    scroll_offset: f64,
}

impl ChartEngine {
    pub fn new(collection: SeriesCollection, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;

        let mut controller = ViewportController::new(config.viewport)?;
        controller.set_visible_portion(config.portion)?;

        Ok(Self {
            collection,
            controller,
            throttle: ScrollThrottle::new(config.throttle),
            highlight: HighlightState::default(),
            labels: LabelFormat::default(),
            highlight_series_id: config.highlight_series_id,
            insets: config.insets,
            scroll_offset: 0.0,
        })
    }

    /// Replaces the default highlight label formatters.
    #[must_use]
    pub fn with_label_format(mut self, labels: LabelFormat) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn collection(&self) -> &SeriesCollection {
        &self.collection
    }

    #[must_use]
    pub fn bounds(&self) -> ViewportBounds {
        self.controller.bounds()
    }

    #[must_use]
    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.active()
    }

    /// Registers a bounds subscriber on the underlying controller.
    pub fn subscribe_bounds(&mut self, subscriber: impl FnMut(ViewportBounds) + 'static) {
        self.controller.subscribe(subscriber);
    }

    /// Total horizontal pixel extent of the scrollable content for the last
    /// reported frame.
    #[must_use]
    pub fn scroll_width(&self) -> f64 {
        self.controller
            .scroll_width(&self.collection, self.controller.frame())
    }

    /// Reports a layout pass. Recomputes bounds synchronously against the
    /// new frame and returns the committed bounds, if they changed.
    pub fn on_layout(&mut self, frame: ScreenFrame) -> ChartResult<Option<ViewportBounds>> {
        self.controller.set_frame(frame)?;
        Ok(self.recompute_now(PixelPosition::new(self.scroll_offset, 0.0), frame))
    }

    /// Records a scroll sample. Recomputation happens on [`Self::tick`],
    /// throttled to the latest sample per interval.
    pub fn on_scroll(&mut self, position: PixelPosition, frame: ScreenFrame) {
        self.scroll_offset = position.x;
        self.throttle.submit(ScrollEvent { position, frame });
    }

    /// Drives the throttle, applying at most one coalesced recompute.
    ///
    /// Returns the committed bounds when they changed; a committed change
    /// clears any active highlight.
    pub fn tick(&mut self, now: Instant) -> Option<ViewportBounds> {
        let event = self.throttle.poll(now)?;
        self.recompute_now(event.position, event.frame)
    }

    /// Changes the visible portion.
    ///
    /// Pending scroll work is discarded and bounds recompute immediately so
    /// no stale window can be applied after the change.
    pub fn set_visible_portion(
        &mut self,
        portion: VisiblePortion,
    ) -> ChartResult<Option<ViewportBounds>> {
        self.controller.set_visible_portion(portion)?;
        self.throttle.reset();

        let frame = self.controller.frame();
        if !frame.is_valid() {
            return Ok(None);
        }
        Ok(self.recompute_now(PixelPosition::new(self.scroll_offset, 0.0), frame))
    }

    /// Replaces the data set, with the same cancellation policy as a portion
    /// change.
    pub fn set_data(&mut self, collection: SeriesCollection) -> Option<ViewportBounds> {
        debug!(series = collection.len(), "data set replaced");
        self.collection = collection;
        self.throttle.reset();
        self.highlight.clear();
        self.scroll_offset = 0.0;

        let frame = self.controller.frame();
        if !frame.is_valid() {
            return None;
        }
        self.recompute_now(PixelPosition::default(), frame)
    }

    /// Tap entry point with toggle semantics: tapping the highlighted x
    /// clears it, a different x replaces it.
    pub fn on_tap(&mut self, location: PixelPosition) -> Option<&Highlight> {
        let resolved = self.resolve_at(location);
        self.highlight.on_tap(resolved)
    }

    /// Drag/move entry point without toggle semantics.
    pub fn on_pointer_move(&mut self, location: PixelPosition) -> Option<&Highlight> {
        let resolved = self.resolve_at(location);
        self.highlight.replace(resolved)
    }

    pub fn clear_highlight(&mut self) {
        self.highlight.clear();
    }

    /// Pixel x for a data x value against the current bounds and frame.
    #[must_use]
    pub fn map_x_to_pixel(&self, value: f64) -> f64 {
        let bounds = self.controller.bounds();
        mapper::data_to_pixel_x(value, bounds.min_x, bounds.max_x, self.controller.frame().width)
    }

    /// Pixel y for a data y value against the current bounds and frame.
    #[must_use]
    pub fn map_y_to_pixel(&self, value: f64) -> f64 {
        let bounds = self.controller.bounds();
        mapper::data_to_pixel_y(value, bounds.min_y, bounds.max_y, self.controller.frame().height)
    }

    /// Data x for a pixel offset; inverse of [`Self::map_x_to_pixel`].
    #[must_use]
    pub fn map_pixel_to_x(&self, pixel: f64) -> f64 {
        let bounds = self.controller.bounds();
        mapper::pixel_to_data_x(pixel, bounds.min_x, bounds.max_x, self.controller.frame().width)
    }

    /// Pixel geometry for the visible slice of a series, consumed by
    /// path/shape rendering.
    #[must_use]
    pub fn project_series(&self, id: &str) -> Option<Vec<PixelPosition>> {
        let series = self.collection.get(id)?;
        Some(project_visible_points(
            series,
            self.controller.bounds(),
            self.controller.frame(),
        ))
    }

    /// The highlighted data point, if any.
    #[must_use]
    pub fn highlighted_point(&self) -> Option<Point> {
        self.highlight.active().map(|highlight| highlight.point)
    }

    fn resolve_at(&self, location: PixelPosition) -> Option<Highlight> {
        let request = HighlightRequest {
            pointer_x: location.x,
            scroll_offset: self.scroll_offset,
            content_width: self.scroll_width(),
            insets: self.insets,
            bounds: self.controller.bounds(),
            frame: self.controller.frame(),
            target_series_id: &self.highlight_series_id,
        };
        resolve_highlight(&self.collection, request, &self.labels)
    }

    fn recompute_now(
        &mut self,
        position: PixelPosition,
        frame: ScreenFrame,
    ) -> Option<ViewportBounds> {
        let bounds = self
            .controller
            .recompute_bounds(&self.collection, position, frame);
        let committed = self.controller.commit(bounds);
        if committed.is_some() {
            // Scrolling invalidates any active tooltip.
            self.highlight.clear();
        }
        committed
    }
}
