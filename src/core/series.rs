//! Series storage, aggregate bounds and nearest-neighbor lookup.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::types::{Point, ViewportBounds};
use crate::error::{ChartError, ChartResult};

/// One named sequence of (x, y) samples plotted as a single line, fan band
/// or bar set.
///
/// `x_points` must be sorted non-decreasing; lookup relies on it. Duplicate x
/// values are permitted and lookup returns the first occurrence. A series is
/// immutable for the lifetime of a chart instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    id: String,
    x_points: Vec<f64>,
    y_points: Vec<f64>,
}

impl Series {
    pub fn new(
        id: impl Into<String>,
        x_points: Vec<f64>,
        y_points: Vec<f64>,
    ) -> ChartResult<Self> {
        if x_points.len() != y_points.len() {
            return Err(ChartError::InvalidData(format!(
                "series point count mismatch: {} x values vs {} y values",
                x_points.len(),
                y_points.len()
            )));
        }

        if x_points
            .iter()
            .chain(y_points.iter())
            .any(|value| !value.is_finite())
        {
            return Err(ChartError::InvalidData(
                "series values must be finite".to_owned(),
            ));
        }

        if x_points.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(ChartError::InvalidData(
                "series x values must be sorted non-decreasing".to_owned(),
            ));
        }

        Ok(Self {
            id: id.into(),
            x_points,
            y_points,
        })
    }

    pub fn from_points(id: impl Into<String>, points: &[Point]) -> ChartResult<Self> {
        let x_points = points.iter().map(|point| point.x).collect();
        let y_points = points.iter().map(|point| point.y).collect();
        Self::new(id, x_points, y_points)
    }

    /// Builds a series from timestamped decimal samples, the shape produced
    /// by financial data feeds after decoding.
    pub fn from_samples(
        id: impl Into<String>,
        samples: &[(DateTime<Utc>, Decimal)],
    ) -> ChartResult<Self> {
        let points = samples
            .iter()
            .map(|(time, value)| Point::from_decimal_time(*time, *value))
            .collect::<ChartResult<Vec<_>>>()?;
        Self::from_points(id, &points)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x_points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_points.is_empty()
    }

    #[must_use]
    pub fn x_points(&self) -> &[f64] {
        &self.x_points
    }

    #[must_use]
    pub fn y_points(&self) -> &[f64] {
        &self.y_points
    }

    #[must_use]
    pub fn point(&self, index: usize) -> Option<Point> {
        Some(Point::new(
            *self.x_points.get(index)?,
            *self.y_points.get(index)?,
        ))
    }

    // x bounds read off the ends of the sorted array; empty series report 0.

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.x_points.first().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x_points.last().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.y_points.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y_points.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }

    /// Index of the sample whose x is closest to `target_x` by absolute
    /// difference. Ties break toward the lower index. Binary search, O(log n).
    #[must_use]
    pub fn nearest_index(&self, target_x: f64) -> Option<usize> {
        if self.x_points.is_empty() {
            return None;
        }

        let upper = self.x_points.partition_point(|&x| x < target_x);
        if upper == 0 {
            return Some(0);
        }
        if upper == self.x_points.len() {
            let last_x = self.x_points[self.x_points.len() - 1];
            return Some(self.x_points.partition_point(|&x| x < last_x));
        }

        let below = upper - 1;
        let distance_below = (target_x - self.x_points[below]).abs();
        let distance_above = (self.x_points[upper] - target_x).abs();
        let chosen = if distance_below <= distance_above {
            below
        } else {
            upper
        };

        // Duplicate x values resolve to the first occurrence.
        Some(
            self.x_points
                .partition_point(|&x| x < self.x_points[chosen]),
        )
    }

    /// Contiguous index range covering `[from_x, to_x]` with one extra sample
    /// of padding on each side, clamped to the array bounds. The padding
    /// avoids visual clipping at viewport edges.
    #[must_use]
    pub fn window_indices(&self, from_x: f64, to_x: f64) -> Option<(usize, usize)> {
        if self.x_points.is_empty() {
            return None;
        }

        let (from_x, to_x) = if from_x <= to_x {
            (from_x, to_x)
        } else {
            (to_x, from_x)
        };

        let last = self.x_points.len() - 1;
        // First index at or after the window start, one past the last index
        // at or before the window end.
        let start = self.x_points.partition_point(|&x| x < from_x);
        let end = self.x_points.partition_point(|&x| x <= to_x);

        let lower = start.min(last).saturating_sub(1);
        let upper = end.min(last);
        Some((lower, upper))
    }

    /// Copy of the samples covering `[from_x, to_x]` with the same ±1 sample
    /// padding as [`Series::window_indices`].
    #[must_use]
    pub fn slice(&self, from_x: f64, to_x: f64) -> Self {
        match self.window_indices(from_x, to_x) {
            Some((lower, upper)) => Self {
                id: self.id.clone(),
                x_points: self.x_points[lower..=upper].to_vec(),
                y_points: self.y_points[lower..=upper].to_vec(),
            },
            None => Self {
                id: self.id.clone(),
                x_points: Vec::new(),
                y_points: Vec::new(),
            },
        }
    }

    /// Borrowed y values over the padded `[from_x, to_x]` window.
    #[must_use]
    pub fn window_y_values(&self, from_x: f64, to_x: f64) -> &[f64] {
        match self.window_indices(from_x, to_x) {
            Some((lower, upper)) => &self.y_points[lower..=upper],
            None => &[],
        }
    }
}

/// Ordered set of series sharing one coordinate space, keyed by id.
///
/// Aggregate bounds are recomputed on demand rather than cached; the
/// collection only changes identity wholesale when a chart reloads its data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesCollection {
    series: IndexMap<String, Series>,
}

impl SeriesCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_series(list: Vec<Series>) -> ChartResult<Self> {
        let mut collection = Self::new();
        for series in list {
            collection.insert(series)?;
        }
        Ok(collection)
    }

    pub fn insert(&mut self, series: Series) -> ChartResult<()> {
        if self.series.contains_key(series.id()) {
            return Err(ChartError::InvalidData(format!(
                "duplicate series id: {}",
                series.id()
            )));
        }
        self.series.insert(series.id().to_owned(), series);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Series> {
        self.series.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// True when no series holds any sample.
    #[must_use]
    pub fn has_no_points(&self) -> bool {
        self.iter().all(Series::is_empty)
    }

    /// Union bounds across every point of every series.
    ///
    /// Returns `{0, 0, 0, 0}` for an empty collection; this is an explicit
    /// edge-case policy, not an error.
    #[must_use]
    pub fn bounds(&self) -> ViewportBounds {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut any = false;

        for series in self.iter() {
            if series.is_empty() {
                continue;
            }
            any = true;
            min_x = min_x.min(series.min_x());
            max_x = max_x.max(series.max_x());
            for &y in series.y_points() {
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }

        if !any {
            return ViewportBounds::zero();
        }
        ViewportBounds::new(min_x, max_x, min_y, max_y)
    }

    /// Sorted union of every series' x values.
    #[must_use]
    pub fn merged_x_points(&self) -> Vec<f64> {
        let mut merged: Vec<f64> = self
            .iter()
            .flat_map(|series| series.x_points().iter().copied())
            .collect();
        merged.sort_by(f64::total_cmp);
        merged
    }

    /// The x value closest to `target_x` across all series.
    ///
    /// Equivalent to a nearest-index search over [`Self::merged_x_points`]
    /// but runs one binary search per series instead of materializing the
    /// merged array. Distance ties resolve toward the lower x value.
    #[must_use]
    pub fn nearest_x(&self, target_x: f64) -> Option<f64> {
        let mut candidates: SmallVec<[(OrderedFloat<f64>, OrderedFloat<f64>); 4]> =
            SmallVec::new();

        for series in self.iter() {
            if let Some(index) = series.nearest_index(target_x) {
                let x = series.x_points()[index];
                candidates.push((OrderedFloat((x - target_x).abs()), OrderedFloat(x)));
            }
        }

        candidates.into_iter().min().map(|(_, x)| x.0)
    }
}
