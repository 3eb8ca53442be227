use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel dimensions of the drawing surface, reported by the host layout
/// system on every size change. The engine never owns window state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScreenFrame {
    pub width: f64,
    pub height: f64,
}

impl ScreenFrame {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// One (x, y) data sample. Immutable once constructed, no identity beyond
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a sample from a timestamp and a decimal money value, the shape
    /// produced by financial data feeds.
    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        let y = value.to_f64().ok_or_else(|| {
            ChartError::InvalidData("value cannot be represented as f64".to_owned())
        })?;
        Ok(Self {
            x: unix_seconds(time),
            y,
        })
    }
}

/// Converts a timestamp into fractional seconds since the Unix epoch.
#[must_use]
pub fn unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// The four scalars describing the currently visible data rectangle.
///
/// Compared by exact value on all four fields; equal bounds suppress
/// downstream notifications.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewportBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl ViewportBounds {
    #[must_use]
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self {
            min_x: 0.0,
            max_x: 0.0,
            min_y: 0.0,
            max_y: 0.0,
        }
    }

    #[must_use]
    pub fn x_range(self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn y_range(self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Pointer or scroll location in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PixelPosition {
    pub x: f64,
    pub y: f64,
}

impl PixelPosition {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal insets applied by the host around the scrollable content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartInsets {
    pub leading: f64,
    pub trailing: f64,
}

impl ChartInsets {
    #[must_use]
    pub fn new(leading: f64, trailing: f64) -> Self {
        Self { leading, trailing }
    }

    #[must_use]
    pub fn sum(self) -> f64 {
        self.leading + self.trailing
    }
}
