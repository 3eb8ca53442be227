use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::types::ChartInsets;
use crate::error::{ChartError, ChartResult};
use crate::viewport::{ThrottleTuning, ViewportTuning, VisiblePortion};

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist/load chart setup without
/// inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    /// Series consulted for highlight y values.
    pub highlight_series_id: String,
    #[serde(default)]
    pub portion: VisiblePortion,
    #[serde(default)]
    pub viewport: ViewportTuning,
    #[serde(default)]
    pub throttle: ThrottleTuning,
    #[serde(default)]
    pub insets: ChartInsets,
}

impl ChartEngineConfig {
    /// Creates a config with the full data range visible and default tuning.
    #[must_use]
    pub fn new(highlight_series_id: impl Into<String>) -> Self {
        Self {
            highlight_series_id: highlight_series_id.into(),
            portion: VisiblePortion::All,
            viewport: ViewportTuning::default(),
            throttle: ThrottleTuning::default(),
            insets: ChartInsets::default(),
        }
    }

    #[must_use]
    pub fn with_portion(mut self, portion: VisiblePortion) -> Self {
        self.portion = portion;
        self
    }

    #[must_use]
    pub fn with_dynamic_axis(mut self, dynamic_axis: bool) -> Self {
        self.viewport.dynamic_axis = dynamic_axis;
        self
    }

    #[must_use]
    pub fn with_padding_proportion(mut self, padding_proportion: f64) -> Self {
        self.viewport.padding_proportion = padding_proportion;
        self
    }

    #[must_use]
    pub fn with_throttle_interval(mut self, interval: Duration) -> Self {
        self.throttle.interval = interval;
        self
    }

    #[must_use]
    pub fn with_insets(mut self, insets: ChartInsets) -> Self {
        self.insets = insets;
        self
    }

    pub(super) fn validate(&self) -> ChartResult<()> {
        if self.highlight_series_id.is_empty() {
            return Err(ChartError::InvalidConfig(
                "highlight series id must not be empty".to_owned(),
            ));
        }

        if !self.insets.leading.is_finite()
            || !self.insets.trailing.is_finite()
            || self.insets.leading < 0.0
            || self.insets.trailing < 0.0
        {
            return Err(ChartError::InvalidConfig(
                "insets must be finite and >= 0".to_owned(),
            ));
        }

        Ok(())
    }
}
