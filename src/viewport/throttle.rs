//! Trailing-edge coalescing of continuous scroll input.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{PixelPosition, ScreenFrame};

/// One scroll sample waiting for the next throttle release.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollEvent {
    pub position: PixelPosition,
    pub frame: ScreenFrame,
}

/// Tuning for scroll-event coalescing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleTuning {
    /// Minimum spacing between released events.
    pub interval: Duration,
}

impl Default for ThrottleTuning {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
        }
    }
}

/// Trailing-edge throttle over a stream of scroll events.
///
/// Holds at most one pending event (the newest submission wins) and releases
/// it once the interval has elapsed since the previous release, so the final
/// event of a burst is never dropped. Time is supplied by the caller, which
/// keeps stepping deterministic and testable without timers or threads.
#[derive(Debug)]
pub struct ScrollThrottle {
    tuning: ThrottleTuning,
    pending: Option<ScrollEvent>,
    last_release: Option<Instant>,
}

impl ScrollThrottle {
    #[must_use]
    pub fn new(tuning: ThrottleTuning) -> Self {
        Self {
            tuning,
            pending: None,
            last_release: None,
        }
    }

    #[must_use]
    pub fn tuning(&self) -> ThrottleTuning {
        self.tuning
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records the latest scroll sample, replacing any pending one.
    pub fn submit(&mut self, event: ScrollEvent) {
        self.pending = Some(event);
    }

    /// Releases the pending event when the interval has elapsed since the
    /// previous release. Returns `None` while the interval is still open or
    /// nothing is pending.
    pub fn poll(&mut self, now: Instant) -> Option<ScrollEvent> {
        let event = self.pending?;

        if let Some(last) = self.last_release {
            if now.saturating_duration_since(last) < self.tuning.interval {
                return None;
            }
        }

        self.pending = None;
        self.last_release = Some(now);
        Some(event)
    }

    /// Discards any pending event and reopens the interval.
    ///
    /// Called when the visible portion or the data set changes: the caller
    /// recomputes synchronously against the new parameters, and no stale
    /// scroll sample may be applied afterwards.
    pub fn reset(&mut self) {
        if self.pending.take().is_some() {
            debug!("pending scroll event discarded by reset");
        }
        self.last_release = None;
    }
}
