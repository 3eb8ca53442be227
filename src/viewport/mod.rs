pub mod controller;
pub mod throttle;

pub use controller::{ViewportController, ViewportTuning, VisiblePortion};
pub use throttle::{ScrollEvent, ScrollThrottle, ThrottleTuning};
