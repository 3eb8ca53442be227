pub mod mapper;
pub mod projection;
pub mod series;
pub mod types;

pub use series::{Series, SeriesCollection};
pub use types::{ChartInsets, PixelPosition, Point, ScreenFrame, ViewportBounds};
