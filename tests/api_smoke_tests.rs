use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;
use scrollchart_rs::api::{ChartEngine, ChartEngineConfig};
use scrollchart_rs::core::{PixelPosition, ScreenFrame, Series, SeriesCollection, ViewportBounds};
use scrollchart_rs::viewport::VisiblePortion;

fn sample_collection() -> SeriesCollection {
    SeriesCollection::from_series(vec![
        Series::new(
            "potValue",
            vec![0.0, 10.0, 20.0, 30.0],
            vec![0.0, 5.0, 2.0, 8.0],
        )
        .expect("valid series"),
    ])
    .expect("collection")
}

fn engine() -> ChartEngine {
    let config = ChartEngineConfig::new("potValue")
        .with_portion(VisiblePortion::Width(10.0))
        .with_padding_proportion(0.0);
    ChartEngine::new(sample_collection(), config).expect("engine init")
}

fn frame() -> ScreenFrame {
    ScreenFrame::new(300.0, 200.0)
}

#[test]
fn layout_commits_the_initial_bounds() {
    let mut engine = engine();
    let bounds = engine.on_layout(frame()).expect("layout").expect("bounds");
    assert_eq!(bounds, ViewportBounds::new(0.0, 10.0, 0.0, 5.0));
    assert_eq!(engine.bounds(), bounds);
}

#[test]
fn scroll_applies_through_the_throttled_tick() {
    let mut engine = engine();
    engine.on_layout(frame()).expect("layout");

    let t0 = Instant::now();
    engine.on_scroll(PixelPosition::new(150.0, 0.0), frame());

    let bounds = engine.tick(t0).expect("committed bounds");
    assert_eq!(bounds, ViewportBounds::new(5.0, 15.0, 0.0, 5.0));

    // Nothing pending: the next tick is a no-op.
    assert_eq!(engine.tick(t0 + Duration::from_millis(200)), None);
}

#[test]
fn redundant_scroll_samples_do_not_renotify() {
    let mut engine = engine();
    engine.on_layout(frame()).expect("layout");

    let t0 = Instant::now();
    engine.on_scroll(PixelPosition::new(150.0, 0.0), frame());
    assert!(engine.tick(t0).is_some());

    engine.on_scroll(PixelPosition::new(150.0, 0.0), frame());
    assert_eq!(engine.tick(t0 + Duration::from_millis(200)), None);
}

#[test]
fn a_burst_of_scrolls_coalesces_to_the_latest() {
    let mut engine = engine();
    engine.on_layout(frame()).expect("layout");

    let t0 = Instant::now();
    engine.on_scroll(PixelPosition::new(30.0, 0.0), frame());
    assert!(engine.tick(t0).is_some());

    engine.on_scroll(PixelPosition::new(60.0, 0.0), frame());
    engine.on_scroll(PixelPosition::new(90.0, 0.0), frame());
    engine.on_scroll(PixelPosition::new(150.0, 0.0), frame());

    // Interval still open: nothing applies yet.
    assert_eq!(engine.tick(t0 + Duration::from_millis(50)), None);

    let bounds = engine
        .tick(t0 + Duration::from_millis(100))
        .expect("trailing event applied");
    assert_eq!(bounds, ViewportBounds::new(5.0, 15.0, 0.0, 5.0));
}

#[test]
fn scrolling_clears_the_active_highlight() {
    let mut engine = engine();
    engine.on_layout(frame()).expect("layout");

    assert!(engine.on_tap(PixelPosition::new(300.0, 0.0)).is_some());
    assert!(engine.highlight().is_some());

    let t0 = Instant::now();
    engine.on_scroll(PixelPosition::new(150.0, 0.0), frame());
    engine.tick(t0).expect("committed bounds");
    assert!(engine.highlight().is_none());
}

#[test]
fn tap_toggles_and_replaces_highlights() {
    let mut engine = engine();
    engine.on_layout(frame()).expect("layout");

    // scroll_width = 300 * (30 / 10) = 900; x=300 maps to data x 10.
    let first = engine.on_tap(PixelPosition::new(300.0, 0.0)).expect("highlight");
    assert_eq!(first.point.x, 10.0);

    // Same x toggles off.
    assert!(engine.on_tap(PixelPosition::new(300.0, 0.0)).is_none());

    // A different x replaces instead of toggling.
    engine.on_tap(PixelPosition::new(300.0, 0.0));
    let replaced = engine.on_tap(PixelPosition::new(600.0, 0.0)).expect("highlight");
    assert_eq!(replaced.point.x, 20.0);
}

#[test]
fn portion_change_cancels_pending_scroll_work() {
    let mut engine = engine();
    engine.on_layout(frame()).expect("layout");

    engine.on_scroll(PixelPosition::new(600.0, 0.0), frame());
    let bounds = engine
        .set_visible_portion(VisiblePortion::Width(15.0))
        .expect("portion change")
        .expect("synchronous recompute");

    // Recomputed immediately at the latest scroll offset with the new
    // portion: page index 2, window [30, 45].
    assert_eq!(bounds.min_x, 30.0);
    assert_eq!(bounds.max_x, 45.0);

    // The pending scroll event was discarded.
    assert_eq!(engine.tick(Instant::now() + Duration::from_secs(1)), None);
}

#[test]
fn data_replacement_resets_scroll_and_highlight() {
    let mut engine = engine();
    engine.on_layout(frame()).expect("layout");
    engine.on_tap(PixelPosition::new(300.0, 0.0));

    let replacement = SeriesCollection::from_series(vec![
        Series::new("potValue", vec![0.0, 50.0], vec![10.0, 90.0]).expect("valid series"),
    ])
    .expect("collection");

    let bounds = engine.set_data(replacement).expect("recomputed bounds");
    assert_eq!(bounds, ViewportBounds::new(0.0, 10.0, 10.0, 90.0));
    assert!(engine.highlight().is_none());
}

#[test]
fn mapping_accessors_follow_the_committed_bounds() {
    let mut engine = engine();
    engine.on_layout(frame()).expect("layout");

    assert_abs_diff_eq!(engine.map_x_to_pixel(5.0), 150.0);
    assert_abs_diff_eq!(engine.map_y_to_pixel(0.0), 200.0);
    assert_abs_diff_eq!(engine.map_pixel_to_x(150.0), 5.0);
}

#[test]
fn projection_returns_the_visible_slice_geometry() {
    let mut engine = engine();
    engine.on_layout(frame()).expect("layout");

    let points = engine.project_series("potValue").expect("projection");
    // Window [0, 10] plus one sample of padding on the right.
    assert_eq!(points.len(), 3);
    assert_abs_diff_eq!(points[0].x, 0.0);
    assert_abs_diff_eq!(points[0].y, 200.0);
    assert_abs_diff_eq!(points[1].x, 300.0);

    assert_eq!(engine.project_series("unknown"), None);
}

#[test]
fn empty_collection_is_a_safe_degenerate_state() {
    let config = ChartEngineConfig::new("potValue").with_padding_proportion(0.0);
    let mut engine = ChartEngine::new(SeriesCollection::new(), config).expect("engine init");

    assert_eq!(engine.on_layout(frame()).expect("layout"), None);
    assert_eq!(engine.bounds(), ViewportBounds::zero());
    assert_eq!(engine.scroll_width(), 300.0);
    assert!(engine.on_tap(PixelPosition::new(100.0, 0.0)).is_none());
}

#[test]
fn bounds_subscribers_fire_once_per_committed_change() {
    use std::cell::Cell;
    use std::rc::Rc;

    let mut engine = engine();
    let notifications = Rc::new(Cell::new(0usize));
    let observed = Rc::clone(&notifications);
    engine.subscribe_bounds(move |_| observed.set(observed.get() + 1));

    engine.on_layout(frame()).expect("layout");
    assert_eq!(notifications.get(), 1);

    // Relayout with an identical frame recomputes identical bounds.
    engine.on_layout(frame()).expect("layout");
    assert_eq!(notifications.get(), 1);
}

#[test]
fn config_survives_a_serde_round_trip() {
    let config = ChartEngineConfig::new("potValue")
        .with_portion(VisiblePortion::Width(10.0))
        .with_dynamic_axis(false)
        .with_throttle_interval(Duration::from_millis(50));

    let json = serde_json::to_string(&config).expect("serialize");
    let decoded: ChartEngineConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, config);
}

#[test]
fn empty_highlight_series_id_is_rejected() {
    let result = ChartEngine::new(sample_collection(), ChartEngineConfig::new(""));
    assert!(result.is_err());
}
