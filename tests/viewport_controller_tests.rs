use std::cell::Cell;
use std::rc::Rc;

use scrollchart_rs::core::{PixelPosition, ScreenFrame, Series, SeriesCollection, ViewportBounds};
use scrollchart_rs::viewport::{ViewportController, ViewportTuning, VisiblePortion};

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

fn controller(dynamic_axis: bool, padding: f64) -> ViewportController {
    let mut controller = ViewportController::new(ViewportTuning {
        dynamic_axis,
        padding_proportion: padding,
    })
    .expect("controller");
    controller
        .set_visible_portion(VisiblePortion::Width(10.0))
        .expect("portion");
    controller
}

fn frame() -> ScreenFrame {
    ScreenFrame::new(300.0, 200.0)
}

#[test]
fn window_at_origin_covers_the_first_portion() {
    let controller = controller(true, 0.0);
    let bounds = controller.recompute_bounds(
        &sample_collection(),
        PixelPosition::new(0.0, 0.0),
        frame(),
    );
    assert_eq!(bounds, ViewportBounds::new(0.0, 10.0, 0.0, 5.0));
}

#[test]
fn one_page_of_scroll_advances_one_portion() {
    let controller = controller(true, 0.0);
    let bounds = controller.recompute_bounds(
        &sample_collection(),
        PixelPosition::new(300.0, 0.0),
        frame(),
    );
    // The ±1 sample padding pulls the neighbors on both sides into the
    // y computation.
    assert_eq!(bounds, ViewportBounds::new(10.0, 20.0, 0.0, 8.0));
}

#[test]
fn fractional_scroll_shifts_the_window_proportionally() {
    let controller = controller(true, 0.0);
    let bounds = controller.recompute_bounds(
        &sample_collection(),
        PixelPosition::new(150.0, 0.0),
        frame(),
    );
    assert_eq!(bounds, ViewportBounds::new(5.0, 15.0, 0.0, 5.0));
}

#[test]
fn overscroll_past_the_left_edge_yields_a_negative_window_start() {
    let controller = controller(true, 0.0);
    let bounds = controller.recompute_bounds(
        &sample_collection(),
        PixelPosition::new(-30.0, 0.0),
        frame(),
    );
    assert_eq!(bounds, ViewportBounds::new(-1.0, 9.0, 0.0, 5.0));
}

#[test]
fn fixed_axis_keeps_the_global_y_bounds() {
    let controller = controller(false, 0.0);
    let bounds = controller.recompute_bounds(
        &sample_collection(),
        PixelPosition::new(0.0, 0.0),
        frame(),
    );
    assert_eq!(bounds, ViewportBounds::new(0.0, 10.0, 0.0, 8.0));
}

#[test]
fn padding_expands_the_y_bounds_symmetrically() {
    let controller = controller(true, 0.1);
    let bounds = controller.recompute_bounds(
        &sample_collection(),
        PixelPosition::new(0.0, 0.0),
        frame(),
    );
    assert_eq!(bounds, ViewportBounds::new(0.0, 10.0, -0.5, 5.5));
}

#[test]
fn empty_collection_recomputes_to_zero_bounds() {
    let controller = controller(true, 0.0);
    let bounds = controller.recompute_bounds(
        &SeriesCollection::new(),
        PixelPosition::new(100.0, 0.0),
        frame(),
    );
    assert_eq!(bounds, ViewportBounds::zero());
}

#[test]
fn single_x_data_collapses_onto_global_bounds() {
    let collection = SeriesCollection::from_series(vec![
        Series::new("a", vec![5.0], vec![42.0]).expect("valid series"),
    ])
    .expect("collection");

    let mut controller = ViewportController::new(ViewportTuning {
        dynamic_axis: true,
        padding_proportion: 0.0,
    })
    .expect("controller");
    controller
        .set_visible_portion(VisiblePortion::All)
        .expect("portion");

    let bounds = controller.recompute_bounds(&collection, PixelPosition::new(0.0, 0.0), frame());
    assert_eq!(bounds, ViewportBounds::new(5.0, 5.0, 42.0, 42.0));
}

#[test]
fn equal_bounds_suppress_subscriber_notifications() {
    let mut controller = controller(true, 0.0);
    let notifications = Rc::new(Cell::new(0usize));
    let observed = Rc::clone(&notifications);
    controller.subscribe(move |_| observed.set(observed.get() + 1));

    let collection = sample_collection();
    let first = controller.recompute_bounds(&collection, PixelPosition::new(0.0, 0.0), frame());
    assert!(controller.commit(first).is_some());
    assert_eq!(notifications.get(), 1);

    let second = controller.recompute_bounds(&collection, PixelPosition::new(0.0, 0.0), frame());
    assert_eq!(controller.commit(second), None);
    assert_eq!(notifications.get(), 1);

    let moved = controller.recompute_bounds(&collection, PixelPosition::new(150.0, 0.0), frame());
    assert!(controller.commit(moved).is_some());
    assert_eq!(notifications.get(), 2);
}

#[test]
fn scroll_width_scales_with_the_portion() {
    let collection = SeriesCollection::from_series(vec![
        Series::new(
            "a",
            (0..=10).map(|i| f64::from(i) * 10.0).collect(),
            vec![1.0; 11],
        )
        .expect("valid series"),
    ])
    .expect("collection");

    let controller = controller(true, 0.0);
    assert_eq!(controller.scroll_width(&collection, frame()), 3000.0);
}

#[test]
fn scroll_width_never_shrinks_below_one_screen() {
    let collection = sample_collection();
    let mut controller = controller(true, 0.0);
    controller
        .set_visible_portion(VisiblePortion::Width(500.0))
        .expect("portion");
    assert_eq!(controller.scroll_width(&collection, frame()), 300.0);
}

#[test]
fn scroll_width_of_empty_data_is_one_screen() {
    let controller = controller(true, 0.0);
    assert_eq!(controller.scroll_width(&SeriesCollection::new(), frame()), 300.0);
}

#[test]
fn invalid_portion_widths_are_rejected() {
    let mut controller = controller(true, 0.0);
    assert!(controller.set_visible_portion(VisiblePortion::Width(0.0)).is_err());
    assert!(controller.set_visible_portion(VisiblePortion::Width(-5.0)).is_err());
    assert!(
        controller
            .set_visible_portion(VisiblePortion::Width(f64::NAN))
            .is_err()
    );
}

#[test]
fn invalid_frames_are_rejected() {
    let mut controller = controller(true, 0.0);
    assert!(controller.set_frame(ScreenFrame::new(0.0, 200.0)).is_err());
    assert!(controller.set_frame(ScreenFrame::new(300.0, -1.0)).is_err());
}

#[test]
fn negative_padding_proportion_is_rejected() {
    let result = ViewportController::new(ViewportTuning {
        dynamic_axis: true,
        padding_proportion: -0.1,
    });
    assert!(result.is_err());
}
