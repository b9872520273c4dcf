// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::String;
use alloc::vec::Vec;

use chrono::{TimeZone, Utc};
use kurbo::Rect;

use crate::{
    Axis, CalendarTicks, DEFAULT_TOLERANCE, Grid, HeuristicTextMeasurer, Plot, PlotLayout,
    Primitive, Scatter, Scene, TextMeasurer, seconds_since, z_order,
};

const AREA: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

fn labels(scene: &Scene, z: i32) -> Vec<String> {
    scene
        .items()
        .iter()
        .filter(|(layer, _)| *layer == z)
        .filter_map(|(_, p)| match p {
            Primitive::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn adding_series_widens_the_axes() {
    let mut plot = Plot::new();
    assert!(!plot.x.has_data());
    plot.add(Scatter::new([(1.0, 2.0), (3.0, -4.0)]));
    assert_eq!((plot.x.min, plot.x.max), (1.0, 3.0));
    assert_eq!((plot.y.min, plot.y.max), (-4.0, 2.0));

    plot.add(Scatter::new([(-1.0, 0.0)]));
    assert_eq!((plot.x.min, plot.x.max), (-1.0, 3.0));
    assert_eq!((plot.y.min, plot.y.max), (-4.0, 2.0));

    // A grid reports no data and leaves the ranges alone.
    plot.add(Grid::new());
    assert_eq!((plot.x.min, plot.x.max), (-1.0, 3.0));
    assert_eq!(plot.plotters().count(), 3);
}

fn assert_glyphs_inside(plot: &Plot, layout: &PlotLayout) {
    let data = layout.data.rect;
    let slack = DEFAULT_TOLERANCE;
    for b in plot.glyph_boxes() {
        let r = b.placed(&layout.data);
        assert!(r.x0 >= data.x0 - slack, "{r:?} left of {data:?}");
        assert!(r.x1 <= data.x1 + slack, "{r:?} right of {data:?}");
        assert!(r.y0 >= data.y0 - slack, "{r:?} above {data:?}");
        assert!(r.y1 <= data.y1 + slack, "{r:?} below {data:?}");
    }
}

#[test]
fn layout_keeps_every_glyph_inside_the_data_area() {
    let mut plot = Plot::new();
    plot.add(Scatter::new([(0.0, 0.0), (10.0, 10.0), (5.0, 2.0)]).with_radius(10.0));
    let layout = plot.layout(AREA, &HeuristicTextMeasurer);

    assert!(layout.autoscale.converged, "{:?}", layout.autoscale);
    assert!(layout.autoscale.x.changed());
    assert!(plot.x.min < 0.0 && plot.x.max > 10.0);
    assert_glyphs_inside(&plot, &layout);
}

#[test]
fn wider_tick_labels_retrain_against_the_smaller_area() {
    // Training widens y past 10, so its labels gain a digit and the data area narrows.
    let mut plot = Plot::new();
    plot.add(Scatter::new([(0.0, 0.0), (10.0, 9.0)]).with_radius(40.0));
    let layout = plot.layout(AREA, &HeuristicTextMeasurer);

    assert!(layout.autoscale.converged, "{:?}", layout.autoscale);
    assert_eq!(layout.autoscale.x.before, (0.0, 10.0));
    assert_glyphs_inside(&plot, &layout);
}

#[test]
fn drawing_lays_out_once() {
    let mut plot = Plot::new();
    plot.x = Axis::new().with_range(0.0, 10.0).with_expansion(0.1, 0.0);
    plot.add(Grid::new());
    let (scene, layout) = plot.draw_with_layout(AREA, &HeuristicTextMeasurer);

    assert_eq!((plot.x.min, plot.x.max), (-1.0, 11.0));
    assert_eq!(layout.autoscale.x.after, (-1.0, 11.0));
    assert!(scene.len() > 1);

    // Overlays drawn against the returned layout leave the axes alone.
    let mut overlay = Scene::new();
    plot.draw_glyph_boxes(&layout.data, &mut overlay);
    assert_eq!((plot.x.min, plot.x.max), (-1.0, 11.0));
}

#[test]
fn the_data_area_leaves_room_for_title_and_axes() {
    let measurer = HeuristicTextMeasurer;
    let mut plot = Plot::new().with_title("Title");
    plot.x = plot.x.clone().with_label("x");
    plot.add(Scatter::new([(0.0, 0.0), (1.0, 1.0)]));
    let data = plot.data_canvas(AREA, &measurer).rect;

    let (_, title_h) = measurer.measure_block("Title", plot.title_font_size);
    assert_eq!(data.y0, title_h + plot.title_padding);
    assert_eq!(data.x0, plot.y.vertical_size(&measurer));
    assert_eq!(data.y1, AREA.y1 - plot.x.horizontal_size(&measurer));
    assert_eq!(data.x1, AREA.x1);
}

#[test]
fn drawing_emits_titles_labels_and_series_in_layers() {
    let mut plot = Plot::new().with_title("Sales");
    plot.add(Grid::new());
    plot.add(Scatter::new([(0.0, 0.0), (10.0, 10.0)]));
    let scene = plot.draw(AREA, &HeuristicTextMeasurer);

    assert_eq!(labels(&scene, z_order::TITLES), ["Sales"]);
    let x_labels = labels(&scene, z_order::AXIS_LABELS);
    assert!(x_labels.iter().any(|l| l == "10"), "{x_labels:?}");

    let sorted = scene.sorted();
    assert!(matches!(sorted.first(), Some(Primitive::FillRect { rect, .. }) if *rect == AREA));
    let circles = sorted
        .iter()
        .filter(|p| matches!(p, Primitive::Circle { .. }))
        .count();
    assert_eq!(circles, 2);
}

#[test]
fn nominal_axes_label_positions_by_name() {
    let mut plot = Plot::new();
    plot.add(Scatter::new([(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)]));
    plot.nominal_x(["alpha", "beta", "gamma"]);
    let scene = plot.draw(AREA, &HeuristicTextMeasurer);

    let texts = labels(&scene, z_order::AXIS_LABELS);
    for name in ["alpha", "beta", "gamma"] {
        assert!(texts.iter().any(|t| t == name), "{name} missing from {texts:?}");
    }
}

#[test]
fn hidden_axes_only_keep_their_padding() {
    let measurer = HeuristicTextMeasurer;
    let mut plot = Plot::new();
    plot.add(Scatter::new([(0.0, 0.0), (1.0, 1.0)]));
    plot.hide_axes();
    let scene = plot.draw(AREA, &measurer);

    assert!(
        scene
            .items()
            .iter()
            .all(|(z, _)| *z != z_order::AXIS_RULES && *z != z_order::AXIS_LABELS)
    );
    let data = plot.data_canvas(AREA, &measurer).rect;
    assert_eq!(data.x0, plot.y.style.padding);
    assert_eq!(data.y1, AREA.y1 - plot.x.style.padding);
}

#[test]
fn glyph_boxes_skip_points_off_the_plot() {
    let mut plot = Plot::new();
    plot.add(Scatter::new([(0.5, 0.5), (2.0, 0.5)]));
    plot.x = Axis::new().with_range(0.0, 1.0);
    plot.y = Axis::new().with_range(0.0, 1.0);
    let boxes = plot.glyph_boxes();
    assert_eq!(boxes.len(), 1);
    assert_eq!((boxes[0].x, boxes[0].y), (0.5, 0.5));

    let mut scene = Scene::new();
    let canvas = crate::DataCanvas::new(AREA);
    plot.draw_glyph_boxes(&canvas, &mut scene);
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.items()[0].0, z_order::DEBUG_OVERLAY);
}

#[test]
fn transforms_map_data_onto_the_canvas() {
    let mut plot = Plot::new();
    plot.x = Axis::new().with_range(0.0, 10.0);
    plot.y = Axis::new().with_range(-1.0, 1.0);
    let canvas = crate::DataCanvas::new(Rect::new(100.0, 50.0, 200.0, 150.0));
    let (tx, ty) = plot.transforms(&canvas);
    assert_eq!(tx(5.0), 150.0);
    assert_eq!(ty(1.0), 50.0);
    assert_eq!(ty(-1.0), 150.0);
}

#[test]
fn calendar_axes_mark_the_first_date() {
    let reference = Utc.with_ymd_and_hms(2003, 5, 11, 23, 11, 9).unwrap();
    let x = Axis::new()
        .with_reference_time(reference)
        .with_tick_marker(CalendarTicks::new());
    let mut plot = Plot::new().with_axes(x, Axis::new());
    let end = Utc.with_ymd_and_hms(2003, 5, 12, 19, 54, 42).unwrap();
    let last = seconds_since(&reference.fixed_offset(), &end);
    plot.add(Scatter::new([(0.0, 1.0), (last, 2.0)]));
    let scene = plot.draw(AREA, &HeuristicTextMeasurer);

    let dated: Vec<String> = labels(&scene, z_order::AXIS_LABELS)
        .into_iter()
        .filter(|l| l.contains('\n'))
        .collect();
    assert_eq!(dated.len(), 1, "{dated:?}");
    assert!(dated[0].ends_with("12 May 2003"), "{dated:?}");
}
