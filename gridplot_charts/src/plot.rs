// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plots: a title, two axes and a list of series drawn into a shared data area.
//!
//! Laying out a plot is a measure/arrange pass:
//! 1. Reserve the title strip at the top of the area.
//! 2. Measure both axes with the current ranges and crop the data area.
//! 3. Train the axes against the glyph boxes of all series ([`Autoscale::train`]).
//! 4. Measure again, since the trained ranges may produce different tick labels. If the
//!    data area moved, train again from the incoming ranges against the new area.
//!
//! Drawing then emits the axes and asks every series to draw into the data area.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

use crate::autoscale::{Autoscale, AutoscaleReport};
use crate::axis::{Axis, AxisStyle};
use crate::canvas::DataCanvas;
use crate::glyph::{DataRanger, GlyphBox, GlyphBoxer};
use crate::measure::TextMeasurer;
use crate::scene::{Primitive, Scene, StrokeStyle, TextAnchor, TextBaseline, TextPrimitive};
use crate::tick::ConstantTicks;
use crate::z_order;

/// Upper bound on measure/train rounds in [`Plot::layout`].
const MAX_LAYOUT_ROUNDS: usize = 4;

/// A series that draws into the data area of a plot.
pub trait Plotter: fmt::Debug {
    /// Draws the series onto `canvas` using the plot's axes.
    fn plot(&self, canvas: &DataCanvas, x: &Axis, y: &Axis, scene: &mut Scene);

    /// The series' glyph boxes, if its glyphs must not be clipped.
    fn glyph_boxer(&self) -> Option<&dyn GlyphBoxer> {
        None
    }

    /// The series' data extent, if the axes should cover it.
    fn data_ranger(&self) -> Option<&dyn DataRanger> {
        None
    }
}

/// The outcome of [`Plot::layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotLayout {
    /// Where series are drawn.
    pub data: DataCanvas,
    /// What autoscaling did to the axes.
    pub autoscale: AutoscaleReport,
}

/// A plot.
#[derive(Debug)]
pub struct Plot {
    /// Title text; no title strip is reserved when `None`.
    pub title: Option<String>,
    /// Title font size.
    pub title_font_size: f64,
    /// Title paint.
    pub title_fill: Brush,
    /// Gap between the title and the rest of the plot.
    pub title_padding: f64,
    /// Fill behind the whole plot.
    pub background: Option<Brush>,
    /// The horizontal axis.
    pub x: Axis,
    /// The vertical axis.
    pub y: Axis,
    /// Autoscale configuration used by [`Plot::layout`].
    pub autoscale: Autoscale,
    plotters: Vec<Box<dyn Plotter>>,
}

impl Default for Plot {
    fn default() -> Self {
        Self {
            title: None,
            title_font_size: 12.0,
            title_fill: Brush::Solid(css::BLACK),
            title_padding: 5.0,
            background: Some(Brush::Solid(css::WHITE)),
            x: Axis::new(),
            y: Axis::new(),
            autoscale: Autoscale::default(),
            plotters: Vec::new(),
        }
    }
}

impl Plot {
    /// Creates an empty plot with a white background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the axes.
    pub fn with_axes(mut self, x: Axis, y: Axis) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Adds a series. Series are drawn in the order they were added.
    ///
    /// If the series reports a data range, both axes are widened to cover it.
    pub fn add(&mut self, plotter: impl Plotter + 'static) {
        if let Some(range) = plotter.data_ranger().and_then(|r| r.data_range()) {
            log::debug!("data x range: {:.3} - {:.3}", range.x_min, range.x_max);
            log::debug!("data y range: {:.3} - {:.3}", range.y_min, range.y_max);
            self.x.update_range(range.x_min, range.x_max);
            self.y.update_range(range.y_min, range.y_max);
        }
        self.plotters.push(Box::new(plotter));
    }

    /// The series, in drawing order.
    pub fn plotters(&self) -> impl Iterator<Item = &dyn Plotter> {
        self.plotters.iter().map(|p| p.as_ref())
    }

    fn title_extent(&self, measurer: &dyn TextMeasurer) -> f64 {
        self.title.as_deref().map_or(0.0, |title| {
            measurer.measure_block(title, self.title_font_size).1 + self.title_padding
        })
    }

    fn crop_for_axes(&self, area: Rect, measurer: &dyn TextMeasurer) -> DataCanvas {
        let area = Rect::new(area.x0, area.y0 + self.title_extent(measurer), area.x1, area.y1);
        DataCanvas::new(area).crop(
            self.y.vertical_size(measurer),
            self.x.horizontal_size(measurer),
            0.0,
            0.0,
        )
    }

    /// Trains the axes for `area` and returns the data area.
    ///
    /// The axes are mutated: sanitized, expanded and widened to fit all glyphs. Each call
    /// trains from the current ranges, so laying out twice expands twice.
    ///
    /// `converged` in the report holds only if training settled against the returned data
    /// area. When the tick labels keep resizing the axes, it is `false`.
    pub fn layout(&mut self, area: Rect, measurer: &dyn TextMeasurer) -> PlotLayout {
        let incoming = ((self.x.min, self.x.max), (self.y.min, self.y.max));
        let mut data = self.crop_for_axes(area, measurer);
        let mut rounds = 0;
        loop {
            ((self.x.min, self.x.max), (self.y.min, self.y.max)) = incoming;
            let report = self.train(data.rect);
            rounds += 1;
            let measured = self.crop_for_axes(area, measurer);
            if measured == data {
                return PlotLayout {
                    data,
                    autoscale: report,
                };
            }
            if rounds == MAX_LAYOUT_ROUNDS {
                log::debug!("data area still moving after {rounds} layout rounds");
                return PlotLayout {
                    data: measured,
                    autoscale: AutoscaleReport {
                        converged: false,
                        ..report
                    },
                };
            }
            data = measured;
        }
    }

    fn train(&mut self, canvas: Rect) -> AutoscaleReport {
        let Self {
            x,
            y,
            plotters,
            autoscale,
            ..
        } = self;
        let boxers: Vec<&dyn GlyphBoxer> =
            plotters.iter().filter_map(|p| p.glyph_boxer()).collect();
        autoscale.train(x, y, canvas, &boxers)
    }

    /// The area series are drawn into after laying out for `area`.
    pub fn data_canvas(&mut self, area: Rect, measurer: &dyn TextMeasurer) -> DataCanvas {
        self.layout(area, measurer).data
    }

    /// Lays the plot out in `area` and draws it.
    pub fn draw(&mut self, area: Rect, measurer: &dyn TextMeasurer) -> Scene {
        self.draw_with_layout(area, measurer).0
    }

    /// Like [`Plot::draw`], also returning the layout the scene was drawn with.
    ///
    /// Overlays such as [`Plot::draw_glyph_boxes`] should use this layout's data area
    /// rather than laying the plot out again.
    pub fn draw_with_layout(
        &mut self,
        area: Rect,
        measurer: &dyn TextMeasurer,
    ) -> (Scene, PlotLayout) {
        let mut scene = Scene::new();
        if let Some(fill) = &self.background {
            scene.push(
                z_order::PLOT_BACKGROUND,
                Primitive::FillRect {
                    rect: area,
                    fill: fill.clone(),
                },
            );
        }
        if let Some(title) = &self.title {
            scene.push(
                z_order::TITLES,
                TextPrimitive {
                    origin: Point::new(0.5 * (area.x0 + area.x1), area.y0),
                    text: title.clone(),
                    font_size: self.title_font_size,
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Hanging,
                    angle: 0.0,
                    fill: self.title_fill.clone(),
                }
                .into(),
            );
        }

        let layout = self.layout(area, measurer);
        self.x.draw_horizontal(&layout.data, &mut scene, measurer);
        self.y.draw_vertical(&layout.data, &mut scene, measurer);
        for plotter in &self.plotters {
            plotter.plot(&layout.data, &self.x, &self.y, &mut scene);
        }
        (scene, layout)
    }

    /// Functions mapping data coordinates to physical coordinates on `canvas`.
    pub fn transforms<'a>(
        &'a self,
        canvas: &'a DataCanvas,
    ) -> (impl Fn(f64) -> f64 + 'a, impl Fn(f64) -> f64 + 'a) {
        (
            move |v| canvas.x(self.x.norm(v)),
            move |v| canvas.y(self.y.norm(v)),
        )
    }

    /// The glyph boxes of all series, without those that refer to points off the plot.
    pub fn glyph_boxes(&self) -> Vec<GlyphBox> {
        self.plotters
            .iter()
            .filter_map(|p| p.glyph_boxer())
            .flat_map(|b| b.glyph_boxes(&self.x, &self.y))
            .filter(GlyphBox::is_visible)
            .collect()
    }

    /// Outlines every glyph box in red. For debugging layouts.
    pub fn draw_glyph_boxes(&self, canvas: &DataCanvas, scene: &mut Scene) {
        let stroke = StrokeStyle::solid(css::RED, 1.0);
        for b in self.glyph_boxes() {
            scene.push(
                z_order::DEBUG_OVERLAY,
                Primitive::StrokeRect {
                    rect: b.placed(canvas),
                    stroke: stroke.clone(),
                },
            );
        }
    }

    /// Turns the x axis into a nominal axis: `names[i]` labels the value `i`.
    pub fn nominal_x<S: Into<String>>(&mut self, names: impl IntoIterator<Item = S>) {
        make_nominal(&mut self.x, names);
    }

    /// Turns the y axis into a nominal axis: `names[i]` labels the value `i`.
    pub fn nominal_y<S: Into<String>>(&mut self, names: impl IntoIterator<Item = S>) {
        make_nominal(&mut self.y, names);
    }

    /// Stops drawing the x axis.
    pub fn hide_x(&mut self) {
        hide(&mut self.x);
    }

    /// Stops drawing the y axis.
    pub fn hide_y(&mut self) {
        hide(&mut self.y);
    }

    /// Stops drawing both axes.
    pub fn hide_axes(&mut self) {
        self.hide_x();
        self.hide_y();
    }
}

fn make_nominal<S: Into<String>>(axis: &mut Axis, names: impl IntoIterator<Item = S>) {
    axis.style.line.width = 0.0;
    axis.style.tick.width = 0.0;
    axis.style.tick_length = 0.0;
    axis.tick_marker = alloc::sync::Arc::new(ConstantTicks::nominal(names));
}

fn hide(axis: &mut Axis) {
    let padding = axis.style.padding;
    axis.style = AxisStyle {
        padding,
        ..AxisStyle::hidden()
    };
    axis.tick_marker = alloc::sync::Arc::new(ConstantTicks::empty());
}
