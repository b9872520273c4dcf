// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plot axes: range bookkeeping, value normalization and axis drawing.
//!
//! An [`Axis`] holds the data range of one plot dimension. Values are mapped to a normalized
//! position in `[0, 1]` by [`Axis::norm`]; the plot then places that position on a
//! [`DataCanvas`]. Date/time axes store seconds elapsed since [`Axis::reference_time`].

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use kurbo::Point;
use peniko::Brush;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::canvas::DataCanvas;
use crate::measure::TextMeasurer;
use crate::scene::{Scene, StrokeStyle, TextAnchor, TextBaseline, TextPrimitive};
use crate::tick::{DefaultTicks, Tick, TickMarker, TickRange};
use crate::time::{instant_at, seconds_since};
use crate::z_order;

/// Margin added beyond the data extent when a plot is laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Expansion {
    /// Fraction of the range added on each side.
    pub relative: f64,
    /// Physical length kept free between the outermost data and the canvas edge.
    pub absolute: f64,
}

/// Optional limits for one end of an axis range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    /// The end may not move below this value.
    pub lower: Option<f64>,
    /// The end may not move above this value.
    pub higher: Option<f64>,
}

/// Soft limits on how far autoscaling may move an axis range.
///
/// Stored with the axis but not enforced by [`Autoscale`](crate::Autoscale) yet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Constraint {
    /// Limits for [`Axis::min`].
    pub min: Bounds,
    /// Limits for [`Axis::max`].
    pub max: Bounds,
}

/// How axis values map to normalized positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisScale {
    /// Linear mapping.
    #[default]
    Linear,
    /// Base-10 logarithmic mapping. Requires a positive range.
    Log,
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// The axis line.
    pub line: StrokeStyle,
    /// Tick marks.
    pub tick: StrokeStyle,
    /// Length of major tick marks. Minor marks are half as long.
    pub tick_length: f64,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Gap between tick marks and their labels.
    pub label_padding: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
    /// Gap between tick labels and the axis title.
    pub title_padding: f64,
    /// Gap between the data area and the axis line.
    pub padding: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let line = StrokeStyle::default();
        Self {
            tick: line.clone(),
            label_fill: line.brush.clone(),
            title_fill: line.brush.clone(),
            line,
            tick_length: 8.0,
            label_font_size: 10.0,
            label_padding: 2.0,
            title_font_size: 12.0,
            title_padding: 4.0,
            padding: 5.0,
        }
    }
}

impl AxisStyle {
    /// A style that draws nothing and takes no room besides `padding`.
    pub fn hidden() -> Self {
        let mut style = Self::default();
        style.line.width = 0.0;
        style.tick.width = 0.0;
        style.tick_length = 0.0;
        style
    }
}

/// One dimension of a plot.
#[derive(Clone, Debug)]
pub struct Axis {
    /// Lower end of the range.
    pub min: f64,
    /// Upper end of the range.
    pub max: f64,
    /// The instant that axis value `0.0` stands for on date/time axes.
    pub reference_time: DateTime<FixedOffset>,
    /// Margin added beyond the data during layout.
    pub expansion: Expansion,
    /// Soft limits for autoscaling.
    pub constraint: Constraint,
    /// Value normalization.
    pub scale: AxisScale,
    /// Axis title.
    pub label: Option<String>,
    /// Styling.
    pub style: AxisStyle,
    /// Tick strategy.
    pub tick_marker: Arc<dyn TickMarker>,
    has_data: bool,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            reference_time: DateTime::<Utc>::default().fixed_offset(),
            expansion: Expansion::default(),
            constraint: Constraint::default(),
            scale: AxisScale::Linear,
            label: None,
            style: AxisStyle::default(),
            tick_marker: Arc::new(DefaultTicks::default()),
            has_data: false,
        }
    }
}

impl Axis {
    /// Creates an axis over `(0, 1)` with linear ticks and no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the range explicitly. Later data only widens it.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self.has_data = true;
        self
    }

    /// Sets the tick strategy.
    pub fn with_tick_marker(mut self, marker: impl TickMarker + 'static) -> Self {
        self.tick_marker = Arc::new(marker);
        self
    }

    /// Sets the reference instant for date/time values.
    pub fn with_reference_time<Tz: TimeZone>(mut self, t: DateTime<Tz>) -> Self {
        self.reference_time = t.fixed_offset();
        self
    }

    /// Sets the relative and absolute expansion.
    pub fn with_expansion(mut self, relative: f64, absolute: f64) -> Self {
        self.expansion = Expansion { relative, absolute };
        self
    }

    /// Sets the autoscaling constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = constraint;
        self
    }

    /// Sets the scale.
    pub fn with_scale(mut self, scale: AxisScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the axis title.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Whether any data range has been applied.
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    /// Widens the range to include `[min, max]`.
    ///
    /// The first update replaces the default `(0, 1)` range. NaN ends are ignored.
    pub fn update_range(&mut self, min: f64, max: f64) {
        if min.is_nan() && max.is_nan() {
            return;
        }
        if self.has_data {
            self.min = self.min.min(min);
            self.max = self.max.max(max);
        } else {
            self.min = if min.is_nan() { max } else { min };
            self.max = if max.is_nan() { min } else { max };
            self.has_data = true;
        }
    }

    /// Repairs a degenerate range: non-finite ends become 0, reversed ends are swapped and
    /// an empty range is widened by one on each side.
    pub fn sanitize_range(&mut self) {
        if !self.min.is_finite() {
            self.min = 0.0;
        }
        if !self.max.is_finite() {
            self.max = 0.0;
        }
        if self.min > self.max {
            core::mem::swap(&mut self.min, &mut self.max);
        }
        if self.min == self.max {
            self.min -= 1.0;
            self.max += 1.0;
        }
    }

    /// Widens the range on both sides by [`Expansion::relative`] times its length.
    pub fn apply_relative_expansion(&mut self) {
        let relative = self.expansion.relative;
        if relative > 0.0 {
            let d = relative * (self.max - self.min);
            self.min -= d;
            self.max += d;
        }
    }

    /// Normalized position of `v`: 0 at [`Axis::min`], 1 at [`Axis::max`].
    pub fn norm(&self, v: f64) -> f64 {
        match self.scale {
            AxisScale::Linear => {
                let span = self.max - self.min;
                if span == 0.0 {
                    return 0.0;
                }
                (v - self.min) / span
            }
            AxisScale::Log => {
                if v <= 0.0 || self.min <= 0.0 || self.max <= 0.0 {
                    return 0.0;
                }
                let (lo, hi) = (self.min.ln(), self.max.ln());
                if hi == lo {
                    return 0.0;
                }
                (v.ln() - lo) / (hi - lo)
            }
        }
    }

    /// The axis value at normalized position `t`. Inverse of [`Axis::norm`].
    pub fn inv_norm(&self, t: f64) -> f64 {
        match self.scale {
            AxisScale::Linear => self.min + t * (self.max - self.min),
            AxisScale::Log => {
                if self.min <= 0.0 || self.max <= 0.0 {
                    return self.min;
                }
                self.min * (self.max / self.min).powf(t)
            }
        }
    }

    /// Seconds from [`Axis::reference_time`] to `t`.
    pub fn time_to_float<Tz: TimeZone>(&self, t: &DateTime<Tz>) -> f64 {
        seconds_since(&self.reference_time, t)
    }

    /// The instant `v` seconds after [`Axis::reference_time`], if representable.
    pub fn float_to_time(&self, v: f64) -> Option<DateTime<FixedOffset>> {
        instant_at(&self.reference_time, v)
    }

    /// The range handed to the tick marker.
    pub fn tick_range(&self) -> TickRange {
        TickRange {
            min: self.min,
            max: self.max,
            reference_time: self.reference_time,
        }
    }

    /// Ticks for the current range, computed fresh.
    pub fn ticks(&self) -> Vec<Tick> {
        self.tick_marker.ticks(&self.tick_range())
    }

    /// Ticks inside the current range. Explicit tick lists may hold others.
    pub(crate) fn visible_ticks(&self) -> Vec<Tick> {
        let mut ticks = self.ticks();
        ticks.retain(|t| t.value >= self.min && t.value <= self.max);
        ticks
    }

    fn line_extent(&self) -> f64 {
        if self.style.line.is_visible() {
            0.5 * self.style.line.width
        } else {
            0.0
        }
    }

    /// Extent of tick marks and of the label block (including its padding) across the axis.
    fn tick_extents(
        &self,
        ticks: &[Tick],
        measurer: &dyn TextMeasurer,
        horizontal: bool,
    ) -> (f64, f64) {
        if ticks.is_empty() {
            return (0.0, 0.0);
        }
        let labels = ticks
            .iter()
            .filter(|t| !t.is_minor())
            .map(|t| measurer.measure_block(&t.label, self.style.label_font_size))
            .map(|(w, h)| if horizontal { h } else { w })
            .fold(0.0_f64, f64::max);
        let label_extent = if labels > 0.0 {
            self.style.label_padding + labels
        } else {
            0.0
        };
        (self.style.tick_length.max(0.0), label_extent)
    }

    fn title_extent(&self, measurer: &dyn TextMeasurer) -> f64 {
        self.label.as_deref().map_or(0.0, |title| {
            let (_, h) = measurer.measure_block(title, self.style.title_font_size);
            self.style.title_padding + h
        })
    }

    /// Height needed below the data area when drawn as the horizontal axis.
    pub fn horizontal_size(&self, measurer: &dyn TextMeasurer) -> f64 {
        let (ticks, labels) = self.tick_extents(&self.visible_ticks(), measurer, true);
        self.style.padding + self.line_extent() + ticks + labels + self.title_extent(measurer)
    }

    /// Width needed left of the data area when drawn as the vertical axis.
    pub fn vertical_size(&self, measurer: &dyn TextMeasurer) -> f64 {
        let (ticks, labels) = self.tick_extents(&self.visible_ticks(), measurer, false);
        self.style.padding + self.line_extent() + ticks + labels + self.title_extent(measurer)
    }

    fn label_text(
        &self,
        origin: Point,
        text: &str,
        anchor: TextAnchor,
        baseline: TextBaseline,
    ) -> TextPrimitive {
        TextPrimitive {
            origin,
            text: String::from(text),
            font_size: self.style.label_font_size,
            anchor,
            baseline,
            angle: 0.0,
            fill: self.style.label_fill.clone(),
        }
    }

    /// Draws the axis below `data`.
    pub fn draw_horizontal(
        &self,
        data: &DataCanvas,
        scene: &mut Scene,
        measurer: &dyn TextMeasurer,
    ) {
        let ticks = self.visible_ticks();
        let (tick_extent, label_extent) = self.tick_extents(&ticks, measurer, true);
        let y = data.rect.y1 + self.style.padding + self.line_extent();

        scene.line(
            z_order::AXIS_RULES,
            (data.rect.x0, y),
            (data.rect.x1, y),
            &self.style.line,
        );
        for tick in &ticks {
            let x = data.x(self.norm(tick.value));
            let len = if tick.is_minor() {
                0.5 * tick_extent
            } else {
                tick_extent
            };
            if len > 0.0 {
                scene.line(z_order::AXIS_RULES, (x, y), (x, y + len), &self.style.tick);
            }
            if !tick.is_minor() {
                let origin = Point::new(x, y + tick_extent + self.style.label_padding);
                scene.push(
                    z_order::AXIS_LABELS,
                    self.label_text(origin, &tick.label, TextAnchor::Middle, TextBaseline::Hanging)
                        .into(),
                );
            }
        }

        if let Some(title) = &self.label {
            let origin = Point::new(
                0.5 * (data.rect.x0 + data.rect.x1),
                y + tick_extent + label_extent + self.style.title_padding,
            );
            scene.push(
                z_order::AXIS_TITLES,
                TextPrimitive {
                    origin,
                    text: title.clone(),
                    font_size: self.style.title_font_size,
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Hanging,
                    angle: 0.0,
                    fill: self.style.title_fill.clone(),
                }
                .into(),
            );
        }
    }

    /// Draws the axis left of `data`. The title reads bottom to top.
    pub fn draw_vertical(
        &self,
        data: &DataCanvas,
        scene: &mut Scene,
        measurer: &dyn TextMeasurer,
    ) {
        let ticks = self.visible_ticks();
        let (tick_extent, label_extent) = self.tick_extents(&ticks, measurer, false);
        let x = data.rect.x0 - self.style.padding - self.line_extent();

        scene.line(
            z_order::AXIS_RULES,
            (x, data.rect.y0),
            (x, data.rect.y1),
            &self.style.line,
        );
        for tick in &ticks {
            let y = data.y(self.norm(tick.value));
            let len = if tick.is_minor() {
                0.5 * tick_extent
            } else {
                tick_extent
            };
            if len > 0.0 {
                scene.line(z_order::AXIS_RULES, (x, y), (x - len, y), &self.style.tick);
            }
            if !tick.is_minor() {
                let origin = Point::new(x - tick_extent - self.style.label_padding, y);
                scene.push(
                    z_order::AXIS_LABELS,
                    self.label_text(origin, &tick.label, TextAnchor::End, TextBaseline::Middle)
                        .into(),
                );
            }
        }

        if let Some(title) = &self.label {
            let (_, h) = measurer.measure_block(title, self.style.title_font_size);
            let origin = Point::new(
                x - tick_extent - label_extent - self.style.title_padding - h,
                0.5 * (data.rect.y0 + data.rect.y1),
            );
            scene.push(
                z_order::AXIS_TITLES,
                TextPrimitive {
                    origin,
                    text: title.clone(),
                    font_size: self.style.title_font_size,
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Hanging,
                    angle: -90.0,
                    fill: self.style.title_fill.clone(),
                }
                .into(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    use kurbo::Rect;

    use crate::measure::HeuristicTextMeasurer;
    use crate::tick::ConstantTicks;

    #[test]
    fn sanitize_repairs_degenerate_ranges() {
        let cases = [
            ((f64::NAN, 3.0), (0.0, 3.0)),
            ((f64::NEG_INFINITY, f64::INFINITY), (-1.0, 1.0)),
            ((5.0, 2.0), (2.0, 5.0)),
            ((4.0, 4.0), (3.0, 5.0)),
            ((-2.0, 7.5), (-2.0, 7.5)),
        ];
        for ((min, max), want) in cases {
            let mut axis = Axis::new().with_range(min, max);
            axis.sanitize_range();
            assert_eq!((axis.min, axis.max), want, "sanitize({min}, {max})");
            assert!(axis.min < axis.max);
        }
    }

    #[test]
    fn first_update_replaces_the_placeholder() {
        let mut axis = Axis::new();
        assert!(!axis.has_data());
        axis.update_range(10.0, 20.0);
        assert_eq!((axis.min, axis.max), (10.0, 20.0));
        axis.update_range(15.0, 25.0);
        assert_eq!((axis.min, axis.max), (10.0, 25.0));
        axis.update_range(f64::NAN, 5.0);
        assert_eq!((axis.min, axis.max), (10.0, 25.0));
        axis.update_range(f64::NAN, f64::NAN);
        assert_eq!((axis.min, axis.max), (10.0, 25.0));
    }

    #[test]
    fn relative_expansion_widens_both_ends() {
        let mut axis = Axis::new().with_range(0.0, 10.0).with_expansion(0.1, 0.0);
        axis.apply_relative_expansion();
        assert_eq!((axis.min, axis.max), (-1.0, 11.0));
    }

    #[test]
    fn norm_and_inv_norm_invert_each_other() {
        let linear = Axis::new().with_range(-4.0, 12.0);
        let log = Axis::new().with_range(1.0, 1000.0).with_scale(AxisScale::Log);
        assert_eq!(linear.norm(4.0), 0.5);
        assert!((log.norm(10.0) - 1.0 / 3.0).abs() < 1e-12);
        for t in [-0.5, 0.0, 0.25, 1.0, 1.75] {
            for axis in [&linear, &log] {
                let back = axis.norm(axis.inv_norm(t));
                assert!((back - t).abs() < 1e-9, "{:?} round trip at {t}", axis.scale);
            }
        }
    }

    #[test]
    fn time_values_are_seconds_since_the_reference() {
        let reference = Utc
            .with_ymd_and_hms(2003, 5, 11, 23, 11, 9)
            .single()
            .expect("valid reference");
        let axis = Axis::new().with_reference_time(reference);
        let later = Utc
            .with_ymd_and_hms(2003, 5, 12, 8, 45, 17)
            .single()
            .expect("valid instant");
        let earlier = Utc
            .with_ymd_and_hms(2002, 2, 12, 0, 4, 17)
            .single()
            .expect("valid instant");
        assert_eq!(axis.time_to_float(&later), 34_448.0);
        assert!(axis.time_to_float(&earlier) < 0.0);
        assert_eq!(axis.float_to_time(34_448.0), Some(later.fixed_offset()));
        assert_eq!(axis.float_to_time(f64::INFINITY), None);
    }

    #[test]
    fn ticks_follow_the_marker() {
        let axis = Axis::new()
            .with_range(0.0, 3.0)
            .with_tick_marker(ConstantTicks::nominal(["a", "b", "c", "d", "e"]));
        assert_eq!(axis.ticks().len(), 5);
        assert_eq!(axis.visible_ticks().len(), 4);
    }

    #[test]
    fn horizontal_axis_layout() {
        let m = HeuristicTextMeasurer;
        let data = DataCanvas::new(Rect::new(50.0, 10.0, 250.0, 110.0));
        let axis = Axis::new().with_range(0.0, 10.0);
        let plain = axis.horizontal_size(&m);
        // padding + half line + tick + label padding + one label line
        assert_eq!(plain, 5.0 + 0.5 + 8.0 + 2.0 + 10.0);
        let titled = axis.clone().with_label("time");
        assert_eq!(titled.horizontal_size(&m), plain + 4.0 + 12.0);

        let mut scene = Scene::new();
        titled.draw_horizontal(&data, &mut scene, &m);
        let labels: Vec<&str> = scene.texts().map(|t| t.text.as_str()).collect();
        assert_eq!(labels, alloc::vec!["0", "2", "4", "6", "8", "10", "time"]);
        let first = scene.texts().next().expect("a label");
        assert_eq!(first.origin, Point::new(50.0, 110.0 + 5.5 + 8.0 + 2.0));
        let bottom = scene
            .items()
            .iter()
            .filter_map(|(_, p)| p.bounds())
            .fold(f64::NEG_INFINITY, |acc, r| acc.max(r.y1));
        assert!(bottom <= data.rect.y1 + plain, "rules leave the axis strip");
    }

    #[test]
    fn vertical_axis_layout() {
        let m = HeuristicTextMeasurer;
        let data = DataCanvas::new(Rect::new(50.0, 10.0, 250.0, 110.0));
        let axis = Axis::new().with_range(0.0, 1.0).with_label("value");
        let width = axis.vertical_size(&m);
        assert_eq!(width, 5.0 + 0.5 + 8.0 + 2.0 + 0.6 * 10.0 * 3.0 + 4.0 + 12.0);

        let mut scene = Scene::new();
        axis.draw_vertical(&data, &mut scene, &m);
        let title = scene
            .texts()
            .find(|t| t.text == "value")
            .expect("title drawn");
        assert_eq!(title.angle, -90.0);
        assert!((title.origin.x - (data.rect.x0 - width)).abs() < 1e-9);
        let top_label = scene
            .texts()
            .find(|t| t.text == "1.0")
            .expect("top label drawn");
        assert_eq!(top_label.origin.y, data.rect.y0);
        assert_eq!(top_label.anchor, TextAnchor::End);
    }

    #[test]
    fn hidden_axes_only_keep_their_padding() {
        let m = HeuristicTextMeasurer;
        let axis = Axis::new()
            .with_style(AxisStyle::hidden())
            .with_tick_marker(ConstantTicks::empty());
        assert_eq!(axis.horizontal_size(&m), 5.0);
        assert_eq!(axis.vertical_size(&m), 5.0);
        let mut scene = Scene::new();
        let data = DataCanvas::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        axis.draw_horizontal(&data, &mut scene, &m);
        assert!(scene.is_empty());
    }
}
