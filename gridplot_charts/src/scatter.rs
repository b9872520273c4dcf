// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter series: one filled circle per data point.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Circle, Rect};
use peniko::Brush;
use peniko::color::palette::css;

use crate::axis::Axis;
use crate::canvas::DataCanvas;
use crate::glyph::{DataRange, DataRanger, GlyphBox, GlyphBoxer};
use crate::plot::Plotter;
use crate::scene::{Primitive, Scene};
use crate::z_order;

/// A scatter series.
///
/// Its glyphs are reported to autoscaling, so points at the data extent are drawn whole.
#[derive(Clone, Debug, PartialEq)]
pub struct Scatter {
    /// Data points as `(x, y)`.
    pub points: Vec<(f64, f64)>,
    /// Glyph radius in physical units.
    pub radius: f64,
    /// Glyph fill.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl Scatter {
    /// A series of black circles with a radius of 3.
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            points: points.into_iter().collect(),
            radius: 3.0,
            fill: Brush::Solid(css::BLACK),
            z_index: z_order::SERIES_POINTS,
        }
    }

    /// Sets the glyph radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    fn normalized<'a>(
        &'a self,
        x: &'a Axis,
        y: &'a Axis,
    ) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.points
            .iter()
            .filter(|(px, py)| px.is_finite() && py.is_finite())
            .map(|&(px, py)| (x.norm(px), y.norm(py)))
    }
}

impl Plotter for Scatter {
    fn plot(&self, canvas: &DataCanvas, x: &Axis, y: &Axis, scene: &mut Scene) {
        let on_canvas = |v: f64| (0.0..=1.0).contains(&v);
        for (nx, ny) in self.normalized(x, y) {
            if !on_canvas(nx) || !on_canvas(ny) {
                continue;
            }
            scene.push(
                self.z_index,
                Primitive::Circle {
                    circle: Circle::new(canvas.point(nx, ny), self.radius),
                    fill: self.fill.clone(),
                },
            );
        }
    }

    fn glyph_boxer(&self) -> Option<&dyn GlyphBoxer> {
        Some(self)
    }

    fn data_ranger(&self) -> Option<&dyn DataRanger> {
        Some(self)
    }
}

impl GlyphBoxer for Scatter {
    fn glyph_boxes(&self, x: &Axis, y: &Axis) -> Vec<GlyphBox> {
        let r = self.radius;
        self.normalized(x, y)
            .map(|(nx, ny)| GlyphBox {
                x: nx,
                y: ny,
                rect: Rect::new(-r, -r, r, r),
            })
            .collect()
    }
}

impl DataRanger for Scatter {
    fn data_range(&self) -> Option<DataRange> {
        DataRange::of_points(self.points.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn points_off_the_axes_are_not_drawn() {
        let canvas = DataCanvas::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let x = Axis::new().with_range(0.0, 10.0);
        let y = Axis::new().with_range(0.0, 10.0);
        let scatter = Scatter::new([(5.0, 5.0), (11.0, 5.0), (f64::NAN, 1.0), (0.0, 10.0)]);
        let mut scene = Scene::new();
        scatter.plot(&canvas, &x, &y, &mut scene);

        let centers: Vec<_> = scene
            .items()
            .iter()
            .filter_map(|(_, p)| match p {
                Primitive::Circle { circle, .. } => Some((circle.center.x, circle.center.y)),
                _ => None,
            })
            .collect();
        assert_eq!(centers, [(50.0, 50.0), (0.0, 0.0)]);
    }

    #[test]
    fn glyph_boxes_follow_the_radius() {
        let x = Axis::new().with_range(0.0, 4.0);
        let y = Axis::new().with_range(0.0, 2.0);
        let boxes = Scatter::new([(1.0, 1.0), (f64::INFINITY, 0.0)])
            .with_radius(5.0)
            .glyph_boxes(&x, &y);
        assert_eq!(
            boxes,
            [GlyphBox {
                x: 0.25,
                y: 0.5,
                rect: Rect::new(-5.0, -5.0, 5.0, 5.0),
            }]
        );
    }

    #[test]
    fn data_range_covers_finite_points() {
        let scatter = Scatter::new([(3.0, -1.0), (-2.0, 4.0), (f64::NAN, 100.0)]);
        assert_eq!(
            scatter.data_range(),
            Some(DataRange {
                x_min: -2.0,
                x_max: 3.0,
                y_min: -1.0,
                y_max: 4.0,
            })
        );
        assert_eq!(Scatter::new(Vec::<(f64, f64)>::new()).data_range(), None);
    }
}
