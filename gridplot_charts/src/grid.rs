// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A data-area background with gridlines at the axis ticks.

use peniko::color::palette::css;
use peniko::{Brush, Color};

use crate::axis::Axis;
use crate::canvas::DataCanvas;
use crate::plot::Plotter;
use crate::scene::{Primitive, Scene, StrokeStyle};
use crate::z_order;

/// Fills the data area and draws lines at the minor ticks, then over them at the majors.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    /// Fill behind the gridlines.
    pub background: Option<Brush>,
    /// Vertical lines at major x ticks.
    pub vertical: StrokeStyle,
    /// Horizontal lines at major y ticks.
    pub horizontal: StrokeStyle,
    /// Vertical lines at minor x ticks.
    pub minor_vertical: StrokeStyle,
    /// Horizontal lines at minor y ticks.
    pub minor_horizontal: StrokeStyle,
}

impl Default for Grid {
    fn default() -> Self {
        let major = StrokeStyle::solid(css::WHITE, 1.5);
        let minor = StrokeStyle::solid(css::WHITE, 0.75);
        Self {
            background: Some(Brush::Solid(Color::from_rgb8(0xee, 0xee, 0xee))),
            vertical: major.clone(),
            horizontal: major,
            minor_vertical: minor.clone(),
            minor_horizontal: minor,
        }
    }
}

impl Grid {
    /// A grey background with white gridlines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears the background fill.
    pub fn with_background(mut self, background: Option<Brush>) -> Self {
        self.background = background;
        self
    }

    /// Disables the minor gridlines.
    pub fn without_minor_lines(mut self) -> Self {
        self.minor_vertical.width = 0.0;
        self.minor_horizontal.width = 0.0;
        self
    }

    fn lines(&self, canvas: &DataCanvas, x: &Axis, y: &Axis, scene: &mut Scene, minor: bool) {
        let r = canvas.rect;
        let (z, vertical, horizontal) = if minor {
            (
                z_order::MINOR_GRID_LINES,
                &self.minor_vertical,
                &self.minor_horizontal,
            )
        } else {
            (z_order::GRID_LINES, &self.vertical, &self.horizontal)
        };
        for tick in x.visible_ticks() {
            if tick.is_minor() != minor {
                continue;
            }
            let px = canvas.x(x.norm(tick.value));
            scene.line(z, (px, r.y0), (px, r.y1), vertical);
        }
        for tick in y.visible_ticks() {
            if tick.is_minor() != minor {
                continue;
            }
            let py = canvas.y(y.norm(tick.value));
            scene.line(z, (r.x0, py), (r.x1, py), horizontal);
        }
    }
}

impl Plotter for Grid {
    fn plot(&self, canvas: &DataCanvas, x: &Axis, y: &Axis, scene: &mut Scene) {
        if let Some(fill) = &self.background {
            scene.push(
                z_order::DATA_BACKGROUND,
                Primitive::FillRect {
                    rect: canvas.rect,
                    fill: fill.clone(),
                },
            );
        }
        self.lines(canvas, x, y, scene, true);
        self.lines(canvas, x, y, scene, false);
    }
}
