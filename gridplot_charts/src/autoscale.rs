// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph-aware autoscaling.
//!
//! Series place glyphs (markers, labels) around data points. A glyph anchored at the edge of
//! the data range sticks out of the data area by its own size. [`Autoscale::train`] widens
//! the axis ranges until every glyph box, plus the configured absolute margin, fits.
//!
//! Each pass moves an axis end to the value currently shown where the overshooting glyph
//! edge sits. That shrinks the overshoot geometrically but does not remove it in one step,
//! so passes repeat until the overshoot is within tolerance or the pass budget runs out.
//!
//! Axis [`Constraint`](crate::Constraint)s are not consulted here.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;

use crate::axis::Axis;
use crate::canvas::DataCanvas;
use crate::glyph::{Extremes, GlyphBox, GlyphBoxer};

/// Default number of passes.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Default overshoot, in physical units, below which a layout counts as settled.
pub const DEFAULT_TOLERANCE: f64 = 1.0e-3;

/// Configuration of the autoscale loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Autoscale {
    /// Upper bound on passes.
    pub max_iterations: usize,
    /// Overshoot tolerated when deciding that the loop has converged.
    pub tolerance: f64,
}

impl Default for Autoscale {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// An axis range before and after training.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeChange {
    /// `(min, max)` on entry.
    pub before: (f64, f64),
    /// `(min, max)` on exit.
    pub after: (f64, f64),
}

impl RangeChange {
    /// Whether the range moved.
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

/// What [`Autoscale::train`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoscaleReport {
    /// Passes that moved an axis end.
    pub iterations: usize,
    /// Whether every glyph fits within tolerance. `false` when the pass budget ran out first.
    pub converged: bool,
    /// The horizontal axis range.
    pub x: RangeChange,
    /// The vertical axis range.
    pub y: RangeChange,
}

impl Autoscale {
    /// The default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pass budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sanitizes and expands both axes so the glyphs of `boxers` fit on `canvas`.
    ///
    /// The relative expansion is applied once up front. The absolute expansion keeps that
    /// many physical units free between the canvas edge and both the outermost glyph and
    /// the data extent as it stood after relative expansion.
    pub fn train(
        &self,
        x: &mut Axis,
        y: &mut Axis,
        canvas: Rect,
        boxers: &[&dyn GlyphBoxer],
    ) -> AutoscaleReport {
        let x_before = (x.min, x.max);
        let y_before = (y.min, y.max);

        x.sanitize_range();
        y.sanitize_range();
        x.apply_relative_expansion();
        y.apply_relative_expansion();

        let canvas = DataCanvas::new(canvas);
        let (dx, dy) = (x.expansion.absolute.max(0.0), y.expansion.absolute.max(0.0));
        let extent = [(x.min, y.min), (x.max, y.max)];

        let overshoot = |x: &Axis, y: &Axis| {
            let boxes: Vec<GlyphBox> = boxers
                .iter()
                .flat_map(|b| b.glyph_boxes(x, y))
                .chain(margin_sentinels(x, y, &extent, dx, dy))
                .collect();
            let extremes = Extremes::find(&canvas, &boxes, dx, dy);
            (extremes.overshoot(&canvas), extremes)
        };

        let mut iterations = 0;
        let mut converged = false;
        if canvas.is_drawable() {
            while iterations < self.max_iterations {
                let (over, extremes) = overshoot(&*x, &*y);
                if over <= self.tolerance {
                    converged = true;
                    break;
                }
                apply(x, y, &canvas, &extremes);
                iterations += 1;
            }
            if !converged {
                // The last pass may have settled the layout.
                converged = overshoot(&*x, &*y).0 <= self.tolerance;
            }
        }

        let report = AutoscaleReport {
            iterations,
            converged,
            x: RangeChange {
                before: x_before,
                after: (x.min, x.max),
            },
            y: RangeChange {
                before: y_before,
                after: (y.min, y.max),
            },
        };
        if report.x.changed() {
            log::debug!(
                "expanded x range from {:.4} - {:.4} to {:.4} - {:.4}",
                x_before.0,
                x_before.1,
                x.min,
                x.max
            );
        }
        if report.y.changed() {
            log::debug!(
                "expanded y range from {:.4} - {:.4} to {:.4} - {:.4}",
                y_before.0,
                y_before.1,
                y.min,
                y.max
            );
        }
        if !report.converged {
            log::debug!(
                "autoscale stopped after {} passes without fitting all glyphs",
                report.iterations
            );
        }
        report
    }
}

/// Boxes standing in for the data extent, so the absolute margin applies even where no
/// glyph reaches the edge. They are only produced for axes with a margin.
fn margin_sentinels(
    x: &Axis,
    y: &Axis,
    extent: &[(f64, f64); 2],
    dx: f64,
    dy: f64,
) -> impl Iterator<Item = GlyphBox> {
    // A hair of size keeps the boxes from being dropped as degenerate.
    const HAIR: f64 = 1.0e-12;
    let [(x_min, y_min), (x_max, y_max)] = *extent;
    let mut out: [Option<GlyphBox>; 4] = [None; 4];
    if dx > 0.0 {
        for (slot, v) in out[..2].iter_mut().zip([x_min, x_max]) {
            *slot = Some(GlyphBox {
                x: x.norm(v),
                y: 0.5,
                rect: Rect::new(-HAIR, 0.0, HAIR, 0.0),
            });
        }
    }
    if dy > 0.0 {
        for (slot, v) in out[2..].iter_mut().zip([y_min, y_max]) {
            *slot = Some(GlyphBox {
                x: 0.5,
                y: y.norm(v),
                rect: Rect::new(0.0, -HAIR, 0.0, HAIR),
            });
        }
    }
    out.into_iter().flatten()
}

/// Moves each axis end to the value currently shown at the overshooting edge.
fn apply(x: &mut Axis, y: &mut Axis, canvas: &DataCanvas, e: &Extremes) {
    let (mut x_min, mut x_max) = (x.min, x.max);
    let (mut y_min, mut y_max) = (y.min, y.max);
    if let Some(px) = e.left {
        x_min = x.inv_norm(canvas.norm_x(px));
    }
    if let Some(px) = e.right {
        x_max = x.inv_norm(canvas.norm_x(px));
    }
    if let Some(py) = e.bottom {
        y_min = y.inv_norm(canvas.norm_y(py));
    }
    if let Some(py) = e.top {
        y_max = y.inv_norm(canvas.norm_y(py));
    }
    (x.min, x.max) = (x_min, x_max);
    (y.min, y.max) = (y_min, y_max);
}
