// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph boxes and data ranges: what plotted series report to the layout pass.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;

use crate::axis::Axis;
use crate::canvas::DataCanvas;

/// The location of a glyph and the physical extent of its bounding box.
///
/// A box with a non-positive width is ignored when computing horizontal padding, and one
/// with a non-positive height when computing vertical padding. Bars, for example, can
/// report zero height so they are padded sideways but may run off the top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphBox {
    /// Normalized horizontal position of the glyph anchor.
    pub x: f64,
    /// Normalized vertical position of the glyph anchor.
    pub y: f64,
    /// Offset of the box's minimum corner from the anchor, and its size, in physical units.
    ///
    /// Physical y grows downward, so `rect.y0` is the top edge of the glyph.
    pub rect: Rect,
}

impl GlyphBox {
    /// A box centered on `(x, y)` with the given physical size.
    pub fn centered(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            rect: Rect::new(-0.5 * width, -0.5 * height, 0.5 * width, 0.5 * height),
        }
    }

    /// Whether the box takes part in horizontal padding.
    pub fn pads_horizontally(&self) -> bool {
        self.rect.width() > 0.0 && (0.0..=1.0).contains(&self.x)
    }

    /// Whether the box takes part in vertical padding.
    pub fn pads_vertically(&self) -> bool {
        self.rect.height() > 0.0 && (0.0..=1.0).contains(&self.y)
    }

    /// Whether the box refers to a visible point for every dimension it has an extent in.
    pub fn is_visible(&self) -> bool {
        (self.rect.width() <= 0.0 || (0.0..=1.0).contains(&self.x))
            && (self.rect.height() <= 0.0 || (0.0..=1.0).contains(&self.y))
    }

    /// The box placed on `canvas`, in physical units.
    pub fn placed(&self, canvas: &DataCanvas) -> Rect {
        self.rect + canvas.point(self.x, self.y).to_vec2()
    }
}

/// Series that draw glyphs which must not be clipped at the canvas edge.
pub trait GlyphBoxer {
    /// Returns the glyph boxes for the current axis ranges.
    fn glyph_boxes(&self, x: &Axis, y: &Axis) -> Vec<GlyphBox>;
}

/// The extent of a series in data coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataRange {
    /// Smallest x value.
    pub x_min: f64,
    /// Largest x value.
    pub x_max: f64,
    /// Smallest y value.
    pub y_min: f64,
    /// Largest y value.
    pub y_max: f64,
}

impl DataRange {
    /// The bounding range of `points`, ignoring non-finite coordinates.
    ///
    /// Returns `None` if no point has both coordinates finite.
    pub fn of_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        points
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .fold(None, |acc: Option<Self>, (x, y)| {
                Some(match acc {
                    None => Self {
                        x_min: x,
                        x_max: x,
                        y_min: y,
                        y_max: y,
                    },
                    Some(r) => Self {
                        x_min: r.x_min.min(x),
                        x_max: r.x_max.max(x),
                        y_min: r.y_min.min(y),
                        y_max: r.y_max.max(y),
                    },
                })
            })
    }
}

/// Series with a data extent that the axes should cover.
pub trait DataRanger {
    /// Returns the series extent, or `None` if it has no finite data.
    fn data_range(&self) -> Option<DataRange>;
}

/// The boxes sticking out furthest past each canvas edge, with the physical position of
/// that edge. A direction is `None` when nothing crosses it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Extremes {
    pub(crate) left: Option<f64>,
    pub(crate) right: Option<f64>,
    pub(crate) top: Option<f64>,
    pub(crate) bottom: Option<f64>,
}

impl Extremes {
    /// Finds the extremal box edges of `boxes` on `canvas`, each pushed outward by the
    /// absolute margins `dx` and `dy`.
    pub(crate) fn find(canvas: &DataCanvas, boxes: &[GlyphBox], dx: f64, dy: f64) -> Self {
        let c = canvas.rect;
        let mut out = Self::default();
        for b in boxes {
            if b.pads_horizontally() {
                let x = canvas.x(b.x);
                let left = x + b.rect.x0 - dx;
                if left < out.left.unwrap_or(c.x0) {
                    out.left = Some(left);
                }
                let right = x + b.rect.x1 + dx;
                if right > out.right.unwrap_or(c.x1) {
                    out.right = Some(right);
                }
            }
            if b.pads_vertically() {
                let y = canvas.y(b.y);
                let top = y + b.rect.y0 - dy;
                if top < out.top.unwrap_or(c.y0) {
                    out.top = Some(top);
                }
                let bottom = y + b.rect.y1 + dy;
                if bottom > out.bottom.unwrap_or(c.y1) {
                    out.bottom = Some(bottom);
                }
            }
        }
        out
    }

    /// The largest distance any edge sticks out past the canvas.
    pub(crate) fn overshoot(&self, canvas: &DataCanvas) -> f64 {
        let c = canvas.rect;
        [
            self.left.map(|x| c.x0 - x),
            self.right.map(|x| x - c.x1),
            self.top.map(|y| c.y0 - y),
            self.bottom.map(|y| y - c.y1),
        ]
        .into_iter()
        .flatten()
        .fold(0.0, f64::max)
    }
}
