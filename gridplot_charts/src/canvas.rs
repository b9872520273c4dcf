// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data area of a plot and the normalized ↔ physical transforms over it.

use kurbo::{Point, Rect};

/// A rectangle in physical units that data is drawn into.
///
/// Normalized axis positions run from 0 to 1 across the rectangle. Horizontally 0 is the
/// left edge; vertically 0 is the *bottom* edge (`rect.y1`), since physical coordinates
/// grow downward while data values grow upward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataCanvas {
    /// The rectangle in physical units.
    pub rect: Rect,
}

impl DataCanvas {
    /// Creates a canvas over `rect`.
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Physical x of a normalized horizontal position.
    pub fn x(&self, t: f64) -> f64 {
        self.rect.x0 + t * self.rect.width()
    }

    /// Physical y of a normalized vertical position.
    pub fn y(&self, t: f64) -> f64 {
        self.rect.y1 - t * self.rect.height()
    }

    /// Physical point of a normalized position.
    pub fn point(&self, tx: f64, ty: f64) -> Point {
        Point::new(self.x(tx), self.y(ty))
    }

    /// Normalized horizontal position of a physical x. Inverse of [`DataCanvas::x`].
    pub fn norm_x(&self, x: f64) -> f64 {
        let w = self.rect.width();
        if w == 0.0 {
            return 0.0;
        }
        (x - self.rect.x0) / w
    }

    /// Normalized vertical position of a physical y. Inverse of [`DataCanvas::y`].
    pub fn norm_y(&self, y: f64) -> f64 {
        let h = self.rect.height();
        if h == 0.0 {
            return 0.0;
        }
        (self.rect.y1 - y) / h
    }

    /// Whether the canvas has a positive area.
    pub fn is_drawable(&self) -> bool {
        self.rect.width() > 0.0 && self.rect.height() > 0.0
    }

    /// Returns the canvas shrunk by the given amount on each side.
    pub fn crop(&self, left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self::new(Rect::new(
            self.rect.x0 + left,
            self.rect.y0 + top,
            self.rect.x1 - right,
            self.rect.y1 - bottom,
        ))
    }
}

impl From<Rect> for DataCanvas {
    fn from(rect: Rect) -> Self {
        Self::new(rect)
    }
}
