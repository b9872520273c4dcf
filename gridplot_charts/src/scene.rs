// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer-neutral drawing primitives.
//!
//! Plots and plotters do not draw directly; they push [`Primitive`]s into a [`Scene`] tagged
//! with a z-index (see [`crate::z_order`]). A backend (SVG writer, vello, a canvas widget)
//! walks [`Scene::sorted`] and paints each primitive. Coordinates are physical units with
//! the y axis pointing down, the same convention as `kurbo`.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Circle, Line, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

/// A paint + width pair for stroked lines (axis lines, ticks, gridlines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in physical units.
    pub width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, width: f64) -> Self {
        Self {
            brush: brush.into(),
            width,
        }
    }

    /// Whether strokes drawn with this style are visible at all.
    pub fn is_visible(&self) -> bool {
        self.width > 0.0
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Horizontal text alignment relative to the text origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// The origin is at the start of the text.
    Start,
    /// The origin is at the horizontal center of the text.
    Middle,
    /// The origin is at the end of the text.
    End,
}

/// Vertical text alignment relative to the text origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    /// The origin is at the top of the first line.
    Hanging,
    /// The origin is at the vertical middle of the text block.
    Middle,
    /// The origin is at the alphabetic baseline of the last line.
    Alphabetic,
}

/// An unshaped text run. Embedded `\n` separate lines.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPrimitive {
    /// Anchor point.
    pub origin: Point,
    /// The text, possibly multi-line.
    pub text: String,
    /// Font size in physical units.
    pub font_size: f64,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Clockwise rotation around `origin`, in degrees.
    pub angle: f64,
    /// Fill paint.
    pub fill: Brush,
}

/// One drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// A filled rectangle.
    FillRect {
        /// The rectangle.
        rect: Rect,
        /// Fill paint.
        fill: Brush,
    },
    /// A stroked rectangle outline.
    StrokeRect {
        /// The rectangle.
        rect: Rect,
        /// Outline style.
        stroke: StrokeStyle,
    },
    /// A stroked line segment.
    Line {
        /// The segment.
        line: Line,
        /// Line style.
        stroke: StrokeStyle,
    },
    /// A filled circle.
    Circle {
        /// The circle.
        circle: Circle,
        /// Fill paint.
        fill: Brush,
    },
    /// A text run.
    Text(TextPrimitive),
}

impl Primitive {
    /// Returns a conservative bounding box, if the primitive has a geometric extent.
    ///
    /// Text has no metrics at this level and returns `None`.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::FillRect { rect, .. } => Some(*rect),
            Self::StrokeRect { rect, stroke } => Some(rect.inflate(stroke.width, stroke.width)),
            Self::Line { line, stroke } => {
                let r = Rect::from_points(line.p0, line.p1);
                Some(r.inflate(stroke.width * 0.5, stroke.width * 0.5))
            }
            Self::Circle { circle, .. } => Some(Rect::from_center_size(
                circle.center,
                (2.0 * circle.radius, 2.0 * circle.radius),
            )),
            Self::Text(_) => None,
        }
    }
}

impl From<TextPrimitive> for Primitive {
    fn from(text: TextPrimitive) -> Self {
        Self::Text(text)
    }
}

/// An ordered collection of primitives with z-indexes.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    items: Vec<(i32, Primitive)>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a primitive at `z_index`.
    pub fn push(&mut self, z_index: i32, primitive: Primitive) {
        self.items.push((z_index, primitive));
    }

    /// Appends a stroked line if the style is visible.
    pub fn line(
        &mut self,
        z_index: i32,
        from: impl Into<Point>,
        to: impl Into<Point>,
        stroke: &StrokeStyle,
    ) {
        if !stroke.is_visible() {
            return;
        }
        self.push(
            z_index,
            Primitive::Line {
                line: Line::new(from, to),
                stroke: stroke.clone(),
            },
        );
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the scene has no primitives.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Primitives in insertion order, with their z-index.
    pub fn items(&self) -> &[(i32, Primitive)] {
        &self.items
    }

    /// Primitives in paint order: ascending z-index, insertion order within a layer.
    pub fn sorted(&self) -> Vec<&Primitive> {
        let mut refs: Vec<&(i32, Primitive)> = self.items.iter().collect();
        refs.sort_by_key(|(z, _)| *z);
        refs.into_iter().map(|(_, p)| p).collect()
    }

    /// Iterates over the text primitives.
    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.items.iter().filter_map(|(_, p)| match p {
            Primitive::Text(t) => Some(t),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn sorted_is_stable_within_a_layer() {
        let mut scene = Scene::new();
        let red = Brush::Solid(css::RED);
        let blue = Brush::Solid(css::BLUE);
        scene.push(
            5,
            Primitive::FillRect {
                rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                fill: red.clone(),
            },
        );
        scene.push(
            -1,
            Primitive::FillRect {
                rect: Rect::new(0.0, 0.0, 2.0, 2.0),
                fill: blue,
            },
        );
        scene.push(
            5,
            Primitive::FillRect {
                rect: Rect::new(0.0, 0.0, 3.0, 3.0),
                fill: red,
            },
        );
        let widths: Vec<f64> = scene
            .sorted()
            .iter()
            .filter_map(|p| p.bounds())
            .map(|r| r.width())
            .collect();
        assert_eq!(widths, alloc::vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn invisible_strokes_are_skipped() {
        let mut scene = Scene::new();
        scene.line(0, (0.0, 0.0), (1.0, 1.0), &StrokeStyle::solid(css::BLACK, 0.0));
        assert!(scene.is_empty());
        scene.line(0, (0.0, 0.0), (1.0, 1.0), &StrokeStyle::default());
        assert_eq!(scene.len(), 1);
    }
}
