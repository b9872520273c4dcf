// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG output for `gridplot_demo`.

use std::fmt::Write as _;

use gridplot_charts::{Primitive, Scene, StrokeStyle, TextAnchor, TextBaseline, TextPrimitive};
use kurbo::Rect;
use peniko::Brush;

/// Renders `scene` in paint order into an SVG document covering `view_box`.
pub(crate) fn to_svg_string(scene: &Scene, view_box: Rect) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}" font-family="sans-serif">"#,
        view_box.x0,
        view_box.y0,
        view_box.width(),
        view_box.height(),
        view_box.width(),
        view_box.height()
    );

    for primitive in scene.sorted() {
        match primitive {
            Primitive::FillRect { rect, fill } => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height()
                );
                write_paint_attr(&mut out, "fill", fill);
                out.push_str("/>\n");
            }
            Primitive::StrokeRect { rect, stroke } => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none""#,
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height()
                );
                write_stroke_attrs(&mut out, stroke);
                out.push_str("/>\n");
            }
            Primitive::Line { line, stroke } => {
                let _ = write!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                    line.p0.x, line.p0.y, line.p1.x, line.p1.y
                );
                write_stroke_attrs(&mut out, stroke);
                out.push_str("/>\n");
            }
            Primitive::Circle { circle, fill } => {
                let _ = write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}""#,
                    circle.center.x, circle.center.y, circle.radius
                );
                write_paint_attr(&mut out, "fill", fill);
                out.push_str("/>\n");
            }
            Primitive::Text(t) => write_text(&mut out, t),
        }
    }

    out.push_str("</svg>\n");
    out
}

fn write_text(out: &mut String, t: &TextPrimitive) {
    let lines: Vec<&str> = t.text.split('\n').collect();
    // SVG positions multi-line text by its first line; shift it up to honour the baseline.
    let first_dy = match t.baseline {
        TextBaseline::Hanging => 0.0,
        TextBaseline::Middle => -0.5 * (lines.len() - 1) as f64,
        TextBaseline::Alphabetic => -((lines.len() - 1) as f64),
    };
    let baseline = match t.baseline {
        TextBaseline::Hanging => "hanging",
        TextBaseline::Middle => "middle",
        TextBaseline::Alphabetic => "alphabetic",
    };
    let anchor = match t.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{baseline}" text-anchor="{anchor}""#,
        t.origin.x, t.origin.y, t.font_size
    );
    if t.angle != 0.0 {
        let _ = write!(
            out,
            r#" transform="rotate({} {} {})""#,
            t.angle, t.origin.x, t.origin.y
        );
    }
    write_paint_attr(out, "fill", &t.fill);
    out.push('>');
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { first_dy } else { 1.0 };
        let _ = write!(
            out,
            r#"<tspan x="{}" dy="{dy}em">{}</tspan>"#,
            t.origin.x,
            escape_xml(line)
        );
    }
    out.push_str("</text>\n");
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn write_stroke_attrs(out: &mut String, stroke: &StrokeStyle) {
    write_paint_attr(out, "stroke", &stroke.brush);
    let _ = write!(out, r#" stroke-width="{}""#, stroke.width);
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use gridplot_charts::SERIES_POINTS;
    use kurbo::{Circle, Point};
    use peniko::color::palette::css;

    #[test]
    fn multi_line_labels_become_tspans() {
        let mut scene = Scene::new();
        scene.push(
            0,
            TextPrimitive {
                origin: Point::new(10.0, 20.0),
                text: "00h\n12 May <2003>".to_string(),
                font_size: 10.0,
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Hanging,
                angle: 0.0,
                fill: Brush::Solid(css::BLACK),
            }
            .into(),
        );
        let svg = to_svg_string(&scene, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert!(svg.contains(r#"<tspan x="10" dy="0em">00h</tspan>"#), "{svg}");
        assert!(svg.contains("12 May &lt;2003&gt;"), "{svg}");
    }

    #[test]
    fn primitives_are_written_in_paint_order() {
        let mut scene = Scene::new();
        scene.push(
            SERIES_POINTS,
            Primitive::Circle {
                circle: Circle::new((5.0, 5.0), 2.0),
                fill: Brush::Solid(css::RED),
            },
        );
        scene.push(
            gridplot_charts::PLOT_BACKGROUND,
            Primitive::FillRect {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                fill: Brush::Solid(css::WHITE),
            },
        );
        let svg = to_svg_string(&scene, Rect::new(0.0, 0.0, 10.0, 10.0));
        let rect = svg.find("<rect").expect("background");
        let circle = svg.find("<circle").expect("point");
        assert!(rect < circle, "{svg}");
        assert!(svg.contains(r##"fill="#ff0000""##), "{svg}");
    }
}
