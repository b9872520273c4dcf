// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Demos for `gridplot_charts`: date/time axes and glyph-aware autoscaling.
//!
//! Writes one SVG file per demo into the directory given as the first argument
//! (`gridplot_demo_out` by default). Autoscaling progress is logged to stderr.

mod svg;

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use gridplot_charts::{
    Axis, Bounds, CalendarTicks, Constraint, Grid, HeuristicTextMeasurer, Plot, Scatter,
    StrokeStyle,
};
use kurbo::Rect;
use peniko::color::palette::css;
use peniko::{Brush, Color};

/// Eight by six inches at 72 units per inch.
const AREA: Rect = Rect::new(0.0, 0.0, 576.0, 432.0);

fn main() -> Result<(), Box<dyn Error>> {
    setup_logger()?;

    let out_dir = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from("gridplot_demo_out"), PathBuf::from);
    std::fs::create_dir_all(&out_dir)?;

    for max_ticks in [3, 5, 8] {
        write_plot(
            &out_dir,
            &format!("datetime-{max_ticks}.svg"),
            datetime_demo(max_ticks)?,
        )?;
    }
    write_plot(&out_dir, "margins.svg", margins_demo())?;
    write_plot(&out_dir, "large-glyphs.svg", large_glyphs_demo())?;
    Ok(())
}

fn setup_logger() -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ));
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stderr())
        .apply()
}

/// A finished demo: the plot plus an optional overlay of its glyph boxes.
struct Demo {
    plot: Plot,
    show_glyph_boxes: bool,
}

fn write_plot(dir: &Path, name: &str, demo: Demo) -> std::io::Result<()> {
    let Demo {
        mut plot,
        show_glyph_boxes,
    } = demo;
    let measurer = HeuristicTextMeasurer;
    let (mut scene, layout) = plot.draw_with_layout(AREA, &measurer);
    if show_glyph_boxes {
        plot.draw_glyph_boxes(&layout.data, &mut scene);
    }
    let path = dir.join(name);
    std::fs::write(&path, svg::to_svg_string(&scene, AREA))?;
    log::info!("wrote {} ({} primitives)", path.display(), scene.len());
    Ok(())
}

fn demo_background() -> Option<Brush> {
    Some(Brush::Solid(Color::from_rgb8(0xdd, 0xdd, 0xdd)))
}

fn white_grid() -> Grid {
    let line = StrokeStyle::solid(css::WHITE, 2.0);
    Grid {
        vertical: line.clone(),
        horizontal: line,
        ..Grid::new()
    }
    .with_background(None)
}

fn utc(
    (year, month, day): (i32, u32, u32),
    (hour, min, sec): (u32, u32, u32),
) -> Result<DateTime<Utc>, Box<dyn Error>> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .ok_or_else(|| format!("invalid date {year}-{month}-{day} {hour}:{min}:{sec}").into())
}

/// Start and end instants on two calendar axes sharing a reference time.
fn datetime_demo(max_ticks: usize) -> Result<Demo, Box<dyn Error>> {
    let reference = utc((2003, 5, 11), (23, 11, 9))?;
    let ticks = CalendarTicks::new().with_max_ticks(max_ticks);
    let x = Axis::new()
        .with_label("Start")
        .with_reference_time(reference)
        .with_tick_marker(ticks.clone());
    let y = Axis::new()
        .with_label("End")
        .with_reference_time(reference)
        .with_tick_marker(ticks);

    let pairs = [
        (((2003, 5, 12), (8, 45, 17)), ((2002, 2, 12), (0, 4, 17))),
        (((2003, 5, 12), (16, 0, 39)), ((2003, 4, 28), (12, 5, 3))),
        (((2003, 5, 11), (23, 11, 9)), ((2004, 10, 3), (8, 45, 55))),
        (((2003, 5, 12), (19, 54, 42)), ((2005, 12, 20), (23, 9, 1))),
    ];
    let mut points = Vec::with_capacity(pairs.len());
    for ((start_date, start_time), (end_date, end_time)) in pairs {
        let start = utc(start_date, start_time)?;
        let end = utc(end_date, end_time)?;
        points.push((x.time_to_float(&start), y.time_to_float(&end)));
    }

    let mut plot = Plot::new()
        .with_title(format!("Date/Time-Axis (at most {max_ticks} ticks)"))
        .with_axes(x, y);
    plot.background = demo_background();
    plot.add(white_grid());
    plot.add(Scatter::new(points));
    Ok(Demo {
        plot,
        show_glyph_boxes: false,
    })
}

/// Spread-out points with a relative and an absolute margin on both axes.
fn margins_demo() -> Demo {
    let points = (0..25).map(|i| {
        let t = f64::from(i);
        let x = (t * 0.618_034).fract() * 100.0 - 50.0;
        let y = (t * 0.414_214).fract() / 10.0 + 4.0;
        (x, y)
    });

    let x = Axis::new()
        .with_label("X")
        .with_expansion(0.05, 10.0)
        .with_constraint(Constraint {
            min: Bounds {
                lower: Some(-35.0),
                higher: Some(-25.0),
            },
            ..Constraint::default()
        });
    let y = Axis::new()
        .with_label("Y")
        .with_expansion(0.0, 20.0)
        .with_constraint(Constraint {
            min: Bounds {
                lower: Some(3.8),
                ..Bounds::default()
            },
            max: Bounds {
                higher: Some(4.1),
                ..Bounds::default()
            },
        });

    let mut plot = Plot::new().with_title("Margin Autoscaling").with_axes(x, y);
    plot.background = demo_background();
    plot.add(white_grid());
    plot.add(Scatter::new(points).with_fill(css::STEEL_BLUE));
    Demo {
        plot,
        show_glyph_boxes: false,
    }
}

/// Glyphs big enough that the data area must shrink noticeably around them.
fn large_glyphs_demo() -> Demo {
    let mut plot = Plot::new().with_title("Glyph Boxes");
    plot.add(Grid::new());
    plot.add(
        Scatter::new([(0.0, 0.0), (1.0, 3.0), (2.0, 1.0), (3.0, 4.0)])
            .with_radius(24.0)
            .with_fill(Color::from_rgba8(0x46, 0x82, 0xb4, 0x99)),
    );
    Demo {
        plot,
        show_glyph_boxes: true,
    }
}
