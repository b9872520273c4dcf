// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plot layout with glyph-aware autoscaling and calendar-aware date/time axes.
//!
//! A [`Plot`] owns two [`Axis`] values and a list of [`Plotter`] series:
//! - **Tick markers** turn an axis range into labelled positions. Numeric axes use
//!   [`DefaultTicks`]; date/time axes use [`CalendarTicks`], which picks a calendar interval
//!   from `gridplot_time` and walks it in the axis's reference time zone.
//! - **Autoscaling** ([`Autoscale`]) widens both axes until every glyph reported by a
//!   [`GlyphBoxer`] fits inside the data area.
//! - Drawing produces a [`Scene`]: a flat list of z-ordered primitives that a renderer
//!   paints in [`Scene::sorted`] order.
//!
//! Text shaping is out of scope. Layout measures text through a [`TextMeasurer`], and text
//! primitives carry unshaped strings.

#![no_std]

extern crate alloc;

mod autoscale;
#[cfg(test)]
mod autoscale_tests;
mod axis;
mod canvas;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod glyph;
mod grid;
mod measure;
mod plot;
mod scatter;
mod scene;
mod tick;
mod time;
mod z_order;

pub use autoscale::{
    Autoscale, AutoscaleReport, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, RangeChange,
};
pub use axis::{Axis, AxisScale, AxisStyle, Bounds, Constraint, Expansion};
pub use canvas::DataCanvas;
pub use glyph::{DataRange, DataRanger, GlyphBox, GlyphBoxer};
pub use grid::Grid;
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use plot::{Plot, PlotLayout, Plotter};
pub use scatter::Scatter;
pub use scene::{Primitive, Scene, StrokeStyle, TextAnchor, TextBaseline, TextPrimitive};
pub use tick::{ConstantTicks, DefaultTicks, Tick, TickMarker, TickRange};
pub use time::{CalendarTickIter, CalendarTicks, DEFAULT_MAX_TICKS, instant_at, seconds_since};
pub use z_order::*;
