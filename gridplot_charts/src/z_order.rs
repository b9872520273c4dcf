// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for plot-generated primitives.
//!
//! [`Scene`](crate::Scene) primitives carry an explicit z-index. The plot layer sets these
//! consistently so plotters don't have to hand-tune paint order. Renderers should sort by
//! z-index and keep insertion order within a layer (see [`Scene::sorted`](crate::Scene::sorted)).

/// Whole-plot background fill.
pub const PLOT_BACKGROUND: i32 = -100;
/// Data-area background fill (e.g. drawn by a grid).
pub const DATA_BACKGROUND: i32 = -90;
/// Minor gridlines.
pub const MINOR_GRID_LINES: i32 = -60;
/// Major gridlines, drawn over minor ones.
pub const GRID_LINES: i32 = -50;

/// Point series glyphs.
pub const SERIES_POINTS: i32 = 20;

/// Axis lines and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis titles.
pub const AXIS_TITLES: i32 = 50;

/// Plot title.
pub const TITLES: i32 = 80;
/// Debug overlays such as glyph box outlines.
pub const DEBUG_OVERLAY: i32 = 100;
