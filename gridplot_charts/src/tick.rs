// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick markers: strategies that turn an axis range into labelled positions.
//!
//! Every axis owns one [`TickMarker`]. Layout and drawing only ever call
//! [`TickMarker::ticks`], so numeric, nominal and calendar axes are handled uniformly:
//! - [`DefaultTicks`]: "nice" 1/2/5 × 10ⁿ steps with minor subdivisions.
//! - [`ConstantTicks`]: a fixed list (nominal axes, hidden axes).
//! - [`CalendarTicks`](crate::CalendarTicks): calendar-aligned ticks for date/time axes.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use chrono::{DateTime, FixedOffset};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::format::format_tick_with_step;

/// One position on an axis. Ticks without a label are minor ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Position in axis (data) coordinates.
    pub value: f64,
    /// Label text; empty for minor ticks. May contain `\n`.
    pub label: String,
}

impl Tick {
    /// A labelled (major) tick.
    pub fn major(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }

    /// An unlabelled (minor) tick.
    pub fn minor(value: f64) -> Self {
        Self {
            value,
            label: String::new(),
        }
    }

    /// Whether this is a minor tick.
    pub fn is_minor(&self) -> bool {
        self.label.is_empty()
    }
}

/// The view of an axis a tick marker works from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickRange {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
    /// The instant axis value `0.0` corresponds to, for calendar markers.
    pub reference_time: DateTime<FixedOffset>,
}

/// A strategy producing the ticks for an axis range.
pub trait TickMarker: fmt::Debug {
    /// Returns the ticks for `range`, computed fresh on every call.
    fn ticks(&self, range: &TickRange) -> Vec<Tick>;
}

/// Evenly spaced ticks at "nice" steps (1, 2 or 5 × 10ⁿ) with minor ticks in between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefaultTicks {
    /// Approximate number of major ticks.
    pub count: usize,
}

impl DefaultTicks {
    /// Ticks aiming for `count` majors.
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl Default for DefaultTicks {
    fn default() -> Self {
        Self::new(5)
    }
}

impl TickMarker for DefaultTicks {
    fn ticks(&self, range: &TickRange) -> Vec<Tick> {
        let (min, max) = (range.min, range.max);
        if self.count == 0 || !min.is_finite() || !max.is_finite() || min > max {
            return Vec::new();
        }
        if min == max {
            return alloc::vec![Tick::major(min, format_tick_with_step(min, 0.0))];
        }

        let (step, subdivisions) = nice_step(span_per_tick(max - min, self.count));
        if step == 0.0 {
            return Vec::new();
        }
        let minor_step = step / subdivisions as f64;

        // Slack keeps ticks that sit on a bound despite rounding in the division.
        let first = (min / minor_step - 1.0e-9).ceil();
        let last = (max / minor_step + 1.0e-9).floor();
        let n = bounded_count(last - first);

        let mut out = Vec::with_capacity(n + 1);
        for i in 0..=n {
            let k = first + i as f64;
            let v = (k * minor_step).clamp(min, max);
            let is_major = (k / subdivisions as f64).round() * subdivisions as f64 == k;
            if is_major {
                out.push(Tick::major(v, format_tick_with_step(v, step)));
            } else {
                out.push(Tick::minor(v));
            }
        }
        out
    }
}

fn span_per_tick(span: f64, count: usize) -> f64 {
    span / count.max(1) as f64
}

/// Rounds `step` to 1, 2 or 5 × 10ⁿ and returns it with its minor subdivision count.
fn nice_step(step: f64) -> (f64, usize) {
    if !step.is_finite() || step <= 0.0 {
        return (0.0, 1);
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    if error >= 7.5 {
        (10.0 * base, 5)
    } else if error >= 3.5 {
        (5.0 * base, 5)
    } else if error >= 1.5 {
        (2.0 * base, 4)
    } else {
        (base, 5)
    }
}

fn bounded_count(n_f: f64) -> usize {
    if !n_f.is_finite() || n_f < 0.0 {
        return 0;
    }
    let n_f = n_f.min(10_000.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "guarded by finite/non-negative checks and capped at 10k"
    )]
    {
        n_f as usize
    }
}

/// A fixed list of ticks, returned as is regardless of the axis range.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstantTicks(pub Vec<Tick>);

impl ConstantTicks {
    /// No ticks at all (used for hidden axes).
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// One labelled tick per name, at `0, 1, 2, …` (used for nominal axes).
    pub fn nominal<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self(
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| Tick::major(i as f64, name))
                .collect(),
        )
    }
}

impl TickMarker for ConstantTicks {
    fn ticks(&self, _range: &TickRange) -> Vec<Tick> {
        self.0.clone()
    }
}
