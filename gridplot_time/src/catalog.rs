// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered table of candidate tick spacings and the lookup over it.

extern crate alloc;

use alloc::vec::Vec;

use crate::CatalogError;
use crate::TimeDelta;
use crate::delta::Rounding;

const TIME: &str = "%H:%M:%S";
const MINUTES: &str = "%H:%M";
const HOURS: &str = "%Hh";
const DATE: &str = "%-d %b %Y";
const DAY: &str = "%d.%m.";
const MONTH: &str = "%b %Y";
const YEAR: &str = "%Y";

/// `(count, rounding, label format, first-tick format, minor subdivisions)`, finest first.
const DEFAULT_DELTAS: &[(u32, Rounding, &str, Option<&str>, u32)] = &[
    (1, Rounding::Second, TIME, Some(DATE), 2),
    (2, Rounding::Second, TIME, Some(DATE), 2),
    (5, Rounding::Second, TIME, Some(DATE), 5),
    (10, Rounding::Second, TIME, Some(DATE), 2),
    (20, Rounding::Second, TIME, Some(DATE), 4),
    (30, Rounding::Second, TIME, Some(DATE), 3),
    (1, Rounding::Minute, MINUTES, Some(DATE), 4),
    (2, Rounding::Minute, MINUTES, Some(DATE), 4),
    (5, Rounding::Minute, MINUTES, Some(DATE), 5),
    (10, Rounding::Minute, MINUTES, Some(DATE), 2),
    (15, Rounding::Minute, MINUTES, Some(DATE), 3),
    (20, Rounding::Minute, MINUTES, Some(DATE), 4),
    (30, Rounding::Minute, MINUTES, Some(DATE), 3),
    (1, Rounding::Hour, HOURS, Some(DATE), 4),
    (2, Rounding::Hour, HOURS, Some(DATE), 4),
    (3, Rounding::Hour, HOURS, Some(DATE), 3),
    (4, Rounding::Hour, HOURS, Some(DATE), 4),
    (6, Rounding::Hour, HOURS, Some(DATE), 3),
    (12, Rounding::Hour, "%H:%M:00", Some(DATE), 3),
    (1, Rounding::Day, DAY, Some(YEAR), 4),
    (1, Rounding::Month, MONTH, None, 2),
    (2, Rounding::Month, MONTH, None, 2),
    (3, Rounding::Month, MONTH, None, 3),
    (6, Rounding::Month, MONTH, None, 3),
    (1, Rounding::Year, YEAR, None, 4),
    (2, Rounding::Year, YEAR, None, 2),
    (5, Rounding::Year, YEAR, None, 5),
    (10, Rounding::Year, YEAR, None, 2),
    (20, Rounding::Year, YEAR, None, 4),
    (50, Rounding::Year, YEAR, None, 5),
    (100, Rounding::Year, YEAR, None, 4),
];

/// A non-empty list of [`TimeDelta`]s ordered by ascending span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeltaCatalog {
    deltas: Vec<TimeDelta>,
}

/// The result of [`DeltaCatalog::suitable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeltaSelection {
    /// The chosen spacing.
    pub delta: TimeDelta,
    /// Number of whole spans covered by the requested range.
    pub ticks: usize,
    /// Set when no catalog entry fit the budget and a coarser spacing was synthesized.
    pub fallback: bool,
}

impl DeltaCatalog {
    /// Builds a catalog from deltas ordered finest first.
    ///
    /// Deltas may share a span, but none may span less than its predecessor.
    pub fn new(deltas: Vec<TimeDelta>) -> Result<Self, CatalogError> {
        if deltas.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, pair) in deltas.windows(2).enumerate() {
            if pair[1].span_seconds() < pair[0].span_seconds() {
                return Err(CatalogError::NotAscending { index: index + 1 });
            }
        }
        Ok(Self { deltas })
    }

    /// Returns the catalog entries, finest first.
    pub fn deltas(&self) -> &[TimeDelta] {
        &self.deltas
    }

    /// Returns the finest entry.
    pub fn finest(&self) -> &TimeDelta {
        &self.deltas[0]
    }

    /// Returns the coarsest entry.
    pub fn coarsest(&self) -> &TimeDelta {
        &self.deltas[self.deltas.len() - 1]
    }

    /// Picks the finest delta such that `max_ticks` spans of it cover `range` seconds.
    ///
    /// A zero, negative or NaN range selects the finest entry. If even the coarsest entry is
    /// too fine, its count is multiplied up until the budget holds again and the selection is
    /// flagged as a fallback; for an infinite range the coarsest entry is returned as is with
    /// an estimate of two ticks.
    pub fn suitable(&self, range: f64, max_ticks: usize) -> DeltaSelection {
        let budget = max_ticks.max(1) as f64;
        if range.is_nan() || range <= 0.0 {
            return DeltaSelection {
                delta: self.finest().clone(),
                ticks: 0,
                fallback: false,
            };
        }

        for delta in &self.deltas {
            let span = delta.span_seconds() as f64;
            if budget * span >= range {
                return DeltaSelection {
                    delta: delta.clone(),
                    ticks: whole_spans(range, span),
                    fallback: false,
                };
            }
        }

        let coarsest = self.coarsest();
        if !range.is_finite() {
            return DeltaSelection {
                delta: coarsest.clone(),
                ticks: 2,
                fallback: true,
            };
        }

        let span = coarsest.span_seconds() as f64;
        let needed = range / (budget * span);
        let factor = {
            let whole = whole_spans(needed, 1.0);
            let whole = if (whole as f64) < needed {
                whole + 1
            } else {
                whole
            };
            u32::try_from(whole).unwrap_or(u32::MAX)
        };
        let delta = coarsest.scaled(factor);
        let ticks = whole_spans(range, delta.span_seconds() as f64);
        DeltaSelection {
            delta,
            ticks,
            fallback: true,
        }
    }
}

impl Default for DeltaCatalog {
    /// The standard catalog: 1 second up to 100 years. Weeks are not included.
    fn default() -> Self {
        let deltas = DEFAULT_DELTAS
            .iter()
            .map(|&(count, rounding, format, first, minors)| {
                TimeDelta::preset(count, rounding, format, first, minors)
            })
            .collect();
        Self { deltas }
    }
}

fn whole_spans(range: f64, span: f64) -> usize {
    if span <= 0.0 {
        return 0;
    }
    let n = (range / span).clamp(0.0, usize::MAX as f64);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "clamped to the usize range; truncation is the intended floor"
    )]
    {
        n as usize
    }
}
