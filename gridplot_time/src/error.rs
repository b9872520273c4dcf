// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::CalendarUnit;

/// A tick spacing was requested in a unit that has no rounding rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("calendar unit `{unit}` has no rounding rule")]
pub struct UnsupportedIntervalError {
    /// The rejected unit.
    pub unit: CalendarUnit,
}

/// Errors raised while configuring time deltas or a delta catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The delta's unit cannot be rounded to.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedIntervalError),
    /// A delta with a count of zero.
    #[error("time delta count must be positive")]
    ZeroCount,
    /// A delta with no minor subdivisions.
    #[error("time delta of {count} {unit} needs at least one minor subdivision")]
    ZeroSubdivisions {
        /// Count of the offending delta.
        count: u32,
        /// Unit of the offending delta.
        unit: CalendarUnit,
    },
    /// A label format chrono cannot render.
    #[error("invalid label format `{format}`")]
    InvalidFormat {
        /// The rejected format string.
        format: String,
    },
    /// A catalog without entries.
    #[error("delta catalog is empty")]
    Empty,
    /// A catalog entry spanning less time than the one before it.
    #[error("delta at index {index} is finer than its predecessor")]
    NotAscending {
        /// Index of the offending entry.
        index: usize,
    },
}
