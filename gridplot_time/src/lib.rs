// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar building blocks for date/time axes.
//!
//! Axis values on a date/time axis are seconds elapsed since a reference instant. To place
//! ticks on "round" calendar boundaries this crate provides:
//! - **Units** ([`CalendarUnit`]) with their average length in seconds.
//! - **Deltas** ([`TimeDelta`]): a tick spacing such as "5 minutes", together with label
//!   formats and the number of minor subdivisions between two major ticks.
//! - **A catalog** ([`DeltaCatalog`]) of deltas ordered from fine to coarse, and the lookup
//!   that picks the finest delta keeping the major tick count within a budget.
//!
//! Rounding always uses floor semantics: `round0` for 0-based fields (years, hours, minutes,
//! seconds) and `round1` for 1-based fields (months, days of month).

#![no_std]

extern crate alloc;

mod catalog;
mod delta;
mod error;
mod round;
mod unit;

pub use catalog::{DeltaCatalog, DeltaSelection};
pub use delta::TimeDelta;
pub use error::{CatalogError, UnsupportedIntervalError};
pub use round::{round0, round1};
pub use unit::CalendarUnit;
