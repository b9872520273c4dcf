// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick spacings expressed in calendar units.

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use core::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Timelike};

use crate::round::{round0, round1};
use crate::{CalendarUnit, CatalogError, UnsupportedIntervalError};

/// The units a [`TimeDelta`] can be rounded to. Mirrors [`CalendarUnit`] minus weeks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Rounding {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TryFrom<CalendarUnit> for Rounding {
    type Error = UnsupportedIntervalError;

    fn try_from(unit: CalendarUnit) -> Result<Self, Self::Error> {
        match unit {
            CalendarUnit::Second => Ok(Self::Second),
            CalendarUnit::Minute => Ok(Self::Minute),
            CalendarUnit::Hour => Ok(Self::Hour),
            CalendarUnit::Day => Ok(Self::Day),
            CalendarUnit::Month => Ok(Self::Month),
            CalendarUnit::Year => Ok(Self::Year),
            CalendarUnit::Week => Err(UnsupportedIntervalError { unit }),
        }
    }
}

impl From<Rounding> for CalendarUnit {
    fn from(value: Rounding) -> Self {
        match value {
            Rounding::Second => Self::Second,
            Rounding::Minute => Self::Minute,
            Rounding::Hour => Self::Hour,
            Rounding::Day => Self::Day,
            Rounding::Month => Self::Month,
            Rounding::Year => Self::Year,
        }
    }
}

/// A candidate tick spacing: `count` × `unit`, plus how ticks at that spacing are labelled.
///
/// Label formats use chrono's strftime syntax (`%H:%M`, `%b %Y`, ...). The optional first
/// format is appended on a second line to the first major tick only, so a time-only axis
/// still shows which day it starts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeDelta {
    count: u32,
    rounding: Rounding,
    major_format: Cow<'static, str>,
    first_format: Option<Cow<'static, str>>,
    instant: bool,
    minor_subdivisions: u32,
}

impl TimeDelta {
    /// Creates a delta of `count` `unit`s labelled with `major_format`.
    ///
    /// The delta starts without minor ticks (one subdivision) and is marked as an instant
    /// for units up to hours.
    ///
    /// Fails if `unit` cannot be rounded to, `count` is zero or the format is invalid.
    pub fn new(
        count: u32,
        unit: CalendarUnit,
        major_format: impl Into<Cow<'static, str>>,
    ) -> Result<Self, CatalogError> {
        let rounding = Rounding::try_from(unit)?;
        if count == 0 {
            return Err(CatalogError::ZeroCount);
        }
        let major_format = major_format.into();
        check_format(&major_format)?;
        Ok(Self {
            count,
            rounding,
            major_format,
            first_format: None,
            instant: unit <= CalendarUnit::Hour,
            minor_subdivisions: 1,
        })
    }

    /// Catalog entries known to be valid at compile time.
    pub(crate) const fn preset(
        count: u32,
        rounding: Rounding,
        major_format: &'static str,
        first_format: Option<&'static str>,
        minor_subdivisions: u32,
    ) -> Self {
        let first_format = match first_format {
            Some(f) => Some(Cow::Borrowed(f)),
            None => None,
        };
        Self {
            count,
            rounding,
            major_format: Cow::Borrowed(major_format),
            first_format,
            instant: matches!(
                rounding,
                Rounding::Second | Rounding::Minute | Rounding::Hour
            ),
            minor_subdivisions,
        }
    }

    /// Sets the format appended (on a new line) to the first major tick label.
    ///
    /// An empty format clears it.
    pub fn with_first_format(
        mut self,
        format: impl Into<Cow<'static, str>>,
    ) -> Result<Self, CatalogError> {
        let format = format.into();
        if format.is_empty() {
            self.first_format = None;
            return Ok(self);
        }
        check_format(&format)?;
        self.first_format = Some(format);
        Ok(self)
    }

    /// Sets how many sub-intervals the span between two major ticks is split into.
    ///
    /// `n - 1` minor ticks are emitted between consecutive majors.
    pub fn with_minor_subdivisions(mut self, n: u32) -> Result<Self, CatalogError> {
        if n == 0 {
            return Err(CatalogError::ZeroSubdivisions {
                count: self.count,
                unit: self.unit(),
            });
        }
        self.minor_subdivisions = n;
        Ok(self)
    }

    /// Marks whether this spacing is fine-grained enough to label individual instants.
    pub fn with_instant(mut self, instant: bool) -> Self {
        self.instant = instant;
        self
    }

    /// Returns the multiplier.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Returns the unit.
    pub fn unit(&self) -> CalendarUnit {
        self.rounding.into()
    }

    /// Returns the major tick label format.
    pub fn major_format(&self) -> &str {
        &self.major_format
    }

    /// Returns the extra format for the first major tick, if any.
    pub fn first_format(&self) -> Option<&str> {
        self.first_format.as_deref()
    }

    /// Whether ticks at this spacing denote instants (time of day) rather than periods.
    pub fn is_instant(&self) -> bool {
        self.instant
    }

    /// Number of minor sub-intervals between two major ticks.
    pub fn minor_subdivisions(&self) -> u32 {
        self.minor_subdivisions
    }

    /// Average span of the delta in seconds.
    pub fn span_seconds(&self) -> i64 {
        i64::from(self.count) * self.unit().average_seconds()
    }

    /// Average span as a chrono duration, or `None` if it is not representable.
    pub fn span(&self) -> Option<chrono::Duration> {
        chrono::Duration::try_seconds(self.span_seconds())
    }

    /// The same spacing with the count multiplied by `factor`.
    pub(crate) fn scaled(&self, factor: u32) -> Self {
        let mut out = self.clone();
        out.count = self.count.saturating_mul(factor.max(1));
        out
    }

    /// Rounds `t` down to the start of its enclosing `count` × `unit` bucket.
    ///
    /// Rounding happens on the local calendar fields of `t`; the result keeps the offset
    /// of `t` and has no sub-second part. If the rounded date cannot be represented
    /// (e.g. years beyond chrono's range) `t` is returned unchanged.
    pub fn round_down(&self, t: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        let local = t.naive_local();
        let n = i32::try_from(self.count).unwrap_or(i32::MAX);

        let mut year = local.year();
        let mut month = local.month();
        let mut day = local.day();
        let (mut hour, mut minute, mut second) = (local.hour(), local.minute(), local.second());

        match self.rounding {
            Rounding::Year => {
                year = round0(year, n);
                (month, day, hour, minute, second) = (1, 1, 0, 0, 0);
            }
            Rounding::Month => {
                month = round1_u32(month, n);
                (day, hour, minute, second) = (1, 0, 0, 0);
            }
            Rounding::Day => {
                day = round1_u32(day, n);
                (hour, minute, second) = (0, 0, 0);
            }
            Rounding::Hour => {
                hour = round0_u32(hour, n);
                (minute, second) = (0, 0);
            }
            Rounding::Minute => {
                minute = round0_u32(minute, n);
                second = 0;
            }
            Rounding::Second => {
                second = round0_u32(second, n);
            }
        }

        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .and_then(|naive| t.offset().from_local_datetime(&naive).single())
            .unwrap_or(*t)
    }

    /// Formats the label of a major tick at `t`.
    ///
    /// If `first` is set and the delta has a first-tick format, it is appended on a new line.
    pub fn label(&self, t: &DateTime<FixedOffset>, first: bool) -> String {
        let mut out = String::new();
        // Formats were validated on construction; a failing write leaves a partial label.
        let _ = write!(out, "{}", t.format(&self.major_format));
        if first && let Some(extra) = &self.first_format {
            out.push('\n');
            let _ = write!(out, "{}", t.format(extra));
        }
        out
    }
}

fn round0_u32(x: u32, n: i32) -> u32 {
    let x = i32::try_from(x).unwrap_or(i32::MAX);
    u32::try_from(round0(x, n)).unwrap_or(0)
}

fn round1_u32(x: u32, n: i32) -> u32 {
    let x = i32::try_from(x).unwrap_or(i32::MAX);
    u32::try_from(round1(x, n)).unwrap_or(1)
}

fn check_format(format: &str) -> Result<(), CatalogError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(CatalogError::InvalidFormat {
            format: format.to_string(),
        });
    }
    Ok(())
}
