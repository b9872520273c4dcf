// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar ticks for axes whose values are seconds elapsed since a reference instant.
//!
//! Spacing is picked from a [`DeltaCatalog`] so the number of major ticks stays within
//! [`CalendarTicks::max_ticks`]. Majors sit on calendar boundaries (whole hours, the first of
//! a month, ...) rather than on multiples of a fixed number of seconds.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use chrono::{DateTime, FixedOffset, TimeZone};
use gridplot_time::{DeltaCatalog, TimeDelta};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::tick::{Tick, TickMarker, TickRange};

/// Default upper bound on the number of major calendar ticks.
pub const DEFAULT_MAX_TICKS: usize = 5;

/// Seconds from `reference` to `t`, including the sub-second part.
pub fn seconds_since<Tz: TimeZone>(reference: &DateTime<FixedOffset>, t: &DateTime<Tz>) -> f64 {
    let d = t.clone().signed_duration_since(reference);
    d.num_seconds() as f64 + f64::from(d.subsec_nanos()) * 1.0e-9
}

/// The instant `seconds` after `reference`, or `None` if it is not finite or representable.
pub fn instant_at(
    reference: &DateTime<FixedOffset>,
    seconds: f64,
) -> Option<DateTime<FixedOffset>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    // chrono durations are bounded by i64 milliseconds.
    if whole.abs() >= (i64::MAX / 1_000) as f64 {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "range checked above; the fraction is below one second"
    )]
    let (secs, nanos) = (whole as i64, ((seconds - whole) * 1.0e9).round() as i64);
    let d = chrono::Duration::try_seconds(secs)?
        .checked_add(&chrono::Duration::nanoseconds(nanos))?;
    reference.checked_add_signed(d)
}

/// A [`TickMarker`] that places ticks on calendar boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarTicks {
    /// Upper bound on major ticks. The walk may emit one more at a boundary.
    pub max_ticks: usize,
    /// Candidate spacings, finest first.
    pub catalog: DeltaCatalog,
}

impl Default for CalendarTicks {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_MAX_TICKS,
            catalog: DeltaCatalog::default(),
        }
    }
}

impl CalendarTicks {
    /// Calendar ticks with the default catalog and budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the major tick budget.
    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Replaces the catalog of candidate spacings.
    pub fn with_catalog(mut self, catalog: DeltaCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Lazily walks the ticks for `range`. Calling this again restarts the walk.
    pub fn iter(&self, range: &TickRange) -> CalendarTickIter {
        let budget = self.max_ticks.saturating_add(1);
        let selection = self.catalog.suitable(range.max - range.min, budget);
        CalendarTickIter::new(selection.delta, range, budget)
    }
}

impl TickMarker for CalendarTicks {
    fn ticks(&self, range: &TickRange) -> Vec<Tick> {
        self.iter(range).collect()
    }
}

/// Iterator over calendar ticks, produced by [`CalendarTicks::iter`].
///
/// Each step rounds the walking instant down to the delta boundary, yields the minor ticks
/// that follow that boundary and then the major tick on it. Only ticks inside
/// `[min, max]` are yielded, and at most `max_ticks + 1` majors.
#[derive(Clone, Debug)]
pub struct CalendarTickIter {
    delta: TimeDelta,
    reference: DateTime<FixedOffset>,
    min: f64,
    max: f64,
    walk: Option<Walk>,
    position: f64,
    previous: Option<f64>,
    majors: usize,
    major_budget: usize,
    pending: VecDeque<Tick>,
}

#[derive(Clone, Copy, Debug)]
struct Walk {
    t: DateTime<FixedOffset>,
    minor_step: chrono::Duration,
    advance: chrono::Duration,
    minors: u32,
}

impl CalendarTickIter {
    fn new(delta: TimeDelta, range: &TickRange, major_budget: usize) -> Self {
        let walk = delta.span().and_then(|span| {
            let minors = delta.minor_subdivisions().max(1);
            Some(Walk {
                t: instant_at(&range.reference_time, range.min)?,
                minor_step: span / i32::try_from(minors).ok()?,
                advance: span.checked_add(&(span / 20))?,
                minors,
            })
        });
        Self {
            delta,
            reference: range.reference_time,
            min: range.min,
            max: range.max,
            walk,
            position: range.min,
            previous: None,
            majors: 0,
            major_budget,
            pending: VecDeque::new(),
        }
    }

    /// The spacing this walk uses.
    pub fn delta(&self) -> &TimeDelta {
        &self.delta
    }

    fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// Queues the ticks of one major interval and advances the walk.
    fn step(&mut self) {
        let Some(mut walk) = self.walk.take() else {
            return;
        };
        if !(self.position < self.max) {
            return;
        }

        let t = self.delta.round_down(&walk.t);
        let v = seconds_since(&self.reference, &t);
        // Rounding can only stall where chrono clamps; stop rather than spin.
        if let Some(previous) = self.previous
            && v <= previous
        {
            return;
        }
        let is_major = self.contains(v);
        if is_major && self.majors == self.major_budget {
            return;
        }

        let mut tm = t.checked_add_signed(walk.minor_step);
        for _ in 1..walk.minors {
            let Some(at) = tm else { break };
            let vm = seconds_since(&self.reference, &at);
            if self.contains(vm) {
                self.pending.push_back(Tick::minor(vm));
            }
            tm = at.checked_add_signed(walk.minor_step);
        }

        if is_major {
            let label = self.delta.label(&t, self.majors == 0);
            self.pending.push_back(Tick::major(v, label));
            self.majors += 1;
        }
        self.position = v;
        self.previous = Some(v);

        if let Some(next) = t.checked_add_signed(walk.advance) {
            walk.t = next;
            self.walk = Some(walk);
        }
    }
}

impl Iterator for CalendarTickIter {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        loop {
            if let Some(tick) = self.pending.pop_front() {
                return Some(tick);
            }
            self.walk?;
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    use alloc::string::String;
    use chrono::Utc;

    fn reference() -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2003, 5, 11, 23, 11, 9)
            .single()
            .expect("valid reference")
            .fixed_offset()
    }

    fn range(min: f64, max: f64) -> TickRange {
        TickRange {
            min,
            max,
            reference_time: reference(),
        }
    }

    #[test]
    fn conversions_invert_each_other() {
        let r = reference();
        let t = Utc
            .with_ymd_and_hms(2003, 5, 12, 19, 54, 42)
            .single()
            .expect("valid instant");
        let v = seconds_since(&r, &t);
        assert_eq!(v, 74_613.0);
        assert_eq!(instant_at(&r, v), Some(t.fixed_offset()));
        assert_eq!(instant_at(&r, -0.25).map(|t| seconds_since(&r, &t)), Some(-0.25));
        assert_eq!(instant_at(&r, f64::NAN), None);
        assert_eq!(instant_at(&r, 1.0e300), None);
    }

    #[test]
    fn hourly_walk_over_one_day() {
        let ticks = CalendarTicks::new().ticks(&range(0.0, 74_613.0));
        let majors: Vec<&str> = ticks
            .iter()
            .filter(|t| !t.is_minor())
            .map(|t| t.label.as_str())
            .collect();
        assert_eq!(majors, alloc::vec!["00h\n12 May 2003", "04h", "08h", "12h", "16h"]);
        assert_eq!(ticks.iter().filter(|t| t.is_minor()).count(), 15);
        // 00:00 on the 12th is 48 minutes 51 seconds after the reference.
        assert_eq!(ticks.iter().find(|t| !t.is_minor()).map(|t| t.value), Some(2_931.0));
    }

    /// Seconds from the reference to midnight UTC on the given day.
    fn midnight(year: i32, month: u32, day: u32) -> f64 {
        let t = Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .expect("valid date");
        seconds_since(&reference(), &t)
    }

    fn majors(ticks: &[Tick]) -> Vec<(&str, f64)> {
        ticks
            .iter()
            .filter(|t| !t.is_minor())
            .map(|t| (t.label.as_str(), t.value))
            .collect()
    }

    #[test]
    fn monthly_walk_lands_on_the_first() {
        // Feb 1 to Aug 1 noon fits six one-month spans, so months are picked.
        let r = range(midnight(2001, 2, 1), midnight(2001, 8, 1) + 43_200.0);
        let ticks = CalendarTicks::new().ticks(&r);
        let expected = [
            ("Feb 2001", midnight(2001, 2, 1)),
            ("Mar 2001", midnight(2001, 3, 1)),
            ("Apr 2001", midnight(2001, 4, 1)),
            ("May 2001", midnight(2001, 5, 1)),
            ("Jun 2001", midnight(2001, 6, 1)),
            ("Jul 2001", midnight(2001, 7, 1)),
        ];
        assert_eq!(majors(&ticks), expected);
    }

    #[test]
    fn major_cap_drops_the_last_boundary_in_range() {
        let r = range(midnight(2001, 2, 1), midnight(2001, 8, 1) + 43_200.0);
        let aug = midnight(2001, 8, 1);
        assert!(aug <= r.max);

        let ticks = CalendarTicks::new().with_max_ticks(5).ticks(&r);
        assert_eq!(majors(&ticks).len(), 6);
        assert!(ticks.iter().all(|t| t.value < aug), "{ticks:?}");
    }

    #[test]
    fn half_year_walk_alternates_january_and_july() {
        let r = range(midnight(2001, 7, 1), midnight(2004, 6, 1));
        let mut iter = CalendarTicks::new().iter(&r);
        assert_eq!(iter.delta().count(), 6);
        let ticks: Vec<Tick> = iter.by_ref().collect();
        let expected = [
            ("Jul 2001", midnight(2001, 7, 1)),
            ("Jan 2002", midnight(2002, 1, 1)),
            ("Jul 2002", midnight(2002, 7, 1)),
            ("Jan 2003", midnight(2003, 1, 1)),
            ("Jul 2003", midnight(2003, 7, 1)),
            ("Jan 2004", midnight(2004, 1, 1)),
        ];
        assert_eq!(majors(&ticks), expected);
    }

    #[test]
    fn decade_walk_rounds_to_twenty_years() {
        let r = range(midnight(1955, 1, 1), midnight(2025, 1, 1));
        let ticks = CalendarTicks::new().ticks(&r);
        let expected = [
            ("1960", midnight(1960, 1, 1)),
            ("1980", midnight(1980, 1, 1)),
            ("2000", midnight(2000, 1, 1)),
            ("2020", midnight(2020, 1, 1)),
        ];
        assert_eq!(majors(&ticks), expected);
        // Three minors after each major; only the first one after 2020 is still in range.
        assert_eq!(ticks.iter().filter(|t| t.is_minor()).count(), 10);
    }

    #[test]
    fn ticks_stay_in_range_within_budget() {
        let spans = [
            1.0, 35.0, 610.0, 4_000.0, 90_000.0, 2.0e6, 4.0e7, 3.0e8, 2.0e9, 4.0e10,
        ];
        for span in spans {
            for offset in [-1.0e5, 0.0, 12_345.6] {
                for max_ticks in [2, 5, 9] {
                    let r = range(offset, offset + span);
                    let ticks = CalendarTicks::new().with_max_ticks(max_ticks).ticks(&r);
                    for t in &ticks {
                        assert!(
                            t.value >= r.min && t.value <= r.max,
                            "{} outside [{}, {}]",
                            t.value,
                            r.min,
                            r.max
                        );
                    }
                    let majors = ticks.iter().filter(|t| !t.is_minor()).count();
                    assert!(
                        majors <= max_ticks + 1,
                        "{majors} majors for span {span} with budget {max_ticks}"
                    );
                }
            }
        }
    }

    #[test]
    fn only_the_first_major_carries_the_date() {
        let ticks = CalendarTicks::new().ticks(&range(0.0, 600.0));
        let labels: Vec<&String> = ticks.iter().filter(|t| !t.is_minor()).map(|t| &t.label).collect();
        assert!(labels.len() > 1);
        assert!(labels[0].contains('\n'), "first label {:?}", labels[0]);
        assert!(labels[1..].iter().all(|l| !l.contains('\n')));
    }

    #[test]
    fn walks_restart() {
        let marker = CalendarTicks::new();
        let r = range(-3_600.0, 86_400.0);
        let mut iter = marker.iter(&r);
        let first = iter.next();
        assert_eq!(marker.iter(&r).next(), first);
        assert_eq!(marker.iter(&r).count(), marker.ticks(&r).len());
    }

    #[test]
    fn unrepresentable_ranges_yield_nothing() {
        assert!(CalendarTicks::new().ticks(&range(f64::NAN, 10.0)).is_empty());
        assert!(CalendarTicks::new().ticks(&range(f64::NEG_INFINITY, 10.0)).is_empty());
        assert!(CalendarTicks::new().ticks(&range(10.0, 10.0)).is_empty());
    }
}
