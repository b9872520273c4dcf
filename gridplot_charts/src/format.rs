// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for linear tick labels.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats `v` with just enough decimals to tell ticks `step` apart.
pub(crate) fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }
    let step = step.abs();
    let decimals = if step > 0.0 && step.is_finite() {
        let d = (-step.log10().floor()).clamp(0.0, 12.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to 0..=12")]
        {
            d as usize
        }
    } else {
        0
    };
    let s = alloc::format!("{v:.decimals$}");
    // Avoid "-0" / "-0.00" for values that round to zero.
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        return String::from(&s[1..]);
    }
    s
}
