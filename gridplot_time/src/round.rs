// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer bucket rounding for calendar fields.

/// Rounds `x` down to a multiple of `n` (for 0-based fields: years, hours, minutes, seconds).
///
/// Uses floor division, so negative values round toward negative infinity.
/// Returns `x` unchanged if `n <= 0`.
pub fn round0(x: i32, n: i32) -> i32 {
    if n <= 0 {
        return x;
    }
    x.div_euclid(n) * n
}

/// Rounds `x` down to the start of its `n`-wide bucket counted from 1 (for 1-based fields:
/// months and days of month).
///
/// `round1(x, n) - 1` is always a multiple of `n`. Returns `x` unchanged if `n <= 0`.
pub fn round1(x: i32, n: i32) -> i32 {
    if n <= 0 {
        return x;
    }
    (x - 1).div_euclid(n) * n + 1
}
