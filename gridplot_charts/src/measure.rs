// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for plot layout.
//!
//! Axis thickness depends on tick label extents. Shaping stays downstream, so layout takes
//! a measurer callback for rough bounds estimation.

/// Text extents, as needed to size axes and titles before anything is drawn.
///
/// Implement this over a shaping library for accurate layouts. [`HeuristicTextMeasurer`]
/// needs no fonts.
pub trait TextMeasurer {
    /// Returns `(width, height)` of a single line in physical units.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);

    /// Returns `(width, height)` of a block whose lines are separated by `\n`.
    ///
    /// The width is the widest line; heights add up.
    fn measure_block(&self, text: &str, font_size: f64) -> (f64, f64) {
        text.split('\n').fold((0.0_f64, 0.0_f64), |(w, h), line| {
            let (lw, lh) = self.measure(line, font_size);
            (w.max(lw), h + lh)
        })
    }
}

/// Estimates extents from the character count: 0.6em per character, 1em per line.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        (0.6 * font_size * text.chars().count() as f64, font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_stack_lines() {
        let m = HeuristicTextMeasurer;
        let (w, h) = m.measure_block("08h\n12 May 2003", 10.0);
        assert!((w - 0.6 * 10.0 * 11.0).abs() < 1e-9, "width {w}");
        assert!((h - 20.0).abs() < 1e-9, "height {h}");
    }
}
