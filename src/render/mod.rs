pub mod comparison_chart;
pub mod release_chart;

use plotters::prelude::*;
use std::ops::Range;

pub const FONT_FAMILY: &str = "sans-serif";

/// Line colors, cycled per series.
pub const SERIES_COLORS: [RGBColor; 7] = [
    BLUE,
    GREEN,
    RED,
    CYAN,
    MAGENTA,
    RGBColor(191, 191, 0),
    BLACK,
];

pub fn series_color(index: usize) -> RGBColor {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Scales fonts and strokes with the image so large outputs stay readable.
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    factor: f64,
}

impl Scale {
    /// `reference_height` is the height the base sizes are tuned for.
    pub fn new(height: u32, reference_height: u32) -> Self {
        Self {
            factor: (height as f64 / reference_height.max(1) as f64).max(0.25),
        }
    }

    pub fn px(&self, base: f64) -> f64 {
        base * self.factor
    }

    pub fn px_u32(&self, base: f64) -> u32 {
        self.px(base).round().max(1.0) as u32
    }
}

/// Axis range covering `values` with a small margin; never empty.
pub fn padded_range<I>(values: I) -> Range<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }

    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else if min != 0.0 {
        min.abs() * 0.05
    } else {
        1e-3
    };

    (min - pad)..(max + pad)
}

/// Number of decimals that keeps ticks of a range distinguishable without
/// switching to scientific notation.
pub fn tick_decimals(range: &Range<f64>) -> usize {
    let span = (range.end - range.start).abs();
    if span <= 0.0 || !span.is_finite() {
        return 3;
    }
    let magnitude = span.log10().floor() as i32;
    (2 - magnitude).clamp(0, 9) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let range = padded_range(vec![1.0, 3.0, 2.0]);
        assert!(range.start < 1.0 && range.start > 0.8);
        assert!(range.end > 3.0 && range.end < 3.2);

        let flat = padded_range(vec![100.0, 100.0]);
        assert!(flat.start < 100.0 && flat.end > 100.0);

        assert_eq!(padded_range(Vec::new()), 0.0..1.0);
        let zero = padded_range(vec![0.0]);
        assert!(zero.start < 0.0 && zero.end > 0.0);
    }

    #[test]
    fn test_tick_decimals() {
        assert_eq!(tick_decimals(&(95.0..105.0)), 1);
        assert_eq!(tick_decimals(&(0.0..0.01)), 4);
        assert_eq!(tick_decimals(&(0.0..5000.0)), 0);
    }

    #[test]
    fn test_series_colors_cycle() {
        assert_eq!(series_color(0), BLUE);
        assert_eq!(series_color(SERIES_COLORS.len()), BLUE);
    }
}
