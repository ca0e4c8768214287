//! First-versus-last trend classification.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Direction of change between a group's first and last value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// Last value exceeds first by more than the tolerance.
    Increasing,
    /// Last value falls short of first by more than the tolerance.
    Decreasing,
    /// Within the tolerance either way.
    Even,
}

impl Trend {
    /// Classify a (first, last) pair against a tolerance.
    ///
    /// A negative tolerance behaves as zero.
    #[must_use]
    pub fn classify(first: f32, last: f32, tolerance: f32) -> Self {
        let tolerance = tolerance.max(0.0);
        if last > first + tolerance {
            Trend::Increasing
        } else if last < first - tolerance {
            Trend::Decreasing
        } else {
            Trend::Even
        }
    }
}

/// Classify index-aligned first/last sequences.
///
/// # Errors
///
/// Returns [`Error::DataLengthMismatch`] if the sequences differ in length —
/// they must share one group ordering.
pub fn classify_series(first: &[f32], last: &[f32], tolerance: f32) -> Result<Vec<Trend>> {
    if first.len() != last.len() {
        return Err(Error::DataLengthMismatch {
            x_len: first.len(),
            y_len: last.len(),
        });
    }

    Ok(first
        .iter()
        .zip(last.iter())
        .map(|(&f, &l)| Trend::classify(f, l, tolerance))
        .collect())
}

/// Display colors for the three trend classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPalette {
    /// Color for increasing groups.
    pub increasing: Rgba,
    /// Color for decreasing groups.
    pub decreasing: Rgba,
    /// Color for groups within the tolerance.
    pub even: Rgba,
}

impl Default for TrendPalette {
    fn default() -> Self {
        Self {
            increasing: Rgba::rgb(255, 127, 14),
            decreasing: Rgba::rgb(31, 119, 180),
            even: Rgba::BLACK,
        }
    }
}

impl TrendPalette {
    /// Color mapped to a classification.
    #[must_use]
    pub const fn color(&self, trend: Trend) -> Rgba {
        match trend {
            Trend::Increasing => self.increasing,
            Trend::Decreasing => self.decreasing,
            Trend::Even => self.even,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_strict() {
        assert_eq!(Trend::classify(10.0, 20.0, 0.0), Trend::Increasing);
        assert_eq!(Trend::classify(30.0, 25.0, 0.0), Trend::Decreasing);
        assert_eq!(Trend::classify(20.0, 20.0, 0.0), Trend::Even);
    }

    #[test]
    fn test_classify_with_tolerance() {
        // Within the margin on both sides counts as even
        assert_eq!(Trend::classify(10.0, 12.0, 2.0), Trend::Even);
        assert_eq!(Trend::classify(10.0, 8.0, 2.0), Trend::Even);
        assert_eq!(Trend::classify(10.0, 12.1, 2.0), Trend::Increasing);
        assert_eq!(Trend::classify(10.0, 7.9, 2.0), Trend::Decreasing);
    }

    #[test]
    fn test_negative_tolerance_clamps_to_zero() {
        assert_eq!(
            Trend::classify(10.0, 11.0, -5.0),
            Trend::classify(10.0, 11.0, 0.0)
        );
        assert_eq!(
            Trend::classify(10.0, 10.0, -5.0),
            Trend::classify(10.0, 10.0, 0.0)
        );
    }

    #[test]
    fn test_classify_series_roundtrip() {
        // A: 10→20 increase, B: 20→20 even, C: 30→25 decrease
        let trends = classify_series(&[10.0, 20.0, 30.0], &[20.0, 20.0, 25.0], 0.0).unwrap();
        assert_eq!(trends, vec![Trend::Increasing, Trend::Even, Trend::Decreasing]);
    }

    #[test]
    fn test_classify_series_length_mismatch() {
        let result = classify_series(&[1.0, 2.0], &[1.0], 0.0);
        assert!(matches!(result, Err(Error::DataLengthMismatch { .. })));
    }

    #[test]
    fn test_palette_mapping() {
        let palette = TrendPalette::default();
        assert_eq!(palette.color(Trend::Increasing), palette.increasing);
        assert_eq!(palette.color(Trend::Decreasing), palette.decreasing);
        assert_eq!(palette.color(Trend::Even), Rgba::BLACK);
    }
}
