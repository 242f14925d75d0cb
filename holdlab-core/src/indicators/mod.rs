//! Indicators used by the built-in signal sources.
//!
//! Indicators are pure functions: bar history in, numeric series out, same
//! length as the input. Warm-up positions are `f64::NAN`, and every NaN
//! comparison is false, so signal rules never fire on missing history.
//!
//! # Look-ahead contamination guard
//! No indicator value at bar t may depend on data from bar t+1 or later.

pub mod ema;
pub mod rolling_max;
pub mod rsi;
pub mod sma;

pub use ema::{ema_of_series, Ema};
pub use rolling_max::RollingMax;
pub use rsi::Rsi;
pub use sma::Sma;

use crate::domain::Bar;

/// Trait for indicators.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_50", "rsi_14").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Which bar field an indicator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Close,
    Volume,
}

impl PriceField {
    pub fn extract(self, bars: &[Bar]) -> Vec<f64> {
        match self {
            Self::Close => bars.iter().map(|b| b.close).collect(),
            Self::Volume => bars.iter().map(|b| b.volume).collect(),
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Close => "",
            Self::Volume => "_volume",
        }
    }
}

/// `series[i] > other[i] && series[i-1] <= other[i-1]`, false when any input is NaN.
pub fn crossed_above(series: &[f64], other: &[f64], i: usize) -> bool {
    if i == 0 {
        return false;
    }
    series[i] > other[i] && series[i - 1] <= other[i - 1]
}

/// `series[i] < other[i] && series[i-1] >= other[i-1]`, false when any input is NaN.
pub fn crossed_below(series: &[f64], other: &[f64], i: usize) -> bool {
    if i == 0 {
        return false;
    }
    series[i] < other[i] && series[i - 1] >= other[i - 1]
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossings_ignore_nan_history() {
        let a = [f64::NAN, 2.0, 3.0];
        let b = [1.0, 2.5, 2.5];
        assert!(!crossed_above(&a, &b, 1));
        assert!(crossed_above(&a, &b, 2));
        assert!(!crossed_above(&a, &b, 0));
    }

    #[test]
    fn crossing_below() {
        let a = [3.0, 1.0];
        let b = [2.0, 2.0];
        assert!(crossed_below(&a, &b, 1));
        assert!(!crossed_above(&a, &b, 1));
    }

    #[test]
    fn touching_then_crossing_counts() {
        // Equal yesterday, above today.
        let a = [2.0, 3.0];
        let b = [2.0, 2.0];
        assert!(crossed_above(&a, &b, 1));
    }

    #[test]
    fn price_field_extracts() {
        let bars = make_bars(&[1.0, 2.0]);
        assert_eq!(PriceField::Close.extract(&bars), vec![1.0, 2.0]);
        assert_eq!(PriceField::Volume.extract(&bars), vec![1000.0, 1000.0]);
    }
}
