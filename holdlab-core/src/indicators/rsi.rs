//! Relative Strength Index (RSI), simple-average variant.
//!
//! avg_gain / avg_loss are plain rolling means of the last `period` close changes
//! (no Wilder smoothing). RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Lookback: period.
//! Edge cases: avg_loss == 0 → RSI = 100; both zero → NaN (flat window).

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        if n < self.period + 1 {
            return result;
        }

        for i in self.period..n {
            let mut gain = 0.0;
            let mut loss = 0.0;
            let mut valid = true;
            for j in (i + 1 - self.period)..=i {
                let change = bars[j].close - bars[j - 1].close;
                if change.is_nan() {
                    valid = false;
                    break;
                }
                if change > 0.0 {
                    gain += change;
                } else {
                    loss -= change;
                }
            }
            if valid {
                result[i] = compute_rsi(gain / self.period as f64, loss / self.period as f64);
            }
        }
        result
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        f64::NAN
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
