//! MACD signal-line crossover.

use crate::domain::{PriceSeries, SignalSeries};
use crate::indicators::{crossed_above, crossed_below, ema_of_series};

use super::{log_signal_counts, SignalSource};

/// MACD = EMA(fast) − EMA(slow); signal line = EMA(MACD, signal).
///
/// +1 when MACD crosses above the signal line, −1 when it crosses below.
#[derive(Debug, Clone)]
pub struct Macd {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD spans must be >= 1");
        assert!(fast < slow, "fast span must be less than slow span");
        Self { fast, slow, signal }
    }

    pub fn default_params() -> Self {
        Self::new(12, 26, 9)
    }

    /// MACD line and signal line for a close series.
    pub fn lines(&self, closes: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let fast = ema_of_series(closes, self.fast);
        let slow = ema_of_series(closes, self.slow);
        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema_of_series(&macd, self.signal);
        (macd, signal)
    }
}

impl SignalSource for Macd {
    fn name(&self) -> &str {
        "macd"
    }

    fn warmup_bars(&self) -> usize {
        1
    }

    fn generate(&self, prices: &PriceSeries) -> SignalSeries {
        let (macd, signal_line) = self.lines(&prices.closes());
        let mut signals = SignalSeries::flat(prices);

        for (i, bar) in prices.bars().iter().enumerate() {
            if crossed_above(&macd, &signal_line, i) {
                signals.insert(bar.date, 1);
            } else if crossed_below(&macd, &signal_line, i) {
                signals.insert(bar.date, -1);
            }
        }

        log_signal_counts(self.name(), prices, &signals);
        signals
    }
}
