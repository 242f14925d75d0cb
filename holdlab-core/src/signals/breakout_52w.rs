//! 52-week breakout: close exceeds the highest close of the previous N bars.

use crate::domain::{PriceSeries, SignalSeries};
use crate::indicators::{Indicator, RollingMax};

use super::{log_signal_counts, SignalSource};

/// N-day closing-high breakout, long only.
///
/// Fires +1 when `close[t] > max(close[t-N..t-1])`. The lookback is typically
/// 252 (one trading year).
#[derive(Debug, Clone)]
pub struct Breakout52Week {
    pub lookback: usize,
}

impl Breakout52Week {
    pub fn new(lookback: usize) -> Self {
        assert!(lookback >= 1, "lookback must be >= 1");
        Self { lookback }
    }

    pub fn default_params() -> Self {
        Self::new(252)
    }
}

impl SignalSource for Breakout52Week {
    fn name(&self) -> &str {
        "breakout_52w"
    }

    fn warmup_bars(&self) -> usize {
        self.lookback
    }

    fn generate(&self, prices: &PriceSeries) -> SignalSeries {
        let bars = prices.bars();
        let highs = RollingMax::new(self.lookback).compute(bars);
        let mut signals = SignalSeries::flat(prices);

        for i in self.lookback..bars.len() {
            // highs[i-1] covers bars i-lookback ..= i-1
            if bars[i].close > highs[i - 1] {
                signals.insert(bars[i].date, 1);
            }
        }

        log_signal_counts(self.name(), prices, &signals);
        signals
    }
}
