//! Reversed RSI: fade recoveries out of oversold, buy pullbacks out of overbought.

use crate::domain::{PriceSeries, SignalSeries};
use crate::indicators::{Indicator, Rsi};

use super::{log_signal_counts, SignalSource};

/// RSI threshold crossings with inverted polarity:
/// - −1 when RSI crosses up through `lower` (leaving oversold)
/// - +1 when RSI crosses down through `upper` (leaving overbought)
#[derive(Debug, Clone)]
pub struct RsiReversal {
    pub period: usize,
    pub lower: f64,
    pub upper: f64,
}

impl RsiReversal {
    pub fn new(period: usize, lower: f64, upper: f64) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        assert!(lower < upper, "lower threshold must be below upper");
        Self {
            period,
            lower,
            upper,
        }
    }

    pub fn default_params() -> Self {
        Self::new(14, 30.0, 70.0)
    }
}

impl SignalSource for RsiReversal {
    fn name(&self) -> &str {
        "rsi_reversal"
    }

    fn warmup_bars(&self) -> usize {
        self.period + 1
    }

    fn generate(&self, prices: &PriceSeries) -> SignalSeries {
        let bars = prices.bars();
        let rsi = Rsi::new(self.period).compute(bars);
        let mut signals = SignalSeries::flat(prices);

        for i in 1..bars.len() {
            let (prev, curr) = (rsi[i - 1], rsi[i]);
            if curr > self.lower && prev <= self.lower {
                signals.insert(bars[i].date, -1);
            }
            if curr < self.upper && prev >= self.upper {
                signals.insert(bars[i].date, 1);
            }
        }

        log_signal_counts(self.name(), prices, &signals);
        signals
    }
}
