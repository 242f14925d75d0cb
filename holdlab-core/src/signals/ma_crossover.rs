//! Moving average crossover: golden cross of a fast SMA over a slow SMA.

use crate::domain::{PriceSeries, SignalSeries};
use crate::indicators::{crossed_above, Indicator, Sma};

use super::{log_signal_counts, SignalSource};

/// Fires +1 on the bar where SMA(short) closes above SMA(long) after being at
/// or below it on the previous bar. Long only.
#[derive(Debug, Clone)]
pub struct MaCrossover {
    pub short_window: usize,
    pub long_window: usize,
}

impl MaCrossover {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        assert!(short_window >= 1, "short window must be >= 1");
        assert!(
            short_window < long_window,
            "short window must be less than long window"
        );
        Self {
            short_window,
            long_window,
        }
    }

    pub fn default_params() -> Self {
        Self::new(50, 200)
    }
}

impl SignalSource for MaCrossover {
    fn name(&self) -> &str {
        "ma_crossover"
    }

    fn warmup_bars(&self) -> usize {
        // One extra bar so yesterday's slow SMA exists.
        self.long_window
    }

    fn generate(&self, prices: &PriceSeries) -> SignalSeries {
        let bars = prices.bars();
        let fast = Sma::new(self.short_window).compute(bars);
        let slow = Sma::new(self.long_window).compute(bars);
        let mut signals = SignalSeries::flat(prices);

        for (i, bar) in bars.iter().enumerate() {
            if crossed_above(&fast, &slow, i) {
                signals.insert(bar.date, 1);
            }
        }

        log_signal_counts(self.name(), prices, &signals);
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn fires_once_on_golden_cross() {
        // Down then up: SMA(2) crosses above SMA(4) once.
        let closes = [10.0, 9.0, 8.0, 7.0, 6.0, 7.0, 9.0, 11.0, 12.0, 13.0];
        let prices = PriceSeries::from_closes("TEST", start(), &closes);
        let signals = MaCrossover::new(2, 4).generate(&prices);
        assert_eq!(signals.count_value(1), 1);
        assert_eq!(signals.count_value(-1), 0);

        // Locate the cross by hand.
        let fast = crate::indicators::sma::sma_of_series(&closes, 2);
        let slow = crate::indicators::sma::sma_of_series(&closes, 4);
        let idx = (1..closes.len())
            .find(|&i| fast[i] > slow[i] && fast[i - 1] <= slow[i - 1])
            .unwrap();
        assert_eq!(signals.get(start() + chrono::Duration::days(idx as i64)), 1);
    }

    #[test]
    fn no_signal_without_history() {
        let prices = PriceSeries::from_closes("TEST", start(), &[1.0, 2.0, 3.0]);
        let signals = MaCrossover::new(2, 4).generate(&prices);
        assert_eq!(signals.active().count(), 0);
    }

    #[test]
    #[should_panic(expected = "short window must be less than long window")]
    fn rejects_inverted_windows() {
        MaCrossover::new(200, 50);
    }
}
