//! Volume spike with price confirmation.

use crate::domain::{PriceSeries, SignalSeries};
use crate::indicators::{Indicator, PriceField, Sma};

use super::{log_signal_counts, SignalSource};

/// A spike is volume above `threshold` times its `window`-bar average.
/// On a spike: +1 if the close rose versus the previous bar, −1 otherwise.
#[derive(Debug, Clone)]
pub struct VolumeSpike {
    pub window: usize,
    pub threshold: f64,
}

impl VolumeSpike {
    pub fn new(window: usize, threshold: f64) -> Self {
        assert!(window >= 1, "volume window must be >= 1");
        assert!(threshold > 0.0, "volume threshold must be positive");
        Self { window, threshold }
    }

    pub fn default_params() -> Self {
        Self::new(20, 2.0)
    }
}

impl SignalSource for VolumeSpike {
    fn name(&self) -> &str {
        "volume_spike"
    }

    fn warmup_bars(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn generate(&self, prices: &PriceSeries) -> SignalSeries {
        let bars = prices.bars();
        let avg_volume = Sma::of(PriceField::Volume, self.window).compute(bars);
        let mut signals = SignalSeries::flat(prices);

        for (i, bar) in bars.iter().enumerate() {
            let spike = bar.volume > self.threshold * avg_volume[i];
            if !spike {
                continue;
            }
            let rising = i > 0 && bar.close > bars[i - 1].close;
            signals.insert(bar.date, if rising { 1 } else { -1 });
        }

        log_signal_counts(self.name(), prices, &signals);
        signals
    }
}
