//! Signal sources: turn a price series into a −1/0/+1 series on the same index.
//!
//! Sources are portfolio-agnostic: they see bars only, never capital or open
//! positions. Any type implementing [`SignalSource`] can drive the simulator.

pub mod breakout_52w;
pub mod consensus;
pub mod ma_crossover;
pub mod macd;
pub mod rsi_reversal;
pub mod volume_spike;

use crate::domain::{PriceSeries, SignalSeries};

/// Trait for signal sources.
///
/// # Architecture invariant
/// `generate` must only use data up to and including each bar when deciding
/// that bar's signal, and must return a value for every date in the price index.
pub trait SignalSource: Send + Sync {
    /// Human-readable name (e.g., "breakout_52w").
    fn name(&self) -> &str;

    /// Number of bars needed before this source can emit a signal.
    fn warmup_bars(&self) -> usize;

    /// Produce the signal series for `prices`.
    fn generate(&self, prices: &PriceSeries) -> SignalSeries;
}

/// Null source: never signals. Used as a stub in tests that only need a
/// flat series.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSignal;

impl SignalSource for NullSignal {
    fn name(&self) -> &str {
        "null"
    }

    fn warmup_bars(&self) -> usize {
        0
    }

    fn generate(&self, prices: &PriceSeries) -> SignalSeries {
        SignalSeries::flat(prices)
    }
}

/// Signals computed elsewhere, replayed as-is.
#[derive(Debug, Clone)]
pub struct StaticSignals {
    name: String,
    signals: SignalSeries,
}

impl StaticSignals {
    pub fn new(name: impl Into<String>, signals: SignalSeries) -> Self {
        Self {
            name: name.into(),
            signals,
        }
    }
}

impl SignalSource for StaticSignals {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup_bars(&self) -> usize {
        0
    }

    fn generate(&self, _prices: &PriceSeries) -> SignalSeries {
        self.signals.clone()
    }
}

/// Log how many longs and shorts a source produced.
pub(crate) fn log_signal_counts(source: &str, prices: &PriceSeries, signals: &SignalSeries) {
    tracing::debug!(
        source,
        symbol = prices.symbol(),
        long = signals.count_value(1),
        short = signals.count_value(-1),
        "signals generated"
    );
}

// Re-export concrete source types.
pub use breakout_52w::Breakout52Week;
pub use consensus::{combine_signals, Consensus};
pub use ma_crossover::MaCrossover;
pub use macd::Macd;
pub use rsi_reversal::RsiReversal;
pub use volume_spike::VolumeSpike;
