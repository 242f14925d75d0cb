//! Consensus: several sources vote, the clamped sum decides.

use crate::domain::{PriceSeries, SignalSeries};

use super::{log_signal_counts, SignalSource};

/// Sum the series date by date and clamp the total into [−1, +1].
///
/// The result covers the union of all input dates; a source with no entry for
/// a date contributes 0 there.
pub fn combine_signals(series: &[SignalSeries]) -> SignalSeries {
    let mut totals = SignalSeries::new();
    for s in series {
        for (date, value) in s.iter() {
            totals.insert(date, totals.get(date).saturating_add(value));
        }
    }
    totals
        .iter()
        .map(|(date, total)| (date, total.clamp(-1, 1)))
        .collect()
}

/// A source that runs its members on the same prices and combines their votes.
pub struct Consensus {
    sources: Vec<Box<dyn SignalSource>>,
}

impl Consensus {
    pub fn new(sources: Vec<Box<dyn SignalSource>>) -> Self {
        Self { sources }
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.name())
    }
}

impl std::fmt::Debug for Consensus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Consensus")
            .field("sources", &self.members().collect::<Vec<_>>())
            .finish()
    }
}

impl SignalSource for Consensus {
    fn name(&self) -> &str {
        "consensus"
    }

    fn warmup_bars(&self) -> usize {
        self.sources.iter().map(|s| s.warmup_bars()).max().unwrap_or(0)
    }

    fn generate(&self, prices: &PriceSeries) -> SignalSeries {
        let votes: Vec<SignalSeries> = self.sources.iter().map(|s| s.generate(prices)).collect();
        let mut combined = combine_signals(&votes);
        // An empty member list still yields a flat series over the index.
        for date in prices.dates() {
            if combined.get(date) == 0 {
                combined.insert(date, 0);
            }
        }
        log_signal_counts(self.name(), prices, &combined);
        combined
    }
}
