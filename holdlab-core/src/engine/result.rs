//! BacktestResult: everything a single simulation produced.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{EquityPoint, Trade};
use crate::summary::SummaryStatistics;

use super::outcome::SignalOutcome;
use super::simulator::SimulationConfig;

/// Trades, equity curve and per-signal outcomes of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub symbol: String,
    pub holding_period: usize,
    pub initial_capital: f64,
    pub final_capital: f64,
    pub trades: Vec<Trade>,
    /// One point per trade, at its exit date.
    pub equity_curve: Vec<EquityPoint>,
    /// One entry per non-zero signal, in date order.
    pub outcomes: Vec<SignalOutcome>,
}

impl BacktestResult {
    pub(crate) fn new(
        symbol: &str,
        config: &SimulationConfig,
        final_capital: f64,
        trades: Vec<Trade>,
        outcomes: Vec<SignalOutcome>,
    ) -> Self {
        let equity_curve = trades.iter().map(EquityPoint::from).collect();
        Self {
            symbol: symbol.to_string(),
            holding_period: config.holding_period,
            initial_capital: config.initial_capital,
            final_capital,
            trades,
            equity_curve,
            outcomes,
        }
    }

    pub fn signal_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_executed()).count()
    }

    /// Skip tallies keyed by [`SkipReason::kind`](super::SkipReason::kind).
    pub fn skip_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for reason in self.outcomes.iter().filter_map(|o| o.skip_reason()) {
            *counts.entry(reason.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Summary statistics against this run's own initial capital.
    pub fn summary(&self) -> SummaryStatistics {
        SummaryStatistics::compute(&self.trades, self.initial_capital)
    }
}
