//! Trade: a completed fixed-holding round trip, and the equity point it leaves behind.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::signal::Direction;

/// A closed round trip: entry on the signal bar, exit `holding_period` bars later.
///
/// Created once by the simulator and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub direction: Direction,

    // ── Entry ──
    pub entry_bar: usize,
    pub entry_date: NaiveDate,
    pub entry_price: f64,

    // ── Exit ──
    pub exit_bar: usize,
    pub exit_date: NaiveDate,
    pub exit_price: f64,

    // ── Size ──
    /// Whole units bought (or sold short). Kept as `f64` so very large
    /// accounts never truncate the unit count.
    pub quantity: f64,
    /// `quantity * entry_price`.
    pub capital_deployed: f64,

    // ── Result ──
    pub pnl: f64,
    /// `pnl / capital_deployed * 100`.
    pub return_pct: f64,
    /// Account equity immediately after this trade closed.
    pub equity: f64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }

    pub fn bars_held(&self) -> usize {
        self.exit_bar - self.entry_bar
    }

    /// Equity before this trade opened.
    pub fn equity_at_entry(&self) -> f64 {
        self.equity - self.pnl
    }
}

/// Account equity sampled at a trade's exit date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

impl From<&Trade> for EquityPoint {
    fn from(trade: &Trade) -> Self {
        Self {
            date: trade.exit_date,
            equity: trade.equity,
        }
    }
}
