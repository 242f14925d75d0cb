//! Per-signal outcomes: what the simulator did with each candidate signal.
//!
//! Every non-zero signal produces exactly one outcome. Skips are values, not
//! errors: they are recorded, logged, and never abort the run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a candidate signal did not open a trade.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("signal value {value} is not +1 or -1")]
    UnrecognizedSignal { value: i32 },

    #[error("previous position is held until {last_exit}")]
    OverlapsOpenPosition { last_exit: NaiveDate },

    #[error("date is not in the price index")]
    DateNotInPriceIndex,

    #[error("exit bar {exit_index} is beyond the {bars} available bars")]
    InsufficientHorizon { exit_index: usize, bars: usize },

    #[error("no tradable close on {date} (got {price})")]
    InvalidPrice { date: NaiveDate, price: f64 },

    #[error("capital {capital:.2} cannot buy one unit at {entry_price:.2}")]
    InsufficientCapital { capital: f64, entry_price: f64 },
}

impl SkipReason {
    /// Stable short name, used for tallies and CSV columns.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnrecognizedSignal { .. } => "unrecognized_signal",
            Self::OverlapsOpenPosition { .. } => "overlaps_open_position",
            Self::DateNotInPriceIndex => "date_not_in_price_index",
            Self::InsufficientHorizon { .. } => "insufficient_horizon",
            Self::InvalidPrice { .. } => "invalid_price",
            Self::InsufficientCapital { .. } => "insufficient_capital",
        }
    }

    /// Lookup failures point at bad input data rather than routine sequencing.
    pub fn is_data_fault(&self) -> bool {
        matches!(self, Self::InvalidPrice { .. })
    }
}

/// Executed or skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Executed { trade_index: usize },
    Skipped { reason: SkipReason },
}

/// The simulator's verdict on one candidate signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalOutcome {
    pub date: NaiveDate,
    pub value: i32,
    pub status: OutcomeStatus,
}

impl SignalOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Executed { .. })
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.status {
            OutcomeStatus::Skipped { reason } => Some(reason),
            OutcomeStatus::Executed { .. } => None,
        }
    }
}
