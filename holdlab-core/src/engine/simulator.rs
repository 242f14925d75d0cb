//! Fixed-holding simulator.
//!
//! Walks the non-zero signals in date order and opens at most one position at a
//! time. Each position enters at the signal bar's close, exits exactly
//! `holding_period` bars later at that bar's close, and is sized with all
//! available capital in whole units. PnL compounds into the next trade.
//!
//! Running state (`capital`, `last_exit`) lives in a single call. A skipped
//! signal never touches it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Direction, PriceSeries, SignalSeries, Trade};

use super::outcome::{OutcomeStatus, SignalOutcome, SkipReason};
use super::result::BacktestResult;

/// Caller errors. Unlike [`SkipReason`], these reject the whole run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("holding period must be at least 1 bar")]
    ZeroHoldingPeriod,

    #[error("initial capital must be finite and positive, got {0}")]
    InvalidCapital(f64),
}

/// Simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Bars between entry and forced exit.
    pub holding_period: usize,
    pub initial_capital: f64,
}

impl SimulationConfig {
    pub fn new(holding_period: usize, initial_capital: f64) -> Self {
        Self {
            holding_period,
            initial_capital,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.holding_period == 0 {
            return Err(SimulationError::ZeroHoldingPeriod);
        }
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(SimulationError::InvalidCapital(self.initial_capital));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            holding_period: 5,
            initial_capital: 100_000.0,
        }
    }
}

/// Capital and the exit date of the last closed position.
#[derive(Debug, Clone, Copy)]
struct RunState {
    capital: f64,
    last_exit: Option<NaiveDate>,
}

/// Run the simulation for one symbol.
pub fn simulate(
    prices: &PriceSeries,
    signals: &SignalSeries,
    config: &SimulationConfig,
) -> Result<BacktestResult, SimulationError> {
    config.validate()?;

    let mut state = RunState {
        capital: config.initial_capital,
        last_exit: None,
    };
    let mut trades: Vec<Trade> = Vec::new();
    let mut outcomes: Vec<SignalOutcome> = Vec::new();

    for (date, value) in signals.active() {
        let status = match open_trade(prices, date, value, config.holding_period, state) {
            Ok(trade) => {
                state.capital = trade.equity;
                state.last_exit = Some(trade.exit_date);
                trades.push(trade);
                OutcomeStatus::Executed {
                    trade_index: trades.len() - 1,
                }
            }
            Err(reason) => {
                if reason.is_data_fault() {
                    warn!(symbol = prices.symbol(), %date, value, %reason, "skipping signal");
                } else {
                    debug!(symbol = prices.symbol(), %date, value, %reason, "skipping signal");
                }
                OutcomeStatus::Skipped { reason }
            }
        };
        outcomes.push(SignalOutcome {
            date,
            value,
            status,
        });
    }

    debug!(
        symbol = prices.symbol(),
        signals = outcomes.len(),
        trades = trades.len(),
        final_capital = state.capital,
        "simulation complete"
    );

    Ok(BacktestResult::new(
        prices.symbol(),
        config,
        state.capital,
        trades,
        outcomes,
    ))
}

/// Build the trade a signal would produce from `state`, or say why it can't.
fn open_trade(
    prices: &PriceSeries,
    date: NaiveDate,
    value: i32,
    holding_period: usize,
    state: RunState,
) -> Result<Trade, SkipReason> {
    let direction =
        Direction::from_signal(value).ok_or(SkipReason::UnrecognizedSignal { value })?;

    if let Some(last_exit) = state.last_exit {
        if date <= last_exit {
            return Err(SkipReason::OverlapsOpenPosition { last_exit });
        }
    }

    let entry_bar = prices
        .position(date)
        .ok_or(SkipReason::DateNotInPriceIndex)?;
    let exit_bar = entry_bar + holding_period;
    if exit_bar >= prices.len() {
        return Err(SkipReason::InsufficientHorizon {
            exit_index: exit_bar,
            bars: prices.len(),
        });
    }

    let entry = &prices.bars()[entry_bar];
    let exit = &prices.bars()[exit_bar];
    for bar in [entry, exit] {
        if !bar.has_tradable_close() {
            return Err(SkipReason::InvalidPrice {
                date: bar.date,
                price: bar.close,
            });
        }
    }

    let entry_price = entry.close;
    let exit_price = exit.close;

    let quantity = (state.capital / entry_price).floor();
    if quantity < 1.0 {
        return Err(SkipReason::InsufficientCapital {
            capital: state.capital,
            entry_price,
        });
    }

    let capital_deployed = quantity * entry_price;
    let pnl = match direction {
        Direction::Long => (exit_price - entry_price) * quantity,
        Direction::Short => (entry_price - exit_price) * quantity,
    };

    Ok(Trade {
        direction,
        entry_bar,
        entry_date: entry.date,
        entry_price,
        exit_bar,
        exit_date: exit.date,
        exit_price,
        quantity,
        capital_deployed,
        pnl,
        return_pct: pnl / capital_deployed * 100.0,
        equity: state.capital + pnl,
    })
}
