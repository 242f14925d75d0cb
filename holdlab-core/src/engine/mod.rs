//! Backtesting engine: fixed-holding trade simulation.
//!
//! The engine consumes a validated price series and a signal series and
//! produces closed trades, an equity curve and one outcome per candidate
//! signal:
//!
//! 1. Non-zero signals are taken in ascending date order
//! 2. A signal inside the previous position's window (up to and including its exit day) is skipped
//! 3. Entry at the signal bar's close, exit `holding_period` bars later at close
//! 4. Whole-unit sizing with all available capital; PnL compounds

pub mod outcome;
pub mod result;
pub mod simulator;

pub use outcome::{OutcomeStatus, SignalOutcome, SkipReason};
pub use result::BacktestResult;
pub use simulator::{simulate, SimulationConfig, SimulationError};
