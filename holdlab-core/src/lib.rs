//! HoldLab Core: fixed-holding-period signal backtesting.
//!
//! This crate contains the engine and everything it needs:
//! - Domain types (bars, price series, signal series, trades)
//! - Signal sources producing −1/0/+1 per date, plus consensus combination
//! - The simulator: enter at the signal close, exit N bars later, compound
//! - Summary statistics including CAGR
//! - Price providers (CSV directory, synthetic) and symbol universes

pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod signals;
pub mod summary;

pub use domain::{Bar, Direction, PriceSeries, SignalSeries, Trade};
pub use engine::{simulate, BacktestResult, SimulationConfig, SimulationError};
pub use signals::SignalSource;
pub use summary::SummaryStatistics;
