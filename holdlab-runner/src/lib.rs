//! HoldLab Runner: backtest orchestration, batch runs, reports and export.
//!
//! This crate builds on `holdlab-core` to provide:
//! - TOML configuration with strategy selection and validation
//! - Single-symbol runner (fetch, generate signals, simulate, summarize)
//! - Parallel batch runner with CAGR bucketing
//! - Text reports and CSV/JSON artifact export

pub mod batch;
pub mod config;
pub mod export;
pub mod report;
pub mod runner;

pub use batch::{run_batch, BatchOutcome, BatchSummary, CagrBucket, SymbolFailure};
pub use config::{BacktestConfig, ConfigError, StrategyConfig};
pub use export::{save_batch, save_run};
pub use runner::{run_prices, RunError, Runner, SymbolReport, SCHEMA_VERSION};
