//! Backtest runner: wires together config, price provider, signal source,
//! simulator and summary.
//!
//! Two entry points:
//! - `Runner::run()`: fetches prices for one symbol, then backtests. Used by CLI.
//! - `run_prices()`: takes an already-loaded series. Used by tests and callers
//!   with their own data.

use serde::Serialize;
use thiserror::Error;

use holdlab_core::data::{DataError, DataSource, PriceProvider};
use holdlab_core::domain::PriceSeries;
use holdlab_core::engine::{simulate, BacktestResult, SimulationConfig, SimulationError};
use holdlab_core::signals::SignalSource;
use holdlab_core::summary::SummaryStatistics;

use crate::config::{BacktestConfig, ConfigError};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("simulation error: {0}")]
    Simulation(#[from] SimulationError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Everything one symbol's backtest produced.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolReport {
    pub schema_version: u32,
    pub symbol: String,
    pub strategy: String,
    pub data_source: DataSource,
    pub bar_count: usize,
    pub first_bar: Option<chrono::NaiveDate>,
    pub last_bar: Option<chrono::NaiveDate>,
    pub summary: SummaryStatistics,
    pub result: BacktestResult,
}

impl SymbolReport {
    pub fn cagr(&self) -> f64 {
        self.summary.cagr
    }
}

/// A configured strategy plus its price source, reusable across symbols.
pub struct Runner {
    config: BacktestConfig,
    source: Box<dyn SignalSource>,
    provider: Box<dyn PriceProvider>,
}

impl Runner {
    /// Validate the config and build its source and provider.
    pub fn from_config(config: BacktestConfig) -> Result<Self, RunError> {
        config.validate()?;
        let source = config.strategy.build()?;
        let provider = config.provider();
        Ok(Self {
            config,
            source,
            provider,
        })
    }

    /// Use a caller-supplied provider instead of the one in `[data]`.
    pub fn with_provider(mut self, provider: Box<dyn PriceProvider>) -> Self {
        self.provider = provider;
        self
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    pub fn source(&self) -> &dyn SignalSource {
        self.source.as_ref()
    }

    /// Fetch prices for `symbol` over the configured window and backtest them.
    pub fn run(&self, symbol: &str) -> Result<SymbolReport, RunError> {
        let window = &self.config.backtest;
        tracing::info!(symbol, provider = self.provider.name(), "fetching prices");
        let prices = self
            .provider
            .fetch(symbol, window.start_date, window.end_date)?;

        tracing::info!(symbol, strategy = self.source.name(), bars = prices.len(), "running strategy");
        let (result, summary) = run_prices(&prices, self.source.as_ref(), &self.config.simulation())?;

        Ok(SymbolReport {
            schema_version: SCHEMA_VERSION,
            symbol: symbol.to_string(),
            strategy: self.config.strategy.label(),
            data_source: self.provider.source(),
            bar_count: prices.len(),
            first_bar: prices.first_date(),
            last_bar: prices.last_date(),
            summary,
            result,
        })
    }
}

/// Generate signals on `prices`, simulate, summarize.
pub fn run_prices(
    prices: &PriceSeries,
    source: &dyn SignalSource,
    config: &SimulationConfig,
) -> Result<(BacktestResult, SummaryStatistics), SimulationError> {
    let signals = source.generate(prices);
    let result = simulate(prices, &signals, config)?;
    let summary = result.summary();
    tracing::debug!(
        symbol = prices.symbol(),
        trades = summary.total_trades,
        skipped = result.skipped_count(),
        cagr = summary.cagr,
        "backtest complete"
    );
    Ok((result, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use holdlab_core::signals::StaticSignals;

    fn ramp() -> PriceSeries {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        PriceSeries::from_closes("RAMP", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), &closes)
    }

    #[test]
    fn run_prices_summarizes_with_run_capital() {
        let prices = ramp();
        let signals = [(prices.date_at(0).unwrap(), 1)].into_iter().collect();
        let source = StaticSignals::new("fixture", signals);
        let (result, summary) =
            run_prices(&prices, &source, &SimulationConfig::new(5, 1000.0)).unwrap();
        assert_eq!(result.trades.len(), 1);
        assert_eq!(summary.total_pnl, 50.0);
        assert_eq!(summary.return_on_capital, 5.0);
    }

    #[test]
    fn runner_rejects_invalid_config() {
        let mut config = BacktestConfig::default();
        config.backtest.holding_days = 0;
        assert!(matches!(
            Runner::from_config(config),
            Err(RunError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn runner_on_synthetic_data() {
        let mut config = BacktestConfig::default();
        config.data.synthetic = true;
        config.strategy = "rsi_reversal".parse().unwrap();
        let runner = Runner::from_config(config).unwrap();
        let report = runner.run("SYN").unwrap();
        assert_eq!(report.symbol, "SYN");
        assert_eq!(report.data_source, DataSource::Synthetic);
        assert_eq!(report.strategy, "rsi_reversal");
        assert!(report.bar_count > 1000);
        assert_eq!(report.summary, report.result.summary());
    }

    #[test]
    fn missing_csv_is_a_data_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = BacktestConfig::default();
        config.data.dir = tmp.path().to_path_buf();
        let runner = Runner::from_config(config).unwrap();
        assert!(matches!(
            runner.run("NOPE"),
            Err(RunError::Data(DataError::SymbolNotFound { .. }))
        ));
    }
}
