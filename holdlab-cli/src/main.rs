//! HoldLab CLI: single-symbol and batch backtests.
//!
//! Commands:
//! - `run`: backtest one symbol and print its report
//! - `batch`: backtest a universe of symbols and print CAGR buckets

mod logging;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use holdlab_core::data::load_symbols;
use holdlab_runner::report::{format_batch, format_symbol_report, format_trades};
use holdlab_runner::{run_batch, save_batch, save_run, BacktestConfig, Runner, StrategyConfig};

#[derive(Parser)]
#[command(
    name = "holdlab",
    version,
    about = "HoldLab CLI: fixed-holding-period signal backtester"
)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Backtest a single symbol.
    Run {
        /// Ticker symbol (e.g., AAPL).
        symbol: String,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Backtest every symbol in a universe.
    Batch {
        /// Symbols to backtest. Ignored when --symbols-file is given.
        symbols: Vec<String>,

        /// CSV file with a `Symbol` column.
        #[arg(long)]
        symbols_file: Option<PathBuf>,

        /// Run symbols one at a time instead of on the thread pool.
        #[arg(long, default_value_t = false)]
        sequential: bool,

        #[command(flatten)]
        common: CommonArgs,
    },
}

/// Flags shared by every command. Each one overrides the config file.
#[derive(Args)]
struct CommonArgs {
    /// TOML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Strategy name, or `consensus:a,b,...` to combine several.
    #[arg(long)]
    strategy: Option<String>,

    /// Bars each position is held.
    #[arg(long)]
    holding_days: Option<usize>,

    /// Starting capital.
    #[arg(long)]
    capital: Option<f64>,

    /// First date of the window (YYYY-MM-DD, inclusive).
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End of the window (YYYY-MM-DD, exclusive).
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Directory of `<SYMBOL>.csv` price files.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Use deterministic synthetic prices instead of CSV files.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Write artifacts (JSON + CSV) under this directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl CommonArgs {
    /// Load the config file (or defaults) and apply flag overrides.
    fn resolve(&self) -> Result<BacktestConfig> {
        let mut config = match &self.config {
            Some(path) => BacktestConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => BacktestConfig::default(),
        };

        if let Some(name) = &self.strategy {
            config.strategy = name
                .parse::<StrategyConfig>()
                .with_context(|| format!("invalid --strategy '{name}'"))?;
        }
        if let Some(days) = self.holding_days {
            config.backtest.holding_days = days;
        }
        if let Some(capital) = self.capital {
            config.backtest.initial_capital = capital;
        }
        if let Some(start) = self.start {
            config.backtest.start_date = start;
        }
        if let Some(end) = self.end {
            config.backtest.end_date = end;
        }
        if let Some(dir) = &self.data_dir {
            config.data.dir = dir.clone();
        }
        if self.synthetic {
            config.data.synthetic = true;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_json);

    match cli.command {
        Commands::Run { symbol, common } => run_symbol_cmd(&symbol, &common),
        Commands::Batch {
            symbols,
            symbols_file,
            sequential,
            common,
        } => run_batch_cmd(symbols, symbols_file, sequential, &common),
    }
}

fn run_symbol_cmd(symbol: &str, common: &CommonArgs) -> Result<()> {
    let config = common.resolve()?;
    let runner = Runner::from_config(config.clone())?;
    let report = runner
        .run(symbol)
        .with_context(|| format!("backtest failed for {symbol}"))?;

    print!("{}", format_symbol_report(&report));
    println!();
    print!("{}", format_trades(&report.result.trades));

    if let Some(output_dir) = &common.output_dir {
        let run_dir = save_run(&report, &config, output_dir)?;
        println!("\nArtifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn run_batch_cmd(
    symbols: Vec<String>,
    symbols_file: Option<PathBuf>,
    sequential: bool,
    common: &CommonArgs,
) -> Result<()> {
    let mut config = common.resolve()?;
    if sequential {
        config.batch.parallel = false;
    }

    let symbols = match symbols_file {
        Some(path) => load_symbols(&path)
            .with_context(|| format!("failed to load symbols from {}", path.display()))?,
        None => symbols,
    };
    if symbols.is_empty() {
        bail!("no symbols given; pass symbols or --symbols-file");
    }

    let runner = Runner::from_config(config.clone())?;
    let outcome = run_batch(&runner, &symbols);

    print!("{}", format_batch(&outcome));

    if let Some(output_dir) = &common.output_dir {
        let batch_dir = save_batch(&outcome, &config, output_dir)?;
        println!("\nArtifacts saved to: {}", batch_dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "holdlab",
            "run",
            "AAPL",
            "--strategy",
            "consensus:macd,rsi_reversal",
            "--holding-days",
            "10",
            "--capital",
            "5000",
            "--start",
            "2021-01-01",
            "--synthetic",
        ]);
        let Commands::Run { symbol, common } = cli.command else {
            panic!("expected run");
        };
        assert_eq!(symbol, "AAPL");
        let config = common.resolve().unwrap();
        assert_eq!(config.backtest.holding_days, 10);
        assert_eq!(config.backtest.initial_capital, 5000.0);
        assert_eq!(config.backtest.start_date, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert!(config.data.synthetic);
        assert_eq!(config.strategy.label(), "consensus(macd+rsi_reversal)");
    }

    #[test]
    fn zero_holding_days_is_rejected() {
        let cli = Cli::parse_from(["holdlab", "run", "X", "--holding-days", "0"]);
        let Commands::Run { common, .. } = cli.command else {
            panic!("expected run");
        };
        assert!(common.resolve().is_err());
    }
}
