//! Artifact export: CSV tapes and JSON manifests.
//!
//! A single run writes `<output>/<SYMBOL>_<fingerprint>/` containing:
//! - `report.json`: the full `SymbolReport` (summary, trades, outcomes)
//! - `trades.csv`: trade tape
//! - `equity.csv`: equity at each trade exit
//! - `outcomes.csv`: one row per candidate signal, executed or skipped
//! - `config.toml`: the effective configuration
//!
//! A batch writes `<output>/batch_<fingerprint>/` with `batch.json`,
//! `ranking.csv`, `config.toml` and one trade tape per symbol.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use holdlab_core::domain::{EquityPoint, Trade};
use holdlab_core::engine::{OutcomeStatus, SignalOutcome};

use crate::batch::{BatchOutcome, BatchSummary, SymbolFailure};
use crate::config::BacktestConfig;
use crate::runner::{SymbolReport, SCHEMA_VERSION};

// ─── CSV export ─────────────────────────────────────────────────────

/// Trade tape. Columns: signal, entry_date, entry_price, exit_date,
/// exit_price, quantity, capital_deployed, pnl, return_pct, equity
pub fn export_trades_csv(trades: &[Trade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "signal",
        "entry_date",
        "entry_price",
        "exit_date",
        "exit_price",
        "quantity",
        "capital_deployed",
        "pnl",
        "return_pct",
        "equity",
    ])?;
    for t in trades {
        wtr.write_record([
            t.direction.label(),
            &t.entry_date.to_string(),
            &format!("{:.6}", t.entry_price),
            &t.exit_date.to_string(),
            &format!("{:.6}", t.exit_price),
            &format!("{:.0}", t.quantity),
            &format!("{:.2}", t.capital_deployed),
            &format!("{:.2}", t.pnl),
            &format!("{:.4}", t.return_pct),
            &format!("{:.2}", t.equity),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Equity curve sampled at trade exits.
pub fn export_equity_csv(curve: &[EquityPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "equity"])?;
    for p in curve {
        wtr.write_record([&p.date.to_string(), &format!("{:.2}", p.equity)])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Per-signal outcomes. `detail` is the trade index or the skip message.
pub fn export_outcomes_csv(outcomes: &[SignalOutcome]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "value", "status", "detail"])?;
    for o in outcomes {
        let (status, detail) = match &o.status {
            OutcomeStatus::Executed { trade_index } => ("executed", trade_index.to_string()),
            OutcomeStatus::Skipped { reason } => (reason.kind(), reason.to_string()),
        };
        wtr.write_record([o.date.to_string().as_str(), &o.value.to_string(), status, &detail])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// One row per successful symbol, best CAGR first.
pub fn export_ranking_csv(outcome: &BatchOutcome) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "symbol",
        "trades",
        "win_rate",
        "total_pnl",
        "return_on_capital",
        "cagr",
    ])?;
    for r in outcome.ranked() {
        let s = &r.summary;
        wtr.write_record([
            &r.symbol,
            &s.total_trades.to_string(),
            &format!("{:.2}", s.win_rate),
            &format!("{:.2}", s.total_pnl),
            &format!("{:.2}", s.return_on_capital),
            &format!("{:.2}", s.cagr),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `SymbolReport` to pretty JSON.
pub fn export_report_json(report: &SymbolReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize SymbolReport to JSON")
}

#[derive(Serialize)]
struct BatchManifest<'a> {
    schema_version: u32,
    fingerprint: &'a str,
    strategy: String,
    summary: &'a BatchSummary,
    failures: &'a [SymbolFailure],
}

// ─── Artifact bundles ───────────────────────────────────────────────

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create artifact dir: {}", dir.display()))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn write_config(dir: &Path, config: &BacktestConfig) -> Result<()> {
    let text = config.to_toml().context("failed to serialize config")?;
    write_file(&dir.join("config.toml"), &text)
}

/// Save the full artifact set for a single symbol. Returns the directory.
pub fn save_run(report: &SymbolReport, config: &BacktestConfig, output_dir: &Path) -> Result<PathBuf> {
    let fingerprint = config.fingerprint().context("failed to fingerprint config")?;
    let run_dir = output_dir.join(format!("{}_{fingerprint}", report.symbol));
    create_dir(&run_dir)?;

    write_file(&run_dir.join("report.json"), &export_report_json(report)?)?;
    write_file(
        &run_dir.join("trades.csv"),
        &export_trades_csv(&report.result.trades)?,
    )?;
    write_file(
        &run_dir.join("equity.csv"),
        &export_equity_csv(&report.result.equity_curve)?,
    )?;
    write_file(
        &run_dir.join("outcomes.csv"),
        &export_outcomes_csv(&report.result.outcomes)?,
    )?;
    write_config(&run_dir, config)?;

    tracing::info!(dir = %run_dir.display(), "artifacts written");
    Ok(run_dir)
}

/// Save batch-level artifacts plus each symbol's trade tape.
pub fn save_batch(outcome: &BatchOutcome, config: &BacktestConfig, output_dir: &Path) -> Result<PathBuf> {
    let fingerprint = config.fingerprint().context("failed to fingerprint config")?;
    let batch_dir = output_dir.join(format!("batch_{fingerprint}"));
    create_dir(&batch_dir)?;

    let manifest = BatchManifest {
        schema_version: SCHEMA_VERSION,
        fingerprint: &fingerprint,
        strategy: config.strategy.label(),
        summary: &outcome.summary,
        failures: &outcome.failures,
    };
    let json = serde_json::to_string_pretty(&manifest).context("failed to serialize batch manifest")?;
    write_file(&batch_dir.join("batch.json"), &json)?;
    write_file(&batch_dir.join("ranking.csv"), &export_ranking_csv(outcome)?)?;
    write_config(&batch_dir, config)?;

    let trades_dir = batch_dir.join("trades");
    create_dir(&trades_dir)?;
    for r in &outcome.reports {
        write_file(
            &trades_dir.join(format!("{}.csv", r.symbol)),
            &export_trades_csv(&r.result.trades)?,
        )?;
    }

    tracing::info!(dir = %batch_dir.display(), symbols = outcome.reports.len(), "batch artifacts written");
    Ok(batch_dir)
}
