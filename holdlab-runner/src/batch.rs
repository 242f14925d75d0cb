//! Batch runs: one strategy over a universe of symbols.
//!
//! Symbols are independent, so they run on the rayon pool when `[batch]
//! parallel` is set. Results keep input order either way. A failing symbol is
//! recorded and logged; it never stops the batch.

use rayon::prelude::*;
use serde::Serialize;

use crate::runner::{RunError, Runner, SymbolReport};

/// A symbol that could not be backtested.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolFailure {
    pub symbol: String,
    pub error: String,
}

/// Symbols whose CAGR is strictly above `threshold` percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CagrBucket {
    pub threshold: f64,
    pub symbols: Vec<String>,
}

impl CagrBucket {
    pub fn count(&self) -> usize {
        self.symbols.len()
    }
}

/// Cross-symbol tallies over the successful runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub evaluated: usize,
    /// CAGR > 0.
    pub positive: usize,
    /// CAGR <= 0, including symbols that never traded.
    pub negative: usize,
    pub failed: usize,
    pub buckets: Vec<CagrBucket>,
}

impl BatchSummary {
    pub fn from_reports(reports: &[SymbolReport], failed: usize, thresholds: &[f64]) -> Self {
        let positive = reports.iter().filter(|r| r.cagr() > 0.0).count();
        let buckets = thresholds
            .iter()
            .map(|&threshold| CagrBucket {
                threshold,
                symbols: reports
                    .iter()
                    .filter(|r| r.cagr() > threshold)
                    .map(|r| r.symbol.clone())
                    .collect(),
            })
            .collect();
        Self {
            evaluated: reports.len(),
            positive,
            negative: reports.len() - positive,
            failed,
            buckets,
        }
    }
}

/// Everything a batch produced.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub reports: Vec<SymbolReport>,
    pub failures: Vec<SymbolFailure>,
    pub summary: BatchSummary,
}

impl BatchOutcome {
    /// Successful reports sorted by descending CAGR.
    pub fn ranked(&self) -> Vec<&SymbolReport> {
        let mut ranked: Vec<&SymbolReport> = self.reports.iter().collect();
        ranked.sort_by(|a, b| b.cagr().total_cmp(&a.cagr()));
        ranked
    }
}

/// Run every symbol and tally the results.
pub fn run_batch(runner: &Runner, symbols: &[String]) -> BatchOutcome {
    let parallel = runner.config().batch.parallel;
    tracing::info!(
        symbols = symbols.len(),
        parallel,
        strategy = runner.source().name(),
        "starting batch"
    );

    let results: Vec<(&String, Result<SymbolReport, RunError>)> = if parallel {
        symbols.par_iter().map(|s| (s, runner.run(s))).collect()
    } else {
        symbols.iter().map(|s| (s, runner.run(s))).collect()
    };

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (symbol, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "symbol failed");
                failures.push(SymbolFailure {
                    symbol: symbol.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    let summary = BatchSummary::from_reports(
        &reports,
        failures.len(),
        &runner.config().batch.cagr_thresholds,
    );
    tracing::info!(
        evaluated = summary.evaluated,
        positive = summary.positive,
        negative = summary.negative,
        failed = summary.failed,
        "batch complete"
    );

    BatchOutcome {
        reports,
        failures,
        summary,
    }
}
