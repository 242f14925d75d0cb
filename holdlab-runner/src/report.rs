//! Human-readable reports for the terminal.

use holdlab_core::domain::Trade;
use holdlab_core::summary::SummaryStatistics;

use crate::batch::{BatchOutcome, BatchSummary};
use crate::runner::SymbolReport;

/// Performance summary block for one run.
pub fn format_summary(stats: &SummaryStatistics) -> String {
    let mut out = String::from("Performance Summary\n");
    out.push_str(&format!("  Total Trades:             {}\n", stats.total_trades));
    out.push_str(&format!("  Win Rate:                 {:.2}%\n", stats.win_rate));
    out.push_str(&format!("  Total Return:             {:.2}\n", stats.total_pnl));
    out.push_str(&format!("  Return on Capital:        {:.2}%\n", stats.return_on_capital));
    out.push_str(&format!("  Average Return per Trade: {:.2}\n", stats.mean_pnl));
    out.push_str(&format!("  Annualized Return (CAGR): {:.2}%\n", stats.cagr));
    if let (Some(first), Some(last)) = (stats.first_entry, stats.last_exit) {
        out.push_str(&format!(
            "  Trading Span:             {first} to {last} ({:.2} years)\n",
            stats.years
        ));
    }
    out
}

/// Trade tape as an aligned text table.
pub fn format_trades(trades: &[Trade]) -> String {
    if trades.is_empty() {
        return "No trades.\n".to_string();
    }
    let mut out = format!(
        "{:<6} {:<10} {:>10} {:<10} {:>10} {:>8} {:>12} {:>8} {:>14}\n",
        "Signal", "Entry", "Price", "Exit", "Price", "Qty", "PnL", "Ret %", "Equity"
    );
    for t in trades {
        out.push_str(&format!(
            "{:<6} {:<10} {:>10.2} {:<10} {:>10.2} {:>8.0} {:>12.2} {:>8.2} {:>14.2}\n",
            t.direction.label(),
            t.entry_date,
            t.entry_price,
            t.exit_date,
            t.exit_price,
            t.quantity,
            t.pnl,
            t.return_pct,
            t.equity
        ));
    }
    out
}

/// Full single-symbol report: header, skip tallies, summary.
pub fn format_symbol_report(report: &SymbolReport) -> String {
    let mut out = format!(
        "{} | {} | {} bars ({:?}) | holding {} bars | capital {:.2}\n",
        report.symbol,
        report.strategy,
        report.bar_count,
        report.data_source,
        report.result.holding_period,
        report.result.initial_capital
    );
    let skips = report.result.skip_counts();
    if skips.is_empty() {
        out.push_str(&format!("Signals: {}\n", report.result.signal_count()));
    } else {
        let parts: Vec<String> = skips.iter().map(|(k, n)| format!("{k}={n}")).collect();
        out.push_str(&format!(
            "Signals: {} ({} skipped: {})\n",
            report.result.signal_count(),
            report.result.skipped_count(),
            parts.join(", ")
        ));
    }
    out.push('\n');
    out.push_str(&format_summary(&report.summary));
    out
}

/// Batch summary: positive/negative counts and CAGR buckets.
pub fn format_batch_summary(summary: &BatchSummary) -> String {
    let mut out = String::from("Batch Summary\n");
    out.push_str(&format!("  Evaluated:           {}\n", summary.evaluated));
    out.push_str(&format!("  Positive CAGR:       {}\n", summary.positive));
    out.push_str(&format!("  Negative CAGR:       {}\n", summary.negative));
    if summary.failed > 0 {
        out.push_str(&format!("  Failed:              {}\n", summary.failed));
    }
    for bucket in &summary.buckets {
        out.push_str(&format!(
            "  CAGR > {:>5.1}%:       {} [{}]\n",
            bucket.threshold,
            bucket.count(),
            bucket.symbols.join(", ")
        ));
    }
    out
}

/// Batch summary followed by failure diagnostics.
pub fn format_batch(outcome: &BatchOutcome) -> String {
    let mut out = format_batch_summary(&outcome.summary);
    if !outcome.failures.is_empty() {
        out.push_str("\nFailures\n");
        for f in &outcome.failures {
            out.push_str(&format!("  {}: {}\n", f.symbol, f.error));
        }
    }
    out
}
