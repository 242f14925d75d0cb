//! Summary statistics: pure functions over a closed-trade list.
//!
//! Every metric is a pure function: trades (and the initial capital) in,
//! scalar out. Degenerate inputs yield 0, never NaN or infinity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Trade;

/// Days per year used to annualize the trade span.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Aggregate performance of a single backtest.
///
/// Percentages are expressed in percent (5.0 means 5%), matching the
/// trade-level `return_pct`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub win_rate: f64,
    pub total_pnl: f64,
    pub return_on_capital: f64,
    pub mean_pnl: f64,
    pub cagr: f64,
    /// Earliest trade entry (CAGR anchor).
    pub first_entry: Option<NaiveDate>,
    /// Latest trade exit (CAGR anchor).
    pub last_exit: Option<NaiveDate>,
    /// Annualization span in years; 1.0 when there are no trades.
    pub years: f64,
}

impl SummaryStatistics {
    /// Compute all statistics from a trade list.
    pub fn compute(trades: &[Trade], initial_capital: f64) -> Self {
        let total = total_pnl(trades);
        let years = span_years(trades);
        Self {
            total_trades: trades.len(),
            winning_trades: trades.iter().filter(|t| t.is_winner()).count(),
            win_rate: win_rate(trades),
            total_pnl: total,
            return_on_capital: return_on_capital(total, initial_capital),
            mean_pnl: mean_pnl(trades),
            cagr: cagr(trades.len(), total, initial_capital, years),
            first_entry: trades.iter().map(|t| t.entry_date).min(),
            last_exit: trades.iter().map(|t| t.exit_date).max(),
            years,
        }
    }
}

/// Alias for [`SummaryStatistics::compute`].
pub fn summarize(trades: &[Trade], initial_capital: f64) -> SummaryStatistics {
    SummaryStatistics::compute(trades, initial_capital)
}

// ─── Individual metric functions ────────────────────────────────────

/// Percentage of trades with positive PnL. Breakeven trades are not wins.
pub fn win_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / trades.len() as f64 * 100.0
}

/// Sum of realized PnL.
pub fn total_pnl(trades: &[Trade]) -> f64 {
    trades.iter().map(|t| t.pnl).sum()
}

/// Total PnL as a percentage of the initial capital.
pub fn return_on_capital(total_pnl: f64, initial_capital: f64) -> f64 {
    if initial_capital <= 0.0 {
        return 0.0;
    }
    total_pnl / initial_capital * 100.0
}

/// Mean PnL per trade.
pub fn mean_pnl(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    total_pnl(trades) / trades.len() as f64
}

/// Years between the first entry and the last exit.
///
/// Defaults to 1.0 with no trades. A single-day span yields 0.0.
pub fn span_years(trades: &[Trade]) -> f64 {
    let first = trades.iter().map(|t| t.entry_date).min();
    let last = trades.iter().map(|t| t.exit_date).max();
    match (first, last) {
        (Some(first), Some(last)) => (last - first).num_days() as f64 / DAYS_PER_YEAR,
        _ => 1.0,
    }
}

/// Compound annual growth rate, in percent.
///
/// Treats first-entry → last-exit as one compounding period, as if capital were
/// invested throughout, idle gaps included. Returns 0.0 with no trades, a
/// non-positive span, or a non-finite result. Returns -100.0 once the account
/// is wiped out, where the fractional power is undefined.
pub fn cagr(trade_count: usize, total_pnl: f64, initial_capital: f64, years: f64) -> f64 {
    if trade_count == 0 || years <= 0.0 || initial_capital <= 0.0 {
        return 0.0;
    }
    let growth = 1.0 + total_pnl / initial_capital;
    if growth <= 0.0 {
        return -100.0;
    }
    let rate = (growth.powf(1.0 / years) - 1.0) * 100.0;
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;

    fn trade(entry: NaiveDate, exit: NaiveDate, pnl: f64) -> Trade {
        Trade {
            direction: Direction::Long,
            entry_bar: 0,
            entry_date: entry,
            entry_price: 100.0,
            exit_bar: 5,
            exit_date: exit,
            exit_price: 100.0 + pnl / 10.0,
            quantity: 10.0,
            capital_deployed: 1000.0,
            pnl,
            return_pct: pnl / 10.0,
            equity: 1000.0 + pnl,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_trades_are_all_zero() {
        let s = summarize(&[], 100_000.0);
        assert_eq!(s.total_trades, 0);
        assert_eq!(s.win_rate, 0.0);
        assert_eq!(s.total_pnl, 0.0);
        assert_eq!(s.mean_pnl, 0.0);
        assert_eq!(s.cagr, 0.0);
        assert_eq!(s.years, 1.0);
        assert!(s.first_entry.is_none());
    }

    #[test]
    fn win_rate_excludes_breakeven() {
        let d = ymd(2024, 1, 1);
        let trades = vec![trade(d, d, 10.0), trade(d, d, 0.0), trade(d, d, -5.0), trade(d, d, 3.0)];
        assert!((win_rate(&trades) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn exactly_one_year_doubles() {
        // 2021-01-01 → 2022-01-01 is 365 days.
        let trades = vec![trade(ymd(2021, 1, 1), ymd(2022, 1, 1), 1000.0)];
        let s = summarize(&trades, 1000.0);
        assert!((s.years - 1.0).abs() < 1e-12);
        assert!((s.cagr - 100.0).abs() < 1e-9);
        assert!((s.return_on_capital - 100.0).abs() < 1e-12);
    }

    #[test]
    fn two_years_annualizes() {
        // 730 days, 21% total return → 10% per year.
        let trades = vec![
            trade(ymd(2020, 1, 1), ymd(2020, 6, 1), 100.0),
            trade(ymd(2020, 7, 1), ymd(2021, 12, 31), 110.0),
        ];
        let s = summarize(&trades, 1000.0);
        assert!((s.years - 2.0).abs() < 1e-12);
        assert!((s.cagr - 10.0).abs() < 1e-9);
        assert!((s.mean_pnl - 105.0).abs() < 1e-12);
    }

    #[test]
    fn same_day_span_falls_back_to_zero() {
        let d = ymd(2024, 3, 1);
        let s = summarize(&[trade(d, d, 50.0)], 1000.0);
        assert_eq!(s.years, 0.0);
        assert_eq!(s.cagr, 0.0);
    }

    #[test]
    fn wiped_out_account_is_minus_100() {
        assert_eq!(cagr(1, -1000.0, 1000.0, 2.0), -100.0);
        assert_eq!(cagr(1, -1500.0, 1000.0, 2.0), -100.0);
    }

    #[test]
    fn overflowing_rate_is_neutral() {
        // growth 10 over one day → 10^365 overflows f64.
        assert_eq!(cagr(1, 9000.0, 1000.0, 1.0 / 365.0), 0.0);
    }

    #[test]
    fn cagr_anchors_on_trades_not_requested_window() {
        // The backtest window may be years wide; only the trade span counts.
        let trades = vec![trade(ymd(2023, 1, 1), ymd(2024, 1, 1), 100.0)];
        let s = summarize(&trades, 1000.0);
        assert_eq!(s.first_entry, Some(ymd(2023, 1, 1)));
        assert_eq!(s.last_exit, Some(ymd(2024, 1, 1)));
        assert!((s.cagr - 10.0).abs() < 1e-9);
    }

    #[test]
    fn return_on_capital_guards_zero_capital() {
        assert_eq!(return_on_capital(100.0, 0.0), 0.0);
    }
}
