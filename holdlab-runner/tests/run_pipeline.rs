//! End-to-end pipeline: CSV prices on disk → runner → artifacts on disk.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use holdlab_core::data::load_symbols;
use holdlab_runner::{
    run_batch, save_batch, save_run, BacktestConfig, RunError, Runner, StrategyConfig,
};

/// Write `<dir>/<symbol>.csv` with a close series on consecutive weekdays.
fn write_prices(dir: &Path, symbol: &str, closes: &[f64]) {
    let mut body = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    let mut date = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
    for &c in closes {
        while matches!(
            chrono::Datelike::weekday(&date),
            chrono::Weekday::Sat | chrono::Weekday::Sun
        ) {
            date += Duration::days(1);
        }
        writeln!(body, "{date},{c},{c},{c},{c},{c},1000").unwrap();
        date += Duration::days(1);
    }
    std::fs::write(dir.join(format!("{symbol}.csv")), body).unwrap();
}

fn csv_config(dir: &Path) -> BacktestConfig {
    let mut config = BacktestConfig::from_toml(
        r#"
        [backtest]
        holding_days = 5
        initial_capital = 1000.0
        start_date = "2021-01-01"
        end_date = "2022-01-01"

        [strategy]
        type = "breakout_52w"
        lookback = 3

        [batch]
        parallel = false
        "#,
    )
    .unwrap();
    config.data.dir = dir.to_path_buf();
    config
}

#[test]
fn single_run_writes_all_artifacts() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    // Bar 3 breaks above the prior 3-bar high and exits 5 bars later.
    write_prices(
        data.path(),
        "UP",
        &[100.0, 99.0, 98.0, 101.0, 101.0, 101.0, 101.0, 101.0, 110.0, 110.0],
    );

    let config = csv_config(data.path());
    let runner = Runner::from_config(config.clone()).unwrap();
    let report = runner.run("UP").unwrap();

    assert_eq!(report.bar_count, 10);
    assert_eq!(report.result.trades.len(), 1);
    let trade = &report.result.trades[0];
    assert_eq!(trade.entry_price, 101.0);
    assert_eq!(trade.exit_price, 110.0);
    assert_eq!(trade.quantity, 9.0);
    assert_eq!(trade.pnl, 81.0);

    let dir = save_run(&report, &config, out.path()).unwrap();
    for file in ["report.json", "trades.csv", "equity.csv", "outcomes.csv", "config.toml"] {
        assert!(dir.join(file).is_file(), "missing {file}");
    }
    let saved = BacktestConfig::from_file(&dir.join("config.toml")).unwrap();
    assert_eq!(saved, config);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("report.json")).unwrap()).unwrap();
    assert_eq!(json["symbol"], "UP");
    assert_eq!(json["summary"]["total_trades"], 1);
}

#[test]
fn batch_over_universe_file() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_prices(
        data.path(),
        "WIN",
        &[100.0, 99.0, 98.0, 101.0, 101.0, 101.0, 101.0, 101.0, 150.0, 150.0],
    );
    write_prices(
        data.path(),
        "LOSE",
        &[100.0, 99.0, 98.0, 101.0, 101.0, 101.0, 101.0, 101.0, 90.0, 90.0],
    );
    write_prices(data.path(), "FLAT", &[100.0; 10]);

    let universe = data.path().join("universe.csv");
    std::fs::write(&universe, "Symbol,Name\nWIN,w\nLOSE,l\nGHOST,g\nFLAT,f\nWIN,dup\n").unwrap();
    let symbols = load_symbols(&universe).unwrap();
    assert_eq!(symbols, vec!["WIN", "LOSE", "GHOST", "FLAT"]);

    let mut config = csv_config(data.path());
    config.batch.cagr_thresholds = vec![0.5];
    let runner = Runner::from_config(config.clone()).unwrap();
    let outcome = run_batch(&runner, &symbols);

    assert_eq!(outcome.summary.evaluated, 3);
    assert_eq!(outcome.summary.positive, 1);
    assert_eq!(outcome.summary.negative, 2);
    assert_eq!(outcome.summary.failed, 1);
    assert_eq!(outcome.failures[0].symbol, "GHOST");
    assert_eq!(outcome.summary.buckets[0].symbols, vec!["WIN"]);

    let dir = save_batch(&outcome, &config, out.path()).unwrap();
    assert!(dir.join("batch.json").is_file());
    assert!(dir.join("trades").join("WIN.csv").is_file());
    let ranking = std::fs::read_to_string(dir.join("ranking.csv")).unwrap();
    let first_row = ranking.lines().nth(1).unwrap();
    assert!(first_row.starts_with("WIN,"));
}

#[test]
fn strategy_override_changes_the_fingerprint() {
    let data = tempfile::tempdir().unwrap();
    let a = csv_config(data.path());
    let mut b = a.clone();
    b.strategy = StrategyConfig::from_name("macd").unwrap();
    assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
}

#[test]
fn window_without_bars_is_a_data_error() {
    let data = tempfile::tempdir().unwrap();
    write_prices(data.path(), "OLD", &[1.0, 2.0, 3.0]);
    let mut config = csv_config(data.path());
    config.backtest.start_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    config.backtest.end_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let runner = Runner::from_config(config).unwrap();
    assert!(matches!(runner.run("OLD"), Err(RunError::Data(_))));
}
