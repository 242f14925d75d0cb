//! CSV directory provider: one `<SYMBOL>.csv` per symbol.
//!
//! Expected columns (header names are case-insensitive, extra columns ignored):
//! `Date, Open, High, Low, Close, Volume`. Dates are `YYYY-MM-DD`, optionally
//! followed by a time component. Rows with a missing value are dropped; a value
//! that is present but unparseable is an error.
//! Rows must already be in ascending date order; they are never re-sorted.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::StringRecord;

use super::provider::{check_range, DataError, DataSource, PriceProvider};
use crate::domain::{Bar, PriceSeries};

const COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

#[derive(Debug, Clone)]
pub struct CsvDirectoryProvider {
    dir: PathBuf,
}

impl CsvDirectoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the provider reads for `symbol`.
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }
}

impl PriceProvider for CsvDirectoryProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn source(&self) -> DataSource {
        DataSource::CsvFile
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        check_range(start, end)?;
        let path = self.path_for(symbol);
        if !path.is_file() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
                path,
            });
        }

        let (mut bars, dropped) = read_bars(&path)?;
        bars.retain(|b| b.date >= start && b.date < end);

        if dropped > 0 {
            tracing::warn!(symbol, dropped, path = %path.display(), "dropped rows with missing values");
        }
        if bars.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
                start,
                end,
            });
        }
        tracing::debug!(symbol, bars = bars.len(), "loaded csv prices");

        PriceSeries::new(symbol, bars).map_err(|source| DataError::Series {
            symbol: symbol.to_string(),
            source,
        })
    }
}

/// Read every complete row of a price file. Returns the bars and the number of
/// rows dropped for missing values.
pub fn read_bars(path: &Path) -> Result<(Vec<Bar>, usize), DataError> {
    let csv_err = |source: csv::Error| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    let mut index = [0usize; 6];
    for (slot, column) in index.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column))
            .ok_or_else(|| DataError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            })?;
    }

    let mut bars = Vec::new();
    let mut dropped = 0;
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        match parse_row(&record, &index) {
            Ok(Some(bar)) => bars.push(bar),
            Ok(None) => dropped += 1,
            Err(message) => {
                return Err(DataError::InvalidRow {
                    path: path.to_path_buf(),
                    line: record.position().map_or(0, |p| p.line()),
                    message,
                })
            }
        }
    }
    Ok((bars, dropped))
}

/// `Ok(None)` when any field is missing.
fn parse_row(record: &StringRecord, index: &[usize; 6]) -> Result<Option<Bar>, String> {
    let field = |i: usize| record.get(index[i]).unwrap_or("");
    if (0..6).any(|i| is_missing(field(i))) {
        return Ok(None);
    }

    let raw_date = field(0);
    let date_part = raw_date.get(..10).unwrap_or(raw_date);
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| format!("bad date '{raw_date}': {e}"))?;

    let mut values = [0.0f64; 5];
    for (slot, i) in values.iter_mut().zip(1..6) {
        let raw = field(i);
        *slot = raw
            .parse::<f64>()
            .map_err(|e| format!("bad {} '{raw}': {e}", COLUMNS[i]))?;
        if slot.is_nan() {
            return Ok(None);
        }
    }
    let [open, high, low, close, volume] = values;

    Ok(Some(Bar {
        date,
        open,
        high,
        low,
        close,
        volume,
    }))
}

fn is_missing(value: &str) -> bool {
    value.is_empty()
        || value.eq_ignore_ascii_case("nan")
        || value.eq_ignore_ascii_case("null")
        || value.eq_ignore_ascii_case("na")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use crate::domain::SeriesError;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn write_csv(dir: &Path, symbol: &str, body: &str) {
        let mut f = std::fs::File::create(dir.join(format!("{symbol}.csv"))).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    #[test]
    fn loads_and_filters_half_open_range() {
        let tmp = tempfile::tempdir().unwrap();
        write_csv(
            tmp.path(),
            "AAA",
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-02,1,2,0.5,1.5,1.5,100\n\
             2024-01-03,1.5,2,1,1.8,1.8,200\n\
             2024-01-04,1.8,2,1,1.9,1.9,300\n",
        );
        let provider = CsvDirectoryProvider::new(tmp.path());
        let series = provider
            .fetch("AAA", d(2024, 1, 1), d(2024, 1, 4))
            .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.close_at(1), Some(1.8));
        assert_eq!(series.bar(0).unwrap().volume, 100.0);
        assert_eq!(series.symbol(), "AAA");
    }

    #[test]
    fn headers_are_case_insensitive() {
        let tmp = tempfile::tempdir().unwrap();
        write_csv(
            tmp.path(),
            "BBB",
            "close,DATE,open,high,low,volume\n\
             10,2024-01-02 00:00:00,9,11,8,2e6\n\
             11,2024-01-03 00:00:00,10,12,9,1e6\n",
        );
        let series = CsvDirectoryProvider::new(tmp.path())
            .fetch("BBB", d(2024, 1, 1), d(2025, 1, 1))
            .unwrap();
        assert_eq!(series.first_date(), Some(d(2024, 1, 2)));
        assert_eq!(series.closes(), vec![10.0, 11.0]);
        assert_eq!(series.volumes(), vec![2e6, 1e6]);
    }

    #[test]
    fn out_of_order_rows_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_csv(
            tmp.path(),
            "REV",
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-03,10,12,9,11,100\n\
             2024-01-02,9,11,8,10,100\n",
        );
        let err = CsvDirectoryProvider::new(tmp.path())
            .fetch("REV", d(2024, 1, 1), d(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            DataError::Series {
                source: SeriesError::OutOfOrder { .. },
                ..
            }
        ));
    }

    #[test]
    fn rows_with_missing_values_are_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        write_csv(
            tmp.path(),
            "CCC",
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-02,1,2,0.5,,100\n\
             2024-01-03,1,2,0.5,NaN,100\n\
             2024-01-04,1,2,0.5,1.2,100\n",
        );
        let series = CsvDirectoryProvider::new(tmp.path())
            .fetch("CCC", d(2024, 1, 1), d(2025, 1, 1))
            .unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn missing_file_is_symbol_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = CsvDirectoryProvider::new(tmp.path())
            .fetch("NOPE", d(2024, 1, 1), d(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn missing_column_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        write_csv(tmp.path(), "DDD", "Date,Open,High,Low,Close\n2024-01-02,1,1,1,1\n");
        let err = CsvDirectoryProvider::new(tmp.path())
            .fetch("DDD", d(2024, 1, 1), d(2025, 1, 1))
            .unwrap_err();
        match err {
            DataError::MissingColumn { column, .. } => assert_eq!(column, "volume"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn garbage_value_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        write_csv(
            tmp.path(),
            "EEE",
            "Date,Open,High,Low,Close,Volume\n2024-01-02,1,1,1,abc,1\n",
        );
        let err = CsvDirectoryProvider::new(tmp.path())
            .fetch("EEE", d(2024, 1, 1), d(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidRow { line: 2, .. }));
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_csv(
            tmp.path(),
            "FFF",
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-02,1,1,1,1,1\n\
             2024-01-02,1,1,1,1,1\n",
        );
        let err = CsvDirectoryProvider::new(tmp.path())
            .fetch("FFF", d(2024, 1, 1), d(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(err, DataError::Series { .. }));
    }

    #[test]
    fn empty_window_is_no_data() {
        let tmp = tempfile::tempdir().unwrap();
        write_csv(
            tmp.path(),
            "GGG",
            "Date,Open,High,Low,Close,Volume\n2024-01-02,1,1,1,1,1\n",
        );
        let err = CsvDirectoryProvider::new(tmp.path())
            .fetch("GGG", d(2023, 1, 1), d(2023, 6, 1))
            .unwrap_err();
        assert!(matches!(err, DataError::NoData { .. }));
    }
}
