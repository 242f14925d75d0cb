//! Price provider trait and structured error types.
//!
//! The PriceProvider trait abstracts over where bars come from (CSV exports,
//! synthetic random walks) so runners can swap implementations and tests can
//! inject fixtures.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PriceSeries, SeriesError};

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no price file for symbol '{symbol}' at {}", path.display())]
    SymbolNotFound { symbol: String, path: PathBuf },

    #[error("no bars for symbol '{symbol}' between {start} and {end}")]
    NoData {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("{}: missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{}: line {line}: {message}", path.display())]
    InvalidRow {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("invalid date range: start {start} is not before end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("symbol '{symbol}': {source}")]
    Series {
        symbol: String,
        #[source]
        source: SeriesError,
    },
}

/// Where a price series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    CsvFile,
    Synthetic,
}

/// Trait for price providers.
///
/// `fetch` returns daily bars with `start <= date < end`, ascending.
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Tag recorded on run artifacts.
    fn source(&self) -> DataSource;

    /// Fetch daily bars for a symbol over a half-open date range.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<PriceSeries, DataError>;
}

pub(crate) fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), DataError> {
    if start >= end {
        return Err(DataError::InvalidRange { start, end });
    }
    Ok(())
}
