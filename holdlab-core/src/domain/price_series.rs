//! PriceSeries: one symbol's bars on a strictly increasing date index.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use super::bar::Bar;

/// Contract violations detected while building a [`PriceSeries`].
///
/// The engine never sorts or de-duplicates bars; a bad index is rejected here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("duplicate date {date} at bar {index}")]
    DuplicateDate { date: NaiveDate, index: usize },

    #[error("date {date} at bar {index} is earlier than previous date {previous}")]
    OutOfOrder {
        previous: NaiveDate,
        date: NaiveDate,
        index: usize,
    },
}

/// Ordered daily bars for a single symbol.
///
/// Invariant: dates are unique and strictly ascending.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series, validating the date index.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, SeriesError> {
        for (index, pair) in bars.windows(2).enumerate() {
            let (prev, next) = (pair[0].date, pair[1].date);
            if next == prev {
                return Err(SeriesError::DuplicateDate {
                    date: next,
                    index: index + 1,
                });
            }
            if next < prev {
                return Err(SeriesError::OutOfOrder {
                    previous: prev,
                    date: next,
                    index: index + 1,
                });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    /// Close-only series on consecutive calendar days starting at `start`.
    pub fn from_closes(symbol: impl Into<String>, start: NaiveDate, closes: &[f64]) -> Self {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar::from_close(start + chrono::Duration::days(i as i64), close))
            .collect();
        // Consecutive days are strictly ascending by construction.
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bar(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.bars.get(index).map(|b| b.date)
    }

    pub fn close_at(&self, index: usize) -> Option<f64> {
        self.bars.get(index).map(|b| b.close)
    }

    /// Position of `date` in the index, if present.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.bars.binary_search_by_key(&date, |b| b.date).ok()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.position(date).is_some()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.bars.iter().map(|b| b.date)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }
}
