//! Synthetic prices for demos and offline runs.
//!
//! A random walk from 100.0 on weekdays only, seeded from the symbol name so
//! the same symbol always yields the same bars. Clearly fake; artifacts are
//! tagged [`DataSource::Synthetic`].

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{check_range, DataError, DataSource, PriceProvider};
use crate::domain::{Bar, PriceSeries};

#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    start_price: f64,
    max_daily_move: f64,
}

impl SyntheticProvider {
    pub fn new(start_price: f64, max_daily_move: f64) -> Self {
        assert!(start_price > 0.0, "start price must be positive");
        assert!(
            max_daily_move > 0.0 && max_daily_move < 1.0,
            "max daily move must be in (0, 1)"
        );
        Self {
            start_price,
            max_daily_move,
        }
    }

    /// Bars for `symbol` on weekdays in `start <= date < end`.
    pub fn bars(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<Bar> {
        let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut bars = Vec::new();
        let mut price = self.start_price;
        let mut current = start;
        while current < end {
            if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                current += chrono::Duration::days(1);
                continue;
            }

            let daily_return: f64 = rng.gen_range(-self.max_daily_move..self.max_daily_move);
            let open = price;
            let close = price * (1.0 + daily_return);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500_000..5_000_000u64) as f64;

            bars.push(Bar {
                date: current,
                open,
                high,
                low,
                close,
                volume,
            });
            price = close;
            current += chrono::Duration::days(1);
        }
        bars
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new(100.0, 0.03)
    }
}

impl PriceProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn source(&self) -> DataSource {
        DataSource::Synthetic
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        check_range(start, end)?;
        let bars = self.bars(symbol, start, end);
        if bars.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
                start,
                end,
            });
        }
        tracing::debug!(symbol, bars = bars.len(), "generated synthetic prices");
        PriceSeries::new(symbol, bars).map_err(|source| DataError::Series {
            symbol: symbol.to_string(),
            source,
        })
    }
}
