//! SignalSeries: per-date discrete signals, plus the direction they encode.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::price_series::PriceSeries;

/// Trade direction encoded by a signal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// +1 → Long, −1 → Short. Every other value (including 0) is no action.
    pub fn from_signal(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Long),
            -1 => Some(Self::Short),
            _ => None,
        }
    }

    pub fn as_signal(self) -> i32 {
        match self {
            Self::Long => 1,
            Self::Short => -1,
        }
    }

    /// Label used on trade tapes.
    pub fn label(self) -> &'static str {
        match self {
            Self::Long => "BUY",
            Self::Short => "SELL",
        }
    }
}

/// Date → raw signal value.
///
/// Values are stored raw so that out-of-range values survive to the simulator,
/// which records them as skipped rather than silently coercing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSeries {
    values: BTreeMap<NaiveDate, i32>,
}

impl SignalSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// All-zero series over the price index.
    pub fn flat(prices: &PriceSeries) -> Self {
        Self {
            values: prices.dates().map(|d| (d, 0)).collect(),
        }
    }

    pub fn insert(&mut self, date: NaiveDate, value: i32) {
        self.values.insert(date, value);
    }

    /// Value at `date`, 0 when the date is absent.
    pub fn get(&self, date: NaiveDate) -> i32 {
        self.values.get(&date).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All entries in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, i32)> + '_ {
        self.values.iter().map(|(&d, &v)| (d, v))
    }

    /// Non-zero entries in ascending date order.
    pub fn active(&self) -> impl Iterator<Item = (NaiveDate, i32)> + '_ {
        self.iter().filter(|&(_, v)| v != 0)
    }

    pub fn count_value(&self, value: i32) -> usize {
        self.values.values().filter(|&&v| v == value).count()
    }
}

impl FromIterator<(NaiveDate, i32)> for SignalSeries {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, i32)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn direction_from_signal() {
        assert_eq!(Direction::from_signal(1), Some(Direction::Long));
        assert_eq!(Direction::from_signal(-1), Some(Direction::Short));
        assert_eq!(Direction::from_signal(0), None);
        assert_eq!(Direction::from_signal(2), None);
    }

    #[test]
    fn active_skips_zeros_in_date_order() {
        let series: SignalSeries = [(d(5), 1), (d(2), -1), (d(3), 0)].into_iter().collect();
        let active: Vec<_> = series.active().collect();
        assert_eq!(active, vec![(d(2), -1), (d(5), 1)]);
    }

    #[test]
    fn flat_covers_price_index() {
        let prices = PriceSeries::from_closes("TEST", d(1), &[1.0, 2.0, 3.0]);
        let flat = SignalSeries::flat(&prices);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat.active().count(), 0);
        assert_eq!(flat.get(d(9)), 0);
    }

    #[test]
    fn count_value() {
        let series: SignalSeries = [(d(1), 1), (d(2), 1), (d(3), -1)].into_iter().collect();
        assert_eq!(series.count_value(1), 2);
        assert_eq!(series.count_value(-1), 1);
        assert_eq!(series.count_value(0), 0);
    }
}
