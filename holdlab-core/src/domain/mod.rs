//! Domain types for HoldLab

pub mod bar;
pub mod price_series;
pub mod signal;
pub mod trade;

pub use bar::Bar;
pub use price_series::{PriceSeries, SeriesError};
pub use signal::{Direction, SignalSeries};
pub use trade::{EquityPoint, Trade};
