//! Price data sources and symbol universes.

pub mod csv_provider;
pub mod provider;
pub mod synthetic;
pub mod universe;

pub use csv_provider::CsvDirectoryProvider;
pub use provider::{DataError, DataSource, PriceProvider};
pub use synthetic::SyntheticProvider;
pub use universe::{load_symbols, symbols_from_reader};
