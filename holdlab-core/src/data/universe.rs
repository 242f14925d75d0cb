//! Symbol universes: a CSV file with a `Symbol` column.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use super::provider::DataError;

/// Load symbols from a CSV file.
///
/// Blank entries and repeats are dropped; first-seen order is kept.
pub fn load_symbols(path: &Path) -> Result<Vec<String>, DataError> {
    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let symbols = symbols_from_reader(file, path)?;
    tracing::info!(path = %path.display(), count = symbols.len(), "loaded symbol universe");
    Ok(symbols)
}

/// Parse a universe from any reader. `origin` is only used in error messages.
pub fn symbols_from_reader<R: Read>(reader: R, origin: &Path) -> Result<Vec<String>, DataError> {
    let csv_err = |source: csv::Error| DataError::Csv {
        path: origin.to_path_buf(),
        source,
    };
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let column = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .position(|h| h.eq_ignore_ascii_case("symbol"))
        .ok_or_else(|| DataError::MissingColumn {
            path: origin.to_path_buf(),
            column: "Symbol".to_string(),
        })?;

    let mut seen = HashSet::new();
    let mut symbols = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(csv_err)?;
        let Some(symbol) = record.get(column) else {
            continue;
        };
        if symbol.is_empty() || !seen.insert(symbol.to_string()) {
            continue;
        }
        symbols.push(symbol.to_string());
    }
    Ok(symbols)
}
