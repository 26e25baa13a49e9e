//! Persistence of the raw price corpus.
//!
//! The data-collection step produces a single JSON document containing one
//! entry per instrument (ticker, sector, industry, exchange, market cap and
//! the daily OHLCV history). This crate loads that document into the
//! in-memory snapshot the ranking engine consumes, and writes it back out
//! for tooling that regenerates or trims the corpus.

use core_types::InstrumentRecord;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

pub mod error;

pub use error::DatasetError;

/// Loads the full instrument corpus from a JSON file.
pub fn load_instruments(path: &Path) -> Result<Vec<InstrumentRecord>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let instruments: Vec<InstrumentRecord> = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        count = instruments.len(),
        path = %path.display(),
        "loaded instrument corpus"
    );

    Ok(instruments)
}

/// Writes the instrument corpus to a JSON file, creating parent directories
/// as needed.
pub fn save_instruments(path: &Path, instruments: &[InstrumentRecord]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, instruments).map_err(|source| {
        DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        count = instruments.len(),
        path = %path.display(),
        "saved instrument corpus"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::PricePoint;
    use rust_decimal_macros::dec;

    fn sample_instrument() -> InstrumentRecord {
        InstrumentRecord {
            ticker: "AAPL".to_string(),
            sector: "Technology".to_string(),
            industry: "Consumer Electronics".to_string(),
            exchange: "NMS".to_string(),
            market_cap: dec!(3_000_000_000_000),
            prices: vec![PricePoint {
                date: chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
                open: dec!(243.50),
                high: dec!(245.10),
                low: dec!(241.80),
                close: dec!(244.75),
                volume: 41_250_000,
            }],
        }
    }

    #[test]
    fn corpus_round_trips_through_json() {
        let dir = std::env::temp_dir().join("relstrength-dataset-test");
        let path = dir.join("stock_data.json");
        let original = vec![sample_instrument()];

        save_instruments(&path, &original).unwrap();
        let reloaded = load_instruments(&path).unwrap();

        assert_eq!(reloaded, original);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = load_instruments(Path::new("definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
