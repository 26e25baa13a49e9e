use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single daily price bar for one instrument.
///
/// Bars are stored in ascending date order. The engine only reads `close`;
/// the remaining OHLV fields are carried through from the corpus untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

/// One tradable instrument and its full price history, as produced by the
/// data-collection step.
///
/// The benchmark is an `InstrumentRecord` like any other; it is identified
/// by matching its ticker against the configured reference ticker. Records
/// are an immutable snapshot: they are loaded once per run and never
/// mutated by the ranking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    pub ticker: String,
    pub sector: String,
    pub industry: String,
    pub exchange: String,
    /// Market capitalization in dollars. Zero when unknown.
    pub market_cap: Decimal,
    pub prices: Vec<PricePoint>,
}

impl InstrumentRecord {
    /// Extracts the close-price series in chronological order.
    pub fn closes(&self) -> Vec<Decimal> {
        self.prices.iter().map(|p| p.close).collect()
    }
}
