use core_types::OffsetTable;

/// Everything the ranking engine needs for one run, passed explicitly into
/// the entry point. The engine performs no ambient configuration lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankSettings {
    /// Ticker of the benchmark instrument (e.g., "SPY").
    pub reference_ticker: String,
    /// The historical offsets to evaluate, in output column order.
    pub offsets: OffsetTable,
    /// Trading-day bars per quarter.
    pub days_per_quarter: usize,
    /// Minimum current-offset percentile for a row to survive the final
    /// filter.
    pub min_percentile: u8,
}
