use crate::ranker::RankedTable;
use crate::scorer::ScoreSummary;
use core_types::OffsetSpec;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::warn;

/// One surviving instrument in the final leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    /// Dense 1..N position after the final sort; purely the sorted
    /// position, distinct from the min-rank used for percentile math.
    pub rank: usize,
    pub ticker: String,
    pub sector: String,
    pub industry: String,
    pub exchange: String,
    pub market_cap: Decimal,
    /// Per-offset RS, parallel to `Leaderboard::offsets`.
    pub rs: Vec<Option<Decimal>>,
    /// Per-offset percentile, parallel to `Leaderboard::offsets`.
    pub percentiles: Vec<Option<u8>>,
}

impl RankedRow {
    /// Market capitalization in billions of dollars, rounded to 2 decimals.
    pub fn market_cap_billions(&self) -> Decimal {
        (self.market_cap / dec!(1_000_000_000)).round_dp(2)
    }
}

/// The terminal artifact of a ranking run, ordered by final rank ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub offsets: Vec<OffsetSpec>,
    pub rows: Vec<RankedRow>,
    pub summary: ScoreSummary,
}

impl Leaderboard {
    /// Index of the current (zero-bar) offset in this run's column order.
    pub fn current_index(&self) -> Option<usize> {
        self.offsets.iter().position(|o| o.bars == 0)
    }
}

/// Applies the minimum-percentile cutoff on the current offset, sorts the
/// survivors by current RS descending (ticker ascending on ties, so the
/// output is deterministic), and assigns fresh dense ranks 1..N.
///
/// Percentiles were computed over the unfiltered population and are
/// reported unchanged. Filtering before ranking is equivalent to the
/// reverse order because percentile is monotone in current RS, and it makes
/// the 1..N contiguity of the output structural.
pub fn finalize(table: RankedTable, min_percentile: u8) -> Leaderboard {
    let RankedTable {
        offsets,
        rows,
        summary,
    } = table;

    let current = offsets.iter().position(|o| o.bars == 0);
    let Some(current) = current else {
        // Without an active current offset the scorer retained nothing.
        warn!("no active current offset; leaderboard is empty");
        return Leaderboard {
            offsets,
            rows: Vec::new(),
            summary,
        };
    };

    let mut survivors: Vec<_> = rows
        .into_iter()
        .filter(|row| {
            row.record.rs[current].is_some()
                && row.percentiles[current].is_some_and(|p| p >= min_percentile)
        })
        .collect();

    survivors.sort_by(|a, b| {
        b.record.rs[current]
            .cmp(&a.record.rs[current])
            .then_with(|| a.record.ticker.cmp(&b.record.ticker))
    });

    let rows = survivors
        .into_iter()
        .enumerate()
        .map(|(i, row)| RankedRow {
            rank: i + 1,
            ticker: row.record.ticker,
            sector: row.record.sector,
            industry: row.record.industry,
            exchange: row.record.exchange,
            market_cap: row.record.market_cap,
            rs: row.record.rs,
            percentiles: row.percentiles,
        })
        .collect();

    Leaderboard {
        offsets,
        rows,
        summary,
    }
}
