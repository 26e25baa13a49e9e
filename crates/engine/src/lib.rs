//! # Relative Strength Ranking Engine
//!
//! This crate turns an in-memory snapshot of instrument price histories
//! into a filtered, sorted relative-strength leaderboard.
//!
//! ## Architectural Principles
//!
//! - **Pure logic crate:** no I/O, no clocks, no ambient configuration. It
//!   depends only on `core-types`; everything it needs arrives through
//!   `RankSettings` and the instrument slice.
//! - **Staged pipeline:** each stage consumes the previous stage's output
//!   and returns a new immutable table — quarterly returns feed the
//!   strength aggregation, strengths are normalized against the benchmark
//!   across every configured offset, percentiles are derived per offset,
//!   and the final filter/sort assigns dense ranks.
//!
//! ## Public API
//!
//! - `RankingEngine`: drives the full pipeline for one run.
//! - `score_all` / `rank_by_offset` / `finalize`: the individual stages.
//! - `Leaderboard`: the terminal artifact handed to persistence.
//! - `EngineError`: the specific error types that can be returned from
//!   this crate; only the benchmark variants are fatal to a run.

// Declare the modules that constitute this crate.
pub mod error;
pub mod leaderboard;
pub mod ranker;
pub mod returns;
pub mod scorer;
pub mod settings;
pub mod strength;

// Re-export the key components to create a clean, public-facing API.
pub use error::EngineError;
pub use leaderboard::{Leaderboard, RankedRow, finalize};
pub use ranker::{RankedRecord, RankedTable, rank_by_offset};
pub use returns::{QuarterSet, quarterly_returns};
pub use scorer::{MIN_COMPUTABLE_OFFSETS, RsRecord, ScoreSummary, ScoreTable, score_all};
pub use settings::RankSettings;
pub use strength::{relative_strength, strength_score};

use core_types::InstrumentRecord;
use tracing::info;

/// A stateless driver for one full ranking run.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    settings: RankSettings,
}

impl RankingEngine {
    pub fn new(settings: RankSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RankSettings {
        &self.settings
    }

    /// Scores, ranks, filters and sorts the full instrument snapshot.
    ///
    /// Per-instrument failures (thin history, bad anchors) are expected and
    /// silently tallied; only a missing or wholly uncomputable benchmark
    /// aborts the run.
    pub fn run(&self, instruments: &[InstrumentRecord]) -> Result<Leaderboard, EngineError> {
        let scored = score_all(instruments, &self.settings)?;

        info!(
            seen = scored.summary.instruments_seen,
            scored = scored.summary.instruments_scored,
            skipped_no_current = scored.summary.skipped_no_current_rs,
            skipped_few_offsets = scored.summary.skipped_too_few_offsets,
            dropped_offsets = ?scored.summary.offsets_dropped,
            "scoring complete"
        );

        let ranked = rank_by_offset(scored)?;
        let board = finalize(ranked, self.settings.min_percentile);

        info!(
            survivors = board.rows.len(),
            min_percentile = self.settings.min_percentile,
            "leaderboard finalized"
        );

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{OffsetSpec, OffsetTable, PricePoint};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    const Q: usize = 2;

    fn instrument(ticker: &str, quarter_pcts: [Decimal; 4], pad: usize) -> InstrumentRecord {
        let mut anchors = vec![dec!(100)];
        for pct in quarter_pcts {
            let last = *anchors.last().unwrap();
            anchors.push(last * (Decimal::ONE + pct / dec!(100)));
        }

        let mut closes = vec![dec!(80); pad];
        for pair in anchors.windows(2) {
            let step = (pair[1] - pair[0]) / Decimal::from(Q as u64);
            for k in 0..Q {
                closes.push(pair[0] + step * Decimal::from(k as u64));
            }
        }
        closes.push(*anchors.last().unwrap());

        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        InstrumentRecord {
            ticker: ticker.to_string(),
            sector: "Technology".to_string(),
            industry: "Software".to_string(),
            exchange: "NMS".to_string(),
            market_cap: dec!(1_000_000_000),
            prices: closes
                .iter()
                .enumerate()
                .map(|(i, close)| PricePoint {
                    date: start + chrono::Days::new(i as u64),
                    open: *close,
                    high: *close,
                    low: *close,
                    close: *close,
                    volume: 500_000,
                })
                .collect(),
        }
    }

    fn settings(min_percentile: u8) -> RankSettings {
        RankSettings {
            reference_ticker: "REF".to_string(),
            offsets: OffsetTable::new(vec![
                OffsetSpec::new("current", 0),
                OffsetSpec::new("1-bar", 1),
                OffsetSpec::new("2-bar", 2),
            ]),
            days_per_quarter: Q,
            min_percentile,
        }
    }

    #[test]
    fn full_pipeline_ranks_descending_by_current_rs() {
        let universe = vec![
            instrument("REF", [dec!(2); 4], 4),
            instrument("WEAK", [dec!(-2); 4], 4),
            instrument("FLAT", [dec!(2); 4], 4),
            instrument("STRONG", [dec!(4), dec!(4), dec!(4), dec!(8)], 4),
        ];

        let board = RankingEngine::new(settings(0)).run(&universe).unwrap();
        let tickers: Vec<&str> = board.rows.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["STRONG", "FLAT", "WEAK"]);
        assert_eq!(
            board.rows.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let current = board.current_index().unwrap();
        assert_eq!(board.rows[0].rs[current], Some(dec!(280)));
        assert_eq!(board.rows[1].rs[current], Some(dec!(100)));
        assert_eq!(board.rows[2].rs[current], Some(dec!(-100)));
    }

    #[test]
    fn min_percentile_filter_trims_the_board() {
        let mut universe = vec![instrument("REF", [dec!(2); 4], 4)];
        for i in 0..4 {
            let pct = Decimal::from(i as u64 + 1);
            universe.push(instrument(&format!("T{i}"), [pct; 4], 4));
        }

        // Percentiles over 4 instruments are 0, 33, 67, 100; cutoff 70
        // keeps only the top one.
        let board = RankingEngine::new(settings(70)).run(&universe).unwrap();
        assert_eq!(board.rows.len(), 1);
        assert_eq!(board.rows[0].ticker, "T3");
        assert_eq!(board.rows[0].rank, 1);
    }

    #[test]
    fn benchmark_missing_aborts_the_run() {
        let universe = vec![instrument("A", [dec!(2); 4], 4)];
        assert_eq!(
            RankingEngine::new(settings(0)).run(&universe).unwrap_err(),
            EngineError::BenchmarkMissing("REF".to_string())
        );
    }
}
