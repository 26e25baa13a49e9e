use crate::error::EngineError;
use crate::scorer::{RsRecord, ScoreSummary, ScoreTable};
use core_types::OffsetSpec;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

/// Percentile assigned when an offset has a single valid instrument. The
/// percentile formula divides by `valid_count - 1`, so the sole survivor
/// gets the top percentile by convention.
pub const SOLE_SURVIVOR_PERCENTILE: u8 = 100;

/// An `RsRecord` annotated with its per-offset percentile, positionally
/// parallel to the table's offset list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecord {
    pub record: RsRecord,
    pub percentiles: Vec<Option<u8>>,
}

/// The percentile-annotated cross section, ready for filtering and final
/// ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTable {
    pub offsets: Vec<OffsetSpec>,
    pub rows: Vec<RankedRecord>,
    pub summary: ScoreSummary,
}

/// Converts each offset's cross-sectional RS values into integer
/// percentiles, independently per offset.
///
/// Ranking is ascending by RS with "min" tie handling: every instrument in
/// a tied group receives the smallest ordinal rank of the group, and the
/// next distinct value skips ahead by the group size. Percentiles are
/// computed only over the instruments with a value for that offset, so an
/// instrument missing offset X still gets percentiles where it has values.
pub fn rank_by_offset(table: ScoreTable) -> Result<RankedTable, EngineError> {
    let ScoreTable {
        offsets,
        records,
        summary,
    } = table;

    let mut percentiles: Vec<Vec<Option<u8>>> = vec![vec![None; offsets.len()]; records.len()];

    for (offset_idx, offset) in offsets.iter().enumerate() {
        // The valid population for this offset, sorted ascending by RS.
        let mut valid: Vec<(usize, Decimal)> = records
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.rs[offset_idx].map(|v| (i, v)))
            .collect();
        valid.sort_by(|a, b| a.1.cmp(&b.1));

        let valid_count = valid.len();
        let mut min_rank = 0usize;

        for (pos, (record_idx, value)) in valid.iter().enumerate() {
            // "min" ranking: ties share the first ordinal of their group.
            if pos == 0 || *value != valid[pos - 1].1 {
                min_rank = pos + 1;
            }

            let pct = match percentile(min_rank, valid_count) {
                Ok(p) => p,
                Err(EngineError::DegenerateOffset(_)) => {
                    debug!(
                        offset = %offset.name,
                        "single-instrument population; assigning sole-survivor percentile"
                    );
                    SOLE_SURVIVOR_PERCENTILE
                }
                Err(e) => return Err(e),
            };
            percentiles[*record_idx][offset_idx] = Some(pct);
        }
    }

    let rows = records
        .into_iter()
        .zip(percentiles)
        .map(|(record, percentiles)| RankedRecord {
            record,
            percentiles,
        })
        .collect();

    Ok(RankedTable {
        offsets,
        rows,
        summary,
    })
}

/// `round((rank - 1) / (valid_count - 1) * 100)` as an integer 0..=100.
///
/// Rounding is half-to-even, matching the reference arithmetic. A
/// population of one makes the formula 0/0 and is reported as
/// `DegenerateOffset` for the caller to resolve by convention.
fn percentile(min_rank: usize, valid_count: usize) -> Result<u8, EngineError> {
    if valid_count < 2 {
        return Err(EngineError::DegenerateOffset(String::new()));
    }

    let pct = Decimal::from((min_rank - 1) as u64) / Decimal::from((valid_count - 1) as u64)
        * dec!(100);

    pct.round()
        .to_u8()
        .ok_or_else(|| EngineError::InternalError(format!("percentile out of range: {pct}")))
}
