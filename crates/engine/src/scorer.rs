use crate::error::EngineError;
use crate::returns::quarterly_returns;
use crate::settings::RankSettings;
use crate::strength::{relative_strength, strength_score};
use core_types::{InstrumentRecord, OffsetSpec};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

/// How many offsets must produce a relative strength for an instrument to
/// be retained in the score table.
pub const MIN_COMPUTABLE_OFFSETS: usize = 3;

/// One instrument's relative strength across the run's active offsets.
///
/// `rs` is positionally parallel to `ScoreTable::offsets`; a `None` entry
/// means that offset was not computable for this instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RsRecord {
    pub ticker: String,
    pub sector: String,
    pub industry: String,
    pub exchange: String,
    pub market_cap: Decimal,
    pub rs: Vec<Option<Decimal>>,
}

/// Aggregate tallies for one scoring pass. Per-instrument skips are an
/// expected, high-frequency outcome and are only ever reported in bulk.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub instruments_seen: usize,
    pub instruments_scored: usize,
    pub skipped_no_current_rs: usize,
    pub skipped_too_few_offsets: usize,
    pub offsets_dropped: Vec<String>,
}

/// The cross-sectional output of the multi-period scorer: every retained
/// instrument's RS values, keyed positionally by the active offset list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreTable {
    /// The offsets that survived benchmark computation, in declaration order.
    pub offsets: Vec<OffsetSpec>,
    pub records: Vec<RsRecord>,
    pub summary: ScoreSummary,
}

/// Scores every non-benchmark instrument against the benchmark across the
/// configured offsets.
///
/// A missing benchmark is fatal: there is no meaningful relative strength
/// without one. Offsets the benchmark itself cannot compute are dropped
/// from the whole run (non-fatal, logged); if none survive, the run fails.
pub fn score_all(
    instruments: &[InstrumentRecord],
    settings: &RankSettings,
) -> Result<ScoreTable, EngineError> {
    let benchmark = instruments
        .iter()
        .find(|i| i.ticker == settings.reference_ticker)
        .ok_or_else(|| EngineError::BenchmarkMissing(settings.reference_ticker.clone()))?;

    let benchmark_closes = benchmark.closes();

    // Benchmark strength per offset. An offset the benchmark cannot compute
    // (or where its strength is exactly zero, which would fail the division
    // guard for every instrument) is dropped for the whole run.
    let mut offsets = Vec::with_capacity(settings.offsets.len());
    let mut benchmark_strengths = Vec::with_capacity(settings.offsets.len());
    let mut offsets_dropped = Vec::new();

    for offset in settings.offsets.iter() {
        let strength = quarterly_returns(&benchmark_closes, offset.bars, settings.days_per_quarter)
            .map(|q| strength_score(&q));

        match strength {
            Ok(s) if !s.is_zero() => {
                offsets.push(offset.clone());
                benchmark_strengths.push(s);
            }
            outcome => {
                warn!(
                    offset = %offset.name,
                    reason = ?outcome.err(),
                    "dropping offset: benchmark strength unavailable"
                );
                offsets_dropped.push(offset.name.clone());
            }
        }
    }

    if offsets.is_empty() {
        return Err(EngineError::BenchmarkUncomputable(
            settings.reference_ticker.clone(),
        ));
    }

    let current_index = offsets.iter().position(|o| o.bars == 0);
    if current_index.is_none() {
        warn!("the current (zero-bar) offset is inactive; no instrument can be retained");
    }

    let mut summary = ScoreSummary {
        offsets_dropped,
        ..ScoreSummary::default()
    };
    let mut records = Vec::new();

    for instrument in instruments {
        if instrument.ticker == settings.reference_ticker {
            continue;
        }
        summary.instruments_seen += 1;

        let closes = instrument.closes();
        let rs: Vec<Option<Decimal>> = offsets
            .iter()
            .zip(benchmark_strengths.iter())
            .map(|(offset, benchmark_strength)| {
                quarterly_returns(&closes, offset.bars, settings.days_per_quarter)
                    .map(|q| strength_score(&q))
                    .and_then(|s| relative_strength(s, *benchmark_strength))
                    .ok()
            })
            .collect();

        // Retention: the current offset must be computable and at least
        // MIN_COMPUTABLE_OFFSETS offsets must have produced a value.
        let has_current = current_index.map(|i| rs[i].is_some()).unwrap_or(false);
        if !has_current {
            summary.skipped_no_current_rs += 1;
            continue;
        }
        if rs.iter().flatten().count() < MIN_COMPUTABLE_OFFSETS {
            summary.skipped_too_few_offsets += 1;
            continue;
        }

        summary.instruments_scored += 1;
        records.push(RsRecord {
            ticker: instrument.ticker.clone(),
            sector: instrument.sector.clone(),
            industry: instrument.industry.clone(),
            exchange: instrument.exchange.clone(),
            market_cap: instrument.market_cap,
            rs,
        });
    }

    debug!(
        seen = summary.instruments_seen,
        scored = summary.instruments_scored,
        "multi-period scoring pass complete"
    );

    Ok(ScoreTable {
        offsets,
        records,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RankSettings;
    use core_types::{OffsetTable, PricePoint};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const Q: usize = 2;

    // Builds a close series whose anchor values one quarter (Q bars) apart
    // follow `quarter_pcts` (oldest quarter first), with midpoints linearly
    // interpolated and `pad` filler bars prepended so deeper offsets stay
    // computable.
    fn series_with_quarters(quarter_pcts: &[Decimal], pad: usize) -> Vec<Decimal> {
        let mut anchors = vec![dec!(100)];
        for pct in quarter_pcts {
            let last = *anchors.last().unwrap();
            anchors.push(last * (Decimal::ONE + pct / dec!(100)));
        }

        let mut closes = vec![dec!(50); pad];
        for pair in anchors.windows(2) {
            let step = (pair[1] - pair[0]) / Decimal::from(Q as u64);
            for k in 0..Q {
                closes.push(pair[0] + step * Decimal::from(k as u64));
            }
        }
        closes.push(*anchors.last().unwrap());
        closes
    }

    fn flat_growth_instrument(ticker: &str, pct: Decimal, pad: usize) -> InstrumentRecord {
        instrument_with_closes(ticker, &series_with_quarters(&[pct; 4], pad))
    }

    fn instrument_with_closes(ticker: &str, closes: &[Decimal]) -> InstrumentRecord {
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
                    volume: 1_000_000,
                })
                .collect(),
        }
    }

    fn test_settings() -> RankSettings {
        RankSettings {
            reference_ticker: "REF".to_string(),
            offsets: OffsetTable::new(vec![
                core_types::OffsetSpec::new("current", 0),
                core_types::OffsetSpec::new("1-bar", 1),
                core_types::OffsetSpec::new("2-bar", 2),
            ]),
            days_per_quarter: Q,
            min_percentile: 70,
        }
    }

    #[test]
    fn missing_benchmark_is_fatal() {
        let instruments = vec![flat_growth_instrument("A", dec!(2), 4)];
        let err = score_all(&instruments, &test_settings()).unwrap_err();
        assert_eq!(err, EngineError::BenchmarkMissing("REF".to_string()));
    }

    #[test]
    fn benchmark_with_no_computable_offset_is_fatal() {
        // Too short for even the current offset.
        let benchmark = instrument_with_closes("REF", &[dec!(100); 3]);
        let instruments = vec![benchmark, flat_growth_instrument("A", dec!(2), 4)];
        let err = score_all(&instruments, &test_settings()).unwrap_err();
        assert_eq!(err, EngineError::BenchmarkUncomputable("REF".to_string()));
    }

    #[test]
    fn benchmark_short_history_drops_offsets_non_fatally() {
        // Exactly 4Q+1 bars: the current offset computes, deeper ones do not.
        let benchmark = flat_growth_instrument("REF", dec!(2), 0);
        let instruments = vec![benchmark, flat_growth_instrument("A", dec!(4), 4)];

        let table = score_all(&instruments, &test_settings()).unwrap();
        let names: Vec<&str> = table.offsets.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["current"]);
        assert_eq!(
            table.summary.offsets_dropped,
            vec!["1-bar".to_string(), "2-bar".to_string()]
        );
        // With a single active offset nothing can reach 3 computable values.
        assert!(table.records.is_empty());
        assert_eq!(table.summary.skipped_too_few_offsets, 1);
    }

    #[test]
    fn end_to_end_reference_scenario() {
        // REF at [2,2,2,2]% per quarter -> strength 2.0; A at [8,4,4,4]%
        // (recent quarter boosted) -> 5.6 -> RS 280; B at [-2,-2,-2,-2]%
        // -> -2.0 -> RS -100.
        let benchmark = flat_growth_instrument("REF", dec!(2), 4);
        let a = instrument_with_closes(
            "A",
            &series_with_quarters(&[dec!(4), dec!(4), dec!(4), dec!(8)], 4),
        );
        let b = flat_growth_instrument("B", dec!(-2), 4);

        let table = score_all(&vec![benchmark, a, b], &test_settings()).unwrap();
        // The benchmark is excluded from its own output.
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].ticker, "A");
        assert_eq!(table.records[0].rs[0], Some(dec!(280)));
        assert_eq!(table.records[1].ticker, "B");
        assert_eq!(table.records[1].rs[0], Some(dec!(-100)));
    }

    #[test]
    fn instrument_without_current_rs_is_silently_skipped() {
        let benchmark = flat_growth_instrument("REF", dec!(2), 4);
        let thin = instrument_with_closes("THIN", &[dec!(100); 3]);
        let ok = flat_growth_instrument("OK", dec!(1), 4);

        let table = score_all(&vec![benchmark, thin, ok], &test_settings()).unwrap();
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].ticker, "OK");
        assert_eq!(table.summary.instruments_seen, 2);
        assert_eq!(table.summary.skipped_no_current_rs, 1);
        assert_eq!(table.summary.instruments_scored, 1);
    }
}
