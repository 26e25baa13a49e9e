use crate::error::EngineError;
use crate::returns::QuarterSet;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Positional weights for the four trailing quarters, most recent first.
///
/// The most recent quarter carries twice the weight of each of the other
/// three: a deliberate momentum bias so recent performance dominates the
/// annualized score.
const QUARTER_WEIGHTS: [Decimal; 4] = [dec!(0.4), dec!(0.2), dec!(0.2), dec!(0.2)];

/// Collapses four quarterly returns into one weighted annual performance
/// score, in percent.
pub fn strength_score(quarters: &QuarterSet) -> Decimal {
    quarters
        .returns()
        .iter()
        .zip(QUARTER_WEIGHTS.iter())
        .map(|(q, w)| q * w)
        .sum()
}

/// Expresses an instrument's strength score as a ratio (x100) of the
/// benchmark's score over the same window.
///
/// 100 means the instrument matched the benchmark exactly; values are
/// unbounded in both directions and negative when the signs differ. A
/// benchmark score of exactly zero makes the ratio undefined.
pub fn relative_strength(
    instrument_score: Decimal,
    benchmark_score: Decimal,
) -> Result<Decimal, EngineError> {
    if benchmark_score.is_zero() {
        return Err(EngineError::ZeroBenchmarkStrength);
    }

    Ok(instrument_score / benchmark_score * dec!(100))
}
