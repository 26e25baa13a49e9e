use crate::error::EngineError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// The four trailing quarter-over-quarter percentage returns of one price
/// series, ordered most-recent-quarter-first.
///
/// The ordering is load-bearing: the strength weighting applies its heavy
/// weight to index 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarterSet([Decimal; 4]);

impl QuarterSet {
    pub fn returns(&self) -> &[Decimal; 4] {
        &self.0
    }
}

/// Computes the four trailing quarterly returns of a close-price series,
/// anchored `offset` bars before the series end.
///
/// The series is truncated by dropping the last `offset` points, then five
/// anchors are placed at `0, Q, 2Q, 3Q, 4Q` bars before the truncated end
/// (`Q = days_per_quarter`). All five anchors must fall inside the series;
/// a shorter history is the dominant failure mode for recently listed or
/// thinly traded instruments and yields `InsufficientHistory`. A
/// non-positive close at any older anchor yields `NonPositiveAnchor`.
pub fn quarterly_returns(
    closes: &[Decimal],
    offset: usize,
    days_per_quarter: usize,
) -> Result<QuarterSet, EngineError> {
    let len = closes
        .len()
        .checked_sub(offset)
        .ok_or(EngineError::InsufficientHistory)?;

    // Five anchors spanning four quarters need 4Q bars of lookback from the
    // last index.
    if len < days_per_quarter * 4 + 1 {
        return Err(EngineError::InsufficientHistory);
    }

    let window = &closes[..len];
    let last = len - 1;

    let mut returns = [Decimal::ZERO; 4];
    for (i, slot) in returns.iter_mut().enumerate() {
        let newer = window[last - i * days_per_quarter];
        let older = window[last - (i + 1) * days_per_quarter];

        if older <= Decimal::ZERO {
            return Err(EngineError::NonPositiveAnchor);
        }

        *slot = (newer / older - Decimal::ONE) * dec!(100);
    }

    Ok(QuarterSet(returns))
}
