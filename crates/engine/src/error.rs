use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Insufficient price history for the requested window")]
    InsufficientHistory,

    #[error("Non-positive close price at a quarter anchor")]
    NonPositiveAnchor,

    #[error("Benchmark strength is zero; relative strength is undefined")]
    ZeroBenchmarkStrength,

    #[error("Benchmark instrument '{0}' not found in the dataset")]
    BenchmarkMissing(String),

    #[error("Benchmark '{0}' has no computable offsets")]
    BenchmarkUncomputable(String),

    #[error("Offset '{0}' has fewer than two instruments with a valid relative strength")]
    DegenerateOffset(String),

    #[error("An unexpected error occurred during ranking: {0}")]
    InternalError(String),
}
