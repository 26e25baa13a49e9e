use core_types::OffsetTable;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Ticker of the benchmark instrument every score is normalized against
    /// (e.g., "SPY"). Must be present in the loaded corpus.
    pub reference_ticker: String,

    /// Minimum current-offset percentile a row must reach to appear in the
    /// final leaderboard.
    #[serde(default = "default_min_percentile")]
    pub min_percentile: u8,

    /// Number of trading-day bars treated as one quarter.
    #[serde(default = "default_days_per_quarter")]
    pub days_per_quarter: usize,

    /// The historical offsets to evaluate, in output column order.
    #[serde(default = "OffsetTable::standard")]
    pub offsets: OffsetTable,

    /// How many leaderboard rows the console summary prints.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default)]
    pub paths: Paths,
}

/// Filesystem locations for the input corpus and the output artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    /// The JSON price corpus produced by the data-collection step.
    #[serde(default = "default_stock_data")]
    pub stock_data: PathBuf,

    /// Directory the leaderboard CSV is written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            stock_data: default_stock_data(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_min_percentile() -> u8 {
    70
}

fn default_days_per_quarter() -> usize {
    63
}

fn default_top_n() -> usize {
    20
}

fn default_stock_data() -> PathBuf {
    PathBuf::from("data/stock_data.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
