//! Serialization and presentation of the final leaderboard.
//!
//! Two outputs: the CSV artifact handed to downstream tooling (one row per
//! surviving instrument, columns for every configured offset), and a
//! top-N console table that is purely illustrative.

use comfy_table::Table;
use csv::Writer as CsvWriter;
use engine::Leaderboard;
use rust_decimal::Decimal;
use std::path::Path;
use tracing::info;

pub mod error;

pub use error::ReportError;

/// Writes the leaderboard to `path` as CSV, creating parent directories as
/// needed.
///
/// Fixed metadata columns come first, then an `RS (<offset>)` and
/// `Percentile (<offset>)` pair per offset in declaration order. Market
/// caps are reported in billions rounded to 2 decimals, RS values rounded
/// to 2 decimals, percentiles as integers; missing values are empty cells.
/// Row order is final rank ascending.
pub fn write_csv(board: &Leaderboard, path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = CsvWriter::from_path(path)?;

    let mut header = vec![
        "Rank".to_string(),
        "Ticker".to_string(),
        "Sector".to_string(),
        "Industry".to_string(),
        "Exchange".to_string(),
        "Market Cap ($B)".to_string(),
    ];
    for offset in &board.offsets {
        header.push(format!("RS ({})", offset.name));
        header.push(format!("Percentile ({})", offset.name));
    }
    writer.write_record(&header)?;

    for row in &board.rows {
        let mut record = vec![
            row.rank.to_string(),
            row.ticker.clone(),
            row.sector.clone(),
            row.industry.clone(),
            row.exchange.clone(),
            row.market_cap_billions().to_string(),
        ];
        for (rs, percentile) in row.rs.iter().zip(row.percentiles.iter()) {
            record.push(rs.map(format_rs).unwrap_or_default());
            record.push(percentile.map(|p| p.to_string()).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    info!(rows = board.rows.len(), path = %path.display(), "wrote leaderboard CSV");

    Ok(())
}

/// Prints the top `n` leaderboard rows as a console table.
pub fn print_top(board: &Leaderboard, n: usize) {
    if board.rows.is_empty() {
        println!("No instruments passed the percentile filter.");
        return;
    }

    let current = board.current_index();

    let mut table = Table::new();
    table.set_header(vec![
        "Rank",
        "Ticker",
        "RS",
        "Percentile",
        "Sector",
        "Market Cap ($B)",
    ]);

    for row in board.rows.iter().take(n) {
        let (rs, percentile) = match current {
            Some(i) => (row.rs[i], row.percentiles[i]),
            None => (None, None),
        };
        table.add_row(vec![
            row.rank.to_string(),
            row.ticker.clone(),
            rs.map(format_rs).unwrap_or_default(),
            percentile.map(|p| p.to_string()).unwrap_or_default(),
            row.sector.clone(),
            row.market_cap_billions().to_string(),
        ]);
    }

    println!("{table}");
}

fn format_rs(rs: Decimal) -> String {
    rs.round_dp(2).to_string()
}
