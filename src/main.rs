use clap::{Parser, Subcommand};
use engine::{RankSettings, RankingEngine};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// The main entry point for the relative-strength ranking application.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => {
            if let Err(e) = handle_rank(args) {
                eprintln!("Error during ranking run: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Ranks an equity universe by multi-period relative strength against a
/// benchmark instrument.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the collected price corpus and write the RS leaderboard.
    Rank(RankArgs),
}

#[derive(Parser)]
struct RankArgs {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Override the configured minimum current-offset percentile.
    #[arg(long)]
    min_percentile: Option<u8>,

    /// Override how many rows the console summary prints.
    #[arg(long)]
    top: Option<usize>,
}

// ==============================================================================
// Rank Command Logic
// ==============================================================================

/// Handles the orchestration of one full ranking run.
fn handle_rank(args: RankArgs) -> anyhow::Result<()> {
    let mut config = configuration::load_config(&args.config)?;
    if let Some(min_percentile) = args.min_percentile {
        config.min_percentile = min_percentile;
        configuration::validate(&config)?;
    }
    let top_n = args.top.unwrap_or(config.top_n);

    let instruments = dataset::load_instruments(&config.paths.stock_data)?;
    info!(
        instruments = instruments.len(),
        benchmark = %config.reference_ticker,
        "starting ranking run"
    );

    let engine = RankingEngine::new(RankSettings {
        reference_ticker: config.reference_ticker.clone(),
        offsets: config.offsets.clone(),
        days_per_quarter: config.days_per_quarter,
        min_percentile: config.min_percentile,
    });
    let board = engine.run(&instruments)?;

    let output_path = config.paths.output_dir.join("rs_stocks.csv");
    reporter::write_csv(&board, &output_path)?;

    reporter::print_top(&board, top_n);
    println!(
        "Wrote {} leaderboard rows to {}",
        board.rows.len(),
        output_path.display()
    );

    Ok(())
}
