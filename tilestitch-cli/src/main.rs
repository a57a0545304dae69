//! Tilestitch CLI - download a rectangle of map tiles and stitch them
//! into one PNG.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tilestitch::{Chunk, ChunkRange, GridCompositor, StitchConfig};

/// Download a rectangular range of tiles and stitch them into one image.
///
/// Tiles that cannot be fetched within the retry budget are left
/// transparent in the output; a partially failed grid still produces an
/// image.
#[derive(Debug, Parser)]
#[command(name = "tilestitch", version, about)]
struct Args {
    /// Column of the first (northwest) chunk
    #[arg(long)]
    start_col: u32,

    /// Row of the first (northwest) chunk
    #[arg(long)]
    start_row: u32,

    /// Column of the last (southeast) chunk, inclusive
    #[arg(long)]
    end_col: u32,

    /// Row of the last (southeast) chunk, inclusive
    #[arg(long)]
    end_row: u32,

    /// Output image path
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Tile cache directory
    #[arg(long, default_value = "./cache")]
    cache_dir: PathBuf,

    /// Tile backend base URL
    #[arg(long, default_value = tilestitch::provider::DEFAULT_BACKEND_URL)]
    backend: String,

    /// Re-download tiles even when they are cached
    #[arg(long)]
    force_refresh: bool,

    /// Delay between network requests, in milliseconds
    #[arg(long, default_value_t = 500)]
    pacing_ms: u64,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(args: Args) -> Result<(), String> {
    let config = StitchConfig::default()
        .with_backend_url(args.backend)
        .with_cache_dir(args.cache_dir)
        .with_pacing(Duration::from_millis(args.pacing_ms))
        .with_force_refresh(args.force_refresh);

    let compositor = GridCompositor::from_config(&config)
        .map_err(|e| format!("failed to set up HTTP client: {e}"))?;

    let range = ChunkRange::new(
        Chunk::new(args.start_col, args.start_row),
        Chunk::new(args.end_col, args.end_row),
    );
    info!(
        start = %range.start(),
        end = %range.end(),
        chunks = range.len(),
        "starting download"
    );

    let image = compositor
        .stitch(range, config.force_refresh)
        .await
        .map_err(|e| format!("failed to compose image: {e}"))?;

    image
        .save(&args.output)
        .map_err(|e| format!("failed to write {}: {e}", args.output.display()))?;

    info!(output = %args.output.display(), "download complete");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}
