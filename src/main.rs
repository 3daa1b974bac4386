use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use perceptual_color::PerceptualOrderer;
use thatcolor::models::AppConfig;
use thatcolor::server;
use thatcolor::services::PaletteTracker;

#[derive(Parser)]
#[command(name = "thatcolor")]
#[command(about = "Perceptual color engine - ordered color sequences and live palettes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print the ordered colors of one hue segment
    Order {
        /// Segment index
        #[arg(short, long)]
        segment: usize,

        /// Number of batches to print (default: all)
        #[arg(short, long)]
        batches: Option<usize>,

        /// Order the whole segment offline, including the final pass if configured
        #[arg(long)]
        full: bool,
    },
    /// Print the palette of a PNG image
    Palette {
        /// PNG file to sample
        image: PathBuf,

        /// Palette size (default: configured K)
        #[arg(short, long)]
        k: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Order {
            segment,
            batches,
            full,
        }) => run_order_command(segment, batches, full),
        Some(Commands::Palette { image, k }) => run_palette_command(&image, k),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thatcolor=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Order one segment synchronously and print hex colors, one per line
fn run_order_command(segment: usize, batches: Option<usize>, full: bool) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = AppConfig::from_env();
    let orderer = PerceptualOrderer::new(config.order_options()?)?;

    if segment >= orderer.segment_count() {
        anyhow::bail!(
            "Unknown segment {segment} (configuration has {})",
            orderer.segment_count()
        );
    }

    let colors = if full {
        orderer.order_segment(segment).unwrap_or_default()
    } else {
        let count = batches.unwrap_or_else(|| orderer.batch_count(segment));
        (0..count)
            .map_while(|index| orderer.compute_batch(segment, index))
            .flatten()
            .collect()
    };

    for color in &colors {
        println!("{color}");
    }
    eprintln!(
        "{} of {} colors in segment {segment}",
        colors.len(),
        orderer.segment_len(segment)
    );

    Ok(())
}

/// Sample a PNG file and print its palette
fn run_palette_command(image: &Path, k: Option<usize>) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = AppConfig::from_env();
    let tracker = PaletteTracker::new(&config.palette);
    let bytes = std::fs::read(image)?;
    let reading = tracker.sample(&bytes, k)?;

    for color in &reading.raw {
        println!("{color}");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("thatcolor v{VERSION}");
    println!("Perceptual color engine\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config = AppConfig::from_env();
    println!("\nEffective Configuration:");
    match serde_yaml::to_string(&config) {
        Ok(yaml) => {
            for line in yaml.lines() {
                println!("  {line}");
            }
        }
        Err(e) => println!("  (unavailable: {e})"),
    }

    match config.order_options() {
        Ok(options) => println!(
            "\nColor space: {}³ colors, {} segments, batches of {}",
            options.resolution,
            options.hue_table.segment_count(),
            options.batch_size
        ),
        Err(e) => println!("\nColor space: invalid ({e})"),
    }

    println!("\nCommands:");
    println!("  thatcolor serve     Start the HTTP server");
    println!("  thatcolor order     Print the ordered colors of a segment");
    println!("  thatcolor palette   Print the palette of a PNG image");
    println!("\nRun 'thatcolor --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thatcolor=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::from_env();

    let state = server::create_app_state(config).await?;
    // First batch of every segment, so the sequences are not empty on first read
    state.engine.warm_up();

    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "thatcolor server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
