mod colors;
mod terminal;
mod viewer;

use clap::{Args, Parser, Subcommand};
use doomfire::settings::Settings;
use doomfire::{FireConfig, Result, WindDirection};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "doomfire")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Doom-style fire effect in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(Args)]
struct FireArgs {
    /// Wind direction: left, right or none
    #[arg(short, long)]
    wind: Option<WindDirection>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of intensity levels (2-256)
    #[arg(short, long)]
    palette_size: Option<u16>,

    /// Settings file (defaults to <config dir>/doomfire/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate the fire full-screen (q quit, space pause, w wind, x fuel)
    Run {
        #[command(flatten)]
        fire: FireArgs,

        /// Milliseconds between ticks
        #[arg(short, long)]
        interval: Option<u64>,

        /// Terminal pixels per fire cell
        #[arg(short = 'S', long)]
        scale: Option<usize>,
    },

    /// Simulate without a display and print the final frame
    Print {
        #[command(flatten)]
        fire: FireArgs,

        /// Grid width in cells
        #[arg(short = 'W', long, default_value = "60")]
        width: usize,

        /// Grid height in cells
        #[arg(short = 'H', long, default_value = "30")]
        height: usize,

        /// Number of ticks to run before printing
        #[arg(short, long, default_value = "40")]
        ticks: u32,

        /// Print an ASCII ramp instead of colored blocks
        #[arg(short = 'P', long)]
        plain: bool,
    },
}

/// Settings file values with command-line overrides applied
fn resolve_config(args: &FireArgs) -> Result<FireConfig> {
    let settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    let mut config = settings.fire;
    if let Some(wind) = args.wind {
        config.wind = wind;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(palette_size) = args.palette_size {
        config.palette_size = palette_size;
    }
    Ok(config)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Run {
            fire,
            interval,
            scale,
        } => {
            let mut config = resolve_config(&fire)?;
            if let Some(interval) = interval {
                config.tick_interval_ms = interval;
            }
            if let Some(scale) = scale {
                config.pixel_scale = scale;
            }
            config.validate()?;
            viewer::run(config)?;
        }
        Commands::Print {
            fire,
            width,
            height,
            ticks,
            plain,
        } => {
            let mut config = resolve_config(&fire)?;
            // print sizes are already in cells
            config.pixel_scale = 1;
            config.validate()?;
            viewer::print(&config, width, height, ticks, plain)?;
        }
    }

    Ok(())
}
