// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use qr_monitor::backends::camera::{PixelFormat, V4l2Opener};
use qr_monitor::config::{Config, DisplayMode};
use qr_monitor::{QrDetector, display};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qr-monitor")]
#[command(about = "Watch cameras for QR codes and log each new payload")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (default: ~/.config/qr-monitor/config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Camera index to poll, repeatable (e.g. -c 0 -c 2)
    #[arg(short, long = "camera")]
    cameras: Vec<u32>,

    /// Requested capture width
    #[arg(long)]
    width: Option<u32>,

    /// Requested capture height
    #[arg(long)]
    height: Option<u32>,

    /// Capture pixel format
    #[arg(long, value_enum)]
    pixel_format: Option<PixelFormatArg>,

    /// Debounce window for repeated payloads, in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Longest image side passed to the decoder; larger frames are downscaled
    #[arg(long)]
    max_dimension: Option<u32>,

    /// Preview backend
    #[arg(short, long, value_enum)]
    display: Option<DisplayArg>,

    /// Instruction text drawn on every frame
    #[arg(long)]
    caption: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan for QR codes (default)
    Scan,

    /// Print the effective configuration as JSON
    Config,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DisplayArg {
    Window,
    Terminal,
    Headless,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum PixelFormatArg {
    Mjpg,
    Yuyv,
    Rgb3,
}

impl Cli {
    /// Layer command-line values over the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if !self.cameras.is_empty() {
            config.camera_indices = self.cameras.clone();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(format) = self.pixel_format {
            config.pixel_format = match format {
                PixelFormatArg::Mjpg => PixelFormat::Mjpg,
                PixelFormatArg::Yuyv => PixelFormat::Yuyv,
                PixelFormatArg::Rgb3 => PixelFormat::Rgb3,
            };
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
        if let Some(max_dimension) = self.max_dimension {
            config.max_dimension = max_dimension;
        }
        if let Some(caption) = &self.caption {
            config.caption = caption.clone();
        }
        if let Some(display) = self.display {
            config.display = match display {
                DisplayArg::Window => DisplayMode::Window,
                DisplayArg::Terminal => DisplayMode::Terminal,
                DisplayArg::Headless => DisplayMode::Headless,
            };
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=qr_monitor=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    match cli.command {
        Some(Commands::Config) => {
            println!("{}", config.to_json()?);
            Ok(())
        }
        Some(Commands::Scan) | None => scan(&config),
    }
}

fn scan(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let decoder = Box::new(QrDetector::with_max_dimension(config.max_dimension));
    let mode = config.display;
    let (width, height) = (config.width, config.height);

    qr_monitor::app::run_scan(
        config,
        &V4l2Opener,
        decoder,
        |cameras| display::create_sink(mode, cameras, width, height),
        std::io::stdout().lock(),
    )?;

    Ok(())
}
