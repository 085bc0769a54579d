use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use slide_banner::constants::FPS;
use slide_banner::engine::{self, Engine};
use slide_banner::host::{FfmpegRecorder, MemorySurface, ThreadedImageHost, load_sorted_image_paths};
use slide_banner::{BannerConfig, BannerController};

type Banner = BannerController<MemorySurface, ThreadedImageHost>;

/// Rotating image banner with push-slide transitions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory of images to show, in file name order
    image_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Time each image stays on screen, in milliseconds
    #[arg(long)]
    switch_time_ms: Option<u64>,

    /// Pixels the slide moves per transition tick
    #[arg(long)]
    speed: Option<u32>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Give up when images are not loaded within this many milliseconds
    #[arg(long)]
    load_timeout_ms: Option<u64>,

    /// Record to a video file through ffmpeg instead of opening a window
    #[arg(short, long)]
    record: Option<PathBuf>,

    /// Length of the recording; one full cycle through the images by default
    #[arg(long)]
    duration_secs: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    info!(
        images = config.paths.len(),
        prefix = %config.paths_prefix,
        width = config.width,
        height = config.height,
        "starting banner"
    );

    let surface = MemorySurface::new(config.width, config.height);
    let mut banner = BannerController::new(surface, ThreadedImageHost::new(), &config);
    banner
        .animate(&config.paths, &config.paths_prefix)
        .context("failed to start banner")?;
    engine::wait_until_ready(&mut banner, Duration::from_millis(10)).context("failed to load images")?;

    match &cli.record {
        Some(output) => record(&mut banner, &config, output, cli.duration_secs),
        None => show(&mut banner, &config),
    }
}

fn build_config(cli: &Cli) -> Result<BannerConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            BannerConfig::load(path).with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => BannerConfig::default(),
    };

    if let Some(switch_time_ms) = cli.switch_time_ms {
        config.switch_time_ms = switch_time_ms;
    }
    if let Some(speed) = cli.speed {
        config.animation_speed = speed;
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if cli.load_timeout_ms.is_some() {
        config.load_timeout_ms = cli.load_timeout_ms;
    }

    if let Some(dir) = &cli.image_dir {
        config.paths_prefix = dir.to_string_lossy().into_owned();
        if config.paths.is_empty() {
            let paths = load_sorted_image_paths(dir)
                .with_context(|| format!("failed to list images in {}", dir.display()))?;
            config.paths = paths
                .iter()
                .filter_map(|path| path.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect();
        }
    }

    config.validate().context("invalid configuration")?;
    if config.paths.is_empty() {
        bail!("no images: pass an image directory or list `paths` in the config file");
    }
    Ok(config)
}

fn record(banner: &mut Banner, config: &BannerConfig, output: &Path, duration_secs: Option<u64>) -> Result<()> {
    let duration = duration_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.switch_time() * (banner.image_count() as u32 + 1));
    let frames = (duration.as_secs_f64() * f64::from(FPS)).ceil() as u64;

    let mut recorder = FfmpegRecorder::spawn(config.width, config.height, FPS, output)?;
    Engine::new(Some(frames)).run(banner, &mut recorder)?;
    info!(frames = recorder.frames_written(), ?output, "video written");
    Ok(())
}

#[cfg(feature = "gui")]
fn show(banner: &mut Banner, config: &BannerConfig) -> Result<()> {
    let mut window = slide_banner::host::RaylibWindow::open(config.width, config.height)?;
    Engine::new(None).run(banner, &mut window)?;
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn show(_banner: &mut Banner, _config: &BannerConfig) -> Result<()> {
    bail!("built without the `gui` feature: pass --record <FILE> to render a video instead")
}
