use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};

use bandviz::{
    animation::{self, BarRig},
    config::Config,
    pipeline::Pipeline,
    timeline::{ClipLoader, Timeline, TimelineClip},
};

#[derive(Parser)]
#[command(
    name = "bandviz",
    version,
    about = "Drive bar-style music visualizations from audio band energies",
    long_about = "Bandviz splits a song into bass, low-mid, mid and high-mid bands, \
reduces each band to one energy value per animation frame, and writes keyframe \
tracks that a host scene can apply to visualizer bars."
)]
struct Cli {
    /// Audio file path (WAV, MP3, FLAC, OGG, AAC)
    #[arg(short, long)]
    audio: PathBuf,

    /// Output CSV of keyframed bar heights
    #[arg(short, long)]
    output: PathBuf,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Place the clip at this frame instead of the project start
    #[arg(long)]
    start_frame: Option<i64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("Starting bandviz v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    // Build a one-clip timeline from the audio file
    let start_frame = cli.start_frame.unwrap_or(config.project.frame_start);
    let clip = ClipLoader::load(&cli.audio, start_frame, config.project.fps)?;
    info!(
        "Loaded '{}': {} channel(s) at {} Hz, frames {}..={}",
        clip.name, clip.channels, clip.sample_rate, clip.start_frame, clip.end_frame
    );

    let mut timeline = Timeline::new();
    timeline.push(TimelineClip::Sound(clip));

    // Run the pipeline and keyframe the bars
    let rig = BarRig::from_config(&config.animation);
    let pipeline = Pipeline::new(config);
    let energies = pipeline
        .run(&timeline)
        .map_err(|e| anyhow::anyhow!("{} failed: {}", e.stage(), e.user_message()))?;

    let tracks = rig.build_tracks(&energies);
    animation::write_csv_file(&cli.output, &tracks)
        .with_context(|| format!("could not write {:?}", cli.output))?;

    info!(
        "Wrote {} tracks x {} frames to {:?}",
        tracks.len(),
        energies.frame_count(),
        cli.output
    );
    Ok(())
}
