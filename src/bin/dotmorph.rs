use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dotmorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a word letter by letter and write every frame as a PNG.
    Play(PlayArgs),
    /// Print the dot positions sampled from a string as JSON.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct SurfaceArgs {
    /// Font file (TTF/OTF) used to rasterize text.
    #[arg(long)]
    font: PathBuf,

    /// Config JSON; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width in pixels (overrides the config).
    #[arg(long)]
    width: Option<u32>,

    /// Surface height in pixels (overrides the config).
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Output directory for numbered PNG frames.
    #[arg(long)]
    out_dir: PathBuf,

    /// Word to spell.
    #[arg(long, default_value = "LOVE")]
    word: String,

    /// RNG seed (overrides the config).
    #[arg(long)]
    seed: Option<u64>,

    /// Keep every Nth frame.
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Pace frames at their tick interval instead of rendering as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// How many times to fire the sequence.
    #[arg(long, default_value_t = 1)]
    repeat: u32,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Text to sample.
    #[arg(long)]
    text: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn load_config(args: &SurfaceArgs) -> anyhow::Result<dotmorph::MorphConfig> {
    let mut cfg = match &args.config {
        Some(path) => dotmorph::MorphConfig::from_json_file(path)?,
        None => dotmorph::MorphConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.viewport.width = w;
    }
    if let Some(h) = args.height {
        cfg.viewport.height = h;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn load_font(path: &Path) -> anyhow::Result<dotmorph::FontBytes> {
    dotmorph::FontBytes::from_file(path).with_context(|| format!("load font '{}'", path.display()))
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.surface)?;
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    let font = load_font(&args.surface.font)?;

    let display = dotmorph::CpuSurface::new(cfg.viewport, &font)?
        .with_background(Some(cfg.background));
    let raster = dotmorph::CpuSurface::new(cfg.viewport, &font)?;

    let pacing: Box<dyn dotmorph::Ticker> = if args.realtime {
        Box::new(dotmorph::RealTime::new())
    } else {
        Box::new(dotmorph::Immediate::default())
    };
    let ticker = dotmorph::PngSequence::new(&args.out_dir, args.every, pacing)?;

    let mut engine = dotmorph::MorphEngine::new(cfg.clone(), display, raster, ticker)?;
    let mut trigger = dotmorph::Trigger::new(dotmorph::Sequence::spell(
        &args.word,
        cfg.scatter_duration(),
    ));

    for round in 0..args.repeat {
        tracing::info!(
            round,
            word = %args.word,
            steps = trigger.sequence().steps().len(),
            "firing sequence"
        );
        trigger.fire(&mut engine)?;
    }

    eprintln!(
        "wrote {} frames to {}",
        engine.ticker().written(),
        engine.ticker().dir().display()
    );
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.surface)?;
    let font = load_font(&args.surface.font)?;
    let raster = dotmorph::CpuSurface::new(cfg.viewport, &font)?;
    let mut sampler = dotmorph::ShapeSampler::new(raster, cfg.clone())?;

    let points = sampler.sample_text(&args.text)?;
    let out = serde_json::json!({
        "text": args.text,
        "width": cfg.viewport.width,
        "height": cfg.viewport.height,
        "dot_gap": cfg.dot_gap,
        "points": points.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serialize points")?
    );
    Ok(())
}
