use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "morphfield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the frame presented at a given time as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence.
    Sequence(SequenceArgs),
    /// Print a JSON summary of every catalog shape.
    Shapes(SessionArgs),
    /// Print the SHA-256 of the last frame of a sequence.
    Digest(DigestArgs),
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Logical surface width.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Logical surface height.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Device pixel ratio reported to the engine (clamped by the config).
    #[arg(long, default_value_t = 1.0)]
    pixel_ratio: f32,

    /// Engine config JSON. Missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the config particle count.
    #[arg(long)]
    particles: Option<usize>,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Time since loop start, in milliseconds.
    #[arg(long)]
    at_ms: f64,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    session: SessionArgs,

    #[arg(long)]
    frames: u64,

    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Directory receiving `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct DigestArgs {
    #[command(flatten)]
    session: SessionArgs,

    #[arg(long)]
    frames: u64,

    #[arg(long, default_value_t = 60)]
    fps: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Shapes(args) => cmd_shapes(args),
        Command::Digest(args) => cmd_digest(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &SessionArgs) -> anyhow::Result<morphfield::EngineConfig> {
    let mut cfg = match &args.config {
        Some(path) => morphfield::EngineConfig::from_json_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => morphfield::EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(particles) = args.particles {
        cfg.particle_count = particles;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn make_engine(args: &SessionArgs) -> anyhow::Result<morphfield::ParticleEngine> {
    let cfg = load_config(args)?;
    let viewport = morphfield::Viewport::new(args.width, args.height)?;
    let kind = match args.backend {
        BackendChoice::Cpu => morphfield::BackendKind::Cpu,
    };
    let mut engine = morphfield::ParticleEngine::with_backend_kind(cfg, viewport, kind)?;
    engine.resize(viewport, args.pixel_ratio)?;
    Ok(engine)
}

fn fps_of(fps: u32) -> anyhow::Result<morphfield::Fps> {
    Ok(morphfield::Fps::new(fps, 1)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut engine = make_engine(&args.session)?;
    let frame = morphfield::render_at(&mut engine, fps_of(args.fps)?, args.at_ms)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    morphfield::write_png(&args.out, &frame)?;

    let state = engine.state();
    eprintln!(
        "wrote {} (shape {}, {:?}, progress {:.3})",
        args.out.display(),
        engine.catalog().get(state.current_shape).kind(),
        state.phase,
        state.progress
    );
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let mut engine = make_engine(&args.session)?;
    let mut sink = morphfield::PngDirSink::new(&args.out_dir);
    let stats =
        morphfield::render_sequence(&mut engine, fps_of(args.fps)?, args.frames, &mut sink)?;
    eprintln!(
        "wrote {} frames to {} ({} uploads, {} transitions)",
        stats.frames_rendered,
        args.out_dir.display(),
        stats.position_uploads,
        stats.transitions_started
    );
    Ok(())
}

fn cmd_shapes(args: SessionArgs) -> anyhow::Result<()> {
    let engine = make_engine(&args)?;
    let summaries = engine.catalog().summaries();
    let json = serde_json::to_string_pretty(&summaries).with_context(|| "encode summaries")?;
    println!("{json}");
    Ok(())
}

fn cmd_digest(args: DigestArgs) -> anyhow::Result<()> {
    let mut engine = make_engine(&args.session)?;
    let mut sink = morphfield::LastFrameSink::new();
    morphfield::render_sequence(&mut engine, fps_of(args.fps)?, args.frames, &mut sink)?;
    let (idx, frame) = sink.last().context("sequence produced no frames")?;
    println!("{} frame={} {}x{}", sha256_hex(&frame.data), idx.0, frame.width, frame.height);
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
