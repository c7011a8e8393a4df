use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

use orrery::particles::renderer::ParticleBackend;

#[derive(Parser, Debug)]
#[command(name = "orrery", version)]
struct Cli {
    /// Log transitions and isolated failures.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the presentation at one instant as a PNG.
    Frame(FrameArgs),
    /// Replay an event script into a PNG sequence or an MP4 (MP4 requires `ffmpeg` on PATH).
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Projects JSON.
    #[arg(long)]
    projects: PathBuf,

    /// About JSON.
    #[arg(long)]
    about: PathBuf,

    /// Presentation options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width, overriding the config.
    #[arg(long)]
    width: Option<f64>,

    /// Surface height, overriding the config.
    #[arg(long)]
    height: Option<f64>,

    /// RNG seed, overriding the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Font file used for all text. Text is skipped without one.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Galaxy particle renderer.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Starting route such as `/`, `/about` or `/projects/<id>`.
    #[arg(long, default_value = "/")]
    route: String,

    /// Playback time to render, in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    at_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Event script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Output directory for PNG frames, or a `.mp4` file.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
    #[cfg(feature = "gpu")]
    Gpu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load_opts(common: &CommonArgs) -> anyhow::Result<orrery::PresentationOpts> {
    let mut opts = match &common.config {
        Some(path) => orrery::PresentationOpts::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => orrery::PresentationOpts::default(),
    };
    if common.width.is_some() || common.height.is_some() {
        let width = common.width.unwrap_or(opts.viewport.width);
        let height = common.height.unwrap_or(opts.viewport.height);
        opts.viewport = orrery::Viewport::new(width, height)?;
    }
    if common.seed.is_some() {
        opts.seed = common.seed;
    }
    opts.galaxy.particle_backend = match common.backend {
        BackendChoice::Cpu => ParticleBackend::Cpu,
        #[cfg(feature = "gpu")]
        BackendChoice::Gpu => ParticleBackend::Gpu,
    };
    opts.validate()?;
    Ok(opts)
}

fn make_backend(common: &CommonArgs) -> anyhow::Result<Box<dyn orrery::RenderBackend>> {
    let font_bytes = match &common.font {
        Some(path) => Some(
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?,
        ),
        None => None,
    };
    let settings = orrery::RenderSettings { font_bytes };
    Ok(orrery::create_backend(orrery::BackendKind::Cpu, &settings)?)
}

fn make_presentation(
    common: &CommonArgs,
    opts: orrery::PresentationOpts,
) -> orrery::Presentation {
    orrery::Presentation::from_paths(&common.projects, &common.about, opts)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let opts = load_opts(&args.common)?;
    let route: orrery::Route = args.route.parse()?;
    anyhow::ensure!(
        args.at_ms.is_finite() && args.at_ms >= 0.0,
        "--at-ms must be finite and >= 0"
    );

    let interval = opts.frame_interval_ms.max(1.0);
    let mut backend = make_backend(&args.common)?;
    let mut presentation = make_presentation(&args.common, opts);

    presentation.start(&route);
    let ticks = (args.at_ms / interval).floor() as u64;
    for i in 0..=ticks {
        presentation.frame(i as f64 * interval);
    }

    let frame = presentation.render(backend.as_mut())?;
    orrery::encode::png::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut opts = load_opts(&args.common)?;
    let script = orrery::Script::from_path(&args.script)?;
    if let Some(viewport) = script.viewport {
        opts.viewport = viewport;
    }
    let background = opts.background;

    let mut backend = make_backend(&args.common)?;
    let mut presentation = make_presentation(&args.common, opts);

    let frames = if is_mp4(&args.out) {
        let mut sink = orrery::FfmpegSink::new(&args.out, background);
        orrery::run_script(&script, &mut presentation, backend.as_mut(), &mut sink)?
    } else {
        let mut sink = orrery::PngSequenceSink::new(&args.out);
        orrery::run_script(&script, &mut presentation, backend.as_mut(), &mut sink)?
    };

    eprintln!("wrote {frames} frames to {}", args.out.display());
    Ok(())
}

fn is_mp4(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("mp4"))
}
