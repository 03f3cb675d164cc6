use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use lucent::{
    AtmosphereEffect, DistortionEffect, EnvFactor, FrameSink, InMemorySink, PngSequenceSink,
    RunStats, Session, SessionConfig, SharedEnv, SourceConfig, Variant, refresh_env_now, run_frames,
    save_png,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lucent", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a session and write its last presented frame as a PNG.
    Frame(FrameArgs),
    /// Run a session and write every presented frame as a PNG sequence.
    Render(RenderArgs),
    /// List the mode keys of each variant.
    Modes(ModesArgs),
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Session config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pipeline to run.
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Mode key (see `lucent modes`).
    #[arg(long)]
    mode: Option<String>,

    /// Effect strength, 0..=100.
    #[arg(long)]
    intensity: Option<u32>,

    /// Layout width the presentation surface is sized from.
    #[arg(long)]
    viewport_width: Option<u32>,

    /// Ticks per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Number of ticks to run.
    #[arg(long)]
    frames: Option<u64>,

    /// Still image used as the camera (distortion variant).
    #[arg(long)]
    image: Option<PathBuf>,

    /// Weather payload JSON (atmosphere variant).
    #[arg(long)]
    weather: Option<PathBuf>,

    /// Wall clock at tick 0 in Unix milliseconds.
    #[arg(long)]
    start_unix_ms: Option<i64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Output directory for the PNG sequence.
    #[arg(long)]
    out_dir: PathBuf,

    /// File name prefix for each frame.
    #[arg(long, default_value = "frame_")]
    prefix: String,
}

#[derive(Args, Debug)]
struct ModesArgs {
    /// Only list this variant.
    #[arg(long, value_enum)]
    variant: Option<Variant>,
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
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Modes(args) => cmd_modes(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.session)?;
    let mut sink = InMemorySink::new();
    let stats = run(&cfg, &mut sink)?;
    let (_, frame) = sink
        .frames()
        .last()
        .context("no frame was drawn; increase --frames")?;
    save_png(&args.out, frame).with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} ({} ticks)", args.out.display(), stats.ticks);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.session)?;
    let mut sink = PngSequenceSink::new(&args.out_dir, args.prefix);
    let stats = run(&cfg, &mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_pushed,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_modes(args: ModesArgs) -> anyhow::Result<()> {
    let variants = match args.variant {
        Some(v) => vec![v],
        None => vec![Variant::Distortion, Variant::Atmosphere],
    };
    for v in variants {
        let name = match v {
            Variant::Distortion => "distortion",
            Variant::Atmosphere => "atmosphere",
        };
        println!("{name}: {}", v.mode_keys().join(", "));
    }
    Ok(())
}

fn load_config(args: &SessionArgs) -> anyhow::Result<SessionConfig> {
    let mut cfg = match &args.config {
        Some(path) => SessionConfig::from_path(path)
            .with_context(|| format!("load session config '{}'", path.display()))?,
        None => SessionConfig::default(),
    };

    if let Some(v) = args.variant {
        if args.mode.is_none() && v != cfg.variant {
            cfg.mode = v.mode_keys()[0].to_owned();
        }
        cfg.variant = v;
    }
    if let Some(m) = &args.mode {
        cfg.mode = m.clone();
    }
    if let Some(i) = args.intensity {
        cfg.intensity = i;
    }
    if let Some(w) = args.viewport_width {
        cfg.viewport_width = w;
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    if let Some(n) = args.frames {
        cfg.frames = n;
    }
    if let Some(p) = &args.image {
        cfg.source = SourceConfig::Image(p.clone());
    }
    if let Some(p) = &args.weather {
        cfg.weather = Some(p.clone());
    }
    if let Some(ms) = args.start_unix_ms {
        cfg.start_unix_ms = Some(ms);
    }

    cfg.validate().context("invalid session config")?;
    Ok(cfg)
}

fn run(cfg: &SessionConfig, sink: &mut dyn FrameSink) -> anyhow::Result<RunStats> {
    let timeline = cfg.timeline(now_unix_ms());
    let stats = match cfg.variant {
        Variant::Distortion => {
            let effect = DistortionEffect::with_opts(cfg.camera()?, cfg.camera_opts());
            let mut session = Session::new(effect, cfg.viewport_width);
            run_frames(&mut session, &cfg.distortion_controls()?, &timeline, sink)?
        }
        Variant::Atmosphere => {
            // Offline runs load weather up front so every frame sees the same record.
            let env = SharedEnv::new(EnvFactor::UNKNOWN);
            if let Some(provider) = cfg.weather_provider() {
                refresh_env_now(provider.as_ref(), &env);
            }
            let effect = AtmosphereEffect::new(env).with_utc_offset(cfg.utc_offset_minutes);
            let mut session = Session::new(effect, cfg.viewport_width);
            run_frames(&mut session, &cfg.atmosphere_controls()?, &timeline, sink)?
        }
    };
    Ok(stats)
}

fn now_unix_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
