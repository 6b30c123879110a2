use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use metromorph::encode::gif::{NativeGifEncoder, NativeGifOpts};
use metromorph::encode::gifsicle::{GifsicleEncoder, GifsicleOpts};
use metromorph::encode::sink::AnimationEncoder;
use sha2::Digest as _;
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "metromorph", version)]
struct Cli {
    /// Defaults to `render` with default options.
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the looping GIF.
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug, Default)]
struct RenderArgs {
    /// Output GIF path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Font file for the label instead of the installed family.
    #[arg(long)]
    font: Option<PathBuf>,

    /// How the frames are assembled into the loop.
    #[arg(long, value_enum, default_value_t = EncoderChoice::Gifsicle)]
    encoder: EncoderChoice,

    /// Do not open the result in the default viewer.
    #[arg(long)]
    no_open: bool,

    /// Print the resolved label font (family name + SHA-256 of font bytes).
    #[arg(long)]
    dump_font: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Font file for the label instead of the installed family.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum EncoderChoice {
    /// Segment GIFs merged by the system `gifsicle`.
    #[default]
    Gifsicle,
    /// In-process GIF encoder.
    Native,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd.unwrap_or_else(|| Command::Render(RenderArgs::default())) {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn make_backend(
    map: &metromorph::MetroMap,
    font: Option<PathBuf>,
    dump_font: bool,
) -> anyhow::Result<metromorph::CpuBackend> {
    let Some(label) = &map.label else {
        return Ok(metromorph::CpuBackend::new());
    };
    let source = match font {
        Some(path) => metromorph::FontSource::File(path),
        None => metromorph::FontSource::system(label.font_family.clone()),
    };
    let loaded = metromorph::load_font(&source)
        .with_context(|| format!("load font for label '{}'", label.text))?;
    if dump_font {
        eprintln!("label font diagnostics:");
        eprintln!("  family: {}", loaded.family);
        eprintln!("  sha256: {}", sha256_hex(&loaded.bytes));
    }
    Ok(metromorph::CpuBackend::with_font(loaded))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let map = metromorph::montreal()?;
    let mut settings = metromorph::AnimationSettings::default();
    if let Some(out) = args.out {
        settings.out_path = out;
    }
    let mut backend = make_backend(&map, args.font, args.dump_font)?;

    let bg_rgba = map.background.to_rgba8();
    let mut encoder: Box<dyn AnimationEncoder> = match args.encoder {
        EncoderChoice::Gifsicle => Box::new(GifsicleEncoder::new(GifsicleOpts {
            out_path: settings.out_path.clone(),
            colors: settings.colors,
            bg_rgba,
        })?),
        EncoderChoice::Native => Box::new(NativeGifEncoder::new(NativeGifOpts {
            out_path: settings.out_path.clone(),
            bg_rgba,
        })),
    };

    let stats =
        metromorph::render_animation(&map, &settings, &mut backend, encoder.as_mut())?;
    tracing::info!(
        frames = stats.frames_rendered,
        entries = stats.timeline_entries,
        loop_ms = stats.loop_duration.as_millis() as u64,
        "animation complete"
    );
    eprintln!("wrote {}", settings.out_path.display());

    if !args.no_open {
        metromorph::open_in_viewer(&settings.out_path);
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let map = metromorph::montreal()?;
    let tween = metromorph::AnimationSettings::default().tween()?;
    let mut backend = make_backend(&map, args.font, false)?;

    metromorph::render_still(
        &map,
        &tween,
        metromorph::FrameIndex(args.frame),
        &mut backend,
        &args.out,
    )
    .with_context(|| format!("render frame {}", args.frame))?;

    eprintln!("wrote {}", args.out.display());
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
