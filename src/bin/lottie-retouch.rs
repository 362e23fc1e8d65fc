use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context as _};
use clap::{Parser, Subcommand, ValueEnum};
use lottie_retouch::{HexColor, IncomingFile, LoadedFile, OverrideSet, Session};
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "lottie-retouch", version, about = "Inspect and edit Lottie animations")]
struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print metadata and layers of one or more animations.
    Info(InfoArgs),
    /// Print the static colors of an animation, one per line.
    Colors(ColorsArgs),
    /// Write an edited copy of an animation.
    Edit(EditArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Animation JSON files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct ColorsArgs {
    /// Animation JSON file.
    input: PathBuf,
}

#[derive(Parser, Debug)]
struct EditArgs {
    /// Animation JSON file.
    input: PathBuf,

    /// Replace a static color, e.g. `--recolor '#ff0000=#00f'`.
    #[arg(long, value_name = "FROM=TO", value_parser = parse_recolor)]
    recolor: Vec<(HexColor, HexColor)>,

    /// Remove the top-level layer at this index (0-based).
    #[arg(long, value_name = "INDEX")]
    hide: Vec<usize>,

    /// Rename the top-level layer at this index (0-based).
    #[arg(long, value_name = "INDEX=NAME", value_parser = parse_rename)]
    rename: Vec<(usize, String)>,

    /// Playback speed multiplier, baked into the frame rate.
    #[arg(long)]
    speed: Option<f64>,

    /// Override set JSON to apply before the flags above.
    #[arg(long, value_name = "PATH")]
    profile: Option<PathBuf>,

    /// Also write the combined override set to this path.
    #[arg(long, value_name = "PATH")]
    save_profile: Option<PathBuf>,

    /// Output path. Defaults to `<name>-modified.json` next to the input.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn parse_recolor(s: &str) -> Result<(HexColor, HexColor), String> {
    let (from, to) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FROM=TO, got {s:?}"))?;
    let from = from.trim().parse().map_err(|e| format!("{e}"))?;
    let to = to.trim().parse().map_err(|e| format!("{e}"))?;
    Ok((from, to))
}

fn parse_rename(s: &str) -> Result<(usize, String), String> {
    let (index, name) = s
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=NAME, got {s:?}"))?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid layer index {index:?}"))?;
    Ok((index, name.to_owned()))
}

fn init_logging(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .directive()
                .parse()
                .unwrap_or_else(|_| LevelFilter::WARN.into()),
        )
        .from_env_lossy();

    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Colors(args) => cmd_colors(args),
        Command::Edit(args) => cmd_edit(args),
    }
}

fn read_incoming(path: &Path) -> anyhow::Result<IncomingFile> {
    let bytes = fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(IncomingFile::new(name, bytes))
}

fn load_one(session: &mut Session, path: &Path) -> anyhow::Result<lottie_retouch::FileId> {
    let mut report = session.add_files([read_incoming(path)?]);
    if let Some(failure) = report.failed.pop() {
        return Err(failure.error).with_context(|| format!("load '{}'", path.display()));
    }
    report
        .added
        .first()
        .copied()
        .with_context(|| format!("load '{}'", path.display()))
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<ExitCode> {
    let mut session = Session::new();
    let mut failed = 0usize;

    let mut batch = Vec::new();
    for path in &args.inputs {
        match read_incoming(path) {
            Ok(incoming) => batch.push(incoming),
            Err(e) => {
                eprintln!("error: {e:#}");
                failed += 1;
            }
        }
    }

    let report = session.add_files(batch);
    for failure in &report.failed {
        eprintln!("error: {}", failure.error);
    }
    failed += report.failed.len();

    for file in session.files() {
        print_info(file);
    }

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_info(file: &LoadedFile) {
    let meta = file.meta();
    println!("{}", file.name());
    println!("  version:     {}", meta.version);
    println!("  frame rate:  {} fps", meta.frame_rate);
    println!("  frames:      {} ({:.2} s)", meta.total_frames, meta.duration);
    println!("  size:        {}x{}", meta.width, meta.height);
    println!("  file size:   {} bytes", file.size());
    println!(
        "  expressions: {}",
        if meta.has_expressions { "yes" } else { "no" }
    );
    println!("  layers:      {}", meta.layer_count);
    for layer in file.layers() {
        println!(
            "    {:>3}  {:<6} {}",
            layer.index,
            layer.kind.label(),
            layer.display_name()
        );
    }
}

fn cmd_colors(args: ColorsArgs) -> anyhow::Result<ExitCode> {
    let mut session = Session::new();
    let id = load_one(&mut session, &args.input)?;
    for color in session.file(id)?.colors() {
        println!("{color}");
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_edit(args: EditArgs) -> anyhow::Result<ExitCode> {
    let mut session = Session::new();
    let id = load_one(&mut session, &args.input)?;

    let mut overrides = match &args.profile {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("read profile '{}'", path.display()))?;
            OverrideSet::from_json(&json)
                .with_context(|| format!("parse profile '{}'", path.display()))?
        }
        None => OverrideSet::new(),
    };

    let colors = session.file(id)?.colors();
    for &(from, to) in &args.recolor {
        if !colors.contains(&from) {
            warn!(color = %from, "color does not occur in the document");
        }
        overrides.set_color_override(from, to);
    }
    for &index in &args.hide {
        overrides = overrides.with_hidden_layer(index);
    }
    if let Some(speed) = args.speed {
        overrides.set_speed_multiplier(speed)?;
    }
    session.apply_overrides(id, &overrides)?;

    for (index, name) in &args.rename {
        session.rename_layer(id, *index, name.as_str())?;
    }

    let export = session.export(id)?;
    let out_path = match args.out {
        Some(path) => path,
        None => {
            let path = args.input.with_file_name(&export.file_name);
            if path == args.input {
                bail!("no edits requested; pass --out to write an unmodified copy");
            }
            path
        }
    };

    fs::write(&out_path, &export.contents)
        .with_context(|| format!("write '{}'", out_path.display()))?;
    info!(path = %out_path.display(), "wrote edited animation");

    if let Some(path) = &args.save_profile {
        let json = session.file(id)?.overrides().to_json_pretty()?;
        fs::write(path, json).with_context(|| format!("write profile '{}'", path.display()))?;
    }

    Ok(ExitCode::SUCCESS)
}
