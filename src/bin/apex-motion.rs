use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use apex_motion::{Document, Millis, Script, Stage, StageConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "apex-motion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scene (and optional input script) and print every paint in order.
    Simulate(SimulateArgs),
    /// Load and set up a scene, then print what was registered.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Input script JSON.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Stage configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop the clock at this time (ms).
    #[arg(long)]
    until: u64,

    /// Print paints as JSON lines.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Stage configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("open {what} '{}'", path.display()))
}

fn load_stage(scene: &Path, config: Option<&Path>) -> anyhow::Result<Stage> {
    let doc = Document::from_json_str(&read_text(scene, "scene")?)
        .with_context(|| format!("parse scene '{}'", scene.display()))?;
    let cfg = match config {
        Some(path) => StageConfig::from_json_str(&read_text(path, "config")?)
            .with_context(|| format!("parse config '{}'", path.display()))?,
        None => StageConfig::default(),
    };
    Ok(Stage::new(doc, cfg)?)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let mut stage = load_stage(&args.scene, args.config.as_deref())?;
    let script = match &args.script {
        Some(path) => Script::from_json_str(&read_text(path, "script")?)
            .with_context(|| format!("parse script '{}'", path.display()))?,
        None => Script::default(),
    };
    stage.run_script(&script, Millis(args.until))?;

    for (at, paint) in stage.surface().log() {
        if args.json {
            let line = serde_json::json!({ "at": at, "paint": paint });
            println!("{line}");
        } else {
            println!("{:>8}ms {paint}", at.0);
        }
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let mut stage = load_stage(&args.scene, args.config.as_deref())?;
    let summary = stage.setup()?;
    println!("reduced_motion={}", summary.reduced_motion);
    println!("reveals={}", summary.reveals);
    println!("stagger_groups={}", summary.stagger_groups);
    println!("parallax={}", summary.parallax);
    println!("carousels={}", summary.carousels);
    println!("counters={}", summary.counters);
    println!("progress_bars={}", summary.progress_bars);
    Ok(())
}
