use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "panel-morph", version)]
struct Cli {
    /// Log pipeline stages to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the animation plan for a morph request.
    Plan(CommonArgs),
    /// Print groupings, matches, cascades and the plan for a morph request.
    Analyze(CommonArgs),
    /// Print the per-element visual state of the plan at one point in time.
    Sample(SampleArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input morph request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Engine configuration JSON; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Plan time in milliseconds.
    #[arg(long)]
    at: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Analyze(args) => cmd_analyze(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))
}

fn load(
    args: &CommonArgs,
) -> anyhow::Result<(panel_morph::MorphRequest, panel_morph::MorphConfig)> {
    let req = read_json(&args.in_path, "morph request")?;
    let cfg = match &args.config {
        Some(path) => {
            let cfg: panel_morph::MorphConfig = read_json(path, "config")?;
            cfg.validate()?;
            cfg
        }
        None => panel_morph::MorphConfig::default(),
    };
    Ok((req, cfg))
}

fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, value).with_context(|| "write output JSON")?;
            w.flush()?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, value).with_context(|| "write output JSON")?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn cmd_plan(args: CommonArgs) -> anyhow::Result<()> {
    let (req, cfg) = load(&args)?;
    let outcome = panel_morph::plan_morph(&req, &cfg)?;
    write_json(&outcome, args.out.as_deref())
}

fn cmd_analyze(args: CommonArgs) -> anyhow::Result<()> {
    let (req, cfg) = load(&args)?;
    let outcome = panel_morph::analyze_morph(&req, &cfg)?;
    write_json(&outcome, args.out.as_deref())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.at.is_finite(), "--at must be finite");
    let (req, cfg) = load(&args.common)?;
    let outcome = match panel_morph::plan_morph(&req, &cfg)? {
        panel_morph::MorphOutcome::Planned(plan) => {
            panel_morph::MorphOutcome::Planned(panel_morph::sample_plan(&plan, args.at))
        }
        panel_morph::MorphOutcome::Skipped(reason) => panel_morph::MorphOutcome::Skipped(reason),
    };
    write_json(&outcome, args.common.out.as_deref())
}
