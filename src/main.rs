use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use metric_sampler::constants::config::CONFIG_FILE;
use metric_sampler::data::{ColumnMapping, MetricSource};
use metric_sampler::{SamplingConfig, SeriesSampler, Strategy, Viewport, full_data_for_range};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Feature-preserving downsampling for metric curves", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Downsample every run in a metrics table and write the result as JSON
    Sample(SampleArgs),
    /// Print the unsampled observations of one run between two steps
    Range(RangeArgs),
    /// Write the default configuration file
    InitConfig {
        #[arg(default_value = CONFIG_FILE, value_hint = ValueHint::FilePath)]
        path: PathBuf,
    },
}

#[derive(Parser, Debug)]
struct ColumnArgs {
    /// Column naming the run of each row
    #[arg(long, default_value = "run_name")]
    run_column: String,

    /// Treat the whole table as a single run
    #[arg(long, action = ArgAction::SetTrue)]
    single_run: bool,

    /// Column holding the step (x axis)
    #[arg(long, default_value = "step")]
    step_column: String,

    /// Column holding the metric value
    #[arg(long, default_value = "value")]
    value_column: String,

    /// Optional column carried through as stderr
    #[arg(long)]
    stderr_column: Option<String>,
}

impl ColumnArgs {
    fn mapping(&self) -> ColumnMapping {
        ColumnMapping {
            run: (!self.single_run).then(|| self.run_column.clone()),
            step: self.step_column.clone(),
            value: self.value_column.clone(),
            stderr: self.stderr_column.clone(),
        }
    }
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// CSV or Parquet metrics table
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// JSON configuration file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Sampling strategy (uniform, smart, lod)
    #[arg(short, long)]
    strategy: Option<String>,

    /// Series at or below this length are left untouched
    #[arg(long)]
    max_points: Option<usize>,

    /// Desired number of points per sampled series
    #[arg(long)]
    target_points: Option<usize>,

    /// Feature detection radius
    #[arg(long)]
    window: Option<usize>,

    /// Start of the visible window as a fraction (lod only)
    #[arg(long)]
    viewport_start: Option<f64>,

    /// End of the visible window as a fraction (lod only)
    #[arg(long)]
    viewport_end: Option<f64>,

    #[command(flatten)]
    columns: ColumnArgs,

    /// Output JSON path (`-` for stdout)
    #[arg(short, long, default_value = "-", value_hint = ValueHint::FilePath)]
    output: PathBuf,
}

#[derive(Parser, Debug)]
struct RangeArgs {
    /// CSV or Parquet metrics table
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Run to read
    #[arg(long)]
    run: String,

    /// First step to include
    #[arg(long)]
    start: f64,

    /// Last step to include
    #[arg(long)]
    end: f64,

    #[command(flatten)]
    columns: ColumnArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Command::Sample(args) => handle_sample(args),
        Command::Range(args) => handle_range(args),
        Command::InitConfig { path } => handle_init_config(&path),
    }
}

fn handle_sample(args: SampleArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SamplingConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SamplingConfig::default(),
    };
    if let Some(name) = &args.strategy {
        config.strategy = Strategy::from(name.as_str());
    }
    if let Some(max_points) = args.max_points {
        config.max_points = max_points;
    }
    if let Some(target_points) = args.target_points {
        config.target_points = target_points;
    }
    if let Some(window) = args.window {
        config.smoothing_window = window;
    }
    if args.viewport_start.is_some() || args.viewport_end.is_some() {
        config.viewport = Viewport::new(
            args.viewport_start.unwrap_or(config.viewport.start),
            args.viewport_end.unwrap_or(config.viewport.end),
        );
    }

    let sampler = SeriesSampler::new(config).context("invalid sampling configuration")?;
    let source = MetricSource::load(&args.input, &args.columns.mapping())
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    if source.is_empty() {
        return Err(anyhow!("no observations found in {}", args.input.display()));
    }

    let output = sampler.sample_metric_data(source.runs());
    for (name, meta) in &output.metadata {
        info!(
            run = %name,
            original = meta.original_length,
            sampled = meta.sampled_length,
            strategy = ?meta.strategy,
            "sampled run"
        );
    }

    let json = serde_json::to_string_pretty(&output)?;
    write_output(&args.output, &json)
}

fn handle_range(args: RangeArgs) -> Result<()> {
    let source = MetricSource::load(&args.input, &args.columns.mapping())
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let series = source.run(&args.run).ok_or_else(|| {
        anyhow!(
            "run '{}' not found (available: {})",
            args.run,
            source.run_names().join(", ")
        )
    })?;

    let slice = full_data_for_range(series, args.start, args.end);
    info!(run = %args.run, points = slice.len(), "range extracted");

    let json = serde_json::to_string_pretty(slice)?;
    write_output(Path::new("-"), &json)
}

fn handle_init_config(path: &Path) -> Result<()> {
    SamplingConfig::default()
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote default configuration");
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if path == Path::new("-") {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(contents.as_bytes())?;
        handle.write_all(b"\n")?;
    } else {
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}
