use crate::batch::{GenerateOptions, OutputFormat, build_layouts, write_layouts};
use crate::config::load_config;
use crate::layout_dump::write_layout_dump;
use crate::parser::load_dataset;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "league-graphs",
    version,
    about = "League performance charts for clubs and derbies"
)]
pub struct Args {
    /// League dataset (.json or .json5)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Directory receiving graphs-clubs/ and graphs-derbies/
    #[arg(short = 'o', long = "outDir", default_value = ".")]
    pub out_dir: PathBuf,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "both")]
    pub output_format: OutputFormatArg,

    /// Config JSON file (grid, theme, chart and render overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Only chart this club (repeatable, full name as in the dataset)
    #[arg(long = "club")]
    pub clubs: Vec<String>,

    /// Skip derby charts
    #[arg(long = "noDerbies")]
    pub no_derbies: bool,

    /// Write the computed layouts as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormatArg {
    Svg,
    Png,
    Both,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Svg => OutputFormat::Svg,
            OutputFormatArg::Png => OutputFormat::Png,
            OutputFormatArg::Both => OutputFormat::Both,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(args.config.as_deref())?;
    let league = load_dataset(&args.input)?;
    info!(
        input = %args.input.display(),
        seasons = league.axis.len(),
        clubs = league.clubs.len(),
        derbies = league.derbies.len(),
        "loaded dataset"
    );

    let options = GenerateOptions {
        out_dir: args.out_dir.clone(),
        format: args.output_format.into(),
        clubs: (!args.clubs.is_empty()).then(|| args.clubs.iter().cloned().collect()),
        derbies: !args.no_derbies,
    };

    let started = Instant::now();
    let layouts = build_layouts(&league, &config, &options)?;
    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layouts)?;
        info!(path = %path.display(), "wrote layout dump");
    }
    let files = write_layouts(&layouts, &config, &options)?;
    info!(
        charts = layouts.len(),
        files = files.len(),
        out_dir = %options.out_dir.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
