use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{info, LevelFilter};

use wg_output::{read_mapping, MappingRow};
use wg_pipeline::{LocatorKind, LogObserver, Pipeline, PipelineConfig};

#[cfg(test)]
mod tests;

/// Nearest-edge search strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Locator {
    /// Scan every edge for each building.
    Linear,
    /// R-tree over edge segments; same result, faster on large graphs.
    Rtree,
}

impl From<Locator> for LocatorKind {
    fn from(l: Locator) -> Self {
        match l {
            Locator::Linear => LocatorKind::Linear,
            Locator::Rtree => LocatorKind::Rtree,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "waygraph", version, about)]
struct Cli {
    /// More log output (-v debug, -vv trace).  RUST_LOG also works.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the adjacency and building-mapping CSV files.
    Build {
        /// Road graph GeoJSON (Point nodes with `id`, edges with `u`/`v`).
        #[arg(long, env = "WAYGRAPH_ROADS")]
        roads: PathBuf,

        /// Building GeoJSON (features with a `name` property).
        #[arg(long, env = "WAYGRAPH_BUILDINGS")]
        buildings: PathBuf,

        /// JSON file with pipeline settings; flags below take precedence.
        #[arg(long, env = "WAYGRAPH_CONFIG")]
        config: Option<PathBuf>,

        /// Output directory (default: current directory).
        #[arg(long, env = "WAYGRAPH_OUT_DIR")]
        out_dir: Option<PathBuf>,

        /// Adjacency file name (default: adj_list.csv).
        #[arg(long, env = "WAYGRAPH_ADJACENCY_FILE")]
        adjacency_file: Option<String>,

        /// Mapping file name (default: building_mapping.csv).
        #[arg(long, env = "WAYGRAPH_MAPPING_FILE")]
        mapping_file: Option<String>,

        #[arg(long, value_enum, env = "WAYGRAPH_LOCATOR")]
        locator: Option<Locator>,
    },
    /// Print `name,node_id` for each building name.
    Lookup {
        /// Mapping CSV written by `build`.
        #[arg(long, env = "WAYGRAPH_MAPPING")]
        mapping: PathBuf,

        /// Exact, case-sensitive building names.
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.format_timestamp(None).target(env_logger::Target::Stderr).init();
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Settings file first, then any flag that was given.
fn resolve_config(
    config:         Option<&Path>,
    out_dir:        Option<PathBuf>,
    adjacency_file: Option<String>,
    mapping_file:   Option<String>,
    locator:        Option<Locator>,
) -> Result<PipelineConfig> {
    let mut cfg = load_config(config)?;
    if let Some(dir) = out_dir {
        cfg.out_dir = dir;
    }
    if let Some(name) = adjacency_file {
        cfg.adjacency_file = name;
    }
    if let Some(name) = mapping_file {
        cfg.mapping_file = name;
    }
    if let Some(l) = locator {
        cfg.locator = l.into();
    }
    if cfg.adjacency_file == cfg.mapping_file {
        bail!("adjacency and mapping files must differ (both {:?})", cfg.adjacency_file);
    }
    Ok(cfg)
}

fn lookup<W: io::Write>(mapping: &Path, names: &[String], out: W) -> Result<()> {
    let table = read_mapping(mapping)
        .with_context(|| format!("reading mapping {}", mapping.display()))?;

    let mut rows = Vec::with_capacity(names.len());
    let mut missing = Vec::new();
    for name in names {
        match table.node_for(name) {
            Some(node) => rows.push(MappingRow { building_name: name.clone(), node_id: node.0 }),
            None => missing.push(name.as_str()),
        }
    }
    if !missing.is_empty() {
        bail!("unknown building(s): {}", missing.join(", "));
    }

    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    for row in &rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Command::Build { roads, buildings, config, out_dir, adjacency_file, mapping_file, locator } => {
            let cfg = resolve_config(config.as_deref(), out_dir, adjacency_file, mapping_file, locator)?;
            info!("locator: {}, output: {}", cfg.locator, cfg.out_dir.display());

            let pipeline = Pipeline::new(cfg);
            let report = pipeline
                .run(&roads, &buildings, &mut LogObserver)
                .context("graph build failed")?;

            info!(
                "wrote {} and {} ({} edges, {} buildings)",
                pipeline.config().adjacency_path().display(),
                pipeline.config().mapping_path().display(),
                report.final_edges,
                report.anchors
            );
        }
        Command::Lookup { mapping, names } => {
            lookup(&mapping, &names, io::stdout().lock())?;
        }
    }
    Ok(())
}
