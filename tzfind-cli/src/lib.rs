//! tzfind CLI

use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use regex::Regex;
use tracing_subscriber::EnvFilter;

use tzfind_core::builder::{build_catalog, BuildOptions};
use tzfind_core::catalog::{write_catalog_file, Catalog};
use tzfind_core::output::{write_json_pretty, write_ndjson};
use tzfind_core::query::{parse_terms, Query};
use tzfind_core::record::TimezoneRecord;
use tzfind_core::reference::ReferenceDb;

pub mod server;

const DEFAULT_CATALOG: &str = "timezones.json";
const DEFAULT_BIND: &str = "127.0.0.1:8787";
const DEFAULT_LOG_FILTER: &str = "tzfind=info,tzfind_core=info";

/// CLI entrypoint for tzfind.
#[derive(Debug, Parser)]
#[command(
    name = "tzfind",
    about = "Build and search a catalog of IANA timezones"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the catalog artifact from reference data
    Build(BuildArgs),
    /// Search a catalog artifact from the terminal
    Find(FindArgs),
    /// Serve catalog lookups over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Reference dataset (countries-and-timezones JSON)
    #[arg(short = 'r', long = "reference", value_hint = ValueHint::FilePath)]
    reference: PathBuf,

    /// Where to write the catalog
    #[arg(short = 'o', long = "output", default_value = DEFAULT_CATALOG, value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Calendar year sampled for abbreviations (defaults to the current year)
    #[arg(long = "year")]
    year: Option<i32>,

    /// Worker threads used while deriving records
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,
}

#[derive(Debug, Args)]
struct FindArgs {
    /// Search terms; every term must match
    terms: Vec<String>,

    /// Catalog to search (defaults to TZFIND_CATALOG or timezones.json)
    #[arg(short = 'c', long = "catalog", value_hint = ValueHint::FilePath)]
    catalog: Option<PathBuf>,

    /// Regex patterns of which at least one must match the zone id
    #[arg(long = "id", value_hint = ValueHint::Other)]
    id_patterns: Vec<String>,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Format output as padded columns
    #[arg(long = "columns", action = ArgAction::SetTrue)]
    columns: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Address to bind (defaults to TZFIND_BIND or 127.0.0.1:8787)
    #[arg(short = 'b', long = "bind")]
    bind: Option<String>,

    /// Catalog to serve (defaults to TZFIND_CATALOG or timezones.json)
    #[arg(short = 'c', long = "catalog", value_hint = ValueHint::FilePath)]
    catalog: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Build(args) => run_build(args),
        Command::Find(args) => run_find(args),
        Command::Serve(args) => run_serve(args),
    }
}

/// Log to stderr so data on stdout stays pipeable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run_build(args: BuildArgs) -> Result<()> {
    let reference = ReferenceDb::load(&args.reference)?;
    let mut opts = BuildOptions::default();
    if let Some(year) = args.year {
        opts.year = year;
    }
    opts.jobs = args.jobs;

    let records = build_catalog(&reference, &opts)?;
    write_catalog_file(&records, &args.output)?;

    println!("Generated {} timezone entries", records.len());
    Ok(())
}

fn run_find(args: FindArgs) -> Result<()> {
    let catalog = Catalog::load(&resolve_catalog_path(&args.catalog))?;
    let query = build_query(&args)?;
    let matches = catalog.search(&query);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => handle.is_terminal(),
    };

    if args.ndjson {
        write_ndjson(&matches, &mut handle)?;
    } else if args.json {
        write_json_pretty(&matches, &mut handle)?;
        writeln!(handle)?;
    } else if args.columns {
        write_columns(&matches, &mut handle, use_color)?;
    } else {
        write_plain(&matches, &mut handle, use_color)?;
    }

    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<()> {
    let catalog = Catalog::load(&resolve_catalog_path(&args.catalog))?;
    let bind = resolve_bind(&args.bind);

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(server::serve(&bind, catalog))
}

fn build_query(args: &FindArgs) -> Result<Query> {
    let terms = parse_terms(&args.terms.join(" "));
    let id_patterns = compile_patterns(&args.id_patterns)?;

    Ok(Query::new()
        .with_terms(terms)
        .with_id_patterns(id_patterns))
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid regex: {p}")))
        .collect()
}

/// Flag, then `TZFIND_CATALOG`, then `timezones.json`.
pub fn resolve_catalog_path(flag: &Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path.clone();
    }

    env::var_os("TZFIND_CATALOG")
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG))
}

fn resolve_bind(flag: &Option<String>) -> String {
    if let Some(bind) = flag {
        return bind.clone();
    }

    env::var("TZFIND_BIND")
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BIND.to_string())
}

fn write_plain(matches: &[&TimezoneRecord], mut w: impl Write, color: bool) -> Result<()> {
    for item in matches {
        let rendered = apply_color(&item.id, color, AnsiColor::Cyan);
        writeln!(w, "{rendered}")?;
    }
    Ok(())
}

fn write_columns(matches: &[&TimezoneRecord], mut w: impl Write, color: bool) -> Result<()> {
    let id_width = matches
        .iter()
        .map(|m| m.id.chars().count())
        .max()
        .unwrap_or(0)
        .min(60);
    let name_width = matches
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(80);

    for item in matches {
        let padded_id = format!("{:<id_width$}", item.id);
        let padded_name = format!("{:<name_width$}", item.name);
        let details = format!("{} {}", item.utc_offset, item.abbreviations.join(","));

        let rendered_id = apply_color(&padded_id, color, AnsiColor::Cyan);
        let rendered_name = apply_color(&padded_name, color, AnsiColor::Yellow);
        let rendered_details = apply_color(&details, color, AnsiColor::Green);

        writeln!(w, "{rendered_id}  {rendered_name}  {rendered_details}")?;
    }

    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}
