mod angle;
mod catalog;
mod chart;
mod config;
mod locate;
mod render;
mod sky;
mod timeframe;
mod web;

use chrono::{FixedOffset, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::catalog::{load_catalog, CatalogLoad};
use crate::chart::{compute_chart, BelowHorizonPolicy, ChartRequest, ProjectionType};
use crate::config::{ChartOverrides, Config};
use crate::render::{ChartRenderer, JsonRenderer};
use crate::timeframe::{parse_local_datetime, parse_utc_offset};
use crate::web::{run_server, AppState};

#[derive(Parser)]
#[command(name = "star-scope")]
#[command(about = "Planisphere star charts for any place and local time")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a chart and write it as JSON
    Chart(ChartArgs),
    /// Load a star catalog and report what was read
    Catalog { path: Option<PathBuf> },
    /// Serve the chart API
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Args)]
struct ChartArgs {
    /// Place name or "lat, lon"
    #[arg(long)]
    location: String,
    /// Local wall-clock time, e.g. "2024-03-20 21:00"
    #[arg(long, value_parser = parse_local_datetime)]
    time: NaiveDateTime,
    /// IANA timezone, looked up from the location when omitted
    #[arg(long)]
    timezone: Option<String>,
    /// Disambiguates a local time repeated by a daylight-saving change
    #[arg(long, value_parser = parse_utc_offset, allow_hyphen_values = true)]
    utc_offset: Option<FixedOffset>,
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long, value_enum)]
    projection: Option<ProjectionType>,
    #[arg(long, value_enum)]
    below_horizon: Option<BelowHorizonPolicy>,
    #[arg(long)]
    refraction: bool,
    #[arg(long)]
    grid: bool,
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Chart(args) => chart(config, args),
        Commands::Catalog { path } => catalog(&config, path.as_deref()),
        Commands::Serve { bind } => serve(config, bind),
    }
}

fn read_catalog(path: &Path) -> Option<CatalogLoad> {
    match load_catalog(path) {
        Ok(load) => Some(load),
        Err(e) => {
            eprintln!("Error loading catalog: {}", e);
            None
        }
    }
}

fn chart(config: Config, args: ChartArgs) -> ExitCode {
    let path = args.catalog.clone().unwrap_or_else(|| config.catalog_path.clone());
    let Some(load) = read_catalog(&path) else {
        return ExitCode::FAILURE;
    };

    let options = config.chart_options_with(&ChartOverrides {
        projection: args.projection,
        below_horizon: args.below_horizon,
        refraction: args.refraction.then_some(true),
        grid: args.grid.then_some(true),
    });
    let request = ChartRequest {
        location: args.location,
        local_time: args.time,
        timezone: args.timezone,
        utc_offset: args.utc_offset,
    };

    let gazetteer = config.gazetteer();
    let chart = match compute_chart(&load.catalog, &request, &gazetteer, &gazetteer, &options) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Chart error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => match File::create(path) {
            Ok(f) => Box::new(BufWriter::new(f)),
            Err(e) => {
                eprintln!("Error creating {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdout().lock()),
    };

    let renderer = JsonRenderer {
        compact: args.compact,
    };
    if let Err(e) = renderer.render(&chart, &mut out) {
        eprintln!("Error writing chart: {}", e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = out.flush() {
        eprintln!("Error writing chart: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn catalog(config: &Config, path: Option<&Path>) -> ExitCode {
    let path = path.unwrap_or(&config.catalog_path);
    let Some(load) = read_catalog(path) else {
        return ExitCode::FAILURE;
    };

    let summary = load.summary(path);
    println!("Loaded {} stars from {}", summary.star_count, summary.source);
    if let (Some(bright), Some(faint)) = (summary.brightest_magnitude, summary.faintest_magnitude) {
        println!("  magnitudes {:.2} to {:.2}", bright, faint);
    }
    for star in load.catalog.brightest(5) {
        println!(
            "  {:<12} ra {:>8.3}  dec {:>+8.3}  mag {:>5.2}",
            star.id, star.right_ascension_deg, star.declination_deg, star.magnitude
        );
    }
    if !summary.skipped_rows.is_empty() {
        println!("Skipped {} rows:", summary.skipped_rows.len());
        for row in &summary.skipped_rows {
            println!("  {}", row);
        }
    }
    ExitCode::SUCCESS
}

fn serve(mut config: Config, bind: Option<String>) -> ExitCode {
    if let Some(bind) = bind {
        config.web.bind = bind;
    }
    let path = config.catalog_path.clone();
    let Some(load) = read_catalog(&path) else {
        return ExitCode::FAILURE;
    };
    let state = AppState::new(config, load, &path);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_server(state)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
