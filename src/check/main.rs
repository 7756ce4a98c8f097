//! Reference data check.
//!
//! Loads both cadastral tables strictly, reports how they join, and lists
//! districts the map service cannot address directly.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hashbrown::HashSet;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use zbgis::config::Config;
use zbgis::reference::{load_codes, load_coordinates, TableRows};
use zbgis::ReferenceIndex;

#[derive(Parser, Debug)]
#[command(name = "check")]
#[command(about = "Validate the cadastral reference tables")]
struct Args {
    /// Config file (TOML), built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the code table path
    #[arg(long)]
    codes: Option<PathBuf>,

    /// Override the coordinate table path
    #[arg(long)]
    coordinates: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(codes) = args.codes {
        config.reference.codes = codes;
    }
    if let Some(coordinates) = args.coordinates {
        config.reference.coordinates = coordinates;
    }
    let reference = &config.reference;

    info!("ZBGIS Reference Check");

    let codes = load_codes(&reference.codes, &reference.code_name_column, &reference.code_column)
        .and_then(TableRows::into_result)
        .context("Code table is unusable")?;
    let coordinates = load_coordinates(
        &reference.coordinates,
        &reference.coord_name_column,
        &reference.x_column,
        &reference.y_column,
    )
    .and_then(TableRows::into_result)
    .context("Coordinate table is unusable")?;

    let located: HashSet<&str> = coordinates.iter().map(|row| row.name.as_str()).collect();
    let unlocated: Vec<&str> = codes
        .iter()
        .map(|(name, _)| name.as_str())
        .filter(|name| !located.contains(name))
        .collect();
    drop(located);

    let index = ReferenceIndex::build(codes.clone(), coordinates);

    println!("Code table rows:        {}", codes.len());
    println!("Indexed districts:      {}", index.len());
    println!("Districts without code: {}", index.missing_codes().count());
    println!("Codes without location: {}", unlocated.len());

    for record in index.missing_codes() {
        warn!("No code for district '{}'", record.name);
    }
    for name in &unlocated {
        warn!("No coordinates for district '{}'", name);
    }

    if index.is_empty() {
        anyhow::bail!("Reference index is empty");
    }

    Ok(())
}
