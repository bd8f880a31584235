#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front-end for the district safety map.
//!
//! Builds the safety grid for a district, exports it as `GeoJSON`, looks up
//! place names and assesses the straight route between two places.
//!
//! Logging goes through `pretty_env_logger`; set `RUST_LOG=info` to see
//! pipeline progress.

mod config;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use geo::MultiPolygon;
use geojson::GeoJson;
use safe_route_gazetteer::{Gazetteer, LocationResolver};
use safe_route_grid::boundary::{default_boundary, load_boundary};
use safe_route_grid::export::grid_feature_collection;
use safe_route_grid::{Grid, RandomScorer, generate_grid, score_grid};
use safe_route_planner::{Journey, JourneyError, JourneyRequest, RoutePlanner, plan_journey};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "safe_route", about = "District safety grid and route assessment")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Gazetteer TOML file (overrides the config file)
    #[arg(long, global = true)]
    gazetteer: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Grid options shared by `grid` and `plan`.
#[derive(Args)]
struct GridArgs {
    /// District boundary `GeoJSON` file
    #[arg(long)]
    boundary: Option<PathBuf>,

    /// Cell edge length in kilometers
    #[arg(long)]
    cell_size_km: Option<f64>,

    /// Seed for reproducible placeholder scores
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the scored grid as a `GeoJSON` feature collection
    Grid {
        #[command(flatten)]
        grid: GridArgs,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Look up the coordinates of a place
    Resolve {
        /// Place name (exact or partial)
        name: String,
    },
    /// List places whose name contains the input
    Suggest {
        /// Partial place name
        partial: String,
    },
    /// Assess the straight route between two places
    Plan {
        /// Where the journey starts
        source: String,

        /// Where the journey ends
        destination: String,

        #[command(flatten)]
        grid: GridArgs,

        /// Print the full journey as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let gazetteer = match cli.gazetteer.as_deref().or(config.gazetteer.path.as_deref()) {
        Some(path) => Gazetteer::load(path)?,
        None => Gazetteer::builtin(),
    };

    match cli.command {
        Commands::Grid { grid, output } => {
            let grid = build_grid(&config, &grid)?;
            let geojson = GeoJson::FeatureCollection(grid_feature_collection(&grid));
            let rendered = serde_json::to_string_pretty(&geojson)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    log::info!("Wrote {} cells to {}", grid.len(), path.display());
                }
                None => println!("{rendered}"),
            }
        }
        Commands::Resolve { name } => {
            if name.trim().is_empty() {
                return Err("Please enter a location".into());
            }
            let Some(resolution) = gazetteer.lookup(&name) else {
                return Err(format!("Location not found: {name}").into());
            };
            println!(
                "{} ({}): {:.4}, {:.4}",
                resolution.name,
                resolution.match_kind,
                resolution.coordinate.latitude,
                resolution.coordinate.longitude
            );
        }
        Commands::Suggest { partial } => {
            for name in gazetteer.suggest(&partial) {
                println!("{name}");
            }
        }
        Commands::Plan {
            source,
            destination,
            grid,
            json,
        } => {
            let grid = build_grid(&config, &grid)?;
            let planner = RoutePlanner::new(&grid);

            let journey =
                match plan_journey(&gazetteer, &planner, JourneyRequest::new(source, destination))
                {
                    Ok(journey) => journey,
                    Err(e) => {
                        report_journey_error(&gazetteer, &e);
                        return Err(e.into());
                    }
                };

            if json {
                println!("{}", serde_json::to_string_pretty(&journey.report())?);
            } else {
                print_journey(&journey);
            }
        }
    }

    Ok(())
}

/// Loads the boundary, tessellates it and scores the cells, with command
/// line flags taking precedence over the config file.
fn build_grid(config: &Config, args: &GridArgs) -> Result<Grid, Box<dyn std::error::Error>> {
    let boundary_path = args.boundary.as_deref().or(config.grid.boundary.as_deref());
    let boundary = load_district(boundary_path)?;

    let cell_size_km = args.cell_size_km.unwrap_or(config.grid.cell_size_km);
    let grid = generate_grid(&boundary, cell_size_km)?;

    let mut scorer = match args.seed.or(config.scoring.seed) {
        Some(seed) => {
            log::info!("Scoring with seed {seed}");
            RandomScorer::seeded(seed)
        }
        None => RandomScorer::new(),
    };

    Ok(score_grid(&grid, &mut scorer))
}

fn load_district(path: Option<&Path>) -> Result<MultiPolygon<f64>, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => load_boundary(path)?,
        None => {
            log::info!("Using embedded district boundary");
            default_boundary()
        }
    })
}

fn report_journey_error(gazetteer: &Gazetteer, error: &JourneyError) {
    match error {
        JourneyError::MissingEndpoint => {
            eprintln!("Please enter both source and destination");
        }
        JourneyError::LocationNotFound { name } => {
            eprintln!("One or both locations not found. Please check the location names.");
            let suggestions = gazetteer.suggest(name);
            if !suggestions.is_empty() {
                eprintln!("Did you mean: {}", suggestions.join(", "));
            }
        }
    }
}

fn print_journey(journey: &Journey) {
    let route = &journey.route;
    let safety = &route.safety;

    println!("Journey Analysis");
    println!();
    println!("From: {}", journey.request.source);
    println!("To: {}", journey.request.destination);
    println!("Distance: {:.2} km", route.total_distance_km);
    println!();
    println!("Safety Assessment");
    println!("Overall: {}", safety.safety_level);
    println!("Score: {}/100", safety.average_score);
    println!();
    println!("Safe: {}", safety.safe_cells_count);
    println!("Moderate: {}", safety.moderate_cells_count);
    println!("Unsafe: {}", safety.unsafe_cells_count);
}
