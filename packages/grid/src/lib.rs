#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Safety grid construction for a single district.
//!
//! The pipeline is:
//!
//! 1. [`boundary`] — load the district outline from `GeoJSON` (an outline
//!    for Gurugram is embedded as the default).
//! 2. [`tessellate`] — tile the outline's bounding box with fixed-size
//!    squares and keep the ones whose centroid lies inside the district.
//! 3. [`scoring`] — assign every kept cell a safety score through a
//!    pluggable [`scoring::SafetyScorer`].
//!
//! [`index`] builds an R-tree over the scored cells for intersection
//! queries and [`export`] renders a grid as a `GeoJSON` feature collection.

pub mod boundary;
pub mod export;
pub mod index;
pub mod scoring;
pub mod tessellate;

pub use safe_route_grid_models::{Cell, CellId, CellRating, Coordinate, Grid, SafetyScore};
pub use scoring::{FixedScorer, RandomScorer, SafetyScorer, score_grid};
pub use tessellate::{DEFAULT_CELL_SIZE_KM, generate_grid};

use thiserror::Error;

/// Errors from boundary loading and grid generation.
#[derive(Debug, Error)]
pub enum GridError {
    /// Cell size was zero, negative or not a number.
    #[error("Invalid cell size: {0} km (must be a positive, finite number)")]
    InvalidCellSize(f64),

    /// The bounding box would need more squares than allowed.
    #[error("Grid too large: {count} candidate cells (limit {limit})")]
    TooManyCells {
        /// Number of candidate squares the tiling would need.
        count: u64,
        /// Configured maximum.
        limit: u64,
    },

    /// `GeoJSON` parsing or conversion failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Reading the boundary file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The boundary geometry is not a polygon or multi-polygon.
    #[error("Unsupported boundary geometry: {kind}")]
    UnsupportedGeometry {
        /// The geometry type that was found.
        kind: String,
    },

    /// The `GeoJSON` document contains no geometry.
    #[error("Boundary contains no geometry")]
    MissingGeometry,
}
