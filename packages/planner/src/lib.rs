#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Straight-line route planning over a scored safety grid.
//!
//! A route is the straight segment between two coordinates. It is not
//! snapped to any road network. The grid cells the segment touches are
//! reduced to a [`SafetySummary`]:
//!
//! * [`route`] — segment construction, cell selection and distance.
//! * [`summary`] — score averaging, bucket counts and the overall level.
//! * [`journey`] — resolving two place names and planning between them.

pub mod distance;
pub mod journey;
pub mod route;
pub mod summary;

pub use distance::haversine_km;
pub use journey::{Journey, plan_journey};
pub use route::{Route, RoutePlanner, plan_route};
pub use safe_route_planner_models::{
    JourneyRequest, MapView, SafetyLevel, SafetySummary, ScoreBucket,
};
pub use summary::summarize;

use thiserror::Error;

/// Errors from journey planning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JourneyError {
    /// Source or destination was blank.
    #[error("Please enter both source and destination")]
    MissingEndpoint,

    /// A place name could not be resolved.
    #[error("Location not found: {name}")]
    LocationNotFound {
        /// The name as entered.
        name: String,
    },
}
