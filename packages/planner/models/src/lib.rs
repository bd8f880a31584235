#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Route safety types.
//!
//! These types are serialized to JSON by the CLI. Field names follow the
//! camelCase keys the map front-end reads (`averageScore`,
//! `safeCellsCount`, ...).

use safe_route_grid_models::{Coordinate, SafetyScore};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Overall safety of a route, derived from its average cell score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum SafetyLevel {
    /// Average score 70 and above.
    #[serde(rename = "High Safety")]
    #[strum(serialize = "High Safety")]
    HighSafety,
    /// Average score 50-69.
    #[serde(rename = "Moderate Safety")]
    #[strum(serialize = "Moderate Safety")]
    ModerateSafety,
    /// Average score 30-49.
    #[serde(rename = "Low Safety")]
    #[strum(serialize = "Low Safety")]
    LowSafety,
    /// Average score below 30.
    #[serde(rename = "High Risk")]
    #[strum(serialize = "High Risk")]
    HighRisk,
    /// The route crossed no scored cells.
    #[serde(rename = "Unknown")]
    #[strum(serialize = "Unknown")]
    Unknown,
}

impl SafetyLevel {
    /// Classifies an average score.
    #[must_use]
    pub const fn from_average(average: u8) -> Self {
        match average {
            70.. => Self::HighSafety,
            50..=69 => Self::ModerateSafety,
            30..=49 => Self::LowSafety,
            _ => Self::HighRisk,
        }
    }

    /// Lowercase, dash-separated form (`high-safety`) for styling hooks.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::HighSafety => "high-safety",
            Self::ModerateSafety => "moderate-safety",
            Self::LowSafety => "low-safety",
            Self::HighRisk => "high-risk",
            Self::Unknown => "unknown",
        }
    }
}

/// Coarse per-cell bucket used for the route breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBucket {
    /// Score 70 and above.
    Safe,
    /// Score 40-69.
    Moderate,
    /// Score below 40.
    Unsafe,
}

impl ScoreBucket {
    /// Buckets a single cell score.
    #[must_use]
    pub const fn from_score(score: SafetyScore) -> Self {
        match score.value() {
            70.. => Self::Safe,
            40..=69 => Self::Moderate,
            _ => Self::Unsafe,
        }
    }
}

/// Aggregate safety of the cells a route crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetySummary {
    /// Rounded mean of the crossed cells' scores; 0 when none were crossed.
    pub average_score: u8,
    /// Cells scoring 70 or more.
    pub safe_cells_count: usize,
    /// Cells scoring 40-69.
    pub moderate_cells_count: usize,
    /// Cells scoring below 40.
    pub unsafe_cells_count: usize,
    /// Level derived from `average_score`.
    pub safety_level: SafetyLevel,
}

impl SafetySummary {
    /// Summary of a route that crossed no cells.
    pub const UNKNOWN: Self = Self {
        average_score: 0,
        safe_cells_count: 0,
        moderate_cells_count: 0,
        unsafe_cells_count: 0,
        safety_level: SafetyLevel::Unknown,
    };

    /// Number of cells the summary covers.
    #[must_use]
    pub const fn total_cells(&self) -> usize {
        self.safe_cells_count + self.moderate_cells_count + self.unsafe_cells_count
    }
}

/// Map viewport framing a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Midpoint between source and destination.
    pub center: Coordinate,
    /// South-west corner of the source/destination bounding box.
    pub south_west: Coordinate,
    /// North-east corner of the source/destination bounding box.
    pub north_east: Coordinate,
}

impl MapView {
    /// Frames the straight line between `a` and `b`.
    #[must_use]
    pub fn between(a: Coordinate, b: Coordinate) -> Self {
        Self {
            center: Coordinate::new(
                (a.latitude + b.latitude) / 2.0,
                (a.longitude + b.longitude) / 2.0,
            ),
            south_west: Coordinate::new(
                a.latitude.min(b.latitude),
                a.longitude.min(b.longitude),
            ),
            north_east: Coordinate::new(
                a.latitude.max(b.latitude),
                a.longitude.max(b.longitude),
            ),
        }
    }
}

/// A user's journey request: two free-text place names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyRequest {
    /// Where the journey starts.
    pub source: String,
    /// Where the journey ends.
    pub destination: String,
}

impl JourneyRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// A crossed cell as reported to the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteCellReport {
    /// Cell identifier (`c{column}r{row}`).
    pub cell_id: String,
    /// Assigned score, if any.
    pub safety_score: Option<u8>,
}

/// JSON shape of a planned journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyReport {
    /// Source name as entered.
    pub source: String,
    /// Destination name as entered.
    pub destination: String,
    /// Resolved source position.
    pub source_coords: Coordinate,
    /// Resolved destination position.
    pub dest_coords: Coordinate,
    /// Straight-line length in kilometers.
    pub total_distance: f64,
    /// Safety of the crossed cells.
    pub safety_data: SafetySummary,
    /// Crossed cells in grid order.
    pub cells_on_route: Vec<RouteCellReport>,
    /// Suggested viewport.
    pub view: MapView,
}
