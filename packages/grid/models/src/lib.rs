#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Grid cell, coordinate and safety score types.
//!
//! Shared by the grid generator, the route planner and the CLI. Geometry is
//! stored as [`geo`] types in `(x = longitude, y = latitude)` order, while
//! [`Coordinate`] keeps the `latitude, longitude` order used by the
//! gazetteer and by map widgets.

use geo::{Point, Polygon};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, `-90..=90`.
    pub latitude: f64,
    /// Longitude in degrees, `-180..=180`.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a coordinate from a `[latitude, longitude]` pair.
    #[must_use]
    pub const fn from_lat_lng(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }

    /// Returns the coordinate as a `[latitude, longitude]` pair.
    #[must_use]
    pub const fn to_lat_lng(self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }

    /// Converts to a geometry point (`x` = longitude, `y` = latitude).
    #[must_use]
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Converts a geometry point (`x` = longitude, `y` = latitude) back.
    #[must_use]
    pub fn from_point(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Whether both components are finite and within WGS84 range.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A cell safety score in `0..=100`. Higher is safer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct SafetyScore(u8);

impl SafetyScore {
    /// Highest possible score.
    pub const MAX: Self = Self(100);

    /// Score used for cells that carry no score at all.
    pub const FALLBACK: Self = Self(50);

    /// Creates a score.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is above 100.
    pub const fn new(value: u8) -> Result<Self, InvalidScoreError> {
        if value > 100 {
            return Err(InvalidScoreError { value });
        }
        Ok(Self(value))
    }

    /// Returns the numeric value of this score.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for SafetyScore {
    type Error = InvalidScoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SafetyScore> for u8 {
    fn from(score: SafetyScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for SafetyScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when attempting to create a [`SafetyScore`] above 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidScoreError {
    /// The invalid score value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid safety score {}: expected 0-100", self.value)
    }
}

impl std::error::Error for InvalidScoreError {}

/// Position of a cell within the tessellation. Column 0 is the westmost
/// column, row 0 the southmost row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CellId {
    /// Zero-based column, west to east.
    pub column: u32,
    /// Zero-based row, south to north.
    pub row: u32,
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}r{}", self.column, self.row)
    }
}

/// One square tile of the tessellated district.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Position within the tessellation.
    pub id: CellId,
    /// Square outline in `(longitude, latitude)` space.
    pub polygon: Polygon<f64>,
    /// Assigned score, `None` until the grid is scored or when the scorer
    /// had no data for this cell.
    pub safety_score: Option<SafetyScore>,
}

impl Cell {
    /// Creates an unscored cell.
    #[must_use]
    pub const fn new(id: CellId, polygon: Polygon<f64>) -> Self {
        Self {
            id,
            polygon,
            safety_score: None,
        }
    }

    /// Returns a copy of this cell carrying `score`.
    #[must_use]
    pub fn with_score(&self, score: Option<SafetyScore>) -> Self {
        Self {
            id: self.id,
            polygon: self.polygon.clone(),
            safety_score: score,
        }
    }

    /// The score to aggregate with: the assigned score, or
    /// [`SafetyScore::FALLBACK`] when none was assigned.
    #[must_use]
    pub fn effective_score(&self) -> SafetyScore {
        self.safety_score.unwrap_or(SafetyScore::FALLBACK)
    }
}

/// An ordered collection of non-overlapping cells covering a district.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cell_size_km: f64,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid from cells that were generated with `cell_size_km`.
    #[must_use]
    pub const fn new(cell_size_km: f64, cells: Vec<Cell>) -> Self {
        Self {
            cell_size_km,
            cells,
        }
    }

    /// Edge length of every cell in kilometers.
    #[must_use]
    pub const fn cell_size_km(&self) -> f64 {
        self.cell_size_km
    }

    /// All cells in tessellation order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over cells in tessellation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Whether every cell carries a score.
    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.cells.iter().all(|c| c.safety_score.is_some())
    }

    /// Consumes the grid, returning its cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Five-tier map legend for a single cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellRating {
    /// Score 80 and above.
    #[strum(serialize = "Very Safe")]
    VerySafe,
    /// Score 60-79.
    #[strum(serialize = "Moderately Safe")]
    ModeratelySafe,
    /// Score 40-59.
    #[strum(serialize = "Less Safe")]
    LessSafe,
    /// Score 20-39.
    #[strum(serialize = "Unsafe")]
    Unsafe,
    /// Score below 20.
    #[strum(serialize = "Very Unsafe")]
    VeryUnsafe,
}

impl CellRating {
    /// Rates a score.
    #[must_use]
    pub const fn from_score(score: SafetyScore) -> Self {
        match score.value() {
            80.. => Self::VerySafe,
            60..=79 => Self::ModeratelySafe,
            40..=59 => Self::LessSafe,
            20..=39 => Self::Unsafe,
            _ => Self::VeryUnsafe,
        }
    }

    /// Rates a cell by its effective score.
    #[must_use]
    pub fn for_cell(cell: &Cell) -> Self {
        Self::from_score(cell.effective_score())
    }

    /// Hex fill color used when drawing the cell.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::VerySafe => "#2ecc71",
            Self::ModeratelySafe => "#f1c40f",
            Self::LessSafe => "#e67e22",
            Self::Unsafe => "#e74c3c",
            Self::VeryUnsafe => "#c0392b",
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::polygon;

    use super::*;

    fn unit_cell() -> Cell {
        Cell::new(
            CellId { column: 0, row: 0 },
            polygon![
                (x: 0.0, y: 0.0),
                (x: 0.0, y: 1.0),
                (x: 1.0, y: 1.0),
                (x: 1.0, y: 0.0),
                (x: 0.0, y: 0.0),
            ],
        )
    }

    #[test]
    fn score_range() {
        assert_eq!(SafetyScore::new(0).map(SafetyScore::value), Ok(0));
        assert_eq!(SafetyScore::new(100).map(SafetyScore::value), Ok(100));
        assert_eq!(SafetyScore::new(101), Err(InvalidScoreError { value: 101 }));
    }

    #[test]
    fn score_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<SafetyScore>("85").is_ok());
        assert!(serde_json::from_str::<SafetyScore>("150").is_err());
    }

    #[test]
    fn missing_score_falls_back_to_fifty() {
        let cell = unit_cell();
        assert_eq!(cell.effective_score().value(), 50);

        let scored = cell.with_score(SafetyScore::new(0).ok());
        assert_eq!(scored.effective_score().value(), 0);
        assert_eq!(scored.polygon, cell.polygon);
    }

    #[test]
    fn coordinate_point_order() {
        let coord = Coordinate::from_lat_lng([28.4595, 77.0266]);
        let point = coord.to_point();
        assert!((point.x() - 77.0266).abs() < f64::EPSILON);
        assert!((point.y() - 28.4595).abs() < f64::EPSILON);
        assert_eq!(Coordinate::from_point(point), coord);
        assert_eq!(coord.to_lat_lng(), [28.4595, 77.0266]);
    }

    #[test]
    fn coordinate_validity() {
        assert!(Coordinate::new(28.4, 77.0).is_valid());
        assert!(!Coordinate::new(91.0, 77.0).is_valid());
        assert!(!Coordinate::new(28.4, f64::NAN).is_valid());
    }

    #[test]
    fn coordinate_finiteness() {
        // Out of range but finite.
        assert!(Coordinate::new(91.0, 200.0).is_finite());
        assert!(!Coordinate::new(f64::NAN, 77.0).is_finite());
        assert!(!Coordinate::new(28.4, f64::INFINITY).is_finite());
    }

    #[test]
    fn rating_tiers() {
        let rate = |v| CellRating::from_score(SafetyScore::new(v).unwrap());
        assert_eq!(rate(100), CellRating::VerySafe);
        assert_eq!(rate(80), CellRating::VerySafe);
        assert_eq!(rate(79), CellRating::ModeratelySafe);
        assert_eq!(rate(60), CellRating::ModeratelySafe);
        assert_eq!(rate(59), CellRating::LessSafe);
        assert_eq!(rate(40), CellRating::LessSafe);
        assert_eq!(rate(39), CellRating::Unsafe);
        assert_eq!(rate(20), CellRating::Unsafe);
        assert_eq!(rate(19), CellRating::VeryUnsafe);
        assert_eq!(rate(0), CellRating::VeryUnsafe);
    }

    #[test]
    fn rating_labels_and_colors() {
        assert_eq!(CellRating::VerySafe.to_string(), "Very Safe");
        assert_eq!(CellRating::VeryUnsafe.as_ref(), "Very Unsafe");
        assert_eq!(CellRating::LessSafe.color(), "#e67e22");
        assert_eq!(CellRating::for_cell(&unit_cell()), CellRating::LessSafe);
    }

    #[test]
    fn grid_scored_flag() {
        let cell = unit_cell();
        let unscored = Grid::new(0.5, vec![cell.clone()]);
        assert!(!unscored.is_scored());
        let scored = Grid::new(0.5, vec![cell.with_score(Some(SafetyScore::MAX))]);
        assert!(scored.is_scored());
        assert_eq!(scored.len(), 1);
    }
}
