//! District boundary loading.
//!
//! Accepts a `GeoJSON` `FeatureCollection` (first feature wins), a single
//! `Feature` or a bare `Geometry`. Both `Polygon` and `MultiPolygon`
//! geometries are supported; holes are preserved.

use std::path::Path;

use geo::{Geometry, MultiPolygon};
use geojson::GeoJson;

use crate::GridError;

/// Embedded outline of the default district.
const DEFAULT_BOUNDARY_GEOJSON: &str = include_str!("../data/district.geojson");

/// Parses a district boundary from a `GeoJSON` string.
///
/// # Errors
///
/// Returns [`GridError`] if the document is not valid `GeoJSON`, holds no
/// geometry, or its geometry is not a polygon.
pub fn parse_boundary(geojson_str: &str) -> Result<MultiPolygon<f64>, GridError> {
    let geojson: GeoJson = geojson_str.parse()?;

    let geometry = match geojson {
        GeoJson::FeatureCollection(collection) => {
            if collection.features.len() > 1 {
                log::warn!(
                    "Boundary collection has {} features, using the first",
                    collection.features.len()
                );
            }
            collection
                .features
                .into_iter()
                .next()
                .and_then(|f| f.geometry)
        }
        GeoJson::Feature(feature) => feature.geometry,
        GeoJson::Geometry(geometry) => Some(geometry),
    }
    .ok_or(GridError::MissingGeometry)?;

    let geometry: Geometry<f64> = geometry.try_into()?;

    match geometry {
        Geometry::MultiPolygon(mp) => Ok(mp),
        Geometry::Polygon(p) => Ok(MultiPolygon(vec![p])),
        other => Err(GridError::UnsupportedGeometry {
            kind: geometry_kind(&other).to_string(),
        }),
    }
}

/// Reads and parses a district boundary file.
///
/// # Errors
///
/// Returns [`GridError`] if the file cannot be read or parsed.
pub fn load_boundary(path: &Path) -> Result<MultiPolygon<f64>, GridError> {
    log::info!("Loading district boundary from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    parse_boundary(&contents)
}

/// Returns the embedded default district outline.
///
/// # Panics
///
/// Panics if the embedded `GeoJSON` fails to parse. Since it is a
/// compile-time constant, a failure indicates a development error and is
/// caught by the tests below.
#[must_use]
pub fn default_boundary() -> MultiPolygon<f64> {
    parse_boundary(DEFAULT_BOUNDARY_GEOJSON)
        .unwrap_or_else(|e| panic!("Failed to parse embedded district boundary: {e}"))
}

const fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        _ => "Geometry",
    }
}
