#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Place-name lookup against a static gazetteer.
//!
//! Stands in for a geocoding service: a small, ordered table of place names
//! and coordinates, searched first by exact name and then by substring in
//! either direction. Tables are TOML files; the built-in Gurugram table is
//! embedded at compile time (see [`registry`]).
//!
//! Ambiguous partial queries resolve to the first matching entry in table
//! order. There is no similarity ranking.

pub mod normalize;
pub mod registry;

use std::collections::BTreeSet;
use std::path::Path;

use safe_route_grid_models::Coordinate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;

pub use normalize::normalize;

/// Errors from loading a gazetteer table.
#[derive(Debug, Error)]
pub enum GazetteerError {
    /// TOML parsing failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Reading the table file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Two entries normalize to the same name.
    #[error("Duplicate place: {name}")]
    DuplicatePlace {
        /// The normalized name that appeared twice.
        name: String,
    },

    /// An entry has a blank name.
    #[error("Place at position {position} has an empty name")]
    EmptyName {
        /// Zero-based position in the table.
        position: usize,
    },

    /// An entry's coordinates are not a valid WGS84 position.
    #[error("Place {name} has invalid coordinates [{latitude}, {longitude}]")]
    InvalidCoordinate {
        /// Normalized place name.
        name: String,
        /// Latitude as given.
        latitude: f64,
        /// Longitude as given.
        longitude: f64,
    },
}

/// A named place with a fixed position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Normalized (trimmed, lowercase) name.
    pub name: String,
    /// Position of the place.
    pub coordinate: Coordinate,
}

/// How a query matched a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase")]
pub enum MatchKind {
    /// The normalized query equals the place name.
    Exact,
    /// One of query and place name contains the other.
    Partial,
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// The matched place name.
    pub name: String,
    /// Its position.
    pub coordinate: Coordinate,
    /// How the query matched.
    pub match_kind: MatchKind,
}

/// Strategy for turning free-text place names into coordinates.
pub trait LocationResolver {
    /// Looks up `query`, returning the matched place and how it matched.
    fn lookup(&self, query: &str) -> Option<Resolution>;

    /// Place names that contain `partial`, for autocomplete.
    fn suggest(&self, partial: &str) -> Vec<String>;

    /// Looks up `query`, returning only its coordinate.
    fn resolve(&self, query: &str) -> Option<Coordinate> {
        self.lookup(query).map(|r| r.coordinate)
    }
}

/// On-disk shape of a gazetteer table.
#[derive(Debug, Deserialize)]
struct GazetteerFile {
    places: Vec<PlaceEntry>,
}

/// One `[[places]]` entry. Coordinates are `[latitude, longitude]`.
#[derive(Debug, Deserialize)]
struct PlaceEntry {
    name: String,
    coordinates: [f64; 2],
}

/// An ordered, read-only table of places.
#[derive(Debug, Clone, PartialEq)]
pub struct Gazetteer {
    places: Vec<Place>,
}

impl Gazetteer {
    /// Builds a gazetteer from places in lookup order. Names are
    /// normalized.
    ///
    /// # Errors
    ///
    /// Returns [`GazetteerError`] if a name is blank or duplicated after
    /// normalization, or a coordinate is out of range.
    pub fn from_places(places: Vec<Place>) -> Result<Self, GazetteerError> {
        let mut seen = BTreeSet::new();
        let mut normalized = Vec::with_capacity(places.len());

        for (position, place) in places.into_iter().enumerate() {
            let name = normalize(&place.name);
            if name.is_empty() {
                return Err(GazetteerError::EmptyName { position });
            }
            if !place.coordinate.is_valid() {
                return Err(GazetteerError::InvalidCoordinate {
                    name,
                    latitude: place.coordinate.latitude,
                    longitude: place.coordinate.longitude,
                });
            }
            if !seen.insert(name.clone()) {
                return Err(GazetteerError::DuplicatePlace { name });
            }
            normalized.push(Place {
                name,
                coordinate: place.coordinate,
            });
        }

        Ok(Self { places: normalized })
    }

    /// Parses a TOML table of `[[places]]` entries.
    ///
    /// # Errors
    ///
    /// Returns [`GazetteerError`] if the TOML is malformed or an entry is
    /// invalid.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, GazetteerError> {
        let file: GazetteerFile = toml::de::from_str(toml_str)?;
        Self::from_places(
            file.places
                .into_iter()
                .map(|entry| Place {
                    name: entry.name,
                    coordinate: Coordinate::from_lat_lng(entry.coordinates),
                })
                .collect(),
        )
    }

    /// Reads and parses a TOML table file.
    ///
    /// # Errors
    ///
    /// Returns [`GazetteerError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, GazetteerError> {
        log::info!("Loading gazetteer from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let gazetteer = Self::from_toml_str(&contents)?;
        log::info!("Loaded {} places", gazetteer.len());
        Ok(gazetteer)
    }

    /// The built-in table (see [`registry::builtin`]).
    #[must_use]
    pub fn builtin() -> Self {
        registry::builtin()
    }

    /// All places in lookup order.
    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// All place names in lookup order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.places.iter().map(|p| p.name.as_str())
    }

    /// Number of places.
    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Exact lookup of an already-normalized name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.name == name)
    }
}

impl LocationResolver for Gazetteer {
    /// Exact match first, then the first entry (in table order) whose name
    /// contains the query or is contained in it. A blank query is contained
    /// in every name, so it resolves to the first entry; callers that need
    /// a name must reject blank input themselves.
    fn lookup(&self, query: &str) -> Option<Resolution> {
        let normalized = normalize(query);

        if let Some(place) = self.get(&normalized) {
            return Some(Resolution {
                name: place.name.clone(),
                coordinate: place.coordinate,
                match_kind: MatchKind::Exact,
            });
        }

        let place = self
            .places
            .iter()
            .find(|p| p.name.contains(&normalized) || normalized.contains(&p.name))?;

        log::debug!("Resolved {query:?} to {:?} by partial match", place.name);

        Some(Resolution {
            name: place.name.clone(),
            coordinate: place.coordinate,
            match_kind: MatchKind::Partial,
        })
    }

    /// Every place name containing the normalized query, in table order.
    /// A blank query lists every place.
    fn suggest(&self, partial: &str) -> Vec<String> {
        let normalized = normalize(partial);
        self.names()
            .filter(|name| name.contains(&normalized))
            .map(ToString::to_string)
            .collect()
    }
}
