//! `GeoJSON` rendering of grids and cells.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use safe_route_grid_models::{Cell, CellRating, Grid};

/// Renders one cell as a `GeoJSON` feature.
///
/// Properties: `cellId`, `safetyScore` (omitted when unscored), `rating`
/// and `color` (from the effective score).
#[must_use]
pub fn cell_feature(cell: &Cell) -> Feature {
    let rating = CellRating::for_cell(cell);

    let mut properties = JsonObject::new();
    properties.insert("cellId".to_string(), cell.id.to_string().into());
    if let Some(score) = cell.safety_score {
        properties.insert("safetyScore".to_string(), score.value().into());
    }
    properties.insert("rating".to_string(), rating.to_string().into());
    properties.insert("color".to_string(), rating.color().into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&cell.polygon))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Renders cells as a `GeoJSON` feature collection, preserving order.
#[must_use]
pub fn cells_feature_collection<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: cells.into_iter().map(cell_feature).collect(),
        foreign_members: None,
    }
}

/// Renders a whole grid as a `GeoJSON` feature collection.
#[must_use]
pub fn grid_feature_collection(grid: &Grid) -> FeatureCollection {
    cells_feature_collection(grid)
}

#[cfg(test)]
mod tests {
    use geo::polygon;
    use safe_route_grid_models::{CellId, SafetyScore};

    use super::*;

    fn cell(score: Option<u8>) -> Cell {
        Cell::new(
            CellId { column: 2, row: 5 },
            polygon![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
                (x: 0.0, y: 1.0),
                (x: 0.0, y: 0.0),
            ],
        )
        .with_score(score.and_then(|v| SafetyScore::new(v).ok()))
    }

    #[test]
    fn scored_cell_properties() {
        let feature = cell_feature(&cell(Some(85)));
        let props = feature.properties.unwrap();
        assert_eq!(props["cellId"], "c2r5");
        assert_eq!(props["safetyScore"], 85);
        assert_eq!(props["rating"], "Very Safe");
        assert_eq!(props["color"], "#2ecc71");
        assert!(matches!(
            feature.geometry.map(|g| g.value),
            Some(Value::Polygon(_))
        ));
    }

    #[test]
    fn unscored_cell_omits_score() {
        let props = cell_feature(&cell(None)).properties.unwrap();
        assert!(!props.contains_key("safetyScore"));
        assert_eq!(props["rating"], "Less Safe");
    }

    #[test]
    fn grid_collection_keeps_order() {
        let grid = Grid::new(0.5, vec![cell(Some(10)), cell(Some(90))]);
        let collection = grid_feature_collection(&grid);
        let ratings: Vec<String> = collection
            .features
            .iter()
            .map(|f| f.properties.as_ref().unwrap()["rating"].to_string())
            .collect();
        assert_eq!(ratings, vec!["\"Very Unsafe\"", "\"Very Safe\""]);
    }
}
