//! Square grid tessellation of a district boundary.
//!
//! Cells are squares in degree space whose edge is the requested length
//! measured along a great circle. The tiling is centred inside the
//! boundary's bounding box, so any leftover width or height is split evenly
//! between both sides. A cell is kept when its centroid lies strictly
//! inside the boundary (not on an edge and not inside a hole).

use geo::{BoundingRect, Centroid, Contains, MultiPolygon, Rect, coord};
use safe_route_grid_models::{Cell, CellId, Grid};

use crate::GridError;

/// Edge length used by the map when no size is configured.
pub const DEFAULT_CELL_SIZE_KM: f64 = 0.5;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Upper bound on the number of candidate squares for a single grid.
pub const MAX_CANDIDATE_CELLS: u64 = 4_000_000;

/// Converts a great-circle length in kilometers to degrees of arc.
#[must_use]
pub fn km_to_degrees(km: f64) -> f64 {
    (km / EARTH_RADIUS_KM).to_degrees()
}

/// Tessellates `boundary` into square cells of `cell_size_km`.
///
/// Cells come out column-major: west to east, and south to north within a
/// column. Generation is deterministic; the returned cells are unscored.
///
/// # Errors
///
/// * [`GridError::InvalidCellSize`] if `cell_size_km` is not a positive,
///   finite number.
/// * [`GridError::TooManyCells`] if the bounding box would need more than
///   [`MAX_CANDIDATE_CELLS`] squares.
pub fn generate_grid(boundary: &MultiPolygon<f64>, cell_size_km: f64) -> Result<Grid, GridError> {
    if !cell_size_km.is_finite() || cell_size_km <= 0.0 {
        return Err(GridError::InvalidCellSize(cell_size_km));
    }

    let Some(bbox) = boundary.bounding_rect() else {
        log::warn!("District boundary is empty, generated no cells");
        return Ok(Grid::new(cell_size_km, Vec::new()));
    };

    let edge = km_to_degrees(cell_size_km);
    let columns = whole_cells(bbox.width(), edge);
    let rows = whole_cells(bbox.height(), edge);

    if columns == 0 || rows == 0 {
        log::warn!(
            "District boundary is narrower than one {cell_size_km} km cell, generated no cells"
        );
        return Ok(Grid::new(cell_size_km, Vec::new()));
    }

    let candidates = u64::from(columns) * u64::from(rows);
    if candidates > MAX_CANDIDATE_CELLS {
        return Err(GridError::TooManyCells {
            count: candidates,
            limit: MAX_CANDIDATE_CELLS,
        });
    }

    let origin_x = bbox.min().x + (bbox.width() - f64::from(columns) * edge) / 2.0;
    let origin_y = bbox.min().y + (bbox.height() - f64::from(rows) * edge) / 2.0;

    log::debug!(
        "Tessellating {columns}x{rows} squares of {cell_size_km} km ({edge:.6}°) \
         from ({origin_x:.6}, {origin_y:.6})"
    );

    let mut cells = Vec::new();

    for column in 0..columns {
        // Neighbouring cells share the exact same edge coordinate.
        let x0 = origin_x + f64::from(column) * edge;
        let x1 = origin_x + f64::from(column + 1) * edge;

        for row in 0..rows {
            let y0 = origin_y + f64::from(row) * edge;
            let y1 = origin_y + f64::from(row + 1) * edge;

            let square = Rect::new(coord! { x: x0, y: y0 }, coord! { x: x1, y: y1 });
            let id = CellId { column, row };

            if centroid_inside(boundary, square) {
                cells.push(Cell::new(id, square.to_polygon()));
            } else {
                log::trace!("Dropping cell {id}: centroid outside district");
            }
        }
    }

    log::info!(
        "Generated {} grid cells ({} candidates, {cell_size_km} km)",
        cells.len(),
        candidates
    );

    Ok(Grid::new(cell_size_km, cells))
}

/// Number of whole squares of `edge` that fit in `extent`. Non-finite
/// extents fit none.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_cells(extent: f64, edge: f64) -> u32 {
    let count = (extent / edge).floor();
    if !count.is_finite() || count <= 0.0 {
        return 0;
    }
    count.min(f64::from(u32::MAX - 1)) as u32
}

/// Centroid containment test. A centroid that cannot be computed, or is
/// not a finite point, counts as outside.
fn centroid_inside(boundary: &MultiPolygon<f64>, square: Rect<f64>) -> bool {
    let Some(centroid) = square.to_polygon().centroid() else {
        return false;
    };
    if !centroid.x().is_finite() || !centroid.y().is_finite() {
        return false;
    }
    boundary.contains(&centroid)
}

#[cfg(test)]
mod tests {
    use geo::{Polygon, polygon};

    use super::*;

    fn square_district() -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: 77.0, y: 28.4),
            (x: 77.1, y: 28.4),
            (x: 77.1, y: 28.5),
            (x: 77.0, y: 28.5),
            (x: 77.0, y: 28.4),
        ]])
    }

    fn district_with_hole() -> MultiPolygon<f64> {
        let outer = polygon![
            (x: 77.0, y: 28.4),
            (x: 77.1, y: 28.4),
            (x: 77.1, y: 28.5),
            (x: 77.0, y: 28.5),
            (x: 77.0, y: 28.4),
        ];
        let hole = polygon![
            (x: 77.03, y: 28.43),
            (x: 77.07, y: 28.43),
            (x: 77.07, y: 28.47),
            (x: 77.03, y: 28.47),
            (x: 77.03, y: 28.43),
        ];
        MultiPolygon(vec![Polygon::new(
            outer.exterior().clone(),
            vec![hole.exterior().clone()],
        )])
    }

    fn bounds(cell: &Cell) -> Rect<f64> {
        cell.polygon.bounding_rect().unwrap()
    }

    #[test]
    fn rejects_invalid_cell_sizes() {
        let district = square_district();
        for size in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                generate_grid(&district, size),
                Err(GridError::InvalidCellSize(_))
            ));
        }
    }

    #[test]
    fn fills_square_district() {
        let district = square_district();
        let grid = generate_grid(&district, 0.5).unwrap();

        let edge = km_to_degrees(0.5);
        let per_axis = (0.1_f64 / edge).floor();
        assert!((grid.len() as f64 - per_axis * per_axis).abs() < f64::EPSILON);
        assert!((grid.cell_size_km() - 0.5).abs() < f64::EPSILON);
        assert!(!grid.is_scored());
    }

    #[test]
    fn every_centroid_strictly_inside() {
        let district = district_with_hole();
        let grid = generate_grid(&district, 0.5).unwrap();
        assert!(!grid.is_empty());

        for cell in &grid {
            let centroid = cell.polygon.centroid().unwrap();
            assert!(district.contains(&centroid), "cell {} escaped", cell.id);
        }
    }

    #[test]
    fn hole_drops_cells() {
        let full = generate_grid(&square_district(), 0.5).unwrap();
        let holed = generate_grid(&district_with_hole(), 0.5).unwrap();
        assert!(holed.len() < full.len());

        let hole_center = geo::Point::new(77.05, 28.45);
        for cell in &holed {
            assert!(!cell.polygon.contains(&hole_center));
        }
    }

    #[test]
    fn cells_do_not_overlap() {
        let grid = generate_grid(&district_with_hole(), 1.0).unwrap();
        let rects: Vec<Rect<f64>> = grid.iter().map(bounds).collect();

        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                let overlap_x = a.max().x.min(b.max().x) - a.min().x.max(b.min().x);
                let overlap_y = a.max().y.min(b.max().y) - a.min().y.max(b.min().y);
                assert!(
                    overlap_x <= 0.0 || overlap_y <= 0.0,
                    "cells overlap: {a:?} {b:?}"
                );
            }
        }
    }

    #[test]
    fn cells_are_square_with_requested_edge() {
        let grid = generate_grid(&square_district(), 0.5).unwrap();
        let edge = km_to_degrees(0.5);
        for cell in &grid {
            let rect = bounds(cell);
            assert!((rect.width() - edge).abs() < 1e-9);
            assert!((rect.height() - edge).abs() < 1e-9);
        }
    }

    #[test]
    fn tiling_is_centred() {
        let grid = generate_grid(&square_district(), 0.5).unwrap();
        let min_x = grid
            .iter()
            .map(|c| bounds(c).min().x)
            .fold(f64::INFINITY, f64::min);
        let max_x = grid
            .iter()
            .map(|c| bounds(c).max().x)
            .fold(f64::NEG_INFINITY, f64::max);
        let west_margin = min_x - 77.0;
        let east_margin = 77.1 - max_x;
        assert!((west_margin - east_margin).abs() < 1e-9);
    }

    #[test]
    fn generation_is_deterministic() {
        let district = district_with_hole();
        let a = generate_grid(&district, 0.5).unwrap();
        let b = generate_grid(&district, 0.5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn column_major_order() {
        let grid = generate_grid(&square_district(), 1.0).unwrap();
        let ids: Vec<CellId> = grid.iter().map(|c| c.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn cell_larger_than_district_yields_nothing() {
        let grid = generate_grid(&square_district(), 50.0).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn empty_boundary_yields_nothing() {
        let grid = generate_grid(&MultiPolygon(vec![]), 0.5).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn flat_boundary_with_tiny_cells_yields_nothing() {
        let flat = MultiPolygon(vec![polygon![
            (x: 77.0, y: 28.4),
            (x: 77.1, y: 28.4),
            (x: 77.0, y: 28.4),
        ]]);
        let grid = generate_grid(&flat, 0.000_000_001).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn tiny_cells_are_refused() {
        assert!(matches!(
            generate_grid(&square_district(), 0.000_01),
            Err(GridError::TooManyCells { .. })
        ));
    }

    #[test]
    fn km_to_degrees_matches_earth_radius() {
        let one_degree_km = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert!((km_to_degrees(one_degree_km) - 1.0).abs() < 1e-12);
    }
}
