//! Straight-line routes and the cells they cross.

use geo::{Intersects, Line};
use safe_route_grid::index::CellIndex;
use safe_route_grid_models::{Cell, Coordinate, Grid};
use safe_route_planner_models::{MapView, SafetySummary};

use crate::distance::haversine_km;
use crate::summary::summarize;

/// A planned route. Recomputed from scratch for every request.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Start of the route.
    pub source: Coordinate,
    /// End of the route.
    pub destination: Coordinate,
    /// The straight segment in `(longitude, latitude)` space.
    pub line: Line<f64>,
    /// Cells the segment touches, in grid order.
    pub cells_on_route: Vec<Cell>,
    /// Great-circle length of the segment in kilometers.
    pub total_distance_km: f64,
    /// Safety of the touched cells.
    pub safety: SafetySummary,
}

impl Route {
    /// Viewport framing the route.
    #[must_use]
    pub fn view(&self) -> MapView {
        MapView::between(self.source, self.destination)
    }
}

/// Plans routes against one grid, reusing its spatial index.
pub struct RoutePlanner<'a> {
    index: CellIndex<'a>,
}

impl<'a> RoutePlanner<'a> {
    /// Indexes `grid` for planning.
    #[must_use]
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            index: CellIndex::new(grid),
        }
    }

    /// The grid routes are planned against.
    #[must_use]
    pub const fn grid(&self) -> &'a Grid {
        self.index.grid()
    }

    /// Plans the straight route from `source` to `destination`.
    ///
    /// Every cell whose outline touches the segment is selected, including
    /// cells that only share a boundary point with it. A route that touches
    /// no cells is still a valid route with an unknown safety level.
    #[must_use]
    pub fn plan(&self, source: Coordinate, destination: Coordinate) -> Route {
        let line = Line::new(source.to_point(), destination.to_point());

        let cells_on_route: Vec<Cell> = if source.is_finite() && destination.is_finite() {
            self.index
                .candidates(
                    [source.longitude, source.latitude],
                    [destination.longitude, destination.latitude],
                )
                .into_iter()
                .filter(|cell| cell.polygon.intersects(&line))
                .cloned()
                .collect()
        } else {
            log::warn!("Route endpoints are not finite: {source:?} -> {destination:?}");
            Vec::new()
        };

        let total_distance_km = haversine_km(source, destination);
        let safety = summarize(&cells_on_route);

        log::debug!(
            "Route {source:?} -> {destination:?}: {:.2} km, {} cells, {} ({})",
            total_distance_km,
            cells_on_route.len(),
            safety.safety_level,
            safety.average_score,
        );

        Route {
            source,
            destination,
            line,
            cells_on_route,
            total_distance_km,
            safety,
        }
    }
}

/// Plans the straight route from `source` to `destination` over `grid`.
///
/// Builds a throwaway index; use [`RoutePlanner`] to plan several routes
/// against the same grid.
#[must_use]
pub fn plan_route(source: Coordinate, destination: Coordinate, grid: &Grid) -> Route {
    RoutePlanner::new(grid).plan(source, destination)
}
