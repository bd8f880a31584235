//! Journeys between two named places.

use safe_route_gazetteer::LocationResolver;
use safe_route_grid_models::SafetyScore;
use safe_route_planner_models::{JourneyReport, JourneyRequest, MapView, RouteCellReport};

use crate::JourneyError;
use crate::route::{Route, RoutePlanner};

/// A planned journey: the request as entered plus the resulting route.
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    /// The request that produced this journey.
    pub request: JourneyRequest,
    /// The straight route between the resolved places.
    pub route: Route,
    /// Viewport framing the route.
    pub view: MapView,
}

impl Journey {
    /// Flattens the journey into its JSON shape.
    #[must_use]
    pub fn report(&self) -> JourneyReport {
        JourneyReport {
            source: self.request.source.clone(),
            destination: self.request.destination.clone(),
            source_coords: self.route.source,
            dest_coords: self.route.destination,
            total_distance: self.route.total_distance_km,
            safety_data: self.route.safety,
            cells_on_route: self
                .route
                .cells_on_route
                .iter()
                .map(|cell| RouteCellReport {
                    cell_id: cell.id.to_string(),
                    safety_score: cell.safety_score.map(SafetyScore::value),
                })
                .collect(),
            view: self.view,
        }
    }
}

/// Resolves both ends of `request` and plans the route between them.
///
/// # Errors
///
/// * [`JourneyError::MissingEndpoint`] if either name is blank.
/// * [`JourneyError::LocationNotFound`] for the first name that does not
///   resolve (source before destination).
pub fn plan_journey<R: LocationResolver + ?Sized>(
    resolver: &R,
    planner: &RoutePlanner<'_>,
    request: JourneyRequest,
) -> Result<Journey, JourneyError> {
    if request.source.trim().is_empty() || request.destination.trim().is_empty() {
        return Err(JourneyError::MissingEndpoint);
    }

    let source = resolver
        .resolve(&request.source)
        .ok_or_else(|| JourneyError::LocationNotFound {
            name: request.source.clone(),
        })?;
    let destination =
        resolver
            .resolve(&request.destination)
            .ok_or_else(|| JourneyError::LocationNotFound {
                name: request.destination.clone(),
            })?;

    log::info!(
        "Planning journey {:?} -> {:?}",
        request.source,
        request.destination
    );

    let route = planner.plan(source, destination);
    let view = route.view();

    Ok(Journey {
        request,
        route,
        view,
    })
}
