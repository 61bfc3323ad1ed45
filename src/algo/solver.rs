use std::time::{Duration, Instant};

use crate::{
    Error, Result,
    algo::{construct, refine},
    geo::matrix::DistanceMatrix,
    place::Place,
    route::Route,
};

const ERR_START_OUT_OF_RANGE: &str = "start index out of range";

/// What to solve: an optional pinned start index, whether the tour
/// returns to its start, and an optional wall-clock budget for the
/// refinement phase.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolveRequest {
    pub start: Option<usize>,
    pub closed: bool,
    pub time_limit: Option<Duration>,
}

/// Index of the place with the given name.
pub fn resolve_start(places: &[Place], name: &str) -> Result<usize> {
    places
        .iter()
        .position(|place| place.name == name)
        .ok_or_else(|| Error::UnknownStart {
            name: name.to_owned(),
        })
}

/// Two-phase heuristic solve: greedy nearest-neighbor construction, then
/// 2-opt refinement until no improving exchange remains.
///
/// The returned order is a permutation of `0..places.len()` and its total
/// is recomputed from the matrix after the final reordering, never
/// accumulated across moves. A pinned start is the construction anchor;
/// refinement keeps it at position 0, and closed tours are additionally
/// rotated so the pin holds even if that invariant ever changes.
pub fn solve(places: &[Place], request: &SolveRequest) -> Result<Route> {
    if places.is_empty() {
        return Err(Error::EmptyInput);
    }
    if let Some(start) = request.start
        && start >= places.len()
    {
        return Err(Error::invalid_input(format!(
            "{ERR_START_OUT_OF_RANGE}: {start} >= {}",
            places.len()
        )));
    }
    if let Some(place) = places.iter().find(|place| !place.is_valid()) {
        return Err(Error::InvalidCoordinate {
            name: place.name.clone(),
            lat: place.lat,
            lon: place.lon,
        });
    }

    if places.len() == 1 {
        return Ok(Route::new(vec![0], 0.0));
    }

    let anchor = request.start.unwrap_or(0);
    let matrix = DistanceMatrix::from_places(places);

    let mut order = construct::nearest_neighbor_tour(&matrix, anchor);
    let construction_km = matrix.tour_length(&order, request.closed);
    log::info!(
        "solver: construction done n={} closed={} total_km={construction_km:.3}",
        order.len(),
        request.closed
    );

    let deadline = request.time_limit.map(|limit| Instant::now() + limit);
    let passes = refine::two_opt(&mut order, &matrix, request.closed, deadline);

    if request.start.is_some() && request.closed {
        rotate_to_start(&mut order, anchor);
    }

    let total_km = matrix.tour_length(&order, request.closed);
    log::info!(
        "solver: refinement done passes={passes} total_km={total_km:.3} saved_km={:.3}",
        construction_km - total_km
    );

    Ok(Route::new(order, total_km))
}

/// Cyclic shift so `start` sits at position 0. Leaves the order alone
/// when the index is absent.
pub(crate) fn rotate_to_start(order: &mut [usize], start: usize) {
    if let Some(pos) = order.iter().position(|&idx| idx == start) {
        order.rotate_left(pos);
    }
}
