//! Heuristic TSP routing over geographic coordinates.
//!
//! Builds a haversine distance matrix over named places, constructs a
//! tour with greedy nearest-neighbor, then refines it with 2-opt until
//! no improving exchange remains. CSV input and GeoJSON export glue is
//! included for the CLI binary.

mod algo;
mod error;
mod geo;
mod io;
pub mod logging;
mod place;
mod route;

pub use algo::solver::{SolveRequest, resolve_start, solve};
pub use error::{Error, Result};
pub use geo::distance::{EARTH_RADIUS_KM, haversine_km};
pub use geo::matrix::DistanceMatrix;
pub use io::geojson::write_route_geojson;
pub use io::input::{parse_places, read_places};
pub use io::options::{LogFormat, LogLevel, SolverOptions};
pub use place::Place;
pub use route::{Route, RouteMetrics};
