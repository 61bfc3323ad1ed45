use std::{collections::HashMap, io::Write};

use serde::Serialize;

use crate::{Result, place::Place, route::Route};

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum Geometry {
    Point { coordinates: (f64, f64) },
    LineString { coordinates: Vec<(f64, f64)> },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
struct Feature {
    properties: HashMap<String, String>,
    geometry: Geometry,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
struct FeatureCollection {
    features: Vec<Feature>,
}

/// Write the route as a GeoJSON feature collection: one `LineString` in
/// visit order plus a `Point` per place named and numbered by visit.
/// Coordinates are `lon,lat` pairs, the reverse of the input order. For
/// closed tours the line repeats the first coordinate to close the ring.
pub fn write_route_geojson<W: Write>(
    writer: W,
    places: &[Place],
    route: &Route,
    closed: bool,
) -> Result<()> {
    let collection = route_feature_collection(places, route, closed);
    serde_json::to_writer_pretty(writer, &collection)?;
    Ok(())
}

fn route_feature_collection(places: &[Place], route: &Route, closed: bool) -> FeatureCollection {
    let mut coordinates: Vec<(f64, f64)> = route
        .order
        .iter()
        .map(|&idx| (places[idx].lon, places[idx].lat))
        .collect();
    if closed && let Some(&first) = coordinates.first() {
        coordinates.push(first);
    }

    let total = format!("{:.3}", route.total_km);
    let count = route.order.len().to_string();
    let mut features = vec![Feature {
        properties: string_map(&[("total_km", total.as_str()), ("points", count.as_str())]),
        geometry: Geometry::LineString { coordinates },
    }];

    for (visit, &idx) in route.order.iter().enumerate() {
        let place = &places[idx];
        let order = (visit + 1).to_string();
        features.push(Feature {
            properties: string_map(&[("name", place.name.as_str()), ("order", order.as_str())]),
            geometry: Geometry::Point {
                coordinates: (place.lon, place.lat),
            },
        });
    }

    FeatureCollection { features }
}

fn string_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|&(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::write_route_geojson;
    use crate::place::Place;
    use crate::route::Route;

    fn sample() -> (Vec<Place>, Route) {
        let places = vec![
            Place::new("a", 52.52, 13.405),
            Place::new("b", 48.8566, 2.3522),
            Place::new("c", 41.9028, 12.4964),
        ];
        let route = Route::new(vec![0, 2, 1], 1234.5);
        (places, route)
    }

    fn render(closed: bool) -> Value {
        let (places, route) = sample();
        let mut buffer = Vec::new();
        write_route_geojson(&mut buffer, &places, &route, closed).expect("serialize");
        serde_json::from_slice(&buffer).expect("valid json")
    }

    #[test]
    fn emits_a_feature_collection_with_a_line_string() {
        let value = render(false);

        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["type"], "Feature");
        assert_eq!(value["features"][0]["geometry"]["type"], "LineString");
        assert_eq!(value["features"][0]["properties"]["total_km"], "1234.500");
        assert_eq!(value["features"][0]["properties"]["points"], "3");
    }

    #[test]
    fn coordinates_are_lon_lat_in_visit_order() {
        let value = render(false);

        let coordinates = &value["features"][0]["geometry"]["coordinates"];
        assert_eq!(coordinates[0], json!([13.405, 52.52]));
        assert_eq!(coordinates[1], json!([12.4964, 41.9028]));
        assert_eq!(coordinates.as_array().expect("array").len(), 3);
    }

    #[test]
    fn closed_tours_repeat_the_first_coordinate() {
        let value = render(true);

        let coordinates = value["features"][0]["geometry"]["coordinates"]
            .as_array()
            .expect("array");
        assert_eq!(coordinates.len(), 4);
        assert_eq!(coordinates[0], coordinates[3]);
    }

    #[test]
    fn each_stop_becomes_a_numbered_point() {
        let value = render(false);

        let features = value["features"].as_array().expect("array");
        assert_eq!(features.len(), 4);
        assert_eq!(features[1]["geometry"]["type"], "Point");
        assert_eq!(features[1]["properties"]["name"], "a");
        assert_eq!(features[1]["properties"]["order"], "1");
        assert_eq!(features[2]["properties"]["name"], "c");
        assert_eq!(features[2]["properties"]["order"], "2");
    }
}
