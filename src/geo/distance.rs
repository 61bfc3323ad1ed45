use crate::place::Place;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two places in kilometers, by the
/// haversine formula. Inputs are decimal degrees; no bounds checks
/// happen here.
pub fn haversine_km(a: &Place, b: &Place) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let s1 = (dlat / 2.0).sin();
    let s2 = (dlon / 2.0).sin();
    let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::haversine_km;
    use crate::place::Place;

    #[test]
    fn zero_for_identical_positions() {
        let a = Place::new("a", 37.7749, -122.4194);
        let b = Place::new("b", 37.7749, -122.4194);
        assert!(haversine_km(&a, &b).abs() < 1e-12);
    }

    #[test]
    fn symmetric_between_cities() {
        let sf = Place::new("SF", 37.7749, -122.4194);
        let la = Place::new("LA", 34.0522, -118.2437);

        let dab = haversine_km(&sf, &la);
        let dba = haversine_km(&la, &sf);

        assert!((dab - dba).abs() < 1e-9);
        assert!((dab - 559.12).abs() < 1.0);
    }

    #[test]
    fn one_degree_along_the_equator() {
        let a = Place::new("a", 0.0, 0.0);
        let b = Place::new("b", 0.0, 1.0);
        assert!((haversine_km(&a, &b) - 111.194926).abs() < 1e-3);
    }

    #[test]
    fn equator_to_pole_is_a_quarter_circumference() {
        let a = Place::new("a", 0.0, 0.0);
        let b = Place::new("b", 90.0, 0.0);
        assert!((haversine_km(&a, &b) - 10007.543398).abs() < 1e-3);
    }
}
