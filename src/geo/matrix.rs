use crate::geo::distance::haversine_km;
use crate::place::Place;

/// Dense symmetric distance matrix over a place list, in kilometers.
///
/// Row-major flat storage. Only the upper triangle is computed; the
/// lower triangle is mirrored from it.
#[derive(Clone, Debug)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    pub fn from_places(places: &[Place]) -> Self {
        let size = places.len();
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = haversine_km(&places[i], &places[j]);
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { data, size }
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Total length of a visiting order, including the wrap edge back to
    /// the first index when `closed`.
    pub fn tour_length(&self, order: &[usize], closed: bool) -> f64 {
        let mut total = 0.0;
        for pair in order.windows(2) {
            total += self.get(pair[0], pair[1]);
        }
        if closed && order.len() > 1 {
            total += self.get(order[order.len() - 1], order[0]);
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::DistanceMatrix;
    use crate::geo::distance::haversine_km;
    use crate::place::Place;

    fn sample_places() -> Vec<Place> {
        vec![
            Place::new("a", 52.52, 13.405),
            Place::new("b", 48.8566, 2.3522),
            Place::new("c", 41.9028, 12.4964),
        ]
    }

    #[test]
    fn diagonal_is_zero() {
        let matrix = DistanceMatrix::from_places(&sample_places());
        for i in 0..matrix.len() {
            assert_eq!(matrix.get(i, i), 0.0);
        }
    }

    #[test]
    fn mirrored_triangle_is_symmetric() {
        let matrix = DistanceMatrix::from_places(&sample_places());
        for i in 0..matrix.len() {
            for j in 0..matrix.len() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
    }

    #[test]
    fn entries_match_pairwise_haversine() {
        let places = sample_places();
        let matrix = DistanceMatrix::from_places(&places);
        for i in 0..places.len() {
            for j in 0..places.len() {
                let expected = haversine_km(&places[i], &places[j]);
                assert!((matrix.get(i, j) - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn tour_length_open_sums_consecutive_edges() {
        let places = sample_places();
        let matrix = DistanceMatrix::from_places(&places);
        let order = [0, 1, 2];

        let expected = matrix.get(0, 1) + matrix.get(1, 2);
        assert!((matrix.tour_length(&order, false) - expected).abs() < 1e-9);
    }

    #[test]
    fn tour_length_closed_adds_wrap_edge() {
        let places = sample_places();
        let matrix = DistanceMatrix::from_places(&places);
        let order = [0, 1, 2];

        let open = matrix.tour_length(&order, false);
        let closed = matrix.tour_length(&order, true);
        assert!((closed - open - matrix.get(2, 0)).abs() < 1e-9);
    }

    #[test]
    fn singleton_tour_has_zero_length() {
        let places = vec![Place::new("only", 1.0, 2.0)];
        let matrix = DistanceMatrix::from_places(&places);
        assert_eq!(matrix.tour_length(&[0], true), 0.0);
        assert_eq!(matrix.tour_length(&[0], false), 0.0);
    }
}
