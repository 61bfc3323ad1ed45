use crate::geo::distance::haversine_km;
use crate::place::Place;

/// An ordered visiting plan over the input places.
#[derive(Clone, Debug, Default)]
pub struct Route {
    /// Indices into the place list, a permutation of `0..n`.
    pub order: Vec<usize>,
    /// Exact length of the order in kilometers.
    pub total_km: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RouteMetrics {
    pub total_km: f64,
    pub longest_km: f64,
    pub average_km: f64,
    pub threshold_km: f64,
    pub spikes: usize,
}

impl Route {
    pub fn new(order: Vec<usize>, total_km: f64) -> Self {
        Self { order, total_km }
    }

    /// Places in visiting order.
    pub fn stops<'a>(&self, places: &'a [Place]) -> Vec<&'a Place> {
        self.order.iter().map(|&idx| &places[idx]).collect()
    }

    /// Edge statistics for the final order. Edges longer than
    /// `average * threshold_factor` count as spikes.
    pub fn metrics(&self, places: &[Place], closed: bool, threshold_factor: f64) -> RouteMetrics {
        let n = self.order.len();
        if n < 2 {
            log::info!("metrics: n={n} nothing to report");
            return RouteMetrics::default();
        }

        let edge_count = if closed { n } else { n - 1 };
        let distances: Vec<f64> = (0..edge_count)
            .map(|i| {
                let a = &places[self.order[i]];
                let b = &places[self.order[(i + 1) % n]];
                haversine_km(a, b)
            })
            .collect();
        let total = distances.iter().sum::<f64>();
        let average = total / distances.len() as f64;
        let threshold = average * threshold_factor;
        let spikes = distances.iter().filter(|d| **d > threshold).count();
        let longest = distances.iter().copied().fold(0.0_f64, f64::max);

        log::info!(
            "metrics: n={n} total_km={total:.3} longest_km={longest:.3} avg_km={average:.3} spike_threshold_km={threshold:.3} spikes={spikes}"
        );

        RouteMetrics {
            total_km: total,
            longest_km: longest,
            average_km: average,
            threshold_km: threshold,
            spikes,
        }
    }
}
