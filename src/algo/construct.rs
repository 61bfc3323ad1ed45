use crate::geo::matrix::DistanceMatrix;

/// Greedy nearest-neighbor construction: starting from `anchor`, extend
/// the tour to the closest unvisited index until all indices are placed.
/// Distance ties go to the lowest index, so the result is deterministic.
pub(crate) fn nearest_neighbor_tour(matrix: &DistanceMatrix, anchor: usize) -> Vec<usize> {
    let n = matrix.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    visited[anchor] = true;
    order.push(anchor);

    for _ in 1..n {
        let current = order[order.len() - 1];
        let mut next: Option<(usize, f64)> = None;
        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            let d = matrix.get(current, candidate);
            if next.is_none_or(|(_, best)| d < best) {
                next = Some((candidate, d));
            }
        }
        let Some((next, _)) = next else { break };
        visited[next] = true;
        order.push(next);
    }

    order
}
