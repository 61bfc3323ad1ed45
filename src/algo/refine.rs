use std::time::Instant;

use crate::geo::matrix::DistanceMatrix;

const MIN_TOUR_SIZE_FOR_2OPT: usize = 4;
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// 2-opt local search over an index order, in place.
///
/// Ordered first-improvement scan: every pair of non-adjacent edges
/// `(i, i+1)` and `(j, (j+1) % n)` with `i < j` is evaluated from the two
/// touched edges alone, and the segment `order[i+1..=j]` is reversed when
/// the exchange shortens the tour by more than the epsilon. The wrap edge
/// `(n-1, 0)` participates only when `closed`. Full passes repeat until
/// one completes without an improvement; an optional deadline is checked
/// once per pass. Reversals never move position 0, so a start pinned by
/// construction stays first in both modes.
///
/// Returns the number of passes run.
pub(crate) fn two_opt(
    order: &mut [usize],
    matrix: &DistanceMatrix,
    closed: bool,
    deadline: Option<Instant>,
) -> usize {
    let n = order.len();
    if n < MIN_TOUR_SIZE_FOR_2OPT {
        return 0;
    }
    let last_j = if closed { n - 1 } else { n - 2 };

    let mut passes = 0;
    loop {
        if let Some(deadline) = deadline
            && Instant::now() >= deadline
        {
            log::warn!("refine: time limit reached passes={passes}");
            break;
        }

        let mut improved = false;
        for i in 0..(n - 2) {
            for j in (i + 2)..=last_j {
                if closed && i == 0 && j == n - 1 {
                    // Wrap edge (n-1, 0) is adjacent to edge (0, 1).
                    continue;
                }
                let a = order[i];
                let b = order[i + 1];
                let c = order[j];
                let d = order[(j + 1) % n];
                let before = matrix.get(a, b) + matrix.get(c, d);
                let after = matrix.get(a, c) + matrix.get(b, d);
                if after + IMPROVEMENT_EPSILON < before {
                    order[i + 1..=j].reverse();
                    improved = true;
                }
            }
        }

        passes += 1;
        if !improved {
            break;
        }
    }

    passes
}
