use crate::error::{Error, Result};

/// Index that cuts `weights` into two contiguous halves with sums as
/// close as possible.
///
/// Valid cut points are `1..n`, so both halves are non-empty; a slice
/// shorter than two items is not bisectable. A running prefix sum gives
/// each candidate in O(1), O(n) overall. Ties go to the cut nearest the
/// midpoint, and between equally near cuts the earlier one wins, so the
/// split is fully deterministic.
pub fn bisect(weights: &[f64]) -> Result<usize> {
    let n = weights.len();
    if n < 2 {
        return Err(Error::NotBisectable);
    }
    let total: f64 = weights.iter().sum();
    let mut best = 1;
    let mut best_gap = f64::INFINITY;
    let mut prefix = 0.0;
    for i in 1..n {
        prefix += weights[i - 1];
        let gap = (2.0 * prefix - total).abs();
        if gap < best_gap || (gap == best_gap && off_center(i, n) < off_center(best, n)) {
            best = i;
            best_gap = gap;
        }
    }
    Ok(best)
}

/// Distance of cut `i` from the midpoint of `n` items, doubled to stay
/// in integers.
fn off_center(i: usize, n: usize) -> usize {
    (2 * i).abs_diff(n)
}
