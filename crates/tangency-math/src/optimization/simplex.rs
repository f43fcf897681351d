//! Euclidean projection onto the unit simplex.

/// Projects a point onto the unit simplex `{ w : sum(w) = 1, w >= 0 }`.
///
/// Uses the sort-and-threshold algorithm: with the coordinates sorted in
/// descending order, the largest prefix whose running average keeps every
/// kept coordinate positive determines the shift `theta`, and the result
/// is `max(v_i - theta, 0)` per coordinate.
///
/// Every component of the projection lies in `[0, 1]` because the
/// components are nonnegative and sum to one.
///
/// Returns an empty vector for empty input. Non-finite coordinates are
/// treated as their clamped floating-point ordering; callers are expected
/// to pass finite data.
pub fn project_onto_simplex(v: &[f64]) -> Vec<f64> {
    let n = v.len();
    if n == 0 {
        return Vec::new();
    }

    let mut sorted = v.to_vec();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    let mut running_sum = 0.0;
    let mut theta = sorted[0] - 1.0;
    for (i, &u) in sorted.iter().enumerate() {
        running_sum += u;
        let candidate = (running_sum - 1.0) / (i + 1) as f64;
        if u - candidate > 0.0 {
            theta = candidate;
        }
    }

    v.iter().map(|&x| (x - theta).max(0.0)).collect()
}
