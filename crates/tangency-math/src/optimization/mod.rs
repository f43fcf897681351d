//! Constrained minimization over the unit simplex.
//!
//! The feasible set `{ w : sum(w) = 1, 0 <= w_i <= 1 }` is exactly the
//! unit simplex, so the full-investment and no-short constraints of a
//! long-only allocation are enforced by projection rather than by
//! penalty terms: every iterate the solver visits is feasible.

mod simplex;

pub use simplex::project_onto_simplex;

use crate::error::{MathError, MathResult};

/// Default convergence tolerance on the projected-gradient step norm.
///
/// Chosen above the noise floor of central-difference gradients so that
/// convergence detection is not swamped by rounding error.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 500;

/// Default perturbation for central-difference gradients.
pub const DEFAULT_STEP_SIZE: f64 = 1e-6;

/// Configuration for simplex-constrained optimization.
#[derive(Debug, Clone, Copy)]
pub struct OptimizationConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Step size for numerical gradients.
    pub step_size: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            step_size: DEFAULT_STEP_SIZE,
        }
    }
}

impl OptimizationConfig {
    /// Creates a new configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of an optimization run.
///
/// When `converged` is false the iteration cap was reached and
/// `parameters` holds the best iterate found, not a point satisfying the
/// convergence tolerance.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Optimal parameters found.
    pub parameters: Vec<f64>,
    /// Final objective function value.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Whether the optimization converged.
    pub converged: bool,
}

/// Minimizes a function over the unit simplex by projected gradient
/// descent.
///
/// The gradient is estimated with central differences. Each step moves
/// along the feasible direction `d = P(w - g) - w`, where `P` is the
/// simplex projection; the segment `w + alpha * d` for `alpha` in
/// `(0, 1]` stays inside the simplex because the simplex is convex.
/// Step lengths are chosen by Armijo backtracking.
///
/// The search is deterministic: the same objective, initial point, and
/// configuration always produce the same result.
///
/// The objective must be finite on a neighborhood of the simplex; an
/// objective that cannot be evaluated at a candidate may return a large
/// finite penalty value, which the line search treats as an unacceptable
/// step.
///
/// # Errors
///
/// Returns [`MathError::InvalidInput`] for an empty initial point or a
/// non-finite objective value at the starting point.
pub fn minimize_on_simplex<F>(
    f: F,
    initial: &[f64],
    config: &OptimizationConfig,
) -> MathResult<OptimizationResult>
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return Err(MathError::invalid_input(
            "cannot optimize over an empty parameter vector",
        ));
    }

    // Begin from the projection of the supplied point so that every
    // evaluated iterate is feasible even if the caller's guess is not.
    let mut w = project_onto_simplex(initial);
    let mut best_value = f(&w);
    if !best_value.is_finite() {
        return Err(MathError::invalid_input(
            "objective is not finite at the initial point",
        ));
    }

    let mut gradient = vec![0.0; n];

    for iteration in 0..config.max_iterations {
        // Central-difference gradient
        for i in 0..n {
            let mut plus = w.clone();
            let mut minus = w.clone();
            plus[i] += config.step_size;
            minus[i] -= config.step_size;

            gradient[i] = (f(&plus) - f(&minus)) / (2.0 * config.step_size);
        }

        // Feasible descent direction toward the projected gradient step
        let target: Vec<f64> = w.iter().zip(&gradient).map(|(wi, gi)| wi - gi).collect();
        let projected = project_onto_simplex(&target);
        let direction: Vec<f64> = projected.iter().zip(&w).map(|(pi, wi)| pi - wi).collect();

        let direction_norm: f64 = direction.iter().map(|d| d * d).sum::<f64>().sqrt();
        if direction_norm < config.tolerance {
            return Ok(OptimizationResult {
                parameters: w,
                objective_value: best_value,
                iterations: iteration,
                converged: true,
            });
        }

        let slope: f64 = gradient.iter().zip(&direction).map(|(g, d)| g * d).sum();

        // Armijo backtracking along the feasible segment
        let mut alpha = 1.0;
        let c = 0.5; // Armijo parameter

        loop {
            let candidate: Vec<f64> = w
                .iter()
                .zip(&direction)
                .map(|(wi, di)| wi + alpha * di)
                .collect();

            let value = f(&candidate);
            if value.is_finite() && value <= best_value + c * alpha * slope {
                w = candidate;
                best_value = value;
                break;
            }

            alpha *= 0.5;
            if alpha < 1e-12 {
                // Cannot make progress along this direction
                return Ok(OptimizationResult {
                    parameters: w,
                    objective_value: best_value,
                    iterations: iteration,
                    converged: false,
                });
            }
        }
    }

    Ok(OptimizationResult {
        parameters: w,
        objective_value: best_value,
        iterations: config.max_iterations,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn assert_on_simplex(w: &[f64]) {
        let sum: f64 = w.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
        for &wi in w {
            assert!((-1e-9..=1.0 + 1e-9).contains(&wi));
        }
    }

    #[test]
    fn test_linear_objective_picks_best_vertex() {
        // Minimizing a linear function over the simplex lands on the
        // vertex with the smallest coefficient.
        let f = |w: &[f64]| 3.0 * w[0] + 1.0 * w[1] + 2.0 * w[2];
        let initial = vec![1.0 / 3.0; 3];

        let result = minimize_on_simplex(f, &initial, &OptimizationConfig::default()).unwrap();

        assert!(result.converged);
        assert_on_simplex(&result.parameters);
        assert_relative_eq!(result.parameters[1], 1.0, epsilon = 1e-6);
        assert_relative_eq!(result.objective_value, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_quadratic_interior_minimum() {
        // min sum((w_i - 1/3)^2) has its minimum at the barycenter.
        let f = |w: &[f64]| w.iter().map(|wi| (wi - 1.0 / 3.0).powi(2)).sum::<f64>();
        let initial = vec![0.7, 0.2, 0.1];

        let result = minimize_on_simplex(f, &initial, &OptimizationConfig::default()).unwrap();

        assert!(result.converged);
        for &wi in &result.parameters {
            assert_relative_eq!(wi, 1.0 / 3.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_constant_objective_converges_immediately() {
        let f = |_: &[f64]| 7.5;
        let initial = vec![0.5, 0.5];

        let result = minimize_on_simplex(f, &initial, &OptimizationConfig::default()).unwrap();

        assert!(result.converged);
        assert_eq!(result.iterations, 0);
        assert_relative_eq!(result.objective_value, 7.5);
    }

    #[test]
    fn test_iteration_cap_reports_unconverged() {
        let f = |w: &[f64]| 3.0 * w[0] + 1.0 * w[1] + 2.0 * w[2];
        let initial = vec![1.0 / 3.0; 3];
        let config = OptimizationConfig::default().with_max_iterations(1);

        let result = minimize_on_simplex(f, &initial, &config).unwrap();

        assert!(!result.converged);
        assert_on_simplex(&result.parameters);
    }

    #[test]
    fn test_empty_initial_point_rejected() {
        let result = minimize_on_simplex(|_| 0.0, &[], &OptimizationConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_start_rejected() {
        let result =
            minimize_on_simplex(|_| f64::NAN, &[0.5, 0.5], &OptimizationConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_deterministic() {
        let f = |w: &[f64]| w[0] * w[0] + 2.0 * w[1] * w[1];
        let initial = vec![0.5, 0.5];
        let config = OptimizationConfig::default();

        let a = minimize_on_simplex(f, &initial, &config).unwrap();
        let b = minimize_on_simplex(f, &initial, &config).unwrap();

        assert_eq!(a.parameters, b.parameters);
        assert_eq!(a.iterations, b.iterations);
    }

    proptest! {
        #[test]
        fn prop_projection_lands_on_simplex(v in proptest::collection::vec(-10.0f64..10.0, 1..12)) {
            let w = project_onto_simplex(&v);
            let sum: f64 = w.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
            for &wi in &w {
                prop_assert!(wi >= 0.0);
                prop_assert!(wi <= 1.0 + 1e-12);
            }
        }

        #[test]
        fn prop_projection_is_idempotent(v in proptest::collection::vec(-10.0f64..10.0, 1..12)) {
            let once = project_onto_simplex(&v);
            let twice = project_onto_simplex(&once);
            for (a, b) in once.iter().zip(&twice) {
                prop_assert!((a - b).abs() < 1e-9);
            }
        }
    }
}
