//! Sharpe-ratio maximization over the unit simplex.

use crate::error::{PortfolioError, PortfolioResult};
use crate::optimizer::metrics::{portfolio_performance, PortfolioMetrics};
use crate::types::{OptimizerConfig, ReturnMatrix};
use serde::{Deserialize, Serialize};
use tangency_math::optimization::{minimize_on_simplex, OptimizationConfig};
use tangency_math::statistics::{mean_vector, sample_covariance};

/// Diagonal variance below this is treated as effectively riskless data.
const NEAR_ZERO_VARIANCE: f64 = 1e-12;

/// A correlation-matrix determinant below this flags the covariance as
/// singular or near-singular.
const SINGULARITY_TOLERANCE: f64 = 1e-8;

/// Objective value assigned to candidates whose volatility vanishes.
/// Large enough that the line search never accepts such a candidate,
/// finite so the search itself never observes NaN or infinity.
const UNDEFINED_SHARPE_PENALTY: f64 = 1e10;

/// Whether the solver met its tolerance within the iteration budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Convergence {
    /// The projected-gradient step norm fell below the tolerance.
    Converged,
    /// The iteration cap was reached; the best iterate is reported.
    IterationLimit,
}

impl Convergence {
    /// Returns true for [`Convergence::Converged`].
    #[must_use]
    pub fn is_converged(self) -> bool {
        matches!(self, Self::Converged)
    }
}

/// Result of a max-Sharpe optimization.
///
/// Weights are long-only allocation fractions in `[0, 1]` summing to 1,
/// in the column order of the input matrix. `warnings` is non-empty when
/// the input was degenerate (zero-variance assets or a non-positive-
/// definite covariance); such results are valid but may be unstable,
/// e.g. weight mass split arbitrarily among perfectly correlated assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxSharpeOutcome {
    /// Asset symbols, aligned with `weights`.
    pub symbols: Vec<String>,

    /// Optimal allocation fractions.
    pub weights: Vec<f64>,

    /// Annualized performance at the optimal weights.
    pub metrics: PortfolioMetrics,

    /// Solver convergence status.
    pub convergence: Convergence,

    /// Iterations used by the solver.
    pub iterations: u32,

    /// Degenerate-input diagnostics, empty for well-conditioned data.
    pub warnings: Vec<String>,
}

impl MaxSharpeOutcome {
    /// Returns true when the solver converged.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.convergence.is_converged()
    }

    /// Returns true when the input was flagged as degenerate.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// The weight allocated to a symbol, if present.
    #[must_use]
    pub fn weight_of(&self, symbol: &str) -> Option<f64> {
        let idx = self.symbols.iter().position(|s| s == symbol)?;
        Some(self.weights[idx])
    }

    /// (symbol, weight) pairs in asset order.
    #[must_use]
    pub fn weights_by_symbol(&self) -> Vec<(&str, f64)> {
        self.symbols
            .iter()
            .map(String::as_str)
            .zip(self.weights.iter().copied())
            .collect()
    }
}

/// Computes the weight vector maximizing the annualized Sharpe ratio
/// subject to full investment (`sum(w) = 1`) and no short positions
/// (`0 <= w_i <= 1`).
///
/// The search minimizes the negated Sharpe ratio from the uniform
/// allocation `1/N`; both the start point and the solver are
/// deterministic, so identical inputs always yield identical outputs.
/// The result is a local optimum of a smooth objective, which for
/// long-only portfolios is typically, but not provably, global.
///
/// Degenerate inputs (zero-variance assets, singular covariance) do not
/// abort the optimization; they are surfaced in
/// [`MaxSharpeOutcome::warnings`]. Non-convergence within the iteration
/// cap is reported via [`Convergence::IterationLimit`] with the best
/// iterate found.
///
/// # Errors
///
/// - [`PortfolioError::InsufficientAssets`] for fewer than 2 assets.
/// - [`PortfolioError::InsufficientObservations`] for fewer than 2
///   aligned dates.
/// - [`PortfolioError::InvalidConfig`] for an invalid configuration.
/// - [`PortfolioError::ZeroVolatility`] when the aligned data carries no
///   variance at all, leaving the Sharpe ratio undefined everywhere.
pub fn maximize_sharpe(
    matrix: &ReturnMatrix,
    config: &OptimizerConfig,
) -> PortfolioResult<MaxSharpeOutcome> {
    config.validate()?;

    let n = matrix.asset_count();
    if n < 2 {
        return Err(PortfolioError::insufficient_assets(2, n));
    }
    if matrix.observation_count() < 2 {
        return Err(PortfolioError::InsufficientObservations {
            required: 2,
            actual: matrix.observation_count(),
        });
    }

    let mu = mean_vector(matrix.returns())?;
    let cov = sample_covariance(matrix.returns())?;

    let mut warnings = Vec::new();
    for (i, symbol) in matrix.symbols().iter().enumerate() {
        if cov[(i, i)] < NEAR_ZERO_VARIANCE {
            warnings.push(format!("asset '{symbol}' has near-zero return variance"));
        }
    }
    // Scale-free singularity check: the determinant of the covariance
    // divided by the product of its diagonal is the determinant of the
    // correlation matrix, which vanishes exactly for perfectly
    // correlated assets.
    let variance_scale: f64 = (0..n).map(|i| cov[(i, i)]).product();
    let near_singular = if variance_scale > 0.0 {
        cov.determinant() / variance_scale < SINGULARITY_TOLERANCE
    } else {
        true
    };
    if near_singular {
        warnings.push(
            "covariance matrix is singular or near-singular; \
             weights may be split arbitrarily among correlated assets"
                .to_string(),
        );
    }
    for warning in &warnings {
        log::warn!("degenerate optimizer input: {warning}");
    }

    let periods = f64::from(config.periods_per_year);
    let risk_free = config.risk_free_rate;

    // Negated annualized Sharpe ratio. A candidate with vanishing
    // volatility gets a large finite penalty instead of a division by
    // zero, so the solver treats it as an invalid candidate.
    let objective = |w: &[f64]| -> f64 {
        let mut ret = 0.0;
        for (wi, mi) in w.iter().zip(mu.iter()) {
            ret += wi * mi;
        }
        ret *= periods;

        let mut variance = 0.0;
        for (i, wi) in w.iter().enumerate() {
            for (j, wj) in w.iter().enumerate() {
                variance += wi * wj * cov[(i, j)];
            }
        }
        variance *= periods;

        if variance <= 0.0 {
            return UNDEFINED_SHARPE_PENALTY;
        }
        let volatility = variance.sqrt();
        if volatility == 0.0 {
            return UNDEFINED_SHARPE_PENALTY;
        }

        -(ret - risk_free) / volatility
    };

    let initial = vec![1.0 / n as f64; n];
    let solver_config = OptimizationConfig::default()
        .with_tolerance(config.tolerance)
        .with_max_iterations(config.max_iterations);

    let solution = minimize_on_simplex(objective, &initial, &solver_config)?;

    let metrics = portfolio_performance(&solution.parameters, &mu, &cov, config)?;

    let convergence = if solution.converged {
        Convergence::Converged
    } else {
        Convergence::IterationLimit
    };
    log::debug!(
        "max-Sharpe solve over {n} assets: {convergence:?} after {} iterations, sharpe {:.4}",
        solution.iterations,
        metrics.sharpe_ratio
    );

    Ok(MaxSharpeOutcome {
        symbols: matrix.symbols().to_vec(),
        weights: solution.parameters,
        metrics,
        convergence,
        iterations: solution.iterations,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use nalgebra::DMatrix;

    fn dates(n: usize) -> Vec<NaiveDate> {
        (0..n)
            .map(|i| NaiveDate::from_ymd_opt(2025, 6, 2).unwrap() + chrono::Days::new(i as u64))
            .collect()
    }

    fn matrix(symbols: &[&str], rows: usize, data: &[f64]) -> ReturnMatrix {
        ReturnMatrix::new(
            symbols.iter().map(|s| (*s).to_string()).collect(),
            dates(rows),
            DMatrix::from_row_slice(rows, symbols.len(), data),
        )
        .unwrap()
    }

    fn assert_valid_weights(outcome: &MaxSharpeOutcome) {
        let sum: f64 = outcome.weights.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
        for &w in &outcome.weights {
            assert!((-1e-9..=1.0 + 1e-9).contains(&w), "weight out of bounds: {w}");
        }
    }

    #[test]
    fn test_two_asset_scenario() {
        // Asset A has the higher mean; the assets are negatively
        // correlated with equal variance, so A should get at least its
        // naive 50% share.
        let m = matrix(
            &["A", "B"],
            5,
            &[
                0.01, 0.00, //
                -0.01, 0.01, //
                0.02, -0.01, //
                0.00, 0.02, //
                0.01, 0.00,
            ],
        );

        let outcome = maximize_sharpe(&m, &OptimizerConfig::default()).unwrap();

        assert!(outcome.converged());
        assert!(!outcome.is_degenerate());
        assert_valid_weights(&outcome);
        assert!(outcome.weight_of("A").unwrap() >= 0.5);
        assert!(outcome.metrics.annualized_volatility > 0.0);
        assert!(outcome.metrics.sharpe_ratio > 0.0);
    }

    #[test]
    fn test_single_asset_refused() {
        let m = matrix(&["A"], 3, &[0.01, -0.01, 0.02]);
        let result = maximize_sharpe(&m, &OptimizerConfig::default());
        assert!(matches!(
            result,
            Err(PortfolioError::InsufficientAssets {
                required: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_identical_assets_degenerate_but_valid() {
        let m = matrix(
            &["A", "B"],
            4,
            &[
                0.01, 0.01, //
                -0.02, -0.02, //
                0.03, 0.03, //
                0.00, 0.00,
            ],
        );

        let outcome = maximize_sharpe(&m, &OptimizerConfig::default()).unwrap();

        assert!(outcome.is_degenerate());
        assert_valid_weights(&outcome);
    }

    #[test]
    fn test_variance_free_data_is_structured_failure() {
        // Constant returns: zero covariance, Sharpe undefined everywhere.
        let m = matrix(
            &["A", "B"],
            3,
            &[
                0.01, 0.02, //
                0.01, 0.02, //
                0.01, 0.02,
            ],
        );

        let result = maximize_sharpe(&m, &OptimizerConfig::default());
        assert!(matches!(result, Err(PortfolioError::ZeroVolatility)));
    }

    #[test]
    fn test_idempotent() {
        let m = matrix(
            &["A", "B", "C"],
            4,
            &[
                0.010, 0.002, -0.004, //
                -0.005, 0.007, 0.012, //
                0.013, -0.001, 0.003, //
                0.001, 0.004, -0.002,
            ],
        );
        let config = OptimizerConfig::default();

        let first = maximize_sharpe(&m, &config).unwrap();
        let second = maximize_sharpe(&m, &config).unwrap();

        assert_eq!(first.weights, second.weights);
        assert_eq!(first.iterations, second.iterations);
        assert_eq!(first.metrics, second.metrics);
    }

    #[test]
    fn test_iteration_cap_reported_distinctly() {
        let m = matrix(
            &["A", "B", "C"],
            4,
            &[
                0.010, 0.002, -0.004, //
                -0.005, 0.007, 0.012, //
                0.013, -0.001, 0.003, //
                0.001, 0.004, -0.002,
            ],
        );
        let config = OptimizerConfig::default().with_max_iterations(1);

        let outcome = maximize_sharpe(&m, &config).unwrap();

        assert_eq!(outcome.convergence, Convergence::IterationLimit);
        assert!(!outcome.converged());
        // The best iterate is still a valid allocation.
        assert_valid_weights(&outcome);
    }

    #[test]
    fn test_too_few_observations() {
        let m = matrix(&["A", "B"], 1, &[0.01, 0.02]);
        let result = maximize_sharpe(&m, &OptimizerConfig::default());
        assert!(matches!(
            result,
            Err(PortfolioError::InsufficientObservations { .. })
        ));
    }

    #[test]
    fn test_weights_by_symbol_order() {
        let m = matrix(
            &["A", "B"],
            5,
            &[
                0.01, 0.00, //
                -0.01, 0.01, //
                0.02, -0.01, //
                0.00, 0.02, //
                0.01, 0.00,
            ],
        );

        let outcome = maximize_sharpe(&m, &OptimizerConfig::default()).unwrap();
        let pairs = outcome.weights_by_symbol();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "A");
        assert_eq!(pairs[1].0, "B");
        assert_relative_eq!(
            pairs[0].1 + pairs[1].1,
            1.0,
            epsilon = 1e-6
        );
    }
}
