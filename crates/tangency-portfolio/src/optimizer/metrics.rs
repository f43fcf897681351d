//! Annualized portfolio performance at a given weight vector.

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::OptimizerConfig;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Annualized performance of a weighted portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Annualized arithmetic return (`w . mu * periods_per_year`).
    pub annualized_return: f64,

    /// Annualized volatility (`sqrt(w' . (Sigma * periods_per_year) . w)`).
    pub annualized_volatility: f64,

    /// Sharpe ratio: excess annualized return over annualized
    /// volatility.
    pub sharpe_ratio: f64,
}

/// Evaluates annualized return, volatility, and Sharpe ratio for a
/// weight vector against per-period mean returns and covariance.
///
/// # Errors
///
/// - [`PortfolioError::Math`] with a dimension mismatch when the weight,
///   mean, and covariance dimensions disagree.
/// - [`PortfolioError::ZeroVolatility`] when the portfolio variance at
///   the weights is zero, leaving the Sharpe ratio undefined.
pub fn portfolio_performance(
    weights: &[f64],
    mean_returns: &DVector<f64>,
    covariance: &DMatrix<f64>,
    config: &OptimizerConfig,
) -> PortfolioResult<PortfolioMetrics> {
    let n = weights.len();
    if mean_returns.len() != n || covariance.nrows() != n || covariance.ncols() != n {
        return Err(tangency_math::MathError::DimensionMismatch {
            rows1: n,
            cols1: 1,
            rows2: covariance.nrows(),
            cols2: covariance.ncols(),
        }
        .into());
    }

    let periods = f64::from(config.periods_per_year);
    let w = DVector::from_column_slice(weights);

    let annualized_return = w.dot(mean_returns) * periods;

    // Quadratic form w' (Sigma * periods) w; clamp tiny negative values
    // introduced by rounding on a PSD matrix.
    let variance = (covariance * &w).dot(&w) * periods;
    let annualized_volatility = variance.max(0.0).sqrt();

    if annualized_volatility == 0.0 {
        return Err(PortfolioError::ZeroVolatility);
    }

    let sharpe_ratio = (annualized_return - config.risk_free_rate) / annualized_volatility;

    Ok(PortfolioMetrics {
        annualized_return,
        annualized_volatility,
        sharpe_ratio,
    })
}
