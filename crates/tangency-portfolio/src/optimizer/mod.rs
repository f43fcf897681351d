//! Long-only max-Sharpe weight optimization.
//!
//! A single stateless call: every optimization request recomputes the
//! mean vector and covariance from the supplied return matrix, solves
//! for the weight vector maximizing the annualized Sharpe ratio over the
//! unit simplex, and reports the metrics at the solution together with
//! convergence and degeneracy diagnostics.

mod max_sharpe;
mod metrics;

pub use max_sharpe::{maximize_sharpe, Convergence, MaxSharpeOutcome};
pub use metrics::{portfolio_performance, PortfolioMetrics};
