//! # Tangency Portfolio
//!
//! Long-only max-Sharpe portfolio optimization and return analytics.
//!
//! Given daily closing prices per asset, this crate aligns the series on
//! their common dates, converts them to periodic returns, and solves for
//! the allocation weights that maximize the annualized Sharpe ratio
//! subject to full investment and no short positions. It also provides
//! portfolio bookkeeping (holdings, market values, value weights) and
//! rolling price features (moving averages, rolling volatility).
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every optimization call recomputes statistics
//!   from its inputs; nothing persists between calls
//! - **Explicit session state**: holdings live in a caller-owned
//!   [`Portfolio`] value, never in ambient state
//! - **Structured outcomes**: preconditions fail fast as errors, while
//!   degenerate input and solver non-convergence are flagged on the
//!   returned result
//!
//! ## Quick Start
//!
//! ```rust
//! use tangency_portfolio::prelude::*;
//!
//! # fn main() -> PortfolioResult<()> {
//! let dates = |day| chrono::NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
//! let apple = PriceSeries::new(
//!     "AAPL",
//!     vec![
//!         (dates(2), 100.0),
//!         (dates(3), 101.0),
//!         (dates(4), 99.5),
//!         (dates(5), 102.0),
//!     ],
//! )?;
//! let micro = PriceSeries::new(
//!     "MSFT",
//!     vec![
//!         (dates(2), 400.0),
//!         (dates(3), 398.0),
//!         (dates(4), 405.0),
//!         (dates(5), 402.0),
//!     ],
//! )?;
//!
//! let matrix = align_and_compute_returns(&[apple, micro])?;
//! let outcome = maximize_sharpe(&matrix, &OptimizerConfig::default())?;
//!
//! let total: f64 = outcome.weights.iter().sum();
//! assert!((total - 1.0).abs() < 1e-6);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`types`] - Core types (PriceSeries, ReturnMatrix, Holding, configs)
//! - [`returns`] - Date alignment and return matrix construction
//! - [`optimizer`] - Max-Sharpe optimization and performance metrics
//! - [`features`] - Rolling price features
//! - [`portfolio`] - Portfolio and builder types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

// Module declarations
pub mod error;
pub mod features;
pub mod optimizer;
pub mod portfolio;
pub mod returns;
pub mod types;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

// Re-export main types
pub use types::{FeatureConfig, Holding, OptimizerConfig, PriceSeries, ReturnMatrix};

// Re-export portfolio types
pub use portfolio::{Portfolio, PortfolioBuilder};

// Re-export return construction
pub use returns::align_and_compute_returns;

// Re-export optimizer types and functions
pub use optimizer::{
    maximize_sharpe, portfolio_performance, Convergence, MaxSharpeOutcome, PortfolioMetrics,
};

// Re-export feature types and functions
pub use features::{pct_change, rolling_mean, rolling_std, FeatureRow, PriceFeatures};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use tangency_portfolio::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{PortfolioError, PortfolioResult};

    // Core types
    pub use crate::types::{FeatureConfig, Holding, OptimizerConfig, PriceSeries, ReturnMatrix};

    // Portfolio
    pub use crate::portfolio::{Portfolio, PortfolioBuilder};

    // Return construction
    pub use crate::returns::align_and_compute_returns;

    // Optimizer
    pub use crate::optimizer::{
        maximize_sharpe, portfolio_performance, Convergence, MaxSharpeOutcome, PortfolioMetrics,
    };

    // Features
    pub use crate::features::{pct_change, rolling_mean, rolling_std, FeatureRow, PriceFeatures};

    // Re-export commonly used types from dependencies
    pub use chrono::NaiveDate;
    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        // Basic smoke test
        let err = PortfolioError::ZeroVolatility;
        assert!(err.to_string().contains("undefined"));
    }
}
