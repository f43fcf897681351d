//! Error types for portfolio analytics.
//!
//! Preconditions are reported as errors before any optimization is
//! attempted. Degenerate input and solver non-convergence are *not*
//! errors: both are flagged on the returned result so callers always
//! receive either a structured outcome or a structured failure.

use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone)]
pub enum PortfolioError {
    /// Fewer assets than the operation requires.
    #[error("Insufficient assets: need at least {required}, got {actual}")]
    InsufficientAssets {
        /// Minimum number of assets required.
        required: usize,
        /// Actual number of assets supplied.
        actual: usize,
    },

    /// Fewer aligned observations than the operation requires.
    #[error("Insufficient observations: need at least {required}, got {actual}")]
    InsufficientObservations {
        /// Minimum number of observations required.
        required: usize,
        /// Actual number of observations supplied.
        actual: usize,
    },

    /// A price series contains no data points.
    #[error("Price series for '{symbol}' is empty")]
    EmptySeries {
        /// The asset symbol.
        symbol: String,
    },

    /// The date indices of the supplied series do not overlap.
    #[error("No overlapping dates across the supplied price series")]
    NoOverlappingDates,

    /// The same symbol was supplied more than once.
    #[error("Duplicate symbol: '{symbol}' already present")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: String,
    },

    /// A price series repeats a trading date.
    #[error("Duplicate date {date} in price series for '{symbol}'")]
    DuplicateDate {
        /// The asset symbol.
        symbol: String,
        /// The repeated date.
        date: chrono::NaiveDate,
    },

    /// A close price is non-finite or not strictly positive.
    #[error("Invalid price for '{symbol}': {reason}")]
    InvalidPrice {
        /// The asset symbol.
        symbol: String,
        /// Description of the invalid value.
        reason: String,
    },

    /// A holding quantity or unit price is invalid.
    #[error("Invalid holding '{symbol}': {reason}")]
    InvalidHolding {
        /// The holding symbol.
        symbol: String,
        /// Description of the invalid value.
        reason: String,
    },

    /// The portfolio at the accepted solution has zero volatility, so
    /// the Sharpe ratio is undefined.
    #[error("Zero portfolio volatility: Sharpe ratio is undefined")]
    ZeroVolatility,

    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the invalid setting.
        reason: String,
    },

    /// A numerical routine failed.
    #[error(transparent)]
    Math(#[from] tangency_math::MathError),
}

impl PortfolioError {
    /// Creates an insufficient assets error.
    #[must_use]
    pub fn insufficient_assets(required: usize, actual: usize) -> Self {
        Self::InsufficientAssets { required, actual }
    }

    /// Creates an empty series error.
    #[must_use]
    pub fn empty_series(symbol: impl Into<String>) -> Self {
        Self::EmptySeries {
            symbol: symbol.into(),
        }
    }

    /// Creates an invalid price error.
    #[must_use]
    pub fn invalid_price(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPrice {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid holding error.
    #[must_use]
    pub fn invalid_holding(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
