//! Configuration for optimization and feature computation.

use crate::error::{PortfolioError, PortfolioResult};
use serde::{Deserialize, Serialize};

/// Assumed number of trading periods per year for daily data.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Configuration for the max-Sharpe optimizer.
///
/// Daily means and covariances are scaled by `periods_per_year` to
/// annualized figures before the Sharpe ratio is formed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Trading periods per year used for annualization.
    pub periods_per_year: u32,

    /// Annualized risk-free rate subtracted from the portfolio return in
    /// the Sharpe numerator. Defaults to zero.
    pub risk_free_rate: f64,

    /// Solver convergence tolerance.
    pub tolerance: f64,

    /// Solver iteration cap, bounding worst-case latency on
    /// pathological inputs.
    pub max_iterations: u32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            periods_per_year: TRADING_DAYS_PER_YEAR,
            risk_free_rate: 0.0,
            tolerance: tangency_math::optimization::DEFAULT_TOLERANCE,
            max_iterations: tangency_math::optimization::DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl OptimizerConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the annualization factor.
    #[must_use]
    pub fn with_periods_per_year(mut self, periods: u32) -> Self {
        self.periods_per_year = periods;
        self
    }

    /// Sets the annualized risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the solver iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidConfig`] for a zero
    /// annualization factor, a non-positive tolerance, or a non-finite
    /// risk-free rate.
    pub fn validate(&self) -> PortfolioResult<()> {
        if self.periods_per_year == 0 {
            return Err(PortfolioError::invalid_config(
                "periods_per_year must be at least 1",
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(PortfolioError::invalid_config(format!(
                "tolerance must be a positive finite value, got {}",
                self.tolerance
            )));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(PortfolioError::invalid_config(
                "risk_free_rate must be finite",
            ));
        }
        Ok(())
    }
}

/// Configuration for rolling price features.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Window of the short moving average.
    pub short_window: usize,

    /// Window of the long moving average.
    pub long_window: usize,

    /// Window of the rolling return volatility.
    pub volatility_window: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            short_window: 10,
            long_window: 50,
            volatility_window: 20,
        }
    }
}

impl FeatureConfig {
    /// Creates a config with default windows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the short moving-average window.
    #[must_use]
    pub fn with_short_window(mut self, window: usize) -> Self {
        self.short_window = window;
        self
    }

    /// Sets the long moving-average window.
    #[must_use]
    pub fn with_long_window(mut self, window: usize) -> Self {
        self.long_window = window;
        self
    }

    /// Sets the rolling volatility window.
    #[must_use]
    pub fn with_volatility_window(mut self, window: usize) -> Self {
        self.volatility_window = window;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidConfig`] when any window is
    /// smaller than 2; a rolling standard deviation needs at least two
    /// observations, and a 1-period moving average is the identity.
    pub fn validate(&self) -> PortfolioResult<()> {
        for (name, window) in [
            ("short_window", self.short_window),
            ("long_window", self.long_window),
            ("volatility_window", self.volatility_window),
        ] {
            if window < 2 {
                return Err(PortfolioError::invalid_config(format!(
                    "{name} must be at least 2, got {window}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimizer_defaults() {
        let config = OptimizerConfig::default();
        assert_eq!(config.periods_per_year, 252);
        assert_eq!(config.risk_free_rate, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_optimizer_builder_pattern() {
        let config = OptimizerConfig::new()
            .with_periods_per_year(52)
            .with_risk_free_rate(0.02)
            .with_max_iterations(1000);

        assert_eq!(config.periods_per_year, 52);
        assert_eq!(config.risk_free_rate, 0.02);
        assert_eq!(config.max_iterations, 1000);
    }

    #[test]
    fn test_optimizer_validation() {
        assert!(OptimizerConfig::new()
            .with_periods_per_year(0)
            .validate()
            .is_err());
        assert!(OptimizerConfig::new()
            .with_tolerance(-1.0)
            .validate()
            .is_err());
        assert!(OptimizerConfig::new()
            .with_risk_free_rate(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_feature_defaults() {
        let config = FeatureConfig::default();
        assert_eq!(config.short_window, 10);
        assert_eq!(config.long_window, 50);
        assert_eq!(config.volatility_window, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_feature_validation() {
        assert!(FeatureConfig::new().with_short_window(1).validate().is_err());
        assert!(FeatureConfig::new().with_long_window(0).validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = OptimizerConfig::new().with_risk_free_rate(0.015);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: OptimizerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.risk_free_rate, 0.015);
        assert_eq!(parsed.periods_per_year, config.periods_per_year);
    }
}
