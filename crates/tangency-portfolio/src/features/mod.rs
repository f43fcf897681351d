//! Rolling price features.
//!
//! Per-date derived columns for one asset: the periodic return, short
//! and long simple moving averages of the close, and the rolling
//! standard deviation of returns. Rows before every window has filled
//! are dropped, mirroring how warm-up rows fall out of a dataframe
//! pipeline.

use crate::error::PortfolioResult;
use crate::types::{FeatureConfig, PriceSeries};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tangency_math::statistics::{sample_mean, sample_variance};

/// Consecutive-close fractional returns (`p[t] / p[t-1] - 1`).
///
/// The output has one element fewer than the input; an input shorter
/// than 2 yields an empty vector. Inputs are assumed strictly positive,
/// as enforced by [`PriceSeries::new`].
pub fn pct_change(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|pair| pair[1] / pair[0] - 1.0)
        .collect()
}

/// Rolling simple moving average.
///
/// Index `t` holds the mean of `values[t + 1 - window ..= t]`, or `None`
/// until the window has filled. A zero window yields all `None`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, sample_mean)
}

/// Rolling sample standard deviation (n - 1 denominator).
///
/// Index `t` holds the standard deviation of the trailing window, or
/// `None` until the window has filled.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |slice| sample_variance(slice).sqrt())
}

fn rolling<F>(values: &[f64], window: usize, stat: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    values
        .iter()
        .enumerate()
        .map(|(t, _)| {
            if window == 0 || t + 1 < window {
                None
            } else {
                Some(stat(&values[t + 1 - window..=t]))
            }
        })
        .collect()
}

/// One fully-populated feature row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Observation date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
    /// Periodic fractional return ending on this date.
    pub ret: f64,
    /// Short moving average of the close.
    pub ma_short: f64,
    /// Long moving average of the close.
    pub ma_long: f64,
    /// Rolling standard deviation of returns.
    pub volatility: f64,
}

/// Rolling features for one asset, warm-up rows removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceFeatures {
    /// Asset symbol.
    pub symbol: String,
    /// Feature rows in ascending date order.
    pub rows: Vec<FeatureRow>,
}

impl PriceFeatures {
    /// Computes rolling features for a price series.
    ///
    /// Rows are emitted only from the first date at which the return,
    /// both moving averages, and the rolling volatility are all
    /// defined; a series shorter than the longest warm-up produces an
    /// empty feature set rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PortfolioError::InvalidConfig`] when a window in
    /// the configuration is smaller than 2.
    pub fn compute(series: &PriceSeries, config: &FeatureConfig) -> PortfolioResult<Self> {
        config.validate()?;

        let closes = series.closes();
        let series_dates = series.dates();
        let returns = pct_change(&closes);

        let ma_short = rolling_mean(&closes, config.short_window);
        let ma_long = rolling_mean(&closes, config.long_window);
        let volatility = rolling_std(&returns, config.volatility_window);

        let mut rows = Vec::new();
        for t in 1..closes.len() {
            let (Some(short), Some(long), Some(vol)) =
                (ma_short[t], ma_long[t], volatility[t - 1])
            else {
                continue;
            };

            rows.push(FeatureRow {
                date: series_dates[t],
                close: closes[t],
                ret: returns[t - 1],
                ma_short: short,
                ma_long: long,
                volatility: vol,
            });
        }

        Ok(Self {
            symbol: series.symbol.clone(),
            rows,
        })
    }

    /// Number of feature rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when no row has every feature populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The most recent feature row, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&FeatureRow> {
        self.rows.last()
    }
}
