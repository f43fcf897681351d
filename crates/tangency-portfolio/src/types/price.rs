//! Price history for a single asset.

use crate::error::{PortfolioError, PortfolioResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered daily closing prices for one asset.
///
/// Construction sorts the points by date and validates that every close
/// is finite and strictly positive and that no date repeats. Positive
/// closes guarantee that derived fractional returns are well defined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Asset symbol (e.g. an exchange ticker).
    pub symbol: String,

    /// (date, close) pairs in ascending date order.
    pub points: Vec<(NaiveDate, f64)>,
}

impl PriceSeries {
    /// Creates a price series, sorting the points by date.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidPrice`] for a non-finite or
    /// non-positive close and [`PortfolioError::DuplicateDate`] when a
    /// date appears twice.
    pub fn new(
        symbol: impl Into<String>,
        mut points: Vec<(NaiveDate, f64)>,
    ) -> PortfolioResult<Self> {
        let symbol = symbol.into();

        for (date, close) in &points {
            if !close.is_finite() {
                return Err(PortfolioError::invalid_price(
                    &symbol,
                    format!("close on {date} is not finite"),
                ));
            }
            if *close <= 0.0 {
                return Err(PortfolioError::invalid_price(
                    &symbol,
                    format!("close on {date} is not strictly positive: {close}"),
                ));
            }
        }

        points.sort_by_key(|(date, _)| *date);

        for pair in points.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(PortfolioError::DuplicateDate {
                    symbol,
                    date: pair[0].0,
                });
            }
        }

        Ok(Self { symbol, points })
    }

    /// Number of price points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The dates of the series, in ascending order.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|(date, _)| *date).collect()
    }

    /// The closing prices of the series, date-ordered.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|(_, close)| *close).collect()
    }

    /// Looks up the close for a specific date.
    #[must_use]
    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |(d, _)| *d)
            .ok()
            .map(|idx| self.points[idx].1)
    }
}
