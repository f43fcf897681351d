//! Aligned return matrix across assets.

use crate::error::{PortfolioError, PortfolioResult};
use chrono::NaiveDate;
use nalgebra::DMatrix;

/// Periodic fractional returns for a set of assets on a shared date
/// index.
///
/// Rows are observation dates (ascending), columns are assets in the
/// order of `symbols`. Every column shares the identical date index:
/// rows with any missing asset are dropped during alignment, before this
/// type is constructed.
#[derive(Debug, Clone)]
pub struct ReturnMatrix {
    symbols: Vec<String>,
    dates: Vec<NaiveDate>,
    returns: DMatrix<f64>,
}

impl ReturnMatrix {
    /// Creates a return matrix from pre-computed returns.
    ///
    /// # Errors
    ///
    /// Returns an error when dimensions are inconsistent, a symbol
    /// repeats, the date index is not strictly ascending, or a return is
    /// not finite.
    pub fn new(
        symbols: Vec<String>,
        dates: Vec<NaiveDate>,
        returns: DMatrix<f64>,
    ) -> PortfolioResult<Self> {
        if symbols.is_empty() {
            return Err(PortfolioError::insufficient_assets(1, 0));
        }
        if returns.ncols() != symbols.len() || returns.nrows() != dates.len() {
            return Err(tangency_math::MathError::DimensionMismatch {
                rows1: dates.len(),
                cols1: symbols.len(),
                rows2: returns.nrows(),
                cols2: returns.ncols(),
            }
            .into());
        }

        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(PortfolioError::DuplicateSymbol {
                    symbol: symbol.clone(),
                });
            }
        }

        for pair in dates.windows(2) {
            if pair[0] >= pair[1] {
                return Err(PortfolioError::invalid_config(format!(
                    "date index is not strictly ascending at {}",
                    pair[1]
                )));
            }
        }

        for (idx, value) in returns.iter().enumerate() {
            if !value.is_finite() {
                let col = idx / returns.nrows();
                return Err(PortfolioError::invalid_price(
                    symbols[col].clone(),
                    "return value is not finite",
                ));
            }
        }

        Ok(Self {
            symbols,
            dates,
            returns,
        })
    }

    /// Number of assets (columns).
    #[must_use]
    pub fn asset_count(&self) -> usize {
        self.symbols.len()
    }

    /// Number of aligned observation dates (rows).
    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.dates.len()
    }

    /// Asset symbols in column order.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// The shared date index, ascending.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The underlying returns (rows = dates, columns = assets).
    #[must_use]
    pub fn returns(&self) -> &DMatrix<f64> {
        &self.returns
    }

    /// The return series of one asset, if present.
    #[must_use]
    pub fn series(&self, symbol: &str) -> Option<Vec<f64>> {
        let col = self.symbols.iter().position(|s| s == symbol)?;
        Some(self.returns.column(col).iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn two_by_two() -> (Vec<String>, Vec<NaiveDate>, DMatrix<f64>) {
        (
            vec!["A".to_string(), "B".to_string()],
            vec![d(2), d(3)],
            DMatrix::from_row_slice(2, 2, &[0.01, 0.02, -0.01, 0.00]),
        )
    }

    #[test]
    fn test_new_valid() {
        let (symbols, dates, returns) = two_by_two();
        let matrix = ReturnMatrix::new(symbols, dates, returns).unwrap();
        assert_eq!(matrix.asset_count(), 2);
        assert_eq!(matrix.observation_count(), 2);
        assert_eq!(matrix.series("B").unwrap(), vec![0.02, 0.00]);
        assert!(matrix.series("C").is_none());
    }

    #[test]
    fn test_dimension_mismatch() {
        let (symbols, dates, _) = two_by_two();
        let bad = DMatrix::from_row_slice(1, 2, &[0.01, 0.02]);
        assert!(ReturnMatrix::new(symbols, dates, bad).is_err());
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let (_, dates, returns) = two_by_two();
        let symbols = vec!["A".to_string(), "A".to_string()];
        let result = ReturnMatrix::new(symbols, dates, returns);
        assert!(matches!(result, Err(PortfolioError::DuplicateSymbol { .. })));
    }

    #[test]
    fn test_unsorted_dates_rejected() {
        let (symbols, _, returns) = two_by_two();
        let result = ReturnMatrix::new(symbols, vec![d(3), d(2)], returns);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_return_rejected() {
        let (symbols, dates, _) = two_by_two();
        let bad = DMatrix::from_row_slice(2, 2, &[0.01, f64::NAN, -0.01, 0.00]);
        let result = ReturnMatrix::new(symbols, dates, bad);
        assert!(matches!(result, Err(PortfolioError::InvalidPrice { .. })));
    }
}
