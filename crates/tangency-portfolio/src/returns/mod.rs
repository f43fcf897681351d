//! Price alignment and return matrix construction.
//!
//! Assets are aligned on the intersection of their date indices before
//! conversion to returns, so a date with any missing asset contributes
//! no row. Returns are consecutive-close ratios, which makes every
//! derived statistic invariant under a common positive rescaling of all
//! prices.

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{PriceSeries, ReturnMatrix};
use chrono::NaiveDate;
use nalgebra::DMatrix;
use std::collections::BTreeSet;

/// Aligns price series on their common dates and computes periodic
/// fractional returns `p[t] / p[t-1] - 1`.
///
/// The resulting matrix has one row per aligned date starting from the
/// second (the first date is consumed by differencing) and one column
/// per asset, in input order.
///
/// # Errors
///
/// - [`PortfolioError::InsufficientAssets`] when no series is supplied.
/// - [`PortfolioError::EmptySeries`] when a series has no points.
/// - [`PortfolioError::DuplicateSymbol`] when a symbol repeats.
/// - [`PortfolioError::NoOverlappingDates`] when fewer than two dates
///   are shared by every asset, leaving nothing to difference.
pub fn align_and_compute_returns(series: &[PriceSeries]) -> PortfolioResult<ReturnMatrix> {
    if series.is_empty() {
        return Err(PortfolioError::insufficient_assets(1, 0));
    }

    for (i, s) in series.iter().enumerate() {
        if s.is_empty() {
            return Err(PortfolioError::empty_series(&s.symbol));
        }
        if series[..i].iter().any(|other| other.symbol == s.symbol) {
            return Err(PortfolioError::DuplicateSymbol {
                symbol: s.symbol.clone(),
            });
        }
    }

    // Intersect date indices across all assets.
    let mut common: BTreeSet<NaiveDate> = series[0].dates().into_iter().collect();
    for s in &series[1..] {
        let dates: BTreeSet<NaiveDate> = s.dates().into_iter().collect();
        common = common.intersection(&dates).copied().collect();
    }

    if common.len() < 2 {
        return Err(PortfolioError::NoOverlappingDates);
    }

    let aligned_dates: Vec<NaiveDate> = common.into_iter().collect();
    let n_dates = aligned_dates.len();
    let n_assets = series.len();

    let mut prices = DMatrix::zeros(n_dates, n_assets);
    for (col, s) in series.iter().enumerate() {
        for (row, date) in aligned_dates.iter().enumerate() {
            // The date is in the intersection, so the lookup cannot miss.
            let close = s.close_on(*date).ok_or_else(|| {
                PortfolioError::invalid_price(&s.symbol, format!("missing close on {date}"))
            })?;
            prices[(row, col)] = close;
        }
    }

    let mut returns = DMatrix::zeros(n_dates - 1, n_assets);
    for col in 0..n_assets {
        for row in 1..n_dates {
            returns[(row - 1, col)] = prices[(row, col)] / prices[(row - 1, col)] - 1.0;
        }
    }

    let symbols = series.iter().map(|s| s.symbol.clone()).collect();
    ReturnMatrix::new(symbols, aligned_dates[1..].to_vec(), returns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn series(symbol: &str, closes: &[(u32, f64)]) -> PriceSeries {
        PriceSeries::new(
            symbol,
            closes.iter().map(|&(day, close)| (d(day), close)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_returns_from_prices() {
        let a = series("A", &[(1, 100.0), (2, 110.0), (3, 99.0)]);
        let matrix = align_and_compute_returns(&[a]).unwrap();

        assert_eq!(matrix.observation_count(), 2);
        assert_eq!(matrix.dates(), &[d(2), d(3)]);
        let returns = matrix.series("A").unwrap();
        assert_relative_eq!(returns[0], 0.10, epsilon = 1e-12);
        assert_relative_eq!(returns[1], -0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_rows_with_missing_asset_dropped() {
        // B is missing day 2; that date must not contribute a row.
        let a = series("A", &[(1, 100.0), (2, 101.0), (3, 102.0), (4, 103.0)]);
        let b = series("B", &[(1, 50.0), (3, 51.0), (4, 52.0)]);

        let matrix = align_and_compute_returns(&[a, b]).unwrap();

        assert_eq!(matrix.dates(), &[d(3), d(4)]);
        let a_returns = matrix.series("A").unwrap();
        // Day 3 return spans day 1 -> day 3 because day 2 was dropped.
        assert_relative_eq!(a_returns[0], 102.0 / 100.0 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_overlap_is_an_error() {
        let a = series("A", &[(1, 100.0), (2, 101.0)]);
        let b = series("B", &[(10, 50.0), (11, 51.0)]);

        let result = align_and_compute_returns(&[a, b]);
        assert!(matches!(result, Err(PortfolioError::NoOverlappingDates)));
    }

    #[test]
    fn test_single_common_date_is_an_error() {
        let a = series("A", &[(1, 100.0), (2, 101.0)]);
        let b = series("B", &[(2, 50.0), (10, 51.0)]);

        let result = align_and_compute_returns(&[a, b]);
        assert!(matches!(result, Err(PortfolioError::NoOverlappingDates)));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            align_and_compute_returns(&[]),
            Err(PortfolioError::InsufficientAssets { .. })
        ));
    }

    #[test]
    fn test_empty_series_rejected() {
        let a = series("A", &[(1, 100.0), (2, 101.0)]);
        let b = PriceSeries::new("B", vec![]).unwrap();
        assert!(matches!(
            align_and_compute_returns(&[a, b]),
            Err(PortfolioError::EmptySeries { .. })
        ));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let a1 = series("A", &[(1, 100.0), (2, 101.0)]);
        let a2 = series("A", &[(1, 200.0), (2, 202.0)]);
        assert!(matches!(
            align_and_compute_returns(&[a1, a2]),
            Err(PortfolioError::DuplicateSymbol { .. })
        ));
    }

    #[test]
    fn test_scale_invariance_of_returns() {
        let a = series("A", &[(1, 100.0), (2, 110.0), (3, 99.0)]);
        let scaled = series("A", &[(1, 370.0), (2, 407.0), (3, 366.3)]);

        let base = align_and_compute_returns(&[a]).unwrap();
        let rescaled = align_and_compute_returns(&[scaled]).unwrap();

        for (x, y) in base
            .series("A")
            .unwrap()
            .iter()
            .zip(rescaled.series("A").unwrap())
        {
            assert_relative_eq!(*x, y, epsilon = 1e-12);
        }
    }
}
