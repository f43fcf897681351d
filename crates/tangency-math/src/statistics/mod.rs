//! Descriptive statistics over return data.
//!
//! Columns of a matrix are interpreted as one series per asset and rows
//! as observation dates, matching the layout produced by the portfolio
//! crate's return alignment.

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector};

/// Arithmetic mean of a slice.
///
/// Returns 0.0 for an empty slice.
pub fn sample_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance of a slice (n - 1 denominator).
///
/// Returns 0.0 when fewer than two values are supplied.
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = sample_mean(values);
    let acc: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    acc / (values.len() - 1) as f64
}

/// Per-column arithmetic mean of an observation matrix.
///
/// # Errors
///
/// Returns [`MathError::InsufficientData`] when the matrix has no rows.
pub fn mean_vector(data: &DMatrix<f64>) -> MathResult<DVector<f64>> {
    let n = data.nrows();
    if n == 0 {
        return Err(MathError::insufficient_data(1, 0));
    }

    let means = (0..data.ncols()).map(|j| data.column(j).sum() / n as f64);
    Ok(DVector::from_iterator(data.ncols(), means))
}

/// Unbiased sample covariance of the columns of an observation matrix.
///
/// The result is symmetric by construction. Positive semi-definiteness
/// holds for any real data but is not separately enforced; callers that
/// need a definiteness check can attempt a Cholesky factorization.
///
/// # Errors
///
/// Returns [`MathError::InsufficientData`] when fewer than two rows are
/// supplied, since the n - 1 denominator is otherwise undefined.
pub fn sample_covariance(data: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    let n = data.nrows();
    let p = data.ncols();
    if n < 2 {
        return Err(MathError::insufficient_data(2, n));
    }

    let means = mean_vector(data)?;
    let mut cov = DMatrix::zeros(p, p);

    for i in 0..p {
        for j in i..p {
            let mut acc = 0.0;
            for t in 0..n {
                acc += (data[(t, i)] - means[i]) * (data[(t, j)] - means[j]);
            }
            let value = acc / (n - 1) as f64;
            cov[(i, j)] = value;
            cov[(j, i)] = value;
        }
    }

    Ok(cov)
}
