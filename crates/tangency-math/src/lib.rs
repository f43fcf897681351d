//! # Tangency Math
//!
//! Numerical utilities for the Tangency portfolio analytics library.
//!
//! This crate provides:
//!
//! - **Statistics**: Sample means and covariance of return matrices
//! - **Optimization**: Minimization over the unit simplex (projected
//!   gradient with backtracking line search)
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Careful handling of edge cases
//! - **Determinism**: Identical inputs always produce identical outputs;
//!   there is no randomized restart or stochastic search
//! - **No hidden state**: Every routine is a pure function of its inputs

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

pub mod error;
pub mod optimization;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::optimization::{
        minimize_on_simplex, project_onto_simplex, OptimizationConfig, OptimizationResult,
    };
    pub use crate::statistics::{mean_vector, sample_covariance, sample_mean, sample_variance};
}

pub use error::{MathError, MathResult};
