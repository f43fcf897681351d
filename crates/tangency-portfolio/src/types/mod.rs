//! Core types for portfolio analytics.

mod config;
mod holding;
mod matrix;
mod price;

pub use config::{FeatureConfig, OptimizerConfig};
pub use holding::Holding;
pub use matrix::ReturnMatrix;
pub use price::PriceSeries;
