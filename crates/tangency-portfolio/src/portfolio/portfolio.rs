//! Portfolio struct and core methods.

use crate::types::Holding;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A collection of long positions owned by the caller.
///
/// The portfolio is an explicit value passed into analysis calls; the
/// optimizer keeps no reference to it and no state between calls, so two
/// analyses of the same portfolio value are fully independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    /// Portfolio name.
    pub name: String,

    /// Positions, one per symbol.
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    /// Creates a new portfolio builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> super::PortfolioBuilder {
        super::PortfolioBuilder::new().name(name)
    }

    /// Returns the number of holdings.
    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }

    /// Returns true if the portfolio has no holdings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// The symbols held, in position order.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        self.holdings.iter().map(|h| h.symbol.as_str()).collect()
    }

    /// Total market value of all positions.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.holdings.iter().map(Holding::market_value).sum()
    }

    /// Market-value weight of each position.
    ///
    /// Returns (symbol, weight) pairs with weights summing to 1, or all
    /// zeros when the total value is zero.
    #[must_use]
    pub fn value_weights(&self) -> Vec<(&str, Decimal)> {
        let total = self.total_value();

        if total == Decimal::ZERO {
            return self
                .holdings
                .iter()
                .map(|h| (h.symbol.as_str(), Decimal::ZERO))
                .collect();
        }

        self.holdings
            .iter()
            .map(|h| (h.symbol.as_str(), h.market_value() / total))
            .collect()
    }
}
