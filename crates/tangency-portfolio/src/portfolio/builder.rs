//! Portfolio builder for fluent construction.

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::Holding;
use crate::Portfolio;

/// Builder for constructing a [`Portfolio`].
///
/// # Example
///
/// ```rust
/// use rust_decimal_macros::dec;
/// use tangency_portfolio::prelude::*;
///
/// # fn main() -> PortfolioResult<()> {
/// let portfolio = PortfolioBuilder::new()
///     .name("Growth")
///     .add_holding(Holding::new("AAPL", dec!(10), dec!(187.50))?)
///     .add_holding(Holding::new("MSFT", dec!(4), dec!(410.00))?)
///     .build()?;
///
/// assert_eq!(portfolio.holding_count(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder {
    name: Option<String>,
    holdings: Vec<Holding>,
}

impl PortfolioBuilder {
    /// Creates a new portfolio builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the portfolio name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a holding to the portfolio.
    #[must_use]
    pub fn add_holding(mut self, holding: Holding) -> Self {
        self.holdings.push(holding);
        self
    }

    /// Adds multiple holdings to the portfolio.
    #[must_use]
    pub fn add_holdings(mut self, holdings: impl IntoIterator<Item = Holding>) -> Self {
        self.holdings.extend(holdings);
        self
    }

    /// Builds the portfolio.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is missing or a symbol appears in
    /// more than one holding.
    pub fn build(self) -> PortfolioResult<Portfolio> {
        let name = self
            .name
            .ok_or_else(|| PortfolioError::missing_field("name"))?;

        for (i, holding) in self.holdings.iter().enumerate() {
            if self.holdings[..i]
                .iter()
                .any(|other| other.symbol == holding.symbol)
            {
                return Err(PortfolioError::DuplicateSymbol {
                    symbol: holding.symbol.clone(),
                });
            }
        }

        Ok(Portfolio {
            name,
            holdings: self.holdings,
        })
    }
}
