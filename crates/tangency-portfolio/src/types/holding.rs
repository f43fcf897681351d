//! A single portfolio position.

use crate::error::{PortfolioError, PortfolioResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A long position in one asset: symbol, share quantity, and the unit
/// price at which the position is marked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// Asset symbol.
    pub symbol: String,

    /// Number of shares held.
    pub quantity: Decimal,

    /// Mark price per share.
    pub unit_price: Decimal,
}

impl Holding {
    /// Creates a holding.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidHolding`] when the quantity or
    /// unit price is not strictly positive.
    pub fn new(
        symbol: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> PortfolioResult<Self> {
        let symbol = symbol.into();

        if quantity <= Decimal::ZERO {
            return Err(PortfolioError::invalid_holding(
                &symbol,
                format!("quantity must be positive, got {quantity}"),
            ));
        }
        if unit_price <= Decimal::ZERO {
            return Err(PortfolioError::invalid_holding(
                &symbol,
                format!("unit price must be positive, got {unit_price}"),
            ));
        }

        Ok(Self {
            symbol,
            quantity,
            unit_price,
        })
    }

    /// Market value of the position (quantity × unit price).
    #[must_use]
    pub fn market_value(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}
