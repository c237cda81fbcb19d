//! Error types for the catalog store.
//!
//! Every condition here is recoverable and reported to the caller. Nothing
//! in the core aborts the process.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// How a product was looked up when the lookup missed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductKey {
    /// Lookup by product identifier
    Id(u64),
    /// Lookup by product name
    Name(String),
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductKey::Id(id) => write!(f, "id {}", id),
            ProductKey::Name(name) => write!(f, "name '{}'", name),
        }
    }
}

/// Errors reported by catalog, order and session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("product not found: {0}")]
    ProductNotFound(ProductKey),

    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u64, available: u64 },

    #[error("duplicate product id: {0}")]
    DuplicateProductId(u64),

    #[error("invalid admin pin")]
    InvalidPin,

    #[error("invalid order quantity: {0}")]
    InvalidQuantity(u64),

    #[error("invalid unit price: {0}")]
    InvalidPrice(Decimal),

    #[error("order total overflows decimal range")]
    PriceOverflow,
}

impl StoreError {
    /// Shorthand for an id lookup miss
    pub fn missing_id(id: u64) -> Self {
        StoreError::ProductNotFound(ProductKey::Id(id))
    }

    /// Shorthand for a name lookup miss
    pub fn missing_name(name: &str) -> Self {
        StoreError::ProductNotFound(ProductKey::Name(name.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::missing_id(7).to_string(),
            "product not found: id 7"
        );
        assert_eq!(
            StoreError::missing_name("laptop").to_string(),
            "product not found: name 'laptop'"
        );
        assert_eq!(
            StoreError::InsufficientStock { requested: 9, available: 3 }.to_string(),
            "insufficient stock: requested 9, available 3"
        );
        assert_eq!(StoreError::DuplicateProductId(1).to_string(), "duplicate product id: 1");
    }
}
