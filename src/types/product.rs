//! Product record owned by the catalog index.

use std::fmt;

use rust_decimal::Decimal;

use crate::error::{Result, StoreError};
use crate::types::money::format_price;

/// A product in the catalog.
///
/// Identity fields (`id`, `name`, `unit_price`) are fixed once the product
/// is built; only the stock level changes in place. This keeps the catalog's
/// ordering key out of reach of callers holding a `&mut Product`.
///
/// ## Example
///
/// ```
/// use catalog_store::types::Product;
/// use rust_decimal::Decimal;
///
/// let laptop = Product::new(1, "laptop", Decimal::from(2000), 5).unwrap();
/// assert_eq!(laptop.stock(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: u64,
    name: String,
    unit_price: Decimal,
    stock: u64,
}

impl Product {
    /// Build a product, rejecting a negative unit price
    pub fn new(id: u64, name: impl Into<String>, unit_price: Decimal, stock: u64) -> Result<Self> {
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(StoreError::InvalidPrice(unit_price));
        }

        Ok(Self {
            id,
            name: name.into(),
            unit_price,
            stock,
        })
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    #[inline]
    pub fn stock(&self) -> u64 {
        self.stock
    }

    /// Overwrite the stock level, returning the previous value
    pub fn set_stock(&mut self, quantity: u64) -> u64 {
        std::mem::replace(&mut self.stock, quantity)
    }

    /// Remove `quantity` units from stock.
    ///
    /// The check and the decrement happen together; on failure the stock
    /// is left untouched.
    pub fn take_stock(&mut self, quantity: u64) -> Result<()> {
        if quantity > self.stock {
            return Err(StoreError::InsufficientStock {
                requested: quantity,
                available: self.stock,
            });
        }
        self.stock -= quantity;
        Ok(())
    }

    /// Bytes fed into catalog state-root hashing
    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.id.to_le_bytes());
        out.extend_from_slice(&(self.name.len() as u64).to_le_bytes());
        out.extend_from_slice(self.name.as_bytes());
        out.extend_from_slice(&self.unit_price.normalize().serialize());
        out.extend_from_slice(&self.stock.to_le_bytes());
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Price: ${}, Quantity: {}",
            self.id,
            self.name,
            format_price(self.unit_price),
            self.stock
        )
    }
}
