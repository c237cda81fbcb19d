//! Order snapshots.
//!
//! An `Order` captures a purchase at the moment it was placed: product
//! identity, the unit price at that time, the quantity and the computed
//! total. Later price or stock changes in the catalog never touch it.

use std::fmt;

use rust_decimal::Decimal;

use crate::error::{Result, StoreError};
use crate::types::money::{format_price, line_total};
use crate::types::Product;

/// An immutable purchase record.
///
/// Fields are private and there are no setters; the only way to get an
/// `Order` is [`Order::new`] or [`Order::snapshot`].
///
/// ## Example
///
/// ```
/// use catalog_store::types::{Order, Product};
/// use rust_decimal::Decimal;
///
/// let laptop = Product::new(1, "laptop", Decimal::from(2000), 5).unwrap();
/// let order = Order::snapshot(&laptop, 2).unwrap();
///
/// assert_eq!(order.total_price(), Decimal::from(4000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    product_id: u64,
    product_name: String,
    unit_price: Decimal,
    quantity: u64,
    total_price: Decimal,
}

impl Order {
    /// Create an order
    ///
    /// # Errors
    ///
    /// * `InvalidQuantity` - quantity is zero
    /// * `InvalidPrice` - unit price is negative
    /// * `PriceOverflow` - `unit_price * quantity` does not fit in a Decimal
    pub fn new(
        product_id: u64,
        product_name: impl Into<String>,
        unit_price: Decimal,
        quantity: u64,
    ) -> Result<Self> {
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity(quantity));
        }
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(StoreError::InvalidPrice(unit_price));
        }

        let total_price = line_total(unit_price, quantity).ok_or(StoreError::PriceOverflow)?;

        Ok(Self {
            product_id,
            product_name: product_name.into(),
            unit_price,
            quantity,
            total_price,
        })
    }

    /// Snapshot a product at its current price
    pub fn snapshot(product: &Product, quantity: u64) -> Result<Self> {
        Self::new(product.id(), product.name(), product.unit_price(), quantity)
    }

    #[inline]
    pub fn product_id(&self) -> u64 {
        self.product_id
    }

    #[inline]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    #[inline]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    #[inline]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    #[inline]
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Bytes fed into batch state-root hashing
    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.product_id.to_le_bytes());
        out.extend_from_slice(&(self.product_name.len() as u64).to_le_bytes());
        out.extend_from_slice(self.product_name.as_bytes());
        out.extend_from_slice(&self.unit_price.normalize().serialize());
        out.extend_from_slice(&self.quantity.to_le_bytes());
        out.extend_from_slice(&self.total_price.normalize().serialize());
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product: {}, Rate: {}, Quantity: {}, Total Price: ${}",
            self.product_name,
            format_price(self.unit_price),
            self.quantity,
            format_price(self.total_price)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_order_new() {
        let order = Order::new(1, "laptop", Decimal::from(2000), 2).unwrap();

        assert_eq!(order.product_id(), 1);
        assert_eq!(order.product_name(), "laptop");
        assert_eq!(order.unit_price(), Decimal::from(2000));
        assert_eq!(order.quantity(), 2);
        assert_eq!(order.total_price(), Decimal::from(4000));
    }

    #[test]
    fn test_order_fractional_total() {
        let price = Decimal::from_str("19.99").unwrap();
        let order = Order::new(9, "cable", price, 3).unwrap();

        assert_eq!(order.total_price(), Decimal::from_str("59.97").unwrap());
    }

    #[test]
    fn test_order_rejects_zero_quantity() {
        let err = Order::new(1, "laptop", Decimal::from(2000), 0).unwrap_err();
        assert_eq!(err, StoreError::InvalidQuantity(0));
    }

    #[test]
    fn test_order_rejects_overflow() {
        let err = Order::new(1, "gold", Decimal::MAX, 2).unwrap_err();
        assert_eq!(err, StoreError::PriceOverflow);
    }

    #[test]
    fn test_snapshot_is_detached_from_product() {
        let mut product = Product::new(2, "mobile", Decimal::from(1500), 7).unwrap();
        let order = Order::snapshot(&product, 3).unwrap();

        product.set_stock(0);

        assert_eq!(order.product_id(), 2);
        assert_eq!(order.quantity(), 3);
        assert_eq!(order.total_price(), Decimal::from(4500));
    }

    #[test]
    fn test_display() {
        let order = Order::new(1, "laptop", Decimal::from(2000), 2).unwrap();
        assert_eq!(
            order.to_string(),
            "Product: laptop, Rate: 2000.00, Quantity: 2, Total Price: $4000.00"
        );
    }
}
