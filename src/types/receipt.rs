//! Checkout receipt summarizing one archived batch of orders.

use ssz_rs::prelude::*;
use sha2::{Digest, Sha256};

use rust_decimal::Decimal;

use crate::error::{self, StoreError};
use crate::types::money::{from_cents, to_cents};
use crate::types::Order;

/// Receipt produced when a user's pending orders are archived.
///
/// ## State Root
///
/// The 32-byte state root is a SHA-256 hash over the archived orders in the
/// order they were archived. Two checkouts of identical batches yield the
/// same root.
///
/// ## Example
///
/// ```
/// use catalog_store::types::CheckoutReceipt;
///
/// let receipt = CheckoutReceipt::new(
///     1,          // batch_id
///     2,          // orders_archived
///     5,          // units_archived
///     850_000,    // total_cents
///     [0u8; 32],  // state_root
/// );
/// assert!(!receipt.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct CheckoutReceipt {
    /// Checkout sequence number within the history
    pub batch_id: u64,

    /// Number of orders moved into the history
    pub orders_archived: u64,

    /// Sum of order quantities in the batch
    pub units_archived: u64,

    /// Sum of order totals, rounded half away from zero to whole cents
    pub total_cents: u64,

    /// SHA-256 over the archived batch
    pub state_root: [u8; 32],
}

impl CheckoutReceipt {
    pub fn new(
        batch_id: u64,
        orders_archived: u64,
        units_archived: u64,
        total_cents: u64,
        state_root: [u8; 32],
    ) -> Self {
        Self {
            batch_id,
            orders_archived,
            units_archived,
            total_cents,
            state_root,
        }
    }

    /// Build a receipt for a batch of orders in archive order.
    ///
    /// The exact batch total is rounded to cents once, after summing.
    ///
    /// # Errors
    ///
    /// `PriceOverflow` if the batch total leaves the Decimal range or does
    /// not fit in `u64` cents, `InvalidQuantity` if the unit count does not
    /// fit in `u64`.
    pub fn for_batch<'a>(batch_id: u64, orders: impl IntoIterator<Item = &'a Order>) -> error::Result<Self> {
        let mut buf = Vec::new();
        let mut count: u64 = 0;
        let mut units: u64 = 0;
        let mut total = Decimal::ZERO;

        for order in orders {
            order.encode(&mut buf);
            count += 1;
            units = units
                .checked_add(order.quantity())
                .ok_or(StoreError::InvalidQuantity(order.quantity()))?;
            total = total
                .checked_add(order.total_price())
                .ok_or(StoreError::PriceOverflow)?;
        }
        let cents = to_cents(total).ok_or(StoreError::PriceOverflow)?;

        Ok(Self::new(batch_id, count, units, cents, Self::compute_hash(&buf)))
    }

    /// Compute SHA-256 hash of the given data
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// Check if nothing was archived
    pub fn is_empty(&self) -> bool {
        self.orders_archived == 0
    }

    /// Batch total as a Decimal amount, rounded to the cent.
    ///
    /// Use [`Checkout::total`](crate::session::Checkout) for the exact sum.
    pub fn total(&self) -> Decimal {
        from_cents(self.total_cents)
    }
}
