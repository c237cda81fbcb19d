//! Append-only checkout history.
//!
//! New entries are linked in at the head, so iteration yields the most
//! recent order first. There is no removal or edit operation.

use rust_decimal::Decimal;
use slab::Slab;
use tracing::info;

use crate::error::Result;
use crate::orders::node::{Entries, OrderEntry};
use crate::orders::queue::checked_total;
use crate::types::{CheckoutReceipt, Order};

/// Archive of completed orders across all users.
#[derive(Debug, Clone, Default)]
pub struct CheckoutHistory {
    entries: Slab<OrderEntry>,

    /// Most recent order
    head: Option<usize>,

    /// Checkout batches recorded so far
    batches: u64,
}

impl CheckoutHistory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of checkout batches recorded
    #[inline]
    pub fn batch_count(&self) -> u64 {
        self.batches
    }

    /// Prepend an order, O(1)
    pub fn append(&mut self, order: Order) {
        let mut entry = OrderEntry::new(order);
        entry.next = self.head;
        self.head = Some(self.entries.insert(entry));
    }

    /// Take ownership of a batch, archive it in the order given and return
    /// its receipt.
    ///
    /// Batch ids start at 1 and increase by one per successful call. The
    /// receipt is built before anything is archived, so on error the
    /// history is left unchanged.
    pub fn record_batch(&mut self, orders: Vec<Order>) -> Result<CheckoutReceipt> {
        let receipt = CheckoutReceipt::for_batch(self.batches + 1, &orders)?;
        self.batches += 1;

        for order in orders {
            self.append(order);
        }

        info!(
            batch_id = receipt.batch_id,
            orders = receipt.orders_archived,
            total_cents = receipt.total_cents,
            state_root = %receipt.state_root_hex(),
            "checkout batch archived"
        );
        Ok(receipt)
    }

    /// Most recent order first
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            slab: &self.entries,
            cursor: self.head,
        }
    }

    /// Alias of [`iter`](Self::iter)
    #[inline]
    pub fn traverse(&self) -> Entries<'_> {
        self.iter()
    }

    /// Sum of all archived totals, `PriceOverflow` past the Decimal range
    pub fn revenue(&self) -> Result<Decimal> {
        checked_total(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn order(id: u64, quantity: u64) -> Order {
        Order::new(id, format!("item-{}", id), Decimal::from(10), quantity).unwrap()
    }

    #[test]
    fn test_history_new() {
        let history = CheckoutHistory::new();

        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert_eq!(history.batch_count(), 0);
        assert!(history.iter().next().is_none());
    }

    #[test]
    fn test_history_most_recent_first() {
        let mut history = CheckoutHistory::new();
        history.append(order(1, 1));
        history.append(order(2, 1));
        history.append(order(3, 1));

        let ids: Vec<u64> = history.traverse().map(|o| o.product_id()).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        // Restartable
        assert_eq!(history.iter().count(), 3);
    }

    #[test]
    fn test_record_batch() {
        let mut history = CheckoutHistory::new();

        let first = history.record_batch(vec![order(1, 2), order(2, 1)]).unwrap();
        let second = history.record_batch(vec![order(3, 5)]).unwrap();

        assert_eq!(first.batch_id, 1);
        assert_eq!(first.orders_archived, 2);
        assert_eq!(first.total_cents, 3_000);
        assert_eq!(second.batch_id, 2);
        assert_eq!(history.batch_count(), 2);

        let ids: Vec<u64> = history.iter().map(|o| o.product_id()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(history.revenue(), Ok(Decimal::from(80)));
    }

    #[test]
    fn test_record_empty_batch() {
        let mut history = CheckoutHistory::new();

        let receipt = history.record_batch(Vec::new()).unwrap();
        assert!(receipt.is_empty());
        assert_eq!(receipt.batch_id, 1);
        assert!(history.is_empty());
    }

    #[test]
    fn test_overflowing_batch_is_rejected() {
        let mut history = CheckoutHistory::new();
        let gold = |id| Order::new(id, "gold", Decimal::MAX, 1).unwrap();

        let err = history.record_batch(vec![gold(1), gold(2)]).unwrap_err();
        assert_eq!(err, StoreError::PriceOverflow);
        assert!(history.is_empty());
        assert_eq!(history.batch_count(), 0);
    }

    #[test]
    fn test_revenue_overflow_is_reported() {
        let mut history = CheckoutHistory::new();
        let gold = |id| Order::new(id, "gold", Decimal::MAX, 1).unwrap();

        // Each batch fits on its own; the running revenue does not
        history.append(gold(1));
        history.append(gold(2));

        assert_eq!(history.revenue(), Err(StoreError::PriceOverflow));
        assert_eq!(history.len(), 2);
    }
}
