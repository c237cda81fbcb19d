//! FIFO queue of pending orders.
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) -> order2 -> order3 -> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Checkout consumes orders from the head
//! - Entries live in a slab; links are slab keys

use rust_decimal::Decimal;
use slab::Slab;

use crate::error::{Result, StoreError};
use crate::orders::node::{Entries, OrderEntry};
use crate::types::Order;

/// Pending orders for one user, oldest first.
#[derive(Debug, Clone, Default)]
pub struct OrderQueue {
    entries: Slab<OrderEntry>,

    /// Oldest order, dequeued first
    head: Option<usize>,

    /// Newest order, enqueue appends after it
    tail: Option<usize>,
}

/// Non-destructive view of the queue with the running total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrders<'a> {
    /// Orders front to back
    pub orders: Vec<&'a Order>,

    /// Sum of `total_price` over `orders`
    pub total: Decimal,
}

impl OrderQueue {
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

    /// Append an order at the tail, O(1)
    pub fn enqueue(&mut self, order: Order) {
        let key = self.entries.insert(OrderEntry::new(order));

        match self.tail {
            Some(tail) => self.entries[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Remove and return the oldest order, or `None` when empty
    pub fn dequeue(&mut self) -> Option<Order> {
        let head = self.head?;
        let entry = self.entries.remove(head);

        self.head = entry.next;
        if self.head.is_none() {
            self.tail = None;
        }
        Some(entry.order)
    }

    /// Oldest order without removing it
    pub fn peek(&self) -> Option<&Order> {
        self.head.map(|key| &self.entries[key].order)
    }

    /// Iterate front to back
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            slab: &self.entries,
            cursor: self.head,
        }
    }

    /// Sum of all pending totals.
    ///
    /// Fails with `PriceOverflow` when the sum leaves the Decimal range.
    pub fn total(&self) -> Result<Decimal> {
        checked_total(self.iter())
    }

    /// Snapshot the queue front to back along with the summed total
    pub fn peek_all(&self) -> Result<PendingOrders<'_>> {
        let orders: Vec<&Order> = self.iter().collect();
        let total = checked_total(orders.iter().copied())?;
        Ok(PendingOrders { orders, total })
    }

    /// Dequeue everything, oldest first
    pub fn drain(&mut self) -> Drain<'_> {
        Drain { queue: self }
    }
}

/// Sum order totals, reporting overflow instead of panicking
pub(crate) fn checked_total<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Result<Decimal> {
    orders.into_iter().try_fold(Decimal::ZERO, |acc, order| {
        acc.checked_add(order.total_price())
            .ok_or(StoreError::PriceOverflow)
    })
}

/// Draining iterator returned by [`OrderQueue::drain`].
///
/// Orders not yet pulled when the iterator is dropped stay queued.
#[derive(Debug)]
pub struct Drain<'a> {
    queue: &'a mut OrderQueue,
}

impl Iterator for Drain<'_> {
    type Item = Order;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.dequeue()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: u64, quantity: u64) -> Order {
        Order::new(id, format!("item-{}", id), Decimal::from(100), quantity).unwrap()
    }

    #[test]
    fn test_queue_new() {
        let mut queue = OrderQueue::new();

        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert!(queue.peek().is_none());
        assert!(queue.dequeue().is_none());
        assert_eq!(queue.total(), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_queue_fifo() {
        let mut queue = OrderQueue::new();
        queue.enqueue(order(1, 1));
        queue.enqueue(order(2, 1));
        queue.enqueue(order(3, 1));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue().map(|o| o.product_id()), Some(1));
        assert_eq!(queue.dequeue().map(|o| o.product_id()), Some(2));
        assert_eq!(queue.dequeue().map(|o| o.product_id()), Some(3));
        assert!(queue.dequeue().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_reuse_after_empty() {
        let mut queue = OrderQueue::new();
        queue.enqueue(order(1, 1));
        queue.dequeue();

        // Tail must have been reset, otherwise this would link to a freed slot
        queue.enqueue(order(2, 1));
        queue.enqueue(order(3, 1));

        let ids: Vec<u64> = queue.iter().map(|o| o.product_id()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_queue_interleaved() {
        let mut queue = OrderQueue::new();
        queue.enqueue(order(1, 1));
        queue.enqueue(order(2, 1));
        assert_eq!(queue.dequeue().map(|o| o.product_id()), Some(1));

        queue.enqueue(order(3, 1));
        assert_eq!(queue.peek().map(|o| o.product_id()), Some(2));

        let ids: Vec<u64> = queue.drain().map(|o| o.product_id()).collect();
        assert_eq!(ids, vec![2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_peek_all_totals() {
        let mut queue = OrderQueue::new();
        queue.enqueue(order(1, 2)); // 200
        queue.enqueue(order(2, 3)); // 300

        let pending = queue.peek_all().unwrap();
        assert_eq!(pending.orders.len(), 2);
        assert_eq!(pending.orders[0].product_id(), 1);
        assert_eq!(pending.total, Decimal::from(500));

        // Non-destructive
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.total(), Ok(Decimal::from(500)));
    }

    #[test]
    fn test_total_overflow_is_reported() {
        let mut queue = OrderQueue::new();
        let gold = |id| Order::new(id, "gold", Decimal::MAX, 1).unwrap();
        queue.enqueue(gold(1));
        queue.enqueue(gold(2));

        assert_eq!(queue.total(), Err(StoreError::PriceOverflow));
        assert_eq!(queue.peek_all().unwrap_err(), StoreError::PriceOverflow);

        // Nothing was consumed
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_partial_drain_keeps_rest() {
        let mut queue = OrderQueue::new();
        queue.enqueue(order(1, 1));
        queue.enqueue(order(2, 1));

        let first = queue.drain().next();
        assert_eq!(first.map(|o| o.product_id()), Some(1));
        assert_eq!(queue.len(), 1);
    }
}
