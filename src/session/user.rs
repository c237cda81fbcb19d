//! User session: order placement and checkout.
//!
//! ## State Machine
//!
//! ```text
//! Idle --place_order--> HasPendingOrders --checkout--> Idle
//! ```
//!
//! A failed placement leaves both the session and the catalog unchanged.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::catalog::CatalogIndex;
use crate::error::{Result, StoreError};
use crate::orders::{CheckoutHistory, OrderQueue, PendingOrders};
use crate::types::{CheckoutReceipt, Order, Product};

/// Where a user session is in the order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No pending orders
    Idle,
    /// At least one order waiting for checkout
    HasPendingOrders,
}

/// Result of a checkout: the receipt plus the archived orders in the order
/// they were placed. The orders are borrowed from the history that now owns
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout<'h> {
    pub receipt: CheckoutReceipt,

    /// Exact sum of the archived totals; `receipt.total_cents` is this
    /// value rounded to the cent
    pub total: Decimal,

    pub orders: Vec<&'h Order>,
}

/// A shopper with a private queue of pending orders.
#[derive(Debug, Clone)]
pub struct UserSession {
    name: String,
    queue: OrderQueue,
}

impl UserSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            queue: OrderQueue::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SessionState {
        if self.queue.is_empty() {
            SessionState::Idle
        } else {
            SessionState::HasPendingOrders
        }
    }

    /// Look up a product by name
    pub fn search<'c>(&self, catalog: &'c CatalogIndex, product_name: &str) -> Result<&'c Product> {
        catalog
            .find_by_name(product_name)
            .ok_or_else(|| StoreError::missing_name(product_name))
    }

    /// Place an order for `quantity` units of the product named `product_name`.
    ///
    /// On success the product's stock drops by `quantity` and an order
    /// snapshot at the current price is queued.
    ///
    /// # Errors
    ///
    /// * `ProductNotFound` - no product with that name
    /// * `InvalidQuantity` - quantity is zero
    /// * `InsufficientStock` - stock below `quantity`
    /// * `PriceOverflow` - total does not fit in a Decimal
    pub fn place_order(
        &mut self,
        catalog: &mut CatalogIndex,
        product_name: &str,
        quantity: u64,
    ) -> Result<()> {
        let Some(product) = catalog.find_by_name_mut(product_name) else {
            warn!(user = %self.name, product = product_name, "order for unknown product");
            return Err(StoreError::missing_name(product_name));
        };

        // Build the snapshot first so a rejected order never touches stock
        let order = Order::snapshot(product, quantity)?;
        if let Err(err) = product.take_stock(quantity) {
            warn!(user = %self.name, product = product_name, quantity, error = %err, "order rejected");
            return Err(err);
        }

        info!(
            user = %self.name,
            product_id = order.product_id(),
            quantity,
            total = %order.total_price(),
            "order placed"
        );
        self.queue.enqueue(order);
        Ok(())
    }

    /// Pending orders front to back with their summed total
    pub fn pending_orders(&self) -> Result<PendingOrders<'_>> {
        self.queue.peek_all()
    }

    /// Read-only access to the pending queue
    #[inline]
    pub fn queue(&self) -> &OrderQueue {
        &self.queue
    }

    /// Move every pending order into `history`, oldest first.
    ///
    /// The queue is empty afterwards. With nothing pending this still
    /// records an empty batch.
    ///
    /// # Errors
    ///
    /// `PriceOverflow` (or `InvalidQuantity` for the unit count) if the
    /// batch does not fit a receipt. The queue and the history are both
    /// left untouched.
    pub fn checkout<'h>(&mut self, history: &'h mut CheckoutHistory) -> Result<Checkout<'h>> {
        // Validate against the queue in place so a failure leaves it intact
        if let Err(err) = CheckoutReceipt::for_batch(history.batch_count() + 1, self.queue.iter()) {
            warn!(user = %self.name, error = %err, "checkout rejected");
            return Err(err);
        }
        let total = self.queue.total()?;

        let batch: Vec<Order> = self.queue.drain().collect();
        let count = batch.len();

        let receipt = history.record_batch(batch)?;
        info!(user = %self.name, batch_id = receipt.batch_id, orders = count, "checkout complete");

        // History iterates newest first; flip back to placement order
        let history: &'h CheckoutHistory = history;
        let mut orders: Vec<&'h Order> = history.iter().take(count).collect();
        orders.reverse();

        Ok(Checkout {
            receipt,
            total,
            orders,
        })
    }
}
