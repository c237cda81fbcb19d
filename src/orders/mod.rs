//! Order lifecycle containers.
//!
//! ## Components
//!
//! - [`OrderQueue`]: per-user FIFO of pending orders
//! - [`CheckoutHistory`]: shared, append-only archive (most recent first)
//!
//! Both are singly linked lists over a slab. An `Order` is owned by exactly
//! one of them at a time: checkout dequeues it from the queue and moves it
//! into the history.

pub mod history;
pub mod node;
pub mod queue;

pub use history::CheckoutHistory;
pub use node::{Entries, OrderEntry};
pub use queue::{Drain, OrderQueue, PendingOrders};
