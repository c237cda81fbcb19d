//! # Catalog Store
//!
//! In-memory product catalog and ordering kernel.
//!
//! ## Architecture
//!
//! - **Types**: Product, Order snapshots, checkout receipts, money helpers
//! - **Catalog**: binary search tree over a slab arena, keyed by product id
//! - **Orders**: per-user FIFO queue and shared append-only checkout history
//! - **Session**: user placement/checkout and the admin role
//!
//! ## Data Flow
//!
//! Placing an order looks the product up by name, snapshots it into an
//! `Order`, decrements its stock and queues the order for that user.
//! Checkout drains the queue oldest-first into the admin-owned history.
//!
//! ## Design Principles
//!
//! 1. **No floating point**: prices and totals are `rust_decimal::Decimal`
//! 2. **Arena storage**: tree and list nodes live in slabs, linked by keys
//! 3. **Reported errors**: every failure is a `StoreError`, nothing panics
//! 4. **Single-threaded**: every operation runs to completion, no locking

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Product, Order, CheckoutReceipt
pub mod types;

/// Catalog: BST product index
pub mod catalog;

/// Order queue and checkout history
pub mod orders;

/// User and admin sessions
pub mod session;

pub mod config;
pub mod error;
pub mod logging;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use catalog::CatalogIndex;
pub use config::{ConfigError, StoreConfig, MAX_CATALOG_CAPACITY};
pub use error::{ProductKey, Result, StoreError};
pub use orders::{CheckoutHistory, OrderQueue, PendingOrders};
pub use session::{Admin, Checkout, SessionState, UserSession};
pub use types::{CheckoutReceipt, Order, Product};
