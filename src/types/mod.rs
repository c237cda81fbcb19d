//! Core data types for the catalog store
//!
//! ## Types
//!
//! - [`Product`]: A catalog entry; only its stock level is mutable
//! - [`Order`]: An immutable purchase snapshot
//! - [`CheckoutReceipt`]: Summary of one archived checkout batch
//!
//! ## Money
//!
//! Prices and totals are `rust_decimal::Decimal`. See [`money`] for
//! parsing, totals and cents conversion.

mod order;
mod product;
mod receipt;
pub mod money;

pub use order::Order;
pub use product::Product;
pub use receipt::CheckoutReceipt;
