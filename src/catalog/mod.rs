//! Catalog module: the product index.
//!
//! ## Components
//!
//! - [`ProductNode`]: a `Product` plus left/right child links (slab keys)
//! - [`CatalogIndex`]: unbalanced binary search tree keyed by product id
//!
//! The catalog is the single source of truth for stock. Placing an order
//! decrements stock here; orders themselves only carry a snapshot.

pub mod index;
pub mod node;

pub use index::{CatalogIndex, InOrder};
pub use node::ProductNode;
