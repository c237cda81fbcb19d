//! Sessions that drive the catalog and order containers.
//!
//! Sessions are plain values passed by the caller; there is no global
//! state. A [`UserSession`] owns its pending queue, the [`Admin`] owns the
//! shared checkout history.
//!
//! ## Example
//!
//! ```
//! use catalog_store::catalog::CatalogIndex;
//! use catalog_store::session::{Admin, UserSession};
//! use rust_decimal::Decimal;
//!
//! let mut catalog = CatalogIndex::new();
//! catalog.insert(1, "laptop", Decimal::from(2000), 5).unwrap();
//!
//! let mut admin = Admin::default();
//! let mut user = UserSession::new("alice");
//!
//! user.place_order(&mut catalog, "laptop", 2).unwrap();
//! let checkout = user.checkout(admin.history_mut()).unwrap();
//!
//! assert_eq!(checkout.total, Decimal::from(4000));
//! assert_eq!(checkout.receipt.total_cents, 400_000);
//! assert_eq!(catalog.find_by_id(1).unwrap().stock(), 3);
//! ```

pub mod admin;
pub mod user;

pub use admin::{Admin, DEFAULT_PIN};
pub use user::{Checkout, SessionState, UserSession};
