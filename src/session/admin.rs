//! Admin role: PIN check and ownership of the checkout history.

use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::orders::{CheckoutHistory, Entries};

/// PIN used when no configuration overrides it
pub const DEFAULT_PIN: u32 = 1234;

/// Store administrator.
///
/// Owns the process-wide [`CheckoutHistory`]; user checkouts write into it
/// through [`history_mut`](Admin::history_mut).
#[derive(Debug, Clone)]
pub struct Admin {
    pin: u32,
    history: CheckoutHistory,
}

impl Default for Admin {
    fn default() -> Self {
        Self::new(DEFAULT_PIN)
    }
}

impl Admin {
    pub fn new(pin: u32) -> Self {
        Self {
            pin,
            history: CheckoutHistory::new(),
        }
    }

    /// Compare a candidate PIN
    pub fn validate_pin(&self, candidate: u32) -> bool {
        candidate == self.pin
    }

    /// Like [`validate_pin`](Self::validate_pin) but reports `InvalidPin`
    pub fn authenticate(&self, candidate: u32) -> Result<()> {
        if self.validate_pin(candidate) {
            Ok(())
        } else {
            warn!("admin authentication failed");
            Err(StoreError::InvalidPin)
        }
    }

    pub fn set_pin(&mut self, pin: u32) {
        self.pin = pin;
        info!("admin pin changed");
    }

    #[inline]
    pub fn history(&self) -> &CheckoutHistory {
        &self.history
    }

    #[inline]
    pub fn history_mut(&mut self) -> &mut CheckoutHistory {
        &mut self.history
    }

    /// Archived orders, most recent first
    pub fn view_history(&self) -> Entries<'_> {
        self.history.iter()
    }
}
