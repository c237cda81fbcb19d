//! Singly linked list node shared by the order queue and checkout history.

use crate::types::Order;

/// Order plus a link to the next entry (slab key).
#[derive(Debug, Clone)]
pub struct OrderEntry {
    pub order: Order,

    /// Next entry, `None` at the end of the list
    pub next: Option<usize>,
}

impl OrderEntry {
    #[inline]
    pub fn new(order: Order) -> Self {
        Self { order, next: None }
    }
}

/// Iterator following `next` links through a slab of entries.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    pub(crate) slab: &'a slab::Slab<OrderEntry>,
    pub(crate) cursor: Option<usize>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = &self.slab[self.cursor?];
        self.cursor = entry.next;
        Some(&entry.order)
    }
}
