//! Binary search tree catalog keyed by product id.
//!
//! ## Architecture
//!
//! - **Slab**: arena holding every `ProductNode`; links are slab keys
//! - **root**: slab key of the tree root, `None` when empty
//!
//! The tree is deliberately unbalanced. Inserting ids in sorted order yields
//! a linked-list shaped tree, so every walk here is iterative (explicit
//! cursor or stack) and never recurses on tree depth.
//!
//! ## Lookup Cost
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert | O(h) |
//! | Find by id | O(h) |
//! | Find by name | O(n), pre-order |
//! | Delete | O(h) |
//! | In-order iteration | O(n) total |
//!
//! `h` is the tree height: log n for random ids, n for sorted ids.
//!
//! ## Example
//!
//! ```
//! use catalog_store::catalog::CatalogIndex;
//! use rust_decimal::Decimal;
//!
//! let mut catalog = CatalogIndex::with_capacity(16);
//! catalog.insert(2, "mobile", Decimal::from(1500), 7).unwrap();
//! catalog.insert(1, "laptop", Decimal::from(2000), 5).unwrap();
//!
//! let ids: Vec<u64> = catalog.iter().map(|p| p.id()).collect();
//! assert_eq!(ids, vec![1, 2]);
//! assert_eq!(catalog.find_by_name("laptop").map(|p| p.stock()), Some(5));
//! ```

use std::cmp::Ordering;

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use slab::Slab;
use tracing::{debug, warn};

use crate::catalog::ProductNode;
use crate::error::{Result, StoreError};
use crate::types::Product;

/// Where a subtree hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Root,
    Left(usize),
    Right(usize),
}

/// Product catalog indexed by a binary search tree over product ids.
#[derive(Debug)]
pub struct CatalogIndex {
    /// Node storage
    nodes: Slab<ProductNode>,

    /// Root node key
    root: Option<usize>,
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogIndex {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
        }
    }

    /// Create an empty catalog with room for `capacity` products
    ///
    /// ```
    /// use catalog_store::catalog::CatalogIndex;
    ///
    /// let catalog = CatalogIndex::with_capacity(1_000);
    /// assert!(catalog.capacity() >= 1_000);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: None,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of products in the catalog
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Longest root-to-leaf path, counted in nodes (0 when empty)
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|k| (k, 1)).into_iter().collect();

        while let Some((key, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[key];
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }

        deepest
    }

    // ========================================================================
    // Insert
    // ========================================================================

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// * `DuplicateProductId` - a product with this id already exists; the
    ///   existing product is left untouched
    /// * `InvalidPrice` - negative unit price
    pub fn insert(
        &mut self,
        id: u64,
        name: impl Into<String>,
        unit_price: Decimal,
        stock: u64,
    ) -> Result<()> {
        let product = Product::new(id, name, unit_price, stock)?;
        self.insert_product(product)
    }

    /// Insert an already-built product
    pub fn insert_product(&mut self, product: Product) -> Result<()> {
        let id = product.id();
        let mut link = Link::Root;
        let mut cursor = self.root;

        while let Some(key) = cursor {
            let node = &self.nodes[key];
            match id.cmp(&node.id()) {
                Ordering::Less => {
                    link = Link::Left(key);
                    cursor = node.left;
                }
                Ordering::Greater => {
                    link = Link::Right(key);
                    cursor = node.right;
                }
                Ordering::Equal => {
                    warn!(product_id = id, "rejected insert of duplicate product id");
                    return Err(StoreError::DuplicateProductId(id));
                }
            }
        }

        debug!(product_id = id, name = product.name(), "product inserted");
        let key = self.nodes.insert(ProductNode::new(product));
        self.set_link(link, Some(key));
        Ok(())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Find a product by id.
    ///
    /// Descends the tree by comparing ids, so cost is O(height) rather than
    /// a full traversal.
    pub fn find_by_id(&self, id: u64) -> Option<&Product> {
        self.locate(id).map(|(_, key)| &self.nodes[key].product)
    }

    /// Mutable lookup by id. Only the stock level can be changed through it.
    pub fn find_by_id_mut(&mut self, id: u64) -> Option<&mut Product> {
        let (_, key) = self.locate(id)?;
        Some(&mut self.nodes[key].product)
    }

    /// Check if a product id exists
    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        self.locate(id).is_some()
    }

    /// Find the first product named `name` in pre-order (node, left, right).
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.locate_name(name).map(|key| &self.nodes[key].product)
    }

    /// Mutable variant of [`find_by_name`](Self::find_by_name)
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Product> {
        let key = self.locate_name(name)?;
        Some(&mut self.nodes[key].product)
    }

    // ========================================================================
    // Stock
    // ========================================================================

    /// Overwrite a product's stock level, returning the previous level.
    ///
    /// The new value replaces the old one; it is not a delta.
    pub fn adjust_stock(&mut self, id: u64, quantity: u64) -> Result<u64> {
        let product = self.find_by_id_mut(id).ok_or_else(|| {
            warn!(product_id = id, "stock adjustment for unknown product");
            StoreError::missing_id(id)
        })?;

        let previous = product.set_stock(quantity);
        debug!(product_id = id, previous, quantity, "stock adjusted");
        Ok(previous)
    }

    /// Remove `quantity` units from a product's stock
    pub fn take_stock(&mut self, id: u64, quantity: u64) -> Result<()> {
        self.find_by_id_mut(id)
            .ok_or_else(|| StoreError::missing_id(id))?
            .take_stock(quantity)
    }

    // ========================================================================
    // Delete
    // ========================================================================

    /// Delete a product by id and return it.
    ///
    /// Leaf and single-child nodes are spliced out. A node with two children
    /// takes over the fields of its in-order successor (the minimum of its
    /// right subtree), and the successor node is removed instead.
    ///
    /// # Errors
    ///
    /// `ProductNotFound` if no product has this id.
    pub fn delete(&mut self, id: u64) -> Result<Product> {
        let Some((link, key)) = self.locate(id) else {
            warn!(product_id = id, "delete of unknown product");
            return Err(StoreError::missing_id(id));
        };

        let node = &self.nodes[key];
        let removed = match (node.has_two_children(), node.right) {
            (true, Some(right)) => {
                let mut successor_link = Link::Right(key);
                let mut successor = right;
                while let Some(next) = self.nodes[successor].left {
                    successor_link = Link::Left(successor);
                    successor = next;
                }

                // The successor has no left child, so its right child takes its place
                let successor_node = self.nodes.remove(successor);
                self.set_link(successor_link, successor_node.right);
                std::mem::replace(&mut self.nodes[key].product, successor_node.product)
            }
            _ => {
                let child = self.nodes[key].single_child();
                let node = self.nodes.remove(key);
                self.set_link(link, child);
                node.product
            }
        };

        debug!(product_id = id, remaining = self.nodes.len(), "product deleted");
        Ok(removed)
    }

    /// Remove every product
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Iterate products in ascending id order.
    ///
    /// The iterator is lazy and borrows the catalog; call again to restart.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder {
            nodes: &self.nodes,
            stack: Vec::new(),
            cursor: self.root,
        }
    }

    /// Alias of [`iter`](Self::iter)
    #[inline]
    pub fn traverse_in_order(&self) -> InOrder<'_> {
        self.iter()
    }

    /// SHA-256 over all products in id order.
    ///
    /// Equal catalogs (same products, same stock) have equal roots
    /// regardless of tree shape.
    pub fn state_root(&self) -> [u8; 32] {
        let mut buf = Vec::with_capacity(self.nodes.len() * 64);
        for product in self.iter() {
            product.encode(&mut buf);
        }

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&Sha256::digest(&buf));
        hash
    }

    /// State root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root())
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn locate(&self, id: u64) -> Option<(Link, usize)> {
        let mut link = Link::Root;
        let mut cursor = self.root;

        while let Some(key) = cursor {
            let node = &self.nodes[key];
            match id.cmp(&node.id()) {
                Ordering::Less => {
                    link = Link::Left(key);
                    cursor = node.left;
                }
                Ordering::Greater => {
                    link = Link::Right(key);
                    cursor = node.right;
                }
                Ordering::Equal => return Some((link, key)),
            }
        }

        None
    }

    fn locate_name(&self, name: &str) -> Option<usize> {
        let mut stack: Vec<usize> = self.root.into_iter().collect();

        while let Some(key) = stack.pop() {
            let node = &self.nodes[key];
            if node.product.name() == name {
                return Some(key);
            }
            // Right first so the left subtree is visited first
            if let Some(right) = node.right {
                stack.push(right);
            }
            if let Some(left) = node.left {
                stack.push(left);
            }
        }

        None
    }

    fn set_link(&mut self, link: Link, child: Option<usize>) {
        match link {
            Link::Root => self.root = child,
            Link::Left(parent) => self.nodes[parent].left = child,
            Link::Right(parent) => self.nodes[parent].right = child,
        }
    }
}

/// In-order iterator over a [`CatalogIndex`].
#[derive(Debug, Clone)]
pub struct InOrder<'a> {
    nodes: &'a Slab<ProductNode>,
    stack: Vec<usize>,
    cursor: Option<usize>,
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Product;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(key) = self.cursor {
            self.stack.push(key);
            self.cursor = self.nodes[key].left;
        }

        let key = self.stack.pop()?;
        let node = &self.nodes[key];
        self.cursor = node.right;
        Some(&node.product)
    }
}

impl<'a> IntoIterator for &'a CatalogIndex {
    type Item = &'a Product;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
