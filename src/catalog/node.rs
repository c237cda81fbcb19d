//! Tree node for slab-based storage.
//!
//! ## Design
//!
//! `ProductNode` wraps a `Product` with left/right child links. Links are
//! slab keys (`usize`), not references, so the tree owns no raw pointers
//! and nodes are freed by removing them from the slab.
//!
//! ## Slab Integration
//!
//! Per official slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//! - O(1) insert, remove, and lookup

use crate::types::Product;

/// Binary search tree node stored in the slab.
///
/// ```text
///            [id 5]
///           /      \
///      [id 2]      [id 9]
/// ```
///
/// Every id reachable through `left` is smaller than `product.id()`,
/// every id reachable through `right` is larger.
#[derive(Debug, Clone)]
pub struct ProductNode {
    /// The product data
    pub product: Product,

    /// Left child (smaller ids), slab key
    pub left: Option<usize>,

    /// Right child (larger ids), slab key
    pub right: Option<usize>,
}

impl ProductNode {
    /// Create a new leaf node
    ///
    /// ```
    /// use catalog_store::catalog::ProductNode;
    /// use catalog_store::types::Product;
    /// use rust_decimal::Decimal;
    ///
    /// let product = Product::new(1, "laptop", Decimal::from(2000), 5).unwrap();
    /// let node = ProductNode::new(product);
    ///
    /// assert!(node.is_leaf());
    /// ```
    #[inline]
    pub fn new(product: Product) -> Self {
        Self {
            product,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Both children present
    #[inline]
    pub fn has_two_children(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// The only child when at most one is present; meaningless for a node
    /// with two children
    #[inline]
    pub fn single_child(&self) -> Option<usize> {
        self.left.or(self.right)
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.product.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn create_test_node(id: u64) -> ProductNode {
        ProductNode::new(Product::new(id, "item", Decimal::from(10), 1).unwrap())
    }

    #[test]
    fn test_product_node_new() {
        let node = create_test_node(4);

        assert_eq!(node.id(), 4);
        assert!(node.is_leaf());
        assert!(!node.has_two_children());
        assert!(node.single_child().is_none());
    }

    #[test]
    fn test_product_node_children() {
        let mut node = create_test_node(4);

        node.right = Some(7);
        assert!(!node.is_leaf());
        assert_eq!(node.single_child(), Some(7));

        node.left = Some(2);
        assert!(node.has_two_children());
    }
}
