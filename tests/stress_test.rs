//! Randomized stress tests for the catalog index and order lifecycle.
//!
//! These tests verify:
//! 1. The BST ordering holds after any mix of inserts and deletes
//! 2. Deleted ids become unreachable while every other id keeps its fields
//! 3. Identical operation sequences produce identical catalog state roots
//! 4. Stock is conserved across placements and checkouts
//!
//! ## Running Stress Tests
//!
//! ```bash
//! cargo test --release --test stress_test -- --nocapture
//! ```

use std::collections::BTreeMap;
use std::time::Instant;

use catalog_store::{CatalogIndex, CheckoutHistory, StoreError, UserSession};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Operations applied in the randomized insert/delete test
const OPERATION_COUNT: usize = 50_000;

/// Product ids are drawn from this range so inserts and deletes collide
const ID_SPACE: u64 = 5_000;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Expected fields for a product, tracked alongside the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
struct Expected {
    name: String,
    price: Decimal,
    stock: u64,
}

fn expected_for(rng: &mut ChaCha8Rng, id: u64) -> Expected {
    Expected {
        name: format!("product-{}-{}", id, rng.gen_range(0..1_000)),
        price: Decimal::new(rng.gen_range(1..1_000_000), 2),
        stock: rng.gen_range(0..500),
    }
}

/// Check the catalog against the reference map: same ids in ascending
/// order, same fields for each id.
fn assert_matches_reference(catalog: &CatalogIndex, reference: &BTreeMap<u64, Expected>) {
    let ids: Vec<u64> = catalog.iter().map(|p| p.id()).collect();
    let expected_ids: Vec<u64> = reference.keys().copied().collect();
    assert_eq!(ids, expected_ids, "in-order traversal diverged from reference");
    assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids not strictly ascending");

    for (&id, expected) in reference {
        let product = catalog
            .find_by_id(id)
            .unwrap_or_else(|| panic!("id {} missing", id));
        assert_eq!(product.name(), expected.name);
        assert_eq!(product.unit_price(), expected.price);
        assert_eq!(product.stock(), expected.stock);
    }
}

/// Apply a seeded mix of inserts, deletes and stock changes.
fn run_random_operations(seed: u64, count: usize) -> (CatalogIndex, BTreeMap<u64, Expected>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut catalog = CatalogIndex::with_capacity(ID_SPACE as usize);
    let mut reference: BTreeMap<u64, Expected> = BTreeMap::new();

    for _ in 0..count {
        let id = rng.gen_range(1..=ID_SPACE);
        match rng.gen_range(0..10) {
            0..=4 => {
                let expected = expected_for(&mut rng, id);
                let result = catalog.insert(id, expected.name.clone(), expected.price, expected.stock);
                if reference.contains_key(&id) {
                    assert_eq!(result, Err(StoreError::DuplicateProductId(id)));
                } else {
                    assert_eq!(result, Ok(()));
                    reference.insert(id, expected);
                }
            }
            5..=7 => {
                let result = catalog.delete(id);
                match reference.remove(&id) {
                    Some(expected) => {
                        let removed = result.expect("delete of present id failed");
                        assert_eq!(removed.id(), id);
                        assert_eq!(removed.name(), expected.name);
                        assert!(catalog.find_by_id(id).is_none());
                    }
                    None => assert_eq!(result.unwrap_err(), StoreError::missing_id(id)),
                }
            }
            _ => {
                let stock = rng.gen_range(0..1_000);
                let result = catalog.adjust_stock(id, stock);
                match reference.get_mut(&id) {
                    Some(expected) => {
                        assert_eq!(result, Ok(expected.stock));
                        expected.stock = stock;
                    }
                    None => assert_eq!(result.unwrap_err(), StoreError::missing_id(id)),
                }
            }
        }
    }

    (catalog, reference)
}

// ============================================================================
// STRESS TESTS
// ============================================================================

#[test]
fn stress_random_insert_delete() {
    println!("\n=== STRESS TEST: {} random catalog operations ===\n", OPERATION_COUNT);

    let start = Instant::now();
    let (catalog, reference) = run_random_operations(42, OPERATION_COUNT);
    let elapsed = start.elapsed();

    println!("  Final catalog size: {:>10}", catalog.len());
    println!("  Tree height:        {:>10}", catalog.height());
    println!("  Elapsed time:       {:>10.2?}", elapsed);

    assert_eq!(catalog.len(), reference.len());
    assert_matches_reference(&catalog, &reference);
}

#[test]
fn stress_invariant_checked_every_step() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut catalog = CatalogIndex::new();
    let mut reference: BTreeMap<u64, Expected> = BTreeMap::new();

    for _ in 0..2_000 {
        let id = rng.gen_range(1..=200);
        if rng.gen_bool(0.6) {
            let expected = expected_for(&mut rng, id);
            if catalog
                .insert(id, expected.name.clone(), expected.price, expected.stock)
                .is_ok()
            {
                reference.insert(id, expected);
            }
        } else if catalog.delete(id).is_ok() {
            reference.remove(&id);
        }

        assert_matches_reference(&catalog, &reference);
    }
}

#[test]
fn stress_sorted_inserts_then_drain() {
    const COUNT: u64 = 5_000;

    let mut catalog = CatalogIndex::with_capacity(COUNT as usize);
    for id in 1..=COUNT {
        catalog.insert(id, format!("p{}", id), Decimal::ONE, 1).unwrap();
    }
    assert_eq!(catalog.height(), COUNT as usize);

    // Deleting from the degenerate end must not recurse through the chain
    for id in (1..=COUNT).rev() {
        catalog.delete(id).unwrap();
    }
    assert!(catalog.is_empty());
}

/// Same seed, same state root; different seed, different root.
#[test]
fn verify_determinism() {
    const SEED: u64 = 12345;
    const COUNT: usize = 10_000;

    let (first, _) = run_random_operations(SEED, COUNT);
    let (second, _) = run_random_operations(SEED, COUNT);
    let (other, _) = run_random_operations(SEED + 1, COUNT);

    println!("  Run 1 state root: {}", first.state_root_hex());
    println!("  Run 2 state root: {}", second.state_root_hex());
    println!("  Different seed:   {}", other.state_root_hex());

    assert_eq!(first.state_root(), second.state_root(), "State roots must match");
    assert_ne!(first.state_root(), other.state_root());
}

/// Every unit of stock ends up either on the shelf or in the history.
#[test]
fn stress_stock_conservation() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut catalog = CatalogIndex::new();
    let mut history = CheckoutHistory::new();

    let mut initial_units: u64 = 0;
    for id in 1..=50u64 {
        let stock = rng.gen_range(0..40);
        initial_units += stock;
        catalog
            .insert(id, format!("item-{}", id), Decimal::new(rng.gen_range(100..10_000), 2), stock)
            .unwrap();
    }

    for session in 0..20 {
        let mut user = UserSession::new(format!("user-{}", session));
        for _ in 0..rng.gen_range(1..15) {
            let id = rng.gen_range(1..=50u64);
            let name = format!("item-{}", id);
            let before = catalog.find_by_id(id).map(|p| p.stock()).unwrap_or(0);
            let quantity = rng.gen_range(1..10);

            match user.place_order(&mut catalog, &name, quantity) {
                Ok(()) => {
                    assert_eq!(catalog.find_by_id(id).unwrap().stock(), before - quantity);
                }
                Err(StoreError::InsufficientStock { requested, available }) => {
                    assert_eq!(requested, quantity);
                    assert_eq!(available, before);
                    assert_eq!(catalog.find_by_id(id).unwrap().stock(), before);
                }
                Err(other) => panic!("unexpected error: {}", other),
            }
        }
        user.checkout(&mut history).unwrap();
        assert!(user.queue().is_empty());
    }

    let shelf: u64 = catalog.iter().map(|p| p.stock()).sum();
    let sold: u64 = history.iter().map(|o| o.quantity()).sum();
    assert_eq!(shelf + sold, initial_units);
    assert_eq!(history.batch_count(), 20);
}
