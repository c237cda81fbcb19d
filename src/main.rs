//! Catalog Store - demo binary
//!
//! Seeds a catalog from configuration, places a couple of orders for one
//! user, checks out, and prints the resulting state.
//!
//! Usage: `catalog-store [config/store.yaml]`

use std::process::ExitCode;

use catalog_store::logging::init_logging;
use catalog_store::types::money::format_price;
use catalog_store::{StoreConfig, UserSession};
use tracing::{error, info};

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match StoreConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => StoreConfig::default(),
    };
    init_logging(&config);

    let mut catalog = match config.build_catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "failed to seed catalog");
            return ExitCode::FAILURE;
        }
    };
    let mut admin = config.build_admin();
    info!(products = catalog.len(), "catalog seeded");

    println!("===========================================");
    println!("  Catalog Store");
    println!("===========================================");
    println!();
    println!("Products in store:");
    for product in catalog.iter() {
        println!("  {}", product);
    }
    println!();

    let mut user = UserSession::new("demo");
    for (name, quantity) in [("laptop", 2), ("headphone", 5), ("tablet", 1), ("mobile", 1)] {
        match user.place_order(&mut catalog, name, quantity) {
            Ok(()) => println!("Order placed: {}, Quantity: {}", name, quantity),
            Err(e) => println!("Order for {} x{} rejected: {}", name, quantity, e),
        }
    }

    match user.pending_orders() {
        Ok(pending) => {
            println!();
            println!("Your Orders:");
            for order in &pending.orders {
                println!("  {}", order);
            }
            println!("Total Price of all Orders: ${}", format_price(pending.total));
        }
        Err(e) => println!("Pending orders unavailable: {}", e),
    }

    let checkout = match user.checkout(admin.history_mut()) {
        Ok(checkout) => checkout,
        Err(e) => {
            error!(error = %e, "checkout failed");
            return ExitCode::FAILURE;
        }
    };
    println!();
    println!(
        "Checkout for {}: batch {} archived {} orders for ${}, root {}",
        user.name(),
        checkout.receipt.batch_id,
        checkout.receipt.orders_archived,
        format_price(checkout.total),
        checkout.receipt.state_root_hex()
    );

    println!();
    println!("Checkout History:");
    for order in admin.view_history() {
        println!("  {}", order);
    }

    println!();
    println!("Catalog state root: {}", catalog.state_root_hex());
    ExitCode::SUCCESS
}
