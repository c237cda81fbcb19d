//! Store configuration loaded from YAML.
//!
//! ```yaml
//! log_level: info
//! admin_pin: 1234
//! catalog_capacity: 1024
//! seed_products:
//!   - { id: 1, name: laptop, price: "2000", stock: 5 }
//! ```
//!
//! Every field is optional; missing fields take the defaults below.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CatalogIndex;
use crate::error::StoreError;
use crate::session::{Admin, DEFAULT_PIN};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Upper bound on `catalog_capacity`; the catalog still grows past it on demand
pub const MAX_CATALOG_CAPACITY: usize = 1 << 16;

/// A product created when the catalog is built.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SeedProduct {
    pub id: u64,
    pub name: String,
    pub price: Decimal,
    pub stock: u64,
}

impl SeedProduct {
    pub fn new(id: u64, name: impl Into<String>, price: Decimal, stock: u64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// `tracing` filter directive, e.g. `info` or `catalog_store=debug`
    pub log_level: String,

    /// Initial admin PIN
    pub admin_pin: u32,

    /// Slab slots pre-allocated for the catalog
    pub catalog_capacity: usize,

    /// Products inserted at startup, in this order
    pub seed_products: Vec<SeedProduct>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            admin_pin: DEFAULT_PIN,
            catalog_capacity: 1024,
            seed_products: vec![
                SeedProduct::new(1, "laptop", Decimal::from(2000), 5),
                SeedProduct::new(2, "mobile", Decimal::from(1500), 7),
                SeedProduct::new(3, "headphone", Decimal::from(500), 3),
            ],
        }
    }
}

impl StoreConfig {
    /// Read and parse a YAML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be honoured
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog_capacity > MAX_CATALOG_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "catalog_capacity {} exceeds maximum {}",
                self.catalog_capacity, MAX_CATALOG_CAPACITY
            )));
        }
        Ok(())
    }

    /// Build a catalog holding the seed products.
    ///
    /// Fails on the first seed that collides with an earlier id or carries
    /// a negative price. Pre-allocation is capped at `MAX_CATALOG_CAPACITY`.
    pub fn build_catalog(&self) -> Result<CatalogIndex, StoreError> {
        let capacity = self.catalog_capacity.min(MAX_CATALOG_CAPACITY);
        let mut catalog = CatalogIndex::with_capacity(capacity);
        for seed in &self.seed_products {
            catalog.insert(seed.id, seed.name.clone(), seed.price, seed.stock)?;
        }
        Ok(catalog)
    }

    pub fn build_admin(&self) -> Admin {
        Admin::new(self.admin_pin)
    }
}
