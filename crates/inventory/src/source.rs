//! Where inventory batches come from.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use stockwatch_core::{DomainError, ItemId};

use crate::item::{Inventory, InventoryItem, NewItem};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Supplies a batch of items to the report.
pub trait InventorySource {
    fn load(&self) -> Result<Inventory, SourceError>;
}

/// Built-in demo batch. Restock dates are relative to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureSource {
    now: DateTime<Utc>,
}

impl FixtureSource {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    fn entry(
        &self,
        id: i32,
        name: &str,
        price: Option<Decimal>,
        quantity: u32,
        category: &str,
        days_ago: Option<i64>,
    ) -> NewItem {
        NewItem {
            id: ItemId::new(id),
            name: name.to_string(),
            price,
            quantity,
            category: category.to_string(),
            last_restock_date: days_ago.map(|d| self.now - Duration::days(d)),
        }
    }
}

impl InventorySource for FixtureSource {
    fn load(&self) -> Result<Inventory, SourceError> {
        let entries = [
            self.entry(101, "Laptop Adapter", Some(Decimal::new(4999, 2)), 50, "Accessories", Some(10)),
            self.entry(102, "Wireless Mouse", Some(Decimal::new(1999, 2)), 120, "Peripherals", Some(150)),
            self.entry(103, "USB-C Hub", Some(Decimal::new(7500, 2)), 30, "Accessories", Some(50)),
            self.entry(104, "Adjustable Stand", None, 80, "Ergonomics", None),
            self.entry(105, "Monitor Cable", Some(Decimal::new(999, 2)), 200, "Peripherals", Some(30)),
            self.entry(106, "Apple Pencil", Some(Decimal::new(9900, 2)), 40, "Accessories", Some(100)),
            self.entry(107, "Gaming Headset", Some(Decimal::new(15000, 2)), 60, "Peripherals", Some(200)),
            self.entry(108, "Projector", Some(Decimal::new(45000, 2)), 10, "Displays", Some(5)),
        ];

        let items = entries
            .into_iter()
            .map(InventoryItem::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Inventory::new(items)?)
    }
}

/// Reads a JSON array of items from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InventorySource for JsonFileSource {
    fn load(&self) -> Result<Inventory, SourceError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let items: Vec<InventoryItem> =
            serde_json::from_str(&raw).map_err(|source| SourceError::Parse {
                path: self.path.clone(),
                source,
            })?;

        info!(path = %self.path.display(), items = items.len(), "loaded inventory file");
        Ok(Inventory::new(items)?)
    }
}
