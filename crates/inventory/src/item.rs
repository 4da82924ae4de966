use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockwatch_core::{DomainError, DomainResult, ItemId, ValueObject};

/// Input for [`InventoryItem::new`]; also the on-disk shape of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    pub quantity: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub last_restock_date: Option<DateTime<Utc>>,
}

/// A single stock line.
///
/// Immutable once built: price and restock date are independently optional,
/// and derived values (e.g. a discounted price) are produced alongside the
/// record rather than written into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewItem")]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    price: Option<Decimal>,
    quantity: u32,
    category: String,
    last_restock_date: Option<DateTime<Utc>>,
}

impl ValueObject for InventoryItem {}

impl InventoryItem {
    pub fn new(input: NewItem) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "item {}: name cannot be empty",
                input.id
            )));
        }
        if let Some(price) = input.price {
            if price < Decimal::ZERO {
                return Err(DomainError::validation(format!(
                    "item {}: price cannot be negative",
                    input.id
                )));
            }
        }

        Ok(Self {
            id: input.id,
            name: input.name,
            price: input.price,
            quantity: input.quantity,
            category: input.category,
            last_restock_date: input.last_restock_date,
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` means the price is unknown.
    pub fn price(&self) -> Option<Decimal> {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// `None` means never restocked, or unknown.
    pub fn last_restock_date(&self) -> Option<DateTime<Utc>> {
        self.last_restock_date
    }
}

impl TryFrom<NewItem> for InventoryItem {
    type Error = DomainError;

    fn try_from(value: NewItem) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A batch of items with unique ids, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new(items: Vec<InventoryItem>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(DomainError::conflict(format!(
                    "duplicate item id {}",
                    item.id()
                )));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
