//! Discount lookup and price derivation.

use std::thread;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::item::InventoryItem;

/// An item paired with its discounted price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedItem {
    pub item: InventoryItem,
    pub adjusted_price: Decimal,
}

/// Apply `factor` to each item's price.
///
/// An item without a price has no sellable value: its adjusted price is zero
/// whatever the factor. A product beyond the representable range saturates at
/// `Decimal::MAX` (or `Decimal::MIN` for a negative factor).
pub fn apply_discount<'a, I>(items: I, factor: Decimal) -> Vec<PricedItem>
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    items
        .into_iter()
        .map(|item| PricedItem {
            adjusted_price: item
                .price()
                .map(|p| p.saturating_mul(factor))
                .unwrap_or(Decimal::ZERO),
            item: item.clone(),
        })
        .collect()
}

/// Sum of quantities, widened so large batches cannot overflow.
pub fn total_quantity<'a, I>(items: I) -> u64
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    items.into_iter().map(|item| u64::from(item.quantity())).sum()
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscountError {
    #[error("discount service unavailable: {0}")]
    Unavailable(String),
}

/// Provider of the current discount multiplier (e.g. `0.95` for 5% off).
///
/// Implementations may block and may fail; callers are expected to wrap them
/// in a resilience pipeline.
pub trait DiscountSource: Send + Sync {
    fn discount_factor(&self) -> Result<Decimal, DiscountError>;
}

/// Stand-in for a remote pricing service: sleeps, then answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedDiscountService {
    pub latency: Duration,
    pub factor: Decimal,
}

impl Default for SimulatedDiscountService {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(50),
            factor: Decimal::new(95, 2),
        }
    }
}

impl SimulatedDiscountService {
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl DiscountSource for SimulatedDiscountService {
    fn discount_factor(&self) -> Result<Decimal, DiscountError> {
        debug!(latency = ?self.latency, "querying discount service");
        thread::sleep(self.latency);
        Ok(self.factor)
    }
}
