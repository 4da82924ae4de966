//! Inventory domain module.
//!
//! Records, filters and price derivation, implemented purely as deterministic
//! domain logic. The only IO lives behind [`source::InventorySource`] and
//! [`pricing::DiscountSource`].

pub mod filter;
pub mod item;
pub mod pricing;
pub mod source;

pub use filter::{OutdatedPolicy, filter_by_name_prefix, filter_outdated};
pub use item::{Inventory, InventoryItem, NewItem};
pub use pricing::{
    DiscountError, DiscountSource, PricedItem, SimulatedDiscountService, apply_discount,
    total_quantity,
};
pub use source::{FixtureSource, InventorySource, JsonFileSource, SourceError};
