//! `stockwatch-core` — shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no clocks, no threads).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::ItemId;
pub use value_object::ValueObject;
