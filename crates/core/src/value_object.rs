//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// derive a new value alongside it (e.g. an adjusted price next to the original
/// record) rather than mutating it in place.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
