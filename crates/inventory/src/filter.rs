//! Pure selection over a sequence of items. Input order is always preserved.

use chrono::{DateTime, Duration, Utc};

use crate::item::InventoryItem;

/// Which items count as "outdated" stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutdatedPolicy {
    /// Exact-match category the policy applies to.
    pub category: String,
    /// Items restocked strictly longer ago than this are outdated.
    pub max_age: Duration,
}

impl Default for OutdatedPolicy {
    fn default() -> Self {
        Self {
            category: "Peripherals".to_string(),
            max_age: Duration::days(90),
        }
    }
}

impl OutdatedPolicy {
    pub fn is_outdated(&self, item: &InventoryItem, now: DateTime<Utc>) -> bool {
        if item.category() != self.category {
            return false;
        }
        // No restock history is not evidence of staleness.
        match item.last_restock_date() {
            Some(restocked) => now - restocked > self.max_age,
            None => false,
        }
    }

    pub fn select<'a, I>(&self, items: I, now: DateTime<Utc>) -> Vec<&'a InventoryItem>
    where
        I: IntoIterator<Item = &'a InventoryItem>,
    {
        items
            .into_iter()
            .filter(|item| self.is_outdated(item, now))
            .collect()
    }
}

/// "Peripherals" restocked more than 90 days before `now`.
pub fn filter_outdated<'a, I>(items: I, now: DateTime<Utc>) -> Vec<&'a InventoryItem>
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    OutdatedPolicy::default().select(items, now)
}

/// Items whose whole name starts with `prefix`, ignoring case.
pub fn filter_by_name_prefix<'a, I>(items: I, prefix: &str) -> Vec<&'a InventoryItem>
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    items
        .into_iter()
        .filter(|item| starts_with_ignore_case(item.name(), prefix))
        .collect()
}

/// Per-character lowercase comparison. `str::to_lowercase` is avoided because
/// its result depends on context (a final capital sigma folds to `ς`).
fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    let mut name = name.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| name.next() == Some(p))
}
