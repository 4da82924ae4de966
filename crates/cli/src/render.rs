//! Plain-text report rendering.

use std::io::{self, Write};

use stockwatch_resilience::Source;

use crate::report::InventoryReport;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn render(report: &InventoryReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "--- Inventory Processing Started ---")?;

    writeln!(out)?;
    writeln!(out, "Total Available Inventory Count: {}", report.total_quantity)?;

    writeln!(out)?;
    writeln!(
        out,
        "Outdated items (Category 'Peripherals', not restocked in 90 days): {}",
        report.outdated.len()
    )?;
    for item in &report.outdated {
        let restocked = item
            .last_restock_date()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        writeln!(
            out,
            " - {} ({}) - Last Restock: {}",
            item.name(),
            item.category(),
            restocked
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Items starting with '{}' (after discount calculation):",
        report.prefix
    )?;
    if report.discount_source == Source::Fallback {
        writeln!(
            out,
            " (discount service unavailable after {} attempts; default factor {} applied)",
            report.discount_attempts, report.discount_factor
        )?;
    }
    for priced in &report.discounted {
        let note = if priced.item.price().is_none() {
            " (Original price was NULL)"
        } else {
            ""
        };
        writeln!(
            out,
            " - {} (ID: {}) - New Price: ${:.2}{}",
            priced.item.name(),
            priced.item.id(),
            priced.adjusted_price.round_dp(2),
            note
        )?;
    }

    writeln!(out)?;
    writeln!(out, "--- Inventory Processing Complete ---")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use stockwatch_core::ItemId;
    use stockwatch_inventory::{InventoryItem, NewItem, PricedItem};

    fn item(id: i32, name: &str, price: Option<Decimal>) -> InventoryItem {
        InventoryItem::new(NewItem {
            id: ItemId::new(id),
            name: name.to_string(),
            price,
            quantity: 1,
            category: "Peripherals".to_string(),
            last_restock_date: Some(Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()),
        })
        .unwrap()
    }

    fn report(source: Source) -> InventoryReport {
        InventoryReport {
            total_quantity: 630,
            outdated: vec![item(102, "Wireless Mouse", None)],
            prefix: "A".to_string(),
            discounted: vec![
                PricedItem {
                    item: item(104, "Adjustable Stand", None),
                    adjusted_price: Decimal::ZERO,
                },
                PricedItem {
                    item: item(106, "Apple Pencil", Some(Decimal::new(9900, 2))),
                    adjusted_price: Decimal::new(940500, 4),
                },
            ],
            discount_factor: Decimal::new(95, 2),
            discount_source: source,
            discount_attempts: 1,
        }
    }

    fn rendered(report: &InventoryReport) -> String {
        let mut buf = Vec::new();
        render(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_all_sections() {
        let text = rendered(&report(Source::Operation));

        assert!(text.starts_with("--- Inventory Processing Started ---\n"));
        assert!(text.contains("Total Available Inventory Count: 630\n"));
        assert!(text.contains("not restocked in 90 days): 1\n"));
        assert!(text.contains(" - Wireless Mouse (Peripherals) - Last Restock: 2025-01-15\n"));
        assert!(text.contains(" - Adjustable Stand (ID: 104) - New Price: $0.00 (Original price was NULL)\n"));
        assert!(text.contains(" - Apple Pencil (ID: 106) - New Price: $94.05\n"));
        assert!(text.ends_with("--- Inventory Processing Complete ---\n"));
        assert!(!text.contains("unavailable"));
    }

    #[test]
    fn mentions_fallback() {
        let mut report = report(Source::Fallback);
        report.discount_factor = Decimal::ONE;
        report.discount_attempts = 4;

        let text = rendered(&report);
        assert!(text.contains("unavailable after 4 attempts; default factor 1 applied"));
    }
}
