use std::io::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use stockwatch_cli::{CliConfig, build_report, discount_pipeline, run};
use stockwatch_inventory::{
    DiscountError, DiscountSource, FixtureSource, InventorySource, SimulatedDiscountService,
};
use stockwatch_resilience::Source;

fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Always fails, counting calls.
#[derive(Default)]
struct BrokenService {
    calls: AtomicU32,
}

impl DiscountSource for BrokenService {
    fn discount_factor(&self) -> Result<Decimal, DiscountError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DiscountError::Unavailable("connection refused".to_string()))
    }
}

fn names<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    items.into_iter().collect()
}

#[test]
fn fixture_report_uses_service_discount() {
    let inventory = FixtureSource::new(test_now()).load().unwrap();
    let config = CliConfig {
        timeout: Duration::from_secs(2),
        ..CliConfig::default()
    };
    let pipeline = discount_pipeline(&config).unwrap();
    let service = SimulatedDiscountService::default().with_latency(Duration::from_millis(5));

    let report = build_report(&inventory, test_now(), "A", &pipeline, Arc::new(service));

    assert_eq!(report.total_quantity, 590);
    assert_eq!(
        names(report.outdated.iter().map(|i| i.name())),
        vec!["Wireless Mouse", "Gaming Headset"]
    );
    assert_eq!(report.discount_source, Source::Operation);
    assert_eq!(report.discount_factor, Decimal::new(95, 2));
    assert_eq!(report.discount_attempts, 1);

    let discounted: Vec<(&str, Decimal)> = report
        .discounted
        .iter()
        .map(|p| (p.item.name(), p.adjusted_price))
        .collect();
    assert_eq!(
        discounted,
        vec![
            ("Adjustable Stand", Decimal::ZERO),
            ("Apple Pencil", Decimal::new(9405, 2)),
        ]
    );
}

#[test]
fn broken_service_falls_back_to_neutral_discount() {
    let inventory = FixtureSource::new(test_now()).load().unwrap();
    let pipeline = discount_pipeline(&CliConfig::default()).unwrap();
    let service = Arc::new(BrokenService::default());

    let report = build_report(&inventory, test_now(), "a", &pipeline, service.clone());

    assert_eq!(service.calls.load(Ordering::SeqCst), 4);
    assert_eq!(report.discount_source, Source::Fallback);
    assert_eq!(report.discount_factor, Decimal::ONE);
    assert_eq!(report.discounted[1].adjusted_price, Decimal::new(9900, 2));
}

#[test]
fn slow_service_times_out_and_falls_back() {
    let inventory = FixtureSource::new(test_now()).load().unwrap();
    let config = CliConfig {
        timeout: Duration::from_millis(10),
        max_retries: 1,
        ..CliConfig::default()
    };
    let pipeline = discount_pipeline(&config).unwrap();
    let service = SimulatedDiscountService::default().with_latency(Duration::from_millis(300));

    let report = build_report(&inventory, test_now(), "A", &pipeline, Arc::new(service));

    assert_eq!(report.discount_source, Source::Fallback);
    assert_eq!(report.discount_attempts, 2);
    assert_eq!(report.discount_factor, Decimal::ONE);
}

#[test]
fn run_renders_json_inventory() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": 1, "name": "Old Keyboard", "price": "20.00", "quantity": 3,
              "category": "Peripherals", "last_restock_date": "2025-01-01T00:00:00Z"}},
            {{"id": 2, "name": "Arm Rest", "price": "10.00", "quantity": 4, "category": "Ergonomics"}}
        ]"#
    )
    .unwrap();

    let config = CliConfig {
        inventory_file: Some(file.path().to_path_buf()),
        timeout: Duration::from_secs(2),
        service_latency: Duration::from_millis(1),
        ..CliConfig::default()
    };

    let mut out = Vec::new();
    run(&config, test_now(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Total Available Inventory Count: 7\n"));
    assert!(text.contains(" - Old Keyboard (Peripherals) - Last Restock: 2025-01-01\n"));
    assert!(text.contains(" - Arm Rest (ID: 2) - New Price: $9.50\n"));
}

#[test]
fn run_reports_missing_inventory_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = CliConfig {
        inventory_file: Some(dir.path().join("missing.json")),
        ..CliConfig::default()
    };

    let err = run(&config, test_now(), &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to load inventory"));
}
