//! Report assembly: filters, one discount lookup, price derivation.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use stockwatch_inventory::{
    DiscountSource, FixtureSource, Inventory, InventoryItem, InventorySource, JsonFileSource,
    PricedItem, SimulatedDiscountService, apply_discount, filter_by_name_prefix, filter_outdated,
    total_quantity,
};
use stockwatch_resilience::{Pipeline, PipelineConfig, PolicyError, ResilienceError, Source};

use crate::config::CliConfig;

/// Multiplier used when the discount service cannot be trusted: no discount.
pub const NEUTRAL_DISCOUNT: Decimal = Decimal::ONE;

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryReport {
    pub total_quantity: u64,
    pub outdated: Vec<InventoryItem>,
    pub prefix: String,
    pub discounted: Vec<PricedItem>,
    pub discount_factor: Decimal,
    pub discount_source: Source,
    pub discount_attempts: u32,
}

/// Pipeline guarding the discount lookup, falling back to [`NEUTRAL_DISCOUNT`].
pub fn discount_pipeline(config: &CliConfig) -> Result<Pipeline<Decimal>, ResilienceError> {
    let pipeline_config = PipelineConfig::new(NEUTRAL_DISCOUNT)
        .with_timeout(config.timeout)
        .with_max_retries(config.max_retries)
        .on_retry(|attempt, cause| {
            warn!(attempt, "{}", retry_notice(attempt, cause));
        })
        .on_fallback(|cause| {
            warn!(cause = %cause, "{}", fallback_notice());
        });
    Pipeline::new(pipeline_config)
}

fn retry_notice(attempt: u32, cause: &PolicyError) -> String {
    format!("Retry {attempt} due to: {cause}")
}

fn fallback_notice() -> String {
    format!("Fallback activated: returning default discount {NEUTRAL_DISCOUNT}")
}

/// Build the report for `inventory` as of `now`.
///
/// The discount service is queried exactly once, through `pipeline`.
pub fn build_report(
    inventory: &Inventory,
    now: DateTime<Utc>,
    prefix: &str,
    pipeline: &Pipeline<Decimal>,
    discounts: Arc<dyn DiscountSource>,
) -> InventoryReport {
    let items = inventory.items();

    let outdated = filter_outdated(items, now).into_iter().cloned().collect();
    let candidates = filter_by_name_prefix(items, prefix);

    let execution = pipeline.execute_with_report(move || discounts.discount_factor());
    info!(
        factor = %execution.value,
        attempts = execution.attempts,
        source = ?execution.source,
        "discount factor resolved"
    );

    InventoryReport {
        total_quantity: total_quantity(items),
        outdated,
        prefix: prefix.to_string(),
        discounted: apply_discount(candidates, execution.value),
        discount_factor: execution.value,
        discount_source: execution.source,
        discount_attempts: execution.attempts,
    }
}

/// Load, compute and render one report to `out`.
pub fn run(config: &CliConfig, now: DateTime<Utc>, out: &mut impl Write) -> anyhow::Result<()> {
    let source: Box<dyn InventorySource> = match &config.inventory_file {
        Some(path) => Box::new(JsonFileSource::new(path.clone())),
        None => Box::new(FixtureSource::new(now)),
    };
    let inventory = source.load().context("failed to load inventory")?;
    info!(items = inventory.len(), "inventory loaded");

    let pipeline = discount_pipeline(config).context("invalid discount pipeline settings")?;
    let service = SimulatedDiscountService::default().with_latency(config.service_latency);

    let report = build_report(&inventory, now, &config.prefix, &pipeline, Arc::new(service));
    crate::render::render(&report, out).context("failed to write report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn notices_name_attempt_and_cause() {
        let cause = PolicyError::TimedOut {
            after: Duration::from_millis(100),
        };
        assert_eq!(
            retry_notice(2, &cause),
            "Retry 2 due to: attempt timed out after 100ms"
        );
        assert_eq!(
            fallback_notice(),
            "Fallback activated: returning default discount 1"
        );
    }

    #[test]
    fn discount_pipeline_carries_observers() {
        let pipeline = discount_pipeline(&CliConfig::default()).unwrap();
        assert!(pipeline.config().retry_observer.is_some());
        assert!(pipeline.config().fallback_observer.is_some());
        assert_eq!(pipeline.config().fallback, NEUTRAL_DISCOUNT);
    }
}
