//! `stockwatch-cli` — wires the data source, the discount pipeline and the
//! report renderer together.

pub mod config;
pub mod render;
pub mod report;

pub use config::{Args, CliConfig, ConfigError};
pub use render::render;
pub use report::{InventoryReport, build_report, discount_pipeline, run};
