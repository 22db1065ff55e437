pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::{fleet_source_for, ReportPipeline};
pub use app::render::OutputFormat;
pub use config::storage::LocalStorage;
pub use config::toml_config::EffortConfig;
pub use core::engine::{EffortEngine, RunOutcome};
pub use utils::error::{EffortError, Result};
