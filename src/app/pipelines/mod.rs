pub mod report_pipeline;

use crate::config::toml_config::EffortConfig;
use crate::core::fleet::{DisabledFleetSource, HttpFleetSource};
use crate::domain::ports::FleetSource;

pub use report_pipeline::ReportPipeline;

/// Live HTTP source, or a disabled one when the config turns the lookup off.
pub fn fleet_source_for(config: &EffortConfig) -> Box<dyn FleetSource> {
    if config.fleet_source_enabled() {
        Box::new(HttpFleetSource::new(
            config.endpoint(),
            config.timeout_seconds(),
            config.max_entries(),
        ))
    } else {
        Box::new(DisabledFleetSource)
    }
}
