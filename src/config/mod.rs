pub mod storage;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::app::render::OutputFormat;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fleet-effort")]
#[command(about = "Rank nations by fleet-normalised fuel effort, month over month")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "effort-config.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Skip the live fleet lookup and use the built-in tables
    #[arg(long)]
    pub offline: bool,

    /// Override the reference nation used in monthly summaries
    #[arg(long)]
    pub reference: Option<String>,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Validate configuration and show what would run
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Fold command line overrides into the file configuration.
    pub fn apply_to(&self, config: &mut toml_config::EffortConfig) {
        if self.offline {
            config.disable_fleet_source();
        }
        if let Some(reference) = &self.reference {
            config.report.reference_nation = Some(reference.clone());
        }
        if let Some(format) = self.format {
            config.set_output_format(format);
        }
        if let Some(output) = &self.output {
            config.set_output_path(output.clone());
        }
    }
}
