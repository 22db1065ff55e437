use crate::app::render::OutputFormat;
use crate::core::dataset::{MonthEntry, MonthlyDataset};
use crate::core::fleet::{
    FleetDefaults, DEFAULT_MAX_ENTRIES, DEFAULT_RANKING_ENDPOINT, DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::summary::{DEFAULT_EFFICIENCY_N, DEFAULT_REFERENCE_NATION, DEFAULT_TOP_N};
use crate::utils::error::{EffortError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffortConfig {
    pub report: ReportConfig,
    pub fleet_source: Option<FleetSourceConfig>,
    pub fleet_defaults: Option<FleetDefaultsConfig>,
    pub output: Option<OutputConfig>,
    #[serde(default)]
    pub months: Vec<MonthEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub name: String,
    pub reference_nation: Option<String>,
    pub top_n: Option<usize>,
    pub efficiency_n: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetSourceConfig {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub max_entries: Option<usize>,
}

/// Replaces the built-in fleet tables when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetDefaultsConfig {
    pub missing_total: Option<u32>,
    pub missing_combat: Option<u32>,
    pub total: Option<HashMap<String, u32>>,
    pub combat: Option<HashMap<String, u32>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub path: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl EffortConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EffortError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EffortError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("report.name", &self.report.name)?;
        validation::validate_country_code("report.reference_nation", &self.reference_nation())?;
        validation::validate_positive_number("report.top_n", self.top_n(), 1)?;
        validation::validate_positive_number("report.efficiency_n", self.efficiency_n(), 1)?;

        if self.fleet_source_enabled() {
            validation::validate_url("fleet_source.endpoint", self.endpoint())?;
            validation::validate_positive_number(
                "fleet_source.timeout_seconds",
                self.timeout_seconds() as usize,
                1,
            )?;
            validation::validate_positive_number(
                "fleet_source.max_entries",
                self.max_entries(),
                1,
            )?;
        }

        if let Some(defaults) = &self.fleet_defaults {
            for (field, table) in [
                ("fleet_defaults.total", &defaults.total),
                ("fleet_defaults.combat", &defaults.combat),
            ] {
                for code in table.iter().flat_map(|t| t.keys()) {
                    validation::validate_country_code(field, code)?;
                }
            }
        }

        if let Some(path) = self.output_path() {
            validation::validate_path("output.path", path)?;
        }

        // Surfaces duplicate countries and bad rows before the run starts.
        self.dataset().map(|_| ())
    }

    pub fn reference_nation(&self) -> String {
        self.report
            .reference_nation
            .as_deref()
            .unwrap_or(DEFAULT_REFERENCE_NATION)
            .to_ascii_uppercase()
    }

    pub fn top_n(&self) -> usize {
        self.report.top_n.unwrap_or(DEFAULT_TOP_N)
    }

    pub fn efficiency_n(&self) -> usize {
        self.report.efficiency_n.unwrap_or(DEFAULT_EFFICIENCY_N)
    }

    pub fn fleet_source_enabled(&self) -> bool {
        self.fleet_source
            .as_ref()
            .and_then(|s| s.enabled)
            .unwrap_or(true)
    }

    pub fn endpoint(&self) -> &str {
        self.fleet_source
            .as_ref()
            .and_then(|s| s.endpoint.as_deref())
            .unwrap_or(DEFAULT_RANKING_ENDPOINT)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.fleet_source
            .as_ref()
            .and_then(|s| s.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn max_entries(&self) -> usize {
        self.fleet_source
            .as_ref()
            .and_then(|s| s.max_entries)
            .unwrap_or(DEFAULT_MAX_ENTRIES)
    }

    /// Built-in fleet tables with any configured replacements applied.
    pub fn fleet_defaults(&self) -> FleetDefaults {
        let mut defaults = FleetDefaults::default();
        let Some(overrides) = &self.fleet_defaults else {
            return defaults;
        };

        let upper = |table: &HashMap<String, u32>| {
            table
                .iter()
                .map(|(code, count)| (code.to_ascii_uppercase(), *count))
                .collect::<HashMap<_, _>>()
        };
        if let Some(total) = &overrides.total {
            defaults.total = upper(total);
        }
        if let Some(combat) = &overrides.combat {
            defaults.combat = upper(combat);
        }
        if let Some(missing_total) = overrides.missing_total {
            defaults.missing_total = missing_total;
        }
        if let Some(missing_combat) = overrides.missing_combat {
            defaults.missing_combat = missing_combat;
        }
        defaults
    }

    pub fn dataset(&self) -> Result<MonthlyDataset> {
        MonthlyDataset::new(self.months.clone())
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output.get_or_insert_with(OutputConfig::default).format = Some(format);
    }

    pub fn set_output_path(&mut self, path: String) {
        self.output.get_or_insert_with(OutputConfig::default).path = Some(path);
    }

    pub fn disable_fleet_source(&mut self) {
        self.fleet_source
            .get_or_insert_with(FleetSourceConfig::default)
            .enabled = Some(false);
    }
}

impl Validate for EffortConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
