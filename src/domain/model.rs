use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fleet sizes for one country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetRecord {
    pub total_fleet: u32,
    pub combat_fleet: u32,
}

/// Resolved total and combat fleet mappings for one run.
#[derive(Debug, Clone, Serialize)]
pub struct FleetTables {
    pub total: HashMap<String, u32>,
    pub combat: HashMap<String, u32>,
    pub missing_total: u32,
    pub missing_combat: u32,
    /// Whether any total entry came from the live ranking source.
    pub live: bool,
}

impl FleetTables {
    pub fn total_fleet(&self, code: &str) -> u32 {
        self.total.get(code).copied().unwrap_or(self.missing_total)
    }

    pub fn combat_fleet(&self, code: &str) -> u32 {
        self.combat.get(code).copied().unwrap_or(self.missing_combat)
    }

    pub fn lookup(&self, code: &str) -> FleetRecord {
        FleetRecord {
            total_fleet: self.total_fleet(code),
            combat_fleet: self.combat_fleet(code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    #[serde(rename = "country")]
    pub country_code: String,
    #[serde(rename = "sorties")]
    pub sortie_count: u64,
    pub fuel_liters: f64,
}

impl OperationRecord {
    pub fn new(country_code: impl Into<String>, sortie_count: u64, fuel_liters: f64) -> Self {
        Self {
            country_code: country_code.into(),
            sortie_count,
            fuel_liters,
        }
    }
}

/// Commitment tier derived from raw fuel volume, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    HighCommitment,
    MajorContributor,
    ModerateSupport,
    Minimal,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::HighCommitment => "HIGH COMMITMENT",
            Tier::MajorContributor => "MAJOR CONTRIBUTOR",
            Tier::ModerateSupport => "MODERATE SUPPORT",
            Tier::Minimal => "MINIMAL",
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            Tier::HighCommitment => Priority::StrategicHub,
            Tier::MajorContributor => Priority::RegionalPower,
            Tier::ModerateSupport => Priority::Tactical,
            Tier::Minimal => Priority::Standby,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    StrategicHub,
    RegionalPower,
    Tactical,
    Standby,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::StrategicHub => "STRATEGIC HUB",
            Priority::RegionalPower => "REGIONAL POWER",
            Priority::Tactical => "TACTICAL",
            Priority::Standby => "STANDBY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffortRecord {
    pub country_code: String,
    pub sortie_count: u64,
    pub fuel_liters: f64,
    pub total_fleet: u32,
    pub combat_fleet: u32,
    pub ops_share_pct: f64,
    pub effort_score: f64,
    pub tier: Tier,
    pub priority: Priority,
}

impl EffortRecord {
    /// Sorties flown per aircraft in the total fleet.
    pub fn ops_per_aircraft(&self) -> f64 {
        if self.total_fleet == 0 {
            0.0
        } else {
            self.sortie_count as f64 / self.total_fleet as f64
        }
    }
}

/// Classified records for one month, sorted by descending effort score.
#[derive(Debug, Clone, Serialize)]
pub struct MonthResult {
    pub month: String,
    pub records: Vec<EffortRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
    InsufficientData,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Flat => "flat",
            TrendDirection::InsufficientData => "insufficient-data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendEntry {
    pub country_code: String,
    /// One slot per month in month order; `None` where the nation is absent.
    pub scores: Vec<Option<f64>>,
    pub trend_direction: TrendDirection,
    /// `last - first` over present scores, when at least two exist.
    pub delta: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyEntry {
    pub country_code: String,
    pub ops_per_aircraft: f64,
    pub combat_fleet: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month: String,
    pub top: Vec<EffortRecord>,
    pub total_ops: u64,
    pub reference_nation: String,
    /// `None` when the reference nation flew nothing that month.
    pub reference_nation_share: Option<f64>,
    pub efficiency_leaders: Vec<EfficiencyEntry>,
}

/// Everything one run produces, ready for a renderer.
#[derive(Debug, Clone, Serialize)]
pub struct EffortReport {
    pub name: String,
    pub generated_at: DateTime<Utc>,
    pub live_fleet_data: bool,
    pub months: Vec<MonthResult>,
    pub trends: HashMap<String, TrendEntry>,
    pub summaries: Vec<MonthlySummary>,
}

impl EffortReport {
    /// Trend entries ordered by country code, the order used for display.
    pub fn sorted_trends(&self) -> Vec<&TrendEntry> {
        let mut entries: Vec<&TrendEntry> = self.trends.values().collect();
        entries.sort_by(|a, b| a.country_code.cmp(&b.country_code));
        entries
    }
}
