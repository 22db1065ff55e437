use crate::domain::model::{EffortRecord, FleetTables, OperationRecord, Tier};

/// Lower fuel bounds (exclusive) for the top three tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    pub high_commitment: f64,
    pub major_contributor: f64,
    pub moderate_support: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            high_commitment: 400.0,
            major_contributor: 250.0,
            moderate_support: 100.0,
        }
    }
}

impl TierThresholds {
    pub fn tier_for(&self, fuel_liters: f64) -> Tier {
        if fuel_liters > self.high_commitment {
            Tier::HighCommitment
        } else if fuel_liters > self.major_contributor {
            Tier::MajorContributor
        } else if fuel_liters > self.moderate_support {
            Tier::ModerateSupport
        } else {
            Tier::Minimal
        }
    }
}

/// Fuel per unit of fleet-normalised tempo; zero when either count is zero.
pub fn effort_score(fuel_liters: f64, sortie_count: u64, total_fleet: u32) -> f64 {
    if sortie_count == 0 || total_fleet == 0 {
        return 0.0;
    }
    fuel_liters / (sortie_count as f64 / total_fleet as f64)
}

pub struct EffortClassifier<'a> {
    fleets: &'a FleetTables,
    thresholds: TierThresholds,
}

impl<'a> EffortClassifier<'a> {
    pub fn new(fleets: &'a FleetTables) -> Self {
        Self::with_thresholds(fleets, TierThresholds::default())
    }

    pub fn with_thresholds(fleets: &'a FleetTables, thresholds: TierThresholds) -> Self {
        Self { fleets, thresholds }
    }

    /// Score one month of operations, highest effort first. Equal scores keep
    /// their input order.
    pub fn classify(&self, records: &[OperationRecord]) -> Vec<EffortRecord> {
        let month_total = records
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.sortie_count));

        let mut classified: Vec<EffortRecord> = records
            .iter()
            .map(|op| {
                let fleet = self.fleets.lookup(&op.country_code);
                let ops_share_pct = if month_total == 0 {
                    0.0
                } else {
                    op.sortie_count as f64 / month_total as f64 * 100.0
                };
                let tier = self.thresholds.tier_for(op.fuel_liters);

                EffortRecord {
                    country_code: op.country_code.clone(),
                    sortie_count: op.sortie_count,
                    fuel_liters: op.fuel_liters,
                    total_fleet: fleet.total_fleet,
                    combat_fleet: fleet.combat_fleet,
                    ops_share_pct,
                    effort_score: effort_score(op.fuel_liters, op.sortie_count, fleet.total_fleet),
                    tier,
                    priority: tier.priority(),
                }
            })
            .collect();

        // sort_by is stable
        classified.sort_by(|a, b| b.effort_score.total_cmp(&a.effort_score));

        tracing::debug!(
            "Classified {} nations ({} sorties total)",
            classified.len(),
            month_total
        );
        classified
    }
}
