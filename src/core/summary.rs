use crate::domain::model::{EfficiencyEntry, MonthResult, MonthlySummary};

pub const DEFAULT_REFERENCE_NATION: &str = "USA";
pub const DEFAULT_TOP_N: usize = 3;
pub const DEFAULT_EFFICIENCY_N: usize = 5;

pub struct SummaryReporter {
    reference_nation: String,
    top_n: usize,
    efficiency_n: usize,
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_NATION)
    }
}

impl SummaryReporter {
    pub fn new(reference_nation: impl Into<String>) -> Self {
        Self {
            reference_nation: reference_nation.into().to_ascii_uppercase(),
            top_n: DEFAULT_TOP_N,
            efficiency_n: DEFAULT_EFFICIENCY_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_efficiency_n(mut self, efficiency_n: usize) -> Self {
        self.efficiency_n = efficiency_n;
        self
    }

    pub fn reference_nation(&self) -> &str {
        &self.reference_nation
    }

    /// One summary per month, in month order. Expects each month's records
    /// already sorted by descending effort score.
    pub fn summarize(&self, months: &[MonthResult]) -> Vec<MonthlySummary> {
        months.iter().map(|month| self.summarize_month(month)).collect()
    }

    fn summarize_month(&self, month: &MonthResult) -> MonthlySummary {
        let top = month.records.iter().take(self.top_n).cloned().collect();
        let total_ops = month
            .records
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.sortie_count));
        let reference_nation_share = month
            .records
            .iter()
            .find(|r| r.country_code == self.reference_nation)
            .map(|r| r.ops_share_pct);

        let mut by_tempo: Vec<EfficiencyEntry> = month
            .records
            .iter()
            .map(|r| EfficiencyEntry {
                country_code: r.country_code.clone(),
                ops_per_aircraft: r.ops_per_aircraft(),
                combat_fleet: r.combat_fleet,
            })
            .collect();
        by_tempo.sort_by(|a, b| b.ops_per_aircraft.total_cmp(&a.ops_per_aircraft));
        by_tempo.truncate(self.efficiency_n);

        MonthlySummary {
            month: month.month.clone(),
            top,
            total_ops,
            reference_nation: self.reference_nation.clone(),
            reference_nation_share,
            efficiency_leaders: by_tempo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{EffortRecord, Priority, Tier};

    fn record(code: &str, sorties: u64, total_fleet: u32, share: f64, score: f64) -> EffortRecord {
        EffortRecord {
            country_code: code.to_string(),
            sortie_count: sorties,
            fuel_liters: 300.0,
            total_fleet,
            combat_fleet: total_fleet / 4,
            ops_share_pct: share,
            effort_score: score,
            tier: Tier::MajorContributor,
            priority: Priority::RegionalPower,
        }
    }

    fn sample_month() -> MonthResult {
        MonthResult {
            month: "2026-02".to_string(),
            records: vec![
                record("GBR", 100, 664, 10.0, 900.0),
                record("USA", 600, 13209, 60.0, 800.0),
                record("FRA", 200, 972, 20.0, 700.0),
                record("DEU", 100, 618, 10.0, 600.0),
            ],
        }
    }

    #[test]
    fn test_top_three_and_totals() {
        let summaries = SummaryReporter::default().summarize(&[sample_month()]);

        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        let top: Vec<&str> = summary.top.iter().map(|r| r.country_code.as_str()).collect();
        assert_eq!(top, vec!["GBR", "USA", "FRA"]);
        assert_eq!(summary.total_ops, 1000);
        assert_eq!(summary.reference_nation, "USA");
        assert_eq!(summary.reference_nation_share, Some(60.0));
    }

    #[test]
    fn test_short_month_and_missing_reference() {
        let month = MonthResult {
            month: "2026-03".to_string(),
            records: vec![record("GBR", 100, 664, 100.0, 900.0)],
        };

        let summaries = SummaryReporter::new("usa").summarize(&[month]);

        assert_eq!(summaries[0].top.len(), 1);
        assert_eq!(summaries[0].reference_nation_share, None);
    }

    #[test]
    fn test_configured_reference_nation() {
        let summaries = SummaryReporter::new("FRA").summarize(&[sample_month()]);
        assert_eq!(summaries[0].reference_nation_share, Some(20.0));
    }

    #[test]
    fn test_efficiency_leaders_by_tempo() {
        let summaries = SummaryReporter::default()
            .with_efficiency_n(2)
            .summarize(&[sample_month()]);

        let leaders: Vec<&str> = summaries[0]
            .efficiency_leaders
            .iter()
            .map(|e| e.country_code.as_str())
            .collect();
        // FRA 0.206, DEU 0.162, GBR 0.151, USA 0.045
        assert_eq!(leaders, vec!["FRA", "DEU"]);
    }

    #[test]
    fn test_empty_month_and_month_order() {
        let empty = MonthResult {
            month: "2026-01".to_string(),
            records: vec![],
        };
        let summaries = SummaryReporter::default().summarize(&[empty, sample_month()]);

        assert_eq!(summaries[0].month, "2026-01");
        assert!(summaries[0].top.is_empty());
        assert_eq!(summaries[0].total_ops, 0);
        assert_eq!(summaries[0].reference_nation_share, None);
        assert_eq!(summaries[1].month, "2026-02");
    }
}
