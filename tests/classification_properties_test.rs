use fleet_effort::core::classifier::EffortClassifier;
use fleet_effort::core::dataset::{MonthEntry, MonthlyDataset};
use fleet_effort::core::fleet::{DisabledFleetSource, FleetDataProvider, FleetDefaults};
use fleet_effort::core::summary::SummaryReporter;
use fleet_effort::core::trend::TrendAggregator;
use fleet_effort::domain::model::{FleetTables, MonthResult, OperationRecord, Tier, TrendDirection};

async fn builtin_fleets() -> FleetTables {
    FleetDataProvider::new(FleetDefaults::default(), DisabledFleetSource)
        .get_fleets()
        .await
}

fn reference_months() -> MonthlyDataset {
    let ops = |rows: &[(&str, u64, f64)]| {
        rows.iter()
            .map(|(code, sorties, fuel)| OperationRecord::new(*code, *sorties, *fuel))
            .collect::<Vec<_>>()
    };

    MonthlyDataset::new(vec![
        MonthEntry {
            label: "2026-01".to_string(),
            operations: ops(&[
                ("USA", 8112, 473.3),
                ("GBR", 1400, 450.2),
                ("FRA", 1300, 420.1),
                ("DEU", 1200, 380.5),
                ("IND", 850, 370.4),
                ("ESP", 1100, 350.3),
                ("PAK", 800, 340.2),
                ("ITA", 1000, 320.8),
            ]),
        },
        MonthEntry {
            label: "2026-02".to_string(),
            operations: ops(&[("USA", 0, 90.0), ("TUR", 0, 0.0)]),
        },
        MonthEntry {
            label: "2026-03".to_string(),
            operations: vec![],
        },
        MonthEntry {
            label: "2026-04".to_string(),
            operations: ops(&[("GBR", 1400, 400.0), ("FRA", 1300, 400.01), ("XYZ", 500, 100.0)]),
        },
    ])
    .unwrap()
}

async fn classify_all(dataset: &MonthlyDataset) -> Vec<MonthResult> {
    let fleets = builtin_fleets().await;
    let classifier = EffortClassifier::new(&fleets);
    dataset
        .iter()
        .map(|(label, operations)| MonthResult {
            month: label.to_string(),
            records: classifier.classify(operations),
        })
        .collect()
}

#[tokio::test]
async fn test_share_and_score_invariants_hold_every_month() {
    let months = classify_all(&reference_months()).await;

    for month in &months {
        let total: u64 = month.records.iter().map(|r| r.sortie_count).sum();
        let share: f64 = month.records.iter().map(|r| r.ops_share_pct).sum();
        if total == 0 {
            assert!(month.records.iter().all(|r| r.ops_share_pct == 0.0));
        } else {
            assert!((share - 100.0).abs() < 1e-9, "{}: {}", month.month, share);
        }
        assert!(month.records.iter().all(|r| r.effort_score >= 0.0));
        assert!(month
            .records
            .windows(2)
            .all(|w| w[0].effort_score >= w[1].effort_score));
    }
}

#[tokio::test]
async fn test_tier_boundaries_through_classifier() {
    let months = classify_all(&reference_months()).await;
    let april = &months[3].records;
    let tier_of = |code: &str| april.iter().find(|r| r.country_code == code).unwrap().tier;

    assert_eq!(tier_of("GBR"), Tier::MajorContributor);
    assert_eq!(tier_of("FRA"), Tier::HighCommitment);
    assert_eq!(tier_of("XYZ"), Tier::Minimal);
}

#[tokio::test]
async fn test_zero_sorties_score_zero() {
    let months = classify_all(&reference_months()).await;
    assert!(months[1].records.iter().all(|r| r.effort_score == 0.0));
}

#[tokio::test]
async fn test_trends_and_summaries_over_gaps() {
    let months = classify_all(&reference_months()).await;

    let trends = TrendAggregator::new().aggregate(&months);
    // January 770.69 -> February 0.0 (zero sorties)
    assert_eq!(trends["USA"].trend_direction, TrendDirection::Down);
    assert_eq!(trends["GBR"].scores[1], None);
    assert_eq!(trends["GBR"].scores[2], None);
    assert_eq!(trends["GBR"].trend_direction, TrendDirection::Down);
    assert_eq!(trends["IND"].trend_direction, TrendDirection::InsufficientData);

    let summaries = SummaryReporter::default().summarize(&months);
    assert_eq!(summaries.len(), 4);
    assert_eq!(summaries[0].top.len(), 3);
    assert_eq!(summaries[0].top[0].country_code, "USA");
    assert_eq!(summaries[0].total_ops, 15762);
    let usa_share = summaries[0].reference_nation_share.unwrap();
    assert!((usa_share - 8112.0 / 15762.0 * 100.0).abs() < 1e-9);
    assert_eq!(summaries[1].reference_nation_share, Some(0.0));
    assert!(summaries[2].top.is_empty());
    assert_eq!(summaries[3].reference_nation_share, None);
}
