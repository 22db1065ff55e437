use crate::app::render::{self, OutputFormat};
use crate::config::toml_config::EffortConfig;
use crate::core::classifier::EffortClassifier;
use crate::core::dataset::MonthlyDataset;
use crate::core::fleet::FleetDataProvider;
use crate::core::summary::SummaryReporter;
use crate::core::trend::TrendAggregator;
use crate::domain::model::{EffortReport, FleetTables, MonthResult};
use crate::domain::ports::{FleetSource, Pipeline, Storage};
use crate::utils::error::Result;
use chrono::Utc;

/// Resolves fleets, scores every month, and delivers the rendered report.
pub struct ReportPipeline<S: Storage, F: FleetSource> {
    storage: S,
    config: EffortConfig,
    dataset: MonthlyDataset,
    provider: FleetDataProvider<F>,
}

impl<S: Storage, F: FleetSource> ReportPipeline<S, F> {
    pub fn new(storage: S, config: EffortConfig, source: F) -> Result<Self> {
        let dataset = config.dataset()?;
        let provider = FleetDataProvider::new(config.fleet_defaults(), source);

        Ok(Self {
            storage,
            config,
            dataset,
            provider,
        })
    }

    fn output_format(&self) -> OutputFormat {
        self.config.output_format()
    }
}

#[async_trait::async_trait]
impl<S: Storage, F: FleetSource> Pipeline for ReportPipeline<S, F> {
    async fn extract(&self) -> Result<FleetTables> {
        Ok(self.provider.get_fleets().await)
    }

    async fn transform(&self, fleets: FleetTables) -> Result<EffortReport> {
        let classifier = EffortClassifier::new(&fleets);

        let months: Vec<MonthResult> = self
            .dataset
            .iter()
            .map(|(label, operations)| {
                tracing::debug!("Classifying {} ({} nations)", label, operations.len());
                MonthResult {
                    month: label.to_string(),
                    records: classifier.classify(operations),
                }
            })
            .collect();

        let trends = TrendAggregator::new().aggregate(&months);
        let summaries = SummaryReporter::new(self.config.reference_nation())
            .with_top_n(self.config.top_n())
            .with_efficiency_n(self.config.efficiency_n())
            .summarize(&months);

        Ok(EffortReport {
            name: self.config.report.name.clone(),
            generated_at: Utc::now(),
            live_fleet_data: fleets.live,
            months,
            trends,
            summaries,
        })
    }

    async fn load(&self, report: &EffortReport) -> Result<String> {
        let rendered = render::render(report, self.output_format())?;

        match self.config.output_path() {
            Some(path) => {
                tracing::debug!("Writing {} bytes to {}", rendered.len(), path);
                self.storage.write_file(path, rendered.as_bytes()).await?;
                Ok(self.storage.describe(path))
            }
            None => {
                print!("{}", rendered);
                Ok("stdout".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fleet::DisabledFleetSource;
    use crate::domain::model::TrendDirection;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn describe(&self, path: &str) -> String {
            format!("mock://{}", path)
        }
    }

    const TWO_MONTHS: &str = r#"
[report]
name = "pipeline-test"
reference_nation = "GBR"

[fleet_source]
enabled = false

[output]
format = "csv"
path = "effort.csv"

[[months]]
label = "2026-01"
operations = [
    { country = "USA", sorties = 8112, fuel_liters = 473.3 },
    { country = "GBR", sorties = 1400, fuel_liters = 450.2 },
]

[[months]]
label = "2026-02"
operations = [
    { country = "USA", sorties = 8000, fuel_liters = 480.0 },
    { country = "XYZ", sorties = 500, fuel_liters = 200.0 },
]
"#;

    fn pipeline(storage: MockStorage) -> ReportPipeline<MockStorage, DisabledFleetSource> {
        let config = EffortConfig::from_toml_str(TWO_MONTHS).unwrap();
        ReportPipeline::new(storage, config, DisabledFleetSource).unwrap()
    }

    #[tokio::test]
    async fn test_extract_without_source_uses_defaults() {
        let fleets = pipeline(MockStorage::new()).extract().await.unwrap();

        assert!(!fleets.live);
        assert_eq!(fleets.total_fleet("USA"), 13209);
    }

    #[tokio::test]
    async fn test_transform_builds_months_trends_and_summaries() {
        let pipeline = pipeline(MockStorage::new());
        let fleets = pipeline.extract().await.unwrap();

        let report = pipeline.transform(fleets).await.unwrap();

        assert_eq!(report.name, "pipeline-test");
        assert_eq!(report.months.len(), 2);
        assert_eq!(report.months[0].month, "2026-01");
        assert_eq!(report.months[1].records[1].country_code, "XYZ");

        assert_eq!(report.trends.len(), 3);
        assert_eq!(report.trends["USA"].trend_direction, TrendDirection::Up);
        let gbr = &report.trends["GBR"].scores;
        assert_eq!(gbr.len(), 2);
        assert!((gbr[0].unwrap() - 213.52).abs() < 1e-6);
        assert_eq!(gbr[1], None);

        assert_eq!(report.summaries[0].reference_nation, "GBR");
        assert!(report.summaries[0].reference_nation_share.is_some());
        assert_eq!(report.summaries[1].reference_nation_share, None);
        assert_eq!(report.summaries[1].total_ops, 8500);
    }

    #[tokio::test]
    async fn test_load_writes_rendered_output() {
        let storage = MockStorage::new();
        let pipeline = pipeline(storage.clone());
        let fleets = pipeline.extract().await.unwrap();
        let report = pipeline.transform(fleets).await.unwrap();

        let destination = pipeline.load(&report).await.unwrap();

        assert_eq!(destination, "mock://effort.csv");
        let written = String::from_utf8(storage.get_file("effort.csv").await.unwrap()).unwrap();
        assert_eq!(written.lines().count(), 5);
        assert!(written.contains("2026-02,XYZ,500,200.0,100,50"));
    }
}
