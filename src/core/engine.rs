use crate::domain::model::EffortReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

#[derive(Debug)]
pub struct RunOutcome {
    pub report: EffortReport,
    pub destination: String,
}

pub struct EffortEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EffortEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let started = Instant::now();
        tracing::info!("Starting effort report run");

        tracing::info!("Resolving fleet tables...");
        let fleets = self.pipeline.extract().await?;
        tracing::info!(
            "Fleet tables ready: {} total / {} combat entries ({})",
            fleets.total.len(),
            fleets.combat.len(),
            if fleets.live { "live" } else { "built-in" }
        );

        tracing::info!("Classifying monthly operations...");
        let report = self.pipeline.transform(fleets).await?;
        tracing::info!(
            "Classified {} months covering {} nations",
            report.months.len(),
            report.trends.len()
        );

        let destination = self.pipeline.load(&report).await?;
        tracing::info!(
            "Report delivered to {} in {:?}",
            destination,
            started.elapsed()
        );

        Ok(RunOutcome {
            report,
            destination,
        })
    }
}
