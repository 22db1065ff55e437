use crate::domain::model::{EffortReport, FleetTables};
use crate::utils::error::{FleetFetchError, Result};
use async_trait::async_trait;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Where `path` ends up, for reporting back to the user.
    fn describe(&self, path: &str) -> String;
}

/// A live source of total-fleet counts keyed by country code.
#[async_trait]
pub trait FleetSource: Send + Sync {
    async fn fetch_totals(&self) -> std::result::Result<HashMap<String, u32>, FleetFetchError>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<FleetTables>;
    async fn transform(&self, fleets: FleetTables) -> Result<EffortReport>;
    async fn load(&self, report: &EffortReport) -> Result<String>;
}
