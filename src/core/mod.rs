pub mod classifier;
pub mod dataset;
pub mod engine;
pub mod fleet;
pub mod summary;
pub mod trend;

pub use crate::domain::model::{EffortReport, FleetTables, OperationRecord};
pub use crate::domain::ports::{FleetSource, Pipeline, Storage};
pub use crate::utils::error::Result;
