// Application layer: concrete pipelines and output rendering built on the core.

pub mod pipelines;
pub mod render;
