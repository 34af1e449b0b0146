//! Report generation engine

mod pipeline;
mod result;

pub use pipeline::ReportPipeline;
pub use result::{FailureKind, ReportOutcome, ReportRequest, ReportResult};
