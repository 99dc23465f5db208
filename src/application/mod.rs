//! Application layer - Use cases and orchestration

pub mod generate_reports;
pub mod publish;

pub use generate_reports::{GenerateOptions, GenerateReportsService, RunSummary};
pub use publish::{PublishOutcome, PublishSettings, Publisher};
