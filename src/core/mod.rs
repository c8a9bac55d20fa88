pub mod aggregate;
pub mod classify;
pub mod dates;
pub mod encoding;
pub mod etl;
pub mod pipeline;
pub mod reports;
pub mod resolve;
pub mod table;

pub use crate::domain::model::{ExtractResult, RunReport, TransformResult};
pub use crate::domain::ports::{ConfigProvider, DiagnosticSink, Pipeline, Storage};
pub use crate::utils::error::Result;
