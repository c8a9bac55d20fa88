use crate::domain::model::{Diagnostic, ExtractResult, TransformResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// Writes one output file and returns the location it was written to.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

/// Names of the six output tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub customers: String,
    pub orders: String,
    pub email_only: String,
    pub duplicates: String,
    pub order_counts: String,
    pub quarantine: String,
}

impl OutputFiles {
    pub fn all(&self) -> [(&'static str, &str); 6] {
        [
            ("customers", self.customers.as_str()),
            ("orders", self.orders.as_str()),
            ("email_only", self.email_only.as_str()),
            ("duplicates", self.duplicates.as_str()),
            ("order_counts", self.order_counts.as_str()),
            ("quarantine", self.quarantine.as_str()),
        ]
    }
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            customers: "customers.csv".to_string(),
            orders: "orders.csv".to_string(),
            email_only: "email_only_customers.csv".to_string(),
            duplicates: "duplicate_orders.csv".to_string(),
            order_counts: "email_order_counts.csv".to_string(),
            quarantine: "test_rows.csv".to_string(),
        }
    }
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn output_files(&self) -> &OutputFiles;
    fn encodings(&self) -> &[String];
}

/// Receives warnings that must reach the operator without failing the run.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

pub trait Pipeline {
    fn extract(&self, sink: &mut dyn DiagnosticSink) -> Result<ExtractResult>;
    fn transform(
        &self,
        data: ExtractResult,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<TransformResult>;
    fn load(&self, result: &TransformResult) -> Result<Vec<String>>;
}
