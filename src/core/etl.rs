use crate::core::{Pipeline, RunReport};
use crate::domain::model::Diagnostic;
use crate::utils::diagnostics::Diagnostics;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor_enabled: bool,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor_enabled,
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn run(&self) -> Result<RunReport> {
        self.run_with(Diagnostics::new())
    }

    /// Runs all three phases. Nothing is written unless extract and transform succeed.
    pub fn run_with(&self, mut diagnostics: Diagnostics) -> Result<RunReport> {
        let mut monitor = SystemMonitor::new(self.monitor_enabled);
        tracing::info!("🚀 Starting ETL process");

        tracing::info!("📥 Extracting data...");
        let extracted = self.pipeline.extract(&mut diagnostics)?;
        tracing::info!("Extracted {} rows", extracted.records.len());
        monitor.log_stats("Extract");

        tracing::info!("🔄 Transforming data...");
        let mut result = self.pipeline.transform(extracted, &mut diagnostics)?;
        tracing::info!(
            "Transformed into {} customers and {} orders",
            result.customers.len(),
            result.orders.len()
        );
        monitor.log_stats("Transform");

        tracing::info!("💾 Loading data...");
        let outputs = self.pipeline.load(&result)?;
        monitor.log_stats("Load");
        monitor.log_final_stats();

        result.summary.rows_skipped =
            diagnostics.count_where(|d| matches!(d, Diagnostic::RowSkipped { .. }));
        result.summary.warnings = diagnostics.len();

        Ok(RunReport {
            summary: result.summary,
            outputs,
            diagnostics: diagnostics.into_entries(),
        })
    }
}
