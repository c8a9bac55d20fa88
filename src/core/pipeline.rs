use crate::core::aggregate::EmailAggregator;
use crate::core::classify::{Disposition, RowClassifier};
use crate::core::encoding::EncodingProber;
use crate::core::reports::{duplicate_orders, email_order_counts, order_table};
use crate::core::resolve::resolve_customers;
use crate::core::table::{read_table, write_raw, write_rows};
use crate::core::{ConfigProvider, DiagnosticSink, ExtractResult, Pipeline, Storage, TransformResult};
use crate::domain::model::{Diagnostic, RunSummary, CUSTOMER_FIELDS, DUPLICATE_FIELDS, ORDER_FIELDS};
use crate::utils::error::Result;

/// Splits a WooCommerce order export into the six output tables.
pub struct OrderExportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    prober: EncodingProber,
    classifier: RowClassifier,
}

impl<S: Storage, C: ConfigProvider> OrderExportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let prober = EncodingProber::from_labels(config.encodings())?;
        Ok(Self {
            storage,
            config,
            prober,
            classifier: RowClassifier::standard(),
        })
    }

    pub fn with_classifier(mut self, classifier: RowClassifier) -> Self {
        self.classifier = classifier;
        self
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for OrderExportPipeline<S, C> {
    fn extract(&self, sink: &mut dyn DiagnosticSink) -> Result<ExtractResult> {
        let path = self.config.input_path();
        tracing::debug!("Reading input file: {}", path);
        let bytes = self.storage.read_file(path)?;

        let decoded = self.prober.decode(path, &bytes)?;
        tracing::info!("🔤 Using encoding: {}", decoded.encoding.name());

        let (header, records) = read_table(&decoded.text, sink)?;
        if !header.contains("billing_email") {
            tracing::warn!("⚠️ Input header has no billing_email column; every row will be dropped");
        }

        Ok(ExtractResult {
            encoding: decoded.encoding.name(),
            header,
            records,
        })
    }

    fn transform(
        &self,
        data: ExtractResult,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<TransformResult> {
        let mut summary = RunSummary {
            encoding: data.encoding.to_string(),
            rows_read: data.records.len(),
            ..RunSummary::default()
        };
        let mut aggregator = EmailAggregator::new();
        let mut quarantined = Vec::new();

        for record in data.records {
            match self.classifier.classify(record) {
                Disposition::Quarantined { record, rule } => {
                    tracing::debug!("Row {} quarantined by {} rule", record.row_number, rule);
                    quarantined.push(record);
                }
                Disposition::MissingEmail { row } => {
                    summary.rows_missing_email += 1;
                    sink.report(Diagnostic::MissingEmail { row });
                }
                Disposition::Admitted { email, record } => aggregator.admit(email, record, sink),
            }
        }

        let (customers, email_only) = resolve_customers(&aggregator);
        let orders = order_table(&aggregator);
        let duplicates = duplicate_orders(&aggregator);
        let order_counts = email_order_counts(&aggregator);

        summary.rows_quarantined = quarantined.len();
        summary.distinct_emails = aggregator.groups().len();
        summary.single_occurrence_emails = aggregator.single_occurrence_emails();
        summary.multi_order_emails = aggregator.multi_order_emails();
        summary.customers = customers.len();
        summary.email_only = email_only.len();
        summary.orders = orders.len();
        summary.duplicate_entries = duplicates.len();

        Ok(TransformResult {
            header: data.header,
            customers,
            email_only,
            orders,
            duplicates,
            order_counts,
            quarantined,
            summary,
        })
    }

    fn load(&self, result: &TransformResult) -> Result<Vec<String>> {
        let files = self.config.output_files();
        tracing::info!("📁 Writing tables to {}", self.config.output_dir());
        let mut duplicate_columns = DUPLICATE_FIELDS.to_vec();
        duplicate_columns.push("order_count");

        let tables = [
            (&files.customers, write_rows(&CUSTOMER_FIELDS, &result.customers)?),
            (&files.orders, write_rows(&ORDER_FIELDS, &result.orders)?),
            (&files.email_only, write_rows(&["billing_email"], &result.email_only)?),
            (&files.duplicates, write_rows(&duplicate_columns, &result.duplicates)?),
            (
                &files.order_counts,
                write_rows(&["billing_email", "order_count"], &result.order_counts)?,
            ),
            (&files.quarantine, write_raw(&result.header, &result.quarantined)?),
        ];

        // 各表獨立寫入，後面失敗不會回滾前面已寫的檔案
        let mut written = Vec::with_capacity(tables.len());
        for (name, data) in tables {
            let location = self.storage.write_file(name, &data)?;
            tracing::debug!("Wrote {} ({} bytes)", location, data.len());
            written.push(location);
        }
        Ok(written)
    }
}
