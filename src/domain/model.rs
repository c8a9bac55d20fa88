use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Customer table columns, in output order.
pub const CUSTOMER_FIELDS: [&str; 18] = [
    "billing_email",
    "billing_first_name",
    "billing_last_name",
    "billing_phone",
    "billing_address_1",
    "billing_address_2",
    "billing_city",
    "billing_state",
    "billing_postcode",
    "billing_country",
    "shipping_first_name",
    "shipping_last_name",
    "shipping_address_1",
    "shipping_address_2",
    "shipping_city",
    "shipping_state",
    "shipping_postcode",
    "shipping_country",
];

/// Order table columns, in output order.
pub const ORDER_FIELDS: [&str; 9] = [
    "order_id",
    "order_date",
    "billing_email",
    "billing_first_name",
    "billing_last_name",
    "billing_phone",
    "order_total",
    "payment_method",
    "order_status",
];

/// Input columns copied into the duplicate-orders report; `order_count` is appended.
pub const DUPLICATE_FIELDS: [&str; 11] = [
    "order_id",
    "order_date",
    "billing_email",
    "billing_first_name",
    "billing_last_name",
    "billing_phone",
    "billing_address_1",
    "billing_city",
    "order_total",
    "payment_method",
    "order_status",
];

/// Column names of the input file, as given by its header line.
#[derive(Debug, Clone, Default)]
pub struct Header {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Header {
    pub fn new(names: Vec<String>) -> Self {
        // 重複的欄位名稱以最後一欄為準
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, index }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One data row of the export. `row_number` is its line in the file, so the first data row is 2.
#[derive(Debug, Clone)]
pub struct InputRecord {
    pub row_number: usize,
    header: Arc<Header>,
    values: Vec<String>,
}

impl InputRecord {
    /// Short rows are padded with empty values, values past the header are dropped.
    pub fn new(row_number: usize, header: Arc<Header>, mut values: Vec<String>) -> Self {
        values.resize(header.len(), String::new());
        Self {
            row_number,
            header,
            values,
        }
    }

    /// Value of a named field, or `""` when the column does not exist.
    pub fn get(&self, field: &str) -> &str {
        self.header
            .position(field)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [String] {
        &mut self.values
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRecord {
    pub billing_email: String,
    pub billing_first_name: String,
    pub billing_last_name: String,
    pub billing_phone: String,
    pub billing_address_1: String,
    pub billing_address_2: String,
    pub billing_city: String,
    pub billing_state: String,
    pub billing_postcode: String,
    pub billing_country: String,
    pub shipping_first_name: String,
    pub shipping_last_name: String,
    pub shipping_address_1: String,
    pub shipping_address_2: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_postcode: String,
    pub shipping_country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub order_date: String,
    pub billing_email: String,
    pub billing_first_name: String,
    pub billing_last_name: String,
    pub billing_phone: String,
    pub order_total: String,
    pub payment_method: String,
    pub order_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailOnlyRecord {
    pub billing_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEntry {
    pub order_id: String,
    pub order_date: String,
    pub billing_email: String,
    pub billing_first_name: String,
    pub billing_last_name: String,
    pub billing_phone: String,
    pub billing_address_1: String,
    pub billing_city: String,
    pub order_total: String,
    pub payment_method: String,
    pub order_status: String,
    pub order_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailOrderCount {
    pub billing_email: String,
    pub order_count: usize,
}

/// Non-fatal findings reported while processing a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    MissingEmail { row: usize },
    RowSkipped { row: usize, reason: String },
    UnparseableDate { row: usize, value: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingEmail { row } => {
                write!(f, "Row {}: no billing_email, row dropped", row)
            }
            Diagnostic::RowSkipped { row, reason } => {
                write!(f, "Row {}: skipped due to error: {}", row, reason)
            }
            Diagnostic::UnparseableDate { row, value } => {
                write!(f, "Row {}: unrecognised order_date '{}'", row, value)
            }
        }
    }
}

/// Rows read from the input file, before classification.
#[derive(Debug, Clone)]
pub struct ExtractResult {
    pub encoding: &'static str,
    pub header: Arc<Header>,
    pub records: Vec<InputRecord>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub header: Arc<Header>,
    pub customers: Vec<CustomerRecord>,
    pub email_only: Vec<EmailOnlyRecord>,
    pub orders: Vec<OrderRecord>,
    pub duplicates: Vec<DuplicateEntry>,
    pub order_counts: Vec<EmailOrderCount>,
    pub quarantined: Vec<InputRecord>,
    pub summary: RunSummary,
}

/// Run statistics; reported to the operator, never written as a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub encoding: String,
    pub rows_read: usize,
    pub rows_quarantined: usize,
    pub rows_missing_email: usize,
    pub rows_skipped: usize,
    pub distinct_emails: usize,
    pub single_occurrence_emails: usize,
    pub multi_order_emails: usize,
    pub customers: usize,
    pub email_only: usize,
    pub orders: usize,
    pub duplicate_entries: usize,
    pub warnings: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Encoding: {}", self.encoding)?;
        writeln!(f, "Rows read: {}", self.rows_read)?;
        writeln!(f, "Test rows quarantined: {}", self.rows_quarantined)?;
        writeln!(f, "Rows without email: {}", self.rows_missing_email)?;
        writeln!(f, "Rows skipped: {}", self.rows_skipped)?;
        writeln!(f, "Emails appearing once: {}", self.single_occurrence_emails)?;
        writeln!(f, "Emails with multiple orders: {}", self.multi_order_emails)?;
        writeln!(f, "Distinct emails: {}", self.distinct_emails)?;
        writeln!(
            f,
            "Written: {} customers, {} email-only, {} orders, {} duplicate entries",
            self.customers, self.email_only, self.orders, self.duplicate_entries
        )?;
        write!(f, "Warnings: {}", self.warnings)
    }
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub summary: RunSummary,
    pub outputs: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}
