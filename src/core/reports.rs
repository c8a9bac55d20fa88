use crate::core::aggregate::{AdmittedRow, EmailAggregator};
use crate::domain::model::{DuplicateEntry, EmailOrderCount, OrderRecord};

impl OrderRecord {
    pub fn from_row(row: &AdmittedRow) -> Self {
        Self {
            order_id: row.field("order_id").to_string(),
            order_date: row.canonical_date(),
            billing_email: row.email.clone(),
            billing_first_name: row.field("billing_first_name").to_string(),
            billing_last_name: row.field("billing_last_name").to_string(),
            billing_phone: row.field("billing_phone").to_string(),
            order_total: row.field("order_total").to_string(),
            payment_method: row.field("payment_method").to_string(),
            order_status: row.field("order_status").to_string(),
        }
    }
}

impl DuplicateEntry {
    pub fn from_row(row: &AdmittedRow, order_count: usize) -> Self {
        Self {
            order_id: row.field("order_id").to_string(),
            order_date: row.canonical_date(),
            billing_email: row.email.clone(),
            billing_first_name: row.field("billing_first_name").to_string(),
            billing_last_name: row.field("billing_last_name").to_string(),
            billing_phone: row.field("billing_phone").to_string(),
            billing_address_1: row.field("billing_address_1").to_string(),
            billing_city: row.field("billing_city").to_string(),
            order_total: row.field("order_total").to_string(),
            payment_method: row.field("payment_method").to_string(),
            order_status: row.field("order_status").to_string(),
            order_count,
        }
    }
}

/// Every admitted row in input order; this table is not deduplicated.
pub fn order_table(agg: &EmailAggregator) -> Vec<OrderRecord> {
    agg.rows().iter().map(OrderRecord::from_row).collect()
}

/// Order-bearing rows of every email with more than one order.
pub fn duplicate_orders(agg: &EmailAggregator) -> Vec<DuplicateEntry> {
    agg.groups()
        .iter()
        .filter(|group| group.order_count > 1)
        .flat_map(|group| {
            agg.group_rows(group)
                .filter(|row| row.has_order())
                .map(move |row| DuplicateEntry::from_row(row, group.order_count))
        })
        .collect()
}

pub fn email_order_counts(agg: &EmailAggregator) -> Vec<EmailOrderCount> {
    agg.groups()
        .iter()
        .map(|group| EmailOrderCount {
            billing_email: group.email.clone(),
            order_count: group.order_count,
        })
        .collect()
}
