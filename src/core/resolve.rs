use crate::core::aggregate::{AdmittedRow, EmailAggregator, EmailGroup};
use crate::domain::model::{CustomerRecord, EmailOnlyRecord, CUSTOMER_FIELDS};

#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// No customer field besides the email was ever filled in.
    EmailOnly,
    Customer(&'a AdmittedRow),
}

fn has_customer_details(row: &AdmittedRow) -> bool {
    CUSTOMER_FIELDS
        .iter()
        .filter(|&&field| field != "billing_email")
        .any(|field| !row.field(field).trim().is_empty())
}

/// Picks the row with the latest order date, first row when no date parses.
/// Ties keep the earlier row.
pub fn resolve_group<'a>(agg: &'a EmailAggregator, group: &'a EmailGroup) -> Resolution<'a> {
    if !agg.group_rows(group).any(has_customer_details) {
        return Resolution::EmailOnly;
    }

    let mut latest: Option<&AdmittedRow> = None;
    for row in agg.group_rows(group) {
        if let Some(date) = row.order_date {
            match latest.and_then(|l| l.order_date) {
                Some(best) if date <= best => {}
                _ => latest = Some(row),
            }
        }
    }

    match latest.or_else(|| agg.group_rows(group).next()) {
        Some(row) => Resolution::Customer(row),
        None => Resolution::EmailOnly,
    }
}

impl CustomerRecord {
    pub fn from_row(row: &AdmittedRow) -> Self {
        let f = |name: &str| row.field(name).to_string();
        Self {
            billing_email: row.email.clone(),
            billing_first_name: f("billing_first_name"),
            billing_last_name: f("billing_last_name"),
            billing_phone: f("billing_phone"),
            billing_address_1: f("billing_address_1"),
            billing_address_2: f("billing_address_2"),
            billing_city: f("billing_city"),
            billing_state: f("billing_state"),
            billing_postcode: f("billing_postcode"),
            billing_country: f("billing_country"),
            shipping_first_name: f("shipping_first_name"),
            shipping_last_name: f("shipping_last_name"),
            shipping_address_1: f("shipping_address_1"),
            shipping_address_2: f("shipping_address_2"),
            shipping_city: f("shipping_city"),
            shipping_state: f("shipping_state"),
            shipping_postcode: f("shipping_postcode"),
            shipping_country: f("shipping_country"),
        }
    }
}

/// One customer or one email-only placeholder per email group, in group order.
pub fn resolve_customers(agg: &EmailAggregator) -> (Vec<CustomerRecord>, Vec<EmailOnlyRecord>) {
    let mut customers = Vec::new();
    let mut email_only = Vec::new();

    for group in agg.groups() {
        match resolve_group(agg, group) {
            Resolution::Customer(row) => customers.push(CustomerRecord::from_row(row)),
            Resolution::EmailOnly => email_only.push(EmailOnlyRecord {
                billing_email: group.email.clone(),
            }),
        }
    }

    tracing::debug!(
        "Resolved {} customers and {} email-only placeholders",
        customers.len(),
        email_only.len()
    );
    (customers, email_only)
}
