use crate::core::dates::{format_canonical, parse_order_date};
use crate::domain::model::{Diagnostic, InputRecord};
use crate::domain::ports::DiagnosticSink;
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// A cleaned row that passed classification, keyed by its normalized email.
#[derive(Debug, Clone)]
pub struct AdmittedRow {
    pub record: InputRecord,
    pub email: String,
    pub order_id: String,
    pub order_date: Option<NaiveDateTime>,
}

impl AdmittedRow {
    pub fn has_order(&self) -> bool {
        !self.order_id.is_empty()
    }

    pub fn canonical_date(&self) -> String {
        self.order_date
            .as_ref()
            .map(format_canonical)
            .unwrap_or_default()
    }

    pub fn field(&self, name: &str) -> &str {
        self.record.get(name)
    }
}

/// Admitted rows of one email, as indices into the ordered row list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailGroup {
    pub email: String,
    pub rows: Vec<usize>,
    pub occurrence_count: usize,
    pub order_count: usize,
}

/// Keeps admitted rows in input order and groups them by email.
///
/// Groups are listed in order of the email's first appearance.
#[derive(Debug, Default)]
pub struct EmailAggregator {
    rows: Vec<AdmittedRow>,
    groups: Vec<EmailGroup>,
    index: HashMap<String, usize>,
}

impl EmailAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(&mut self, email: String, record: InputRecord, sink: &mut dyn DiagnosticSink) {
        let raw_date = record.get("order_date").trim();
        let order_date = parse_order_date(raw_date);
        if order_date.is_none() && !raw_date.is_empty() {
            sink.report(Diagnostic::UnparseableDate {
                row: record.row_number,
                value: raw_date.to_string(),
            });
        }

        let row = AdmittedRow {
            order_id: record.get("order_id").trim().to_string(),
            order_date,
            email,
            record,
        };

        let group_idx = match self.index.get(&row.email) {
            Some(&idx) => idx,
            None => {
                self.groups.push(EmailGroup {
                    email: row.email.clone(),
                    rows: Vec::new(),
                    occurrence_count: 0,
                    order_count: 0,
                });
                self.index.insert(row.email.clone(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };

        let group = &mut self.groups[group_idx];
        group.rows.push(self.rows.len());
        group.occurrence_count += 1;
        if row.has_order() {
            group.order_count += 1;
        }
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[AdmittedRow] {
        &self.rows
    }

    pub fn groups(&self) -> &[EmailGroup] {
        &self.groups
    }

    pub fn group(&self, email: &str) -> Option<&EmailGroup> {
        self.index.get(email).map(|&idx| &self.groups[idx])
    }

    /// Rows of a group, in input order.
    pub fn group_rows<'a>(&'a self, group: &'a EmailGroup) -> impl Iterator<Item = &'a AdmittedRow> + 'a {
        group.rows.iter().map(move |&i| &self.rows[i])
    }

    pub fn single_occurrence_emails(&self) -> usize {
        self.groups.iter().filter(|g| g.occurrence_count == 1).count()
    }

    pub fn multi_order_emails(&self) -> usize {
        self.groups.iter().filter(|g| g.order_count > 1).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Header;
    use crate::utils::diagnostics::Diagnostics;
    use std::sync::Arc;

    fn header() -> Arc<Header> {
        Arc::new(Header::new(vec![
            "order_id".to_string(),
            "order_date".to_string(),
            "billing_email".to_string(),
        ]))
    }

    fn admit(agg: &mut EmailAggregator, sink: &mut Diagnostics, row: usize, order_id: &str, date: &str, email: &str) {
        let record = InputRecord::new(
            row,
            header(),
            vec![order_id.to_string(), date.to_string(), email.to_string()],
        );
        agg.admit(email.to_string(), record, sink);
    }

    #[test]
    fn test_groups_keep_input_order_and_counts() {
        let mut agg = EmailAggregator::new();
        let mut sink = Diagnostics::silent();
        admit(&mut agg, &mut sink, 1, "100", "2025-01-01", "a@example.com");
        admit(&mut agg, &mut sink, 2, "", "", "b@example.com");
        admit(&mut agg, &mut sink, 3, "101", "2025-02-01", "a@example.com");
        admit(&mut agg, &mut sink, 4, "  ", "", "a@example.com");

        let emails: Vec<&str> = agg.groups().iter().map(|g| g.email.as_str()).collect();
        assert_eq!(emails, vec!["a@example.com", "b@example.com"]);

        let a = agg.group("a@example.com").unwrap();
        assert_eq!(a.rows, vec![0, 2, 3]);
        assert_eq!(a.occurrence_count, 3);
        assert_eq!(a.order_count, 2);

        let b = agg.group("b@example.com").unwrap();
        assert_eq!(b.occurrence_count, 1);
        assert_eq!(b.order_count, 0);

        assert_eq!(agg.single_occurrence_emails(), 1);
        assert_eq!(agg.multi_order_emails(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unparseable_date_is_reported_once() {
        let mut agg = EmailAggregator::new();
        let mut sink = Diagnostics::silent();
        admit(&mut agg, &mut sink, 5, "100", "next tuesday", "a@example.com");

        assert_eq!(
            sink.entries(),
            &[Diagnostic::UnparseableDate {
                row: 5,
                value: "next tuesday".to_string()
            }]
        );
        assert_eq!(agg.rows()[0].canonical_date(), "");
    }
}
