mod common;

use anyhow::Result;
use common::{column, export, line, read_output, run_export, HEADER};
use tempfile::TempDir;

#[test]
fn test_standalone_test_words_are_quarantined() -> Result<()> {
    let dir = TempDir::new()?;
    let content = export(&[
        line(&[
            ("order_id", "1"),
            ("billing_email", "one@example.com"),
            ("customer_note", "This is a test"),
        ]),
        line(&[
            ("order_id", "2"),
            ("billing_email", "two@example.com"),
            ("customer_note", "testimonial order"),
        ]),
        line(&[
            ("order_id", "3"),
            ("billing_email", "three@example.com"),
            ("billing_address_2", "DONOTFILL"),
        ]),
        line(&[
            ("order_id", "4"),
            ("billing_email", "four@example.com"),
            ("customer_note", "This is a TEST order"),
        ]),
        line(&[
            ("order_id", "5"),
            ("billing_email", "five@example.com"),
            ("billing_last_name", "Contestant"),
        ]),
    ]);
    let report = run_export(dir.path(), content.as_bytes())?;

    let quarantined = read_output(dir.path(), "test_rows.csv")?;
    assert_eq!(column(&quarantined, "order_id"), vec!["1", "3", "4"]);
    assert_eq!(report.summary.rows_quarantined, 3);

    let orders = read_output(dir.path(), "orders.csv")?;
    assert_eq!(column(&orders, "order_id"), vec!["2", "5"]);
    Ok(())
}

#[test]
fn test_quarantine_keeps_original_columns_and_values() -> Result<()> {
    let dir = TempDir::new()?;
    let content = "order_id,billing_email,billing_first_name,billing_phone,utm_source\n\
                   9,QA@Example.com,Quinn,NULL,test\n\
                   10,real@example.com,Rae,NULL,newsletter\n";
    run_export(dir.path(), content.as_bytes())?;

    let raw = std::fs::read_to_string(dir.path().join("out").join("test_rows.csv"))?;
    assert_eq!(
        raw,
        "order_id,billing_email,billing_first_name,billing_phone,utm_source\n\
         9,QA@Example.com,Quinn,NULL,test\n"
    );

    let customers = read_output(dir.path(), "customers.csv")?;
    assert_eq!(column(&customers, "billing_email"), vec!["real@example.com"]);
    assert_eq!(column(&customers, "billing_phone"), vec![""]);
    Ok(())
}

#[test]
fn test_quarantined_rows_never_reach_customer_tables() -> Result<()> {
    let dir = TempDir::new()?;
    let content = export(&[
        line(&[
            ("order_id", "20"),
            ("order_date", "2025-01-01"),
            ("billing_email", "mixed@example.com"),
            ("billing_first_name", "Real"),
        ]),
        line(&[
            ("order_id", "21"),
            ("order_date", "2025-12-01"),
            ("billing_email", "mixed@example.com"),
            ("billing_first_name", "Test"),
        ]),
    ]);
    let report = run_export(dir.path(), content.as_bytes())?;

    let customers = read_output(dir.path(), "customers.csv")?;
    assert_eq!(column(&customers, "billing_first_name"), vec!["Real"]);
    let counts = read_output(dir.path(), "email_order_counts.csv")?;
    assert_eq!(column(&counts, "order_count"), vec!["1"]);
    assert_eq!(report.summary.duplicate_entries, 0);

    let quarantine = std::fs::read_to_string(dir.path().join("out").join("test_rows.csv"))?;
    assert!(quarantine.starts_with(HEADER));
    Ok(())
}
