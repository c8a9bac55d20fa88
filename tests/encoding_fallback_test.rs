mod common;

use anyhow::Result;
use common::{export, line, out_path, run_export};
use tempfile::TempDir;
use woo_order_etl::utils::diagnostics::Diagnostics;
use woo_order_etl::{EtlEngine, EtlError, EtlSettings, LocalStorage, OrderExportPipeline};

const OUTPUTS: [&str; 6] = [
    "customers.csv",
    "orders.csv",
    "email_only_customers.csv",
    "duplicate_orders.csv",
    "email_order_counts.csv",
    "test_rows.csv",
];

fn accented_export() -> String {
    export(&[
        line(&[
            ("order_id", "7001"),
            ("order_date", "2025-04-01"),
            ("billing_email", "zoe@example.com"),
            ("billing_first_name", "Zoë"),
            ("billing_last_name", "Müller"),
            ("billing_city", "Zürich"),
            ("order_total", "€12,50"),
        ]),
        line(&[
            ("order_id", "7002"),
            ("order_date", "2025-04-02"),
            ("billing_email", "zoe@example.com"),
            ("billing_first_name", "Zoë"),
            ("customer_note", "Test"),
        ]),
    ])
}

/// Windows-1252 bytes for text that only uses characters of that code page.
fn to_windows_1252(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(text);
    assert!(!had_errors);
    bytes.into_owned()
}

#[test]
fn test_windows_1252_export_matches_utf8_export() -> Result<()> {
    let utf8_dir = TempDir::new()?;
    let cp1252_dir = TempDir::new()?;
    let text = accented_export();

    let utf8 = run_export(utf8_dir.path(), text.as_bytes())?;
    let cp1252 = run_export(cp1252_dir.path(), &to_windows_1252(&text))?;

    assert_eq!(utf8.summary.encoding, "UTF-8");
    assert_eq!(cp1252.summary.encoding, "windows-1252");

    for name in OUTPUTS {
        let a = std::fs::read(out_path(utf8_dir.path(), name))?;
        let b = std::fs::read(out_path(cp1252_dir.path(), name))?;
        assert_eq!(a, b, "{} differs", name);
    }

    // outputs are always UTF-8
    let customers = std::fs::read_to_string(out_path(cp1252_dir.path(), "customers.csv"))?;
    assert!(customers.contains("Zoë,Müller"));
    Ok(())
}

#[test]
fn test_undecodable_input_aborts_before_writing() -> Result<()> {
    let dir = TempDir::new()?;
    let input = dir.path().join("export.csv");
    std::fs::write(&input, to_windows_1252(&accented_export()))?;
    let out = dir.path().join("out");

    let settings = EtlSettings {
        input_path: input.display().to_string(),
        output_dir: out.display().to_string(),
        encodings: vec!["utf-8".to_string()],
        ..EtlSettings::default()
    };
    let pipeline = OrderExportPipeline::new(LocalStorage::new(settings.output_dir.clone()), settings)?;
    let err = EtlEngine::new(pipeline)
        .run_with(Diagnostics::silent())
        .unwrap_err();

    assert!(matches!(err, EtlError::DecodingError { ref tried, .. } if tried == &["UTF-8"]));
    assert!(!out.exists());
    Ok(())
}
