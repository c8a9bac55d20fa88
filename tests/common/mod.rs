#![allow(dead_code)]

use anyhow::Result;
use std::path::{Path, PathBuf};
use woo_order_etl::utils::diagnostics::Diagnostics;
use woo_order_etl::{EtlEngine, EtlSettings, LocalStorage, OrderExportPipeline, RunReport};

pub const HEADER: &str = "order_id,order_date,order_status,order_total,payment_method,\
billing_first_name,billing_last_name,billing_email,billing_phone,billing_address_1,\
billing_address_2,billing_city,billing_state,billing_postcode,billing_country,\
shipping_first_name,shipping_last_name,shipping_address_1,shipping_address_2,\
shipping_city,shipping_state,shipping_postcode,shipping_country,customer_note";

/// Writes `content` as the input export and runs the full pipeline into `<dir>/out`.
pub fn run_export(dir: &Path, content: &[u8]) -> Result<RunReport> {
    let input = dir.join("export.csv");
    std::fs::write(&input, content)?;
    run_file(&input, &dir.join("out"))
}

pub fn run_file(input: &Path, out: &Path) -> Result<RunReport> {
    let settings = EtlSettings {
        input_path: input.display().to_string(),
        output_dir: out.display().to_string(),
        ..EtlSettings::default()
    };
    let storage = LocalStorage::new(settings.output_dir.clone());
    let pipeline = OrderExportPipeline::new(storage, settings)?;
    let engine = EtlEngine::new(pipeline);
    Ok(engine.run_with(Diagnostics::silent())?)
}

pub fn out_path(dir: &Path, name: &str) -> PathBuf {
    dir.join("out").join(name)
}

/// Rows of an output table keyed by column name, header excluded.
pub fn read_output(dir: &Path, name: &str) -> Result<Vec<Vec<(String, String)>>> {
    let mut reader = csv::Reader::from_path(out_path(dir, name))?;
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect(),
        );
    }
    Ok(rows)
}

pub fn column(rows: &[Vec<(String, String)>], name: &str) -> Vec<String> {
    rows.iter()
        .map(|row| {
            row.iter()
                .find(|(h, _)| h == name)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        })
        .collect()
}

/// Builds one export line from `(column, value)` pairs; unspecified columns stay empty.
pub fn line(values: &[(&str, &str)]) -> String {
    HEADER
        .split(',')
        .map(|col| {
            let value = values
                .iter()
                .find(|(c, _)| *c == col)
                .map(|(_, v)| *v)
                .unwrap_or("");
            if value.contains(',') || value.contains('"') {
                format!("\"{}\"", value.replace('"', "\"\""))
            } else {
                value.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

pub fn export(lines: &[String]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for l in lines {
        out.push_str(l);
        out.push('\n');
    }
    out
}
