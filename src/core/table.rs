use crate::domain::model::{Diagnostic, Header, InputRecord};
use crate::domain::ports::DiagnosticSink;
use crate::utils::error::{EtlError, Result};
use serde::Serialize;
use std::sync::Arc;

/// Parses decoded CSV text. Rows that fail to parse are reported and skipped.
pub fn read_table(
    text: &str,
    sink: &mut dyn DiagnosticSink,
) -> Result<(Arc<Header>, Vec<InputRecord>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header = Arc::new(Header::new(
        reader.headers()?.iter().map(str::to_string).collect(),
    ));

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // header is line 1
        let row_number = idx + 2;
        match result {
            Ok(record) => records.push(InputRecord::new(
                row_number,
                header.clone(),
                record.iter().map(str::to_string).collect(),
            )),
            // not expected for decoded text read flexibly
            Err(e) => sink.report(Diagnostic::RowSkipped {
                row: row_number,
                reason: e.to_string(),
            }),
        }
    }

    Ok((header, records))
}

/// Serializes rows with a header derived from the record type.
///
/// The header is written even when there are no rows.
pub fn write_rows<T: Serialize>(columns: &[&str], rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(columns)?;
    for row in rows {
        writer.serialize(row)?;
    }
    into_bytes(writer)
}

/// Writes rows verbatim under the original input header.
pub fn write_raw(header: &Header, records: &[InputRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header.names())?;
    for record in records {
        writer.write_record(record.values())?;
    }
    into_bytes(writer)
}

fn into_bytes(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}
