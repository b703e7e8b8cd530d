use csv::ReaderBuilder;
use tracing::debug;

use crate::errors::IngestError;
use crate::model::{CellValue, RawTable};
use crate::schema::TEXT_COLUMNS;

/// Reads a comma-separated order export with a header row.
///
/// Columns the cleaner rewrites keep their field text verbatim; the rest are
/// typed with [`CellValue::infer`]. Short rows are padded with
/// [`CellValue::Empty`]; rows wider than the header are rejected.
pub fn read_csv(content: &[u8]) -> Result<RawTable, IngestError> {
    let text = std::str::from_utf8(content).map_err(|source| IngestError::Encoding { source })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header = reader.headers()?.clone();
    if header.is_empty() {
        return Err(IngestError::MissingHeader);
    }
    let width = header.len();
    let columns: Vec<String> = header.iter().map(str::to_string).collect();
    let text_columns: Vec<bool> = columns
        .iter()
        .map(|name| TEXT_COLUMNS.contains(&name.as_str()))
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > width {
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            return Err(IngestError::DataRow {
                line,
                message: format!("expected {width} fields, found {}", record.len()),
            });
        }
        let mut row: Vec<CellValue> = record
            .iter()
            .zip(&text_columns)
            .map(|(raw, &is_text)| {
                if is_text {
                    CellValue::infer_text(raw)
                } else {
                    CellValue::infer(raw)
                }
            })
            .collect();
        row.resize(width, CellValue::Empty);
        rows.push(row);
    }

    debug!(columns = width, rows = rows.len(), "read order export");
    RawTable::new(columns, rows)
}
