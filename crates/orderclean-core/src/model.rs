use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::dates::format_display_date;
use crate::errors::IngestError;
use crate::schema::{NA_MARKERS, OUTPUT_EXTENSION, OUTPUT_PREFIX};

/// A loosely typed cell as read from the order export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Empty,
}

impl CellValue {
    /// Types a raw CSV field the way the export reader does: NA markers become
    /// `Empty`, plain integers and decimals become numbers, everything else is
    /// kept verbatim. Integers that overflow `i64` or carry a leading zero stay
    /// text so no digits are lost.
    pub fn infer(raw: &str) -> Self {
        if NA_MARKERS.contains(&raw) {
            return CellValue::Empty;
        }

        if is_plain_integer(raw) {
            return match raw.parse::<i64>() {
                Ok(value) => CellValue::Integer(value),
                Err(_) => CellValue::Text(raw.to_string()),
            };
        }

        if is_decimal(raw) {
            if let Ok(value) = raw.parse::<f64>() {
                if value.is_finite() {
                    return CellValue::Float(value);
                }
            }
        }

        CellValue::Text(raw.to_string())
    }

    /// Like [`CellValue::infer`] but never parses numbers: NA markers become
    /// `Empty` and every other field is kept as written.
    pub fn infer_text(raw: &str) -> Self {
        if NA_MARKERS.contains(&raw) {
            CellValue::Empty
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(value) => f.write_str(value),
            CellValue::Integer(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::infer(value)
    }
}

fn is_plain_integer(raw: &str) -> bool {
    let digits = raw.strip_prefix(&['-', '+'][..]).unwrap_or(raw);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && !(digits.len() > 1 && digits.starts_with('0'))
}

fn is_decimal(raw: &str) -> bool {
    raw.bytes().any(|b| b.is_ascii_digit())
        && raw.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
        && raw
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
}

/// The uploaded file's parsed contents before any column filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, IngestError> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(IngestError::DataRow {
                line: index as u64 + 2,
                message: format!("expected {} fields, found {}", columns.len(), row.len()),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first column carrying `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }
}

/// A raw table projected onto the required columns and normalised.
///
/// Only [`crate::validate`] builds one, so its columns always equal the
/// requested list in the requested order.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl CleanedTable {
    pub(crate) fn from_projection(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<CellValue>] {
        &mut self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue> + '_> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }
}

/// Earliest and latest dispatch date of a cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchDateRange {
    #[serde(serialize_with = "serialize_display_date")]
    pub start: NaiveDate,
    #[serde(serialize_with = "serialize_display_date")]
    pub end: NaiveDate,
}

impl DispatchDateRange {
    pub fn start_label(&self) -> String {
        format_display_date(self.start)
    }

    pub fn end_label(&self) -> String {
        format_display_date(self.end)
    }

    /// Suggested name for the exported workbook.
    pub fn file_name(&self) -> String {
        format!(
            "{OUTPUT_PREFIX}_{}_to_{}.{OUTPUT_EXTENSION}",
            self.start_label(),
            self.end_label()
        )
    }
}

impl fmt::Display for DispatchDateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start_label(), self.end_label())
    }
}

fn serialize_display_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_display_date(*date))
}

#[derive(Debug, Clone)]
pub struct CleanedOrders {
    pub table: CleanedTable,
    pub range: DispatchDateRange,
    pub file_name: String,
}
