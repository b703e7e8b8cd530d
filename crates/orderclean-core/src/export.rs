use polars::prelude::*;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Serialize;
use tracing::debug;

use crate::errors::ExportError;
use crate::model::{CellValue, CleanedTable};
use crate::schema::OUTPUT_SHEET;

/// Encodes a cleaned table as an in-memory `.xlsx` workbook: a bold header
/// row followed by one row per table row.
pub fn write_xlsx(table: &CleanedTable) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet().set_name(OUTPUT_SHEET)?;

    for (col, name) in table.columns().iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)?;
        worksheet.write_string_with_format(0, col, name.as_str(), &header_format)?;
    }

    for (index, row) in table.rows().iter().enumerate() {
        let row_num = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (col, cell) in row.iter().enumerate() {
            let col = u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)?;
            match cell {
                CellValue::Text(value) => {
                    worksheet.write_string(row_num, col, value.as_str())?;
                }
                CellValue::Integer(value) => {
                    worksheet.write_number(row_num, col, *value as f64)?;
                }
                CellValue::Float(value) => {
                    worksheet.write_number(row_num, col, *value)?;
                }
                CellValue::Empty => {}
            }
        }
    }

    let buffer = workbook.save_to_buffer()?;
    debug!(rows = table.height(), bytes = buffer.len(), "encoded workbook");
    Ok(buffer)
}

impl CleanedTable {
    /// Every column as a nullable string column, blanks as nulls.
    pub fn to_dataframe(&self) -> Result<DataFrame, ExportError> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.columns().len());
        for (index, name) in self.columns().iter().enumerate() {
            let values: Vec<Option<String>> = self
                .rows()
                .iter()
                .map(|row| match &row[index] {
                    CellValue::Empty => None,
                    cell => Some(cell.to_string()),
                })
                .collect();
            let utf8: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();
            columns.push(Series::new(name.as_str().into(), utf8).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}

/// The first rows of a cleaned table, for display.
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Preview {
    pub fn of(table: &CleanedTable, limit: usize) -> Self {
        Self {
            columns: table.columns().to_vec(),
            rows: table.rows().iter().take(limit).cloned().collect(),
        }
    }
}
