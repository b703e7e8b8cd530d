//! Column selection and per-column normalisation of an order export.
//!
//! Everything here is a pure function of its input table.

use chrono::NaiveDate;

use crate::dates::{format_display_date, parse_dispatch_date, parse_display_date};
use crate::errors::{CleanError, OrderCleanError};
use crate::ingest::read_csv;
use crate::model::{CellValue, CleanedOrders, CleanedTable, DispatchDateRange, RawTable};
use crate::schema::{BUNDLE_SKU_CODE, DISPATCH_DATE, ITEM_SKU_CODE, REQUIRED_COLUMNS, TRACKING_NUMBER};

/// Checks that every `required` column is present and projects `raw` onto
/// them, in `required` order. Missing names are reported in `required` order.
pub fn validate(raw: &RawTable, required: &[&str]) -> Result<CleanedTable, CleanError> {
    let mut indices = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for name in required {
        match raw.column_index(name) {
            Some(index) => indices.push(index),
            None => missing.push((*name).to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(CleanError::MissingColumns { missing });
    }

    let rows = raw
        .rows()
        .iter()
        .map(|row| indices.iter().map(|&index| row[index].clone()).collect())
        .collect();
    let columns = required.iter().map(|name| (*name).to_string()).collect();

    Ok(CleanedTable::from_projection(columns, rows))
}

/// Applies the bundle fallback, tracking-number stringification and
/// dispatch-date normalisation. Columns absent from `table` are skipped.
pub fn clean(mut table: CleanedTable) -> CleanedTable {
    let bundle = table.column_index(BUNDLE_SKU_CODE);
    let item = table.column_index(ITEM_SKU_CODE);
    let tracking = table.column_index(TRACKING_NUMBER);
    let dispatch = table.column_index(DISPATCH_DATE);

    for row in table.rows_mut() {
        if let Some(bundle) = bundle {
            if is_blank_bundle(&row[bundle]) {
                let fallback = item.map_or(CellValue::Empty, |item| row[item].clone());
                row[bundle] = fallback;
            }
        }

        if let Some(tracking) = tracking {
            row[tracking] = stringify(&row[tracking]);
        }

        if let Some(dispatch) = dispatch {
            row[dispatch] = normalize_dispatch_date(&row[dispatch]);
        }
    }

    table
}

/// Earliest and latest Dispatch Date of an already cleaned table. Blank
/// cells are ignored; a table with none left is [`CleanError::NoValidDates`].
pub fn date_range(table: &CleanedTable) -> Result<DispatchDateRange, CleanError> {
    let dates: Vec<NaiveDate> = table
        .column(DISPATCH_DATE)
        .ok_or(CleanError::NoValidDates)?
        .filter_map(|cell| cell.as_text().and_then(parse_display_date))
        .collect();

    let start = dates.iter().min().copied().ok_or(CleanError::NoValidDates)?;
    let end = dates.iter().max().copied().ok_or(CleanError::NoValidDates)?;

    Ok(DispatchDateRange { start, end })
}

/// Reads, validates and cleans one uploaded export against
/// [`REQUIRED_COLUMNS`] and derives its date range and output name.
pub fn process(content: &[u8]) -> Result<CleanedOrders, OrderCleanError> {
    let raw = read_csv(content)?;
    let table = clean(validate(&raw, &REQUIRED_COLUMNS)?);
    let range = date_range(&table)?;
    let file_name = range.file_name();
    Ok(CleanedOrders {
        table,
        range,
        file_name,
    })
}

fn is_blank_bundle(cell: &CellValue) -> bool {
    match cell {
        CellValue::Empty => true,
        CellValue::Text(value) => value.is_empty() || value == " ",
        _ => false,
    }
}

fn stringify(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Text(_) => cell.clone(),
        other => CellValue::Text(other.to_string()),
    }
}

fn normalize_dispatch_date(cell: &CellValue) -> CellValue {
    cell.as_text()
        .and_then(parse_dispatch_date)
        .map(|date| CellValue::Text(format_display_date(date)))
        .unwrap_or(CellValue::Empty)
}
