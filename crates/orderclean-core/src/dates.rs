use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// `DD-MM-YYYY`, the format written back into the Dispatch Date column.
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y";

static OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

static DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    // Slashed dates read month-first and fall back to day-first when the
    // month would be out of range.
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    // Two-digit years, after the four-digit layouts above.
    "%d-%m-%y %H:%M:%S",
    "%d-%m-%y %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%d/%m/%y %H:%M:%S",
    "%d/%m/%y %H:%M",
];

static DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    DISPLAY_FORMAT,
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d-%m-%y",
    "%m/%d/%y",
    "%d/%m/%y",
];

/// `%Y` also matches one to three digits; such years are a two-digit year
/// read through the wrong layout, never a real dispatch date.
const MIN_YEAR: i32 = 1000;

/// Parses a Dispatch Date cell in any of the layouts order exports use.
/// Timestamps keep the calendar date of their own offset.
pub fn parse_dispatch_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(date) = DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .and_then(|dt| four_digit_year(dt.date_naive()))
    {
        return Some(date);
    }
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| {
            DateTime::parse_from_str(trimmed, fmt)
                .ok()
                .and_then(|dt| four_digit_year(dt.date_naive()))
        })
        .or_else(|| {
            DATETIME_FORMATS.iter().find_map(|fmt| {
                NaiveDateTime::parse_from_str(trimmed, fmt)
                    .ok()
                    .and_then(|dt| four_digit_year(dt.date()))
            })
        })
        .or_else(|| {
            DATE_FORMATS.iter().find_map(|fmt| {
                NaiveDate::parse_from_str(trimmed, fmt)
                    .ok()
                    .and_then(four_digit_year)
            })
        })
}

fn four_digit_year(date: NaiveDate) -> Option<NaiveDate> {
    (date.year() >= MIN_YEAR).then_some(date)
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Strict inverse of [`format_display_date`].
pub fn parse_display_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DISPLAY_FORMAT)
        .ok()
        .and_then(four_digit_year)
}
