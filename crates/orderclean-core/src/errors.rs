use polars::error::PolarsError;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("uploaded file is not valid UTF-8 text: {source}")]
    Encoding {
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("uploaded file has no header row")]
    MissingHeader,

    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    #[error("data row {line} invalid: {message}")]
    DataRow { line: u64, message: String },
}

impl From<csv::Error> for IngestError {
    fn from(source: csv::Error) -> Self {
        IngestError::Csv { source }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CleanError {
    #[error("missing columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("no row has a parseable Dispatch Date, so no date range can be derived")]
    NoValidDates,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("XLSX encoding failed: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),
}

#[derive(Debug, Error)]
pub enum OrderCleanError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Clean(#[from] CleanError),
}
