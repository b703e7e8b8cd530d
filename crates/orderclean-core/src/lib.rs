pub mod cleaner;
pub mod dates;
pub mod errors;
pub mod export;
pub mod ingest;
pub mod model;
pub mod schema;

pub use cleaner::{clean, date_range, process, validate};
pub use errors::{CleanError, ExportError, IngestError, OrderCleanError};
pub use export::{write_xlsx, Preview};
pub use ingest::read_csv;
pub use model::{CellValue, CleanedOrders, CleanedTable, DispatchDateRange, RawTable};
pub use schema::REQUIRED_COLUMNS;
