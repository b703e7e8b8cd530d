pub const ITEM_SKU_CODE: &str = "Item SKU Code";
pub const BUNDLE_SKU_CODE: &str = "Bundle SKU Code Number";
pub const TRACKING_NUMBER: &str = "Tracking Number";
pub const DISPATCH_DATE: &str = "Dispatch Date";

/// Columns an order export must carry; also the output column order.
pub const REQUIRED_COLUMNS: [&str; 23] = [
    "Sale Order Item Code",
    "Display Order Code",
    "COD",
    "Category",
    "Invoice Created",
    ITEM_SKU_CODE,
    "Channel Product Id",
    "Channel Name",
    "Total Price",
    "Selling Price",
    "Subtotal",
    "Packet Number",
    "Order Date as dd/mm/yyyy hh:MM:ss",
    "Sale Order Code",
    "Shipping provider",
    "Shipping Courier",
    "Shipping Package Code",
    TRACKING_NUMBER,
    DISPATCH_DATE,
    "Combination Description",
    BUNDLE_SKU_CODE,
    "Batch Code",
    "Seller SKU Code",
];

/// Columns read as text so their cells keep the exact characters of the export.
pub(crate) const TEXT_COLUMNS: [&str; 4] =
    [ITEM_SKU_CODE, BUNDLE_SKU_CODE, TRACKING_NUMBER, DISPATCH_DATE];

pub const PREVIEW_ROWS: usize = 20;

pub const OUTPUT_PREFIX: &str = "cleaned_orders";
pub const OUTPUT_EXTENSION: &str = "xlsx";
pub const OUTPUT_SHEET: &str = "Sheet1";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Cell spellings the order export uses for "no value".
pub(crate) const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];
