use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orderclean_core::{CleanError, ExportError, OrderCleanError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Clean(#[from] OrderCleanError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut missing_columns = None;
        let (status, code, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Clean(OrderCleanError::Ingest(err)) => {
                (StatusCode::BAD_REQUEST, "UNREADABLE_FILE", err.to_string())
            }
            ApiError::Clean(OrderCleanError::Clean(err)) => match err {
                CleanError::MissingColumns { missing } => {
                    missing_columns = Some(missing.clone());
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "MISSING_COLUMNS",
                        err.to_string(),
                    )
                }
                CleanError::NoValidDates => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "NO_VALID_DATES",
                    err.to_string(),
                ),
            },
            ApiError::Export(err) => {
                tracing::error!(error = %err, "workbook export failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(missing) = missing_columns {
            body["missing"] = json!(missing);
        }

        (status, axum::Json(body)).into_response()
    }
}
