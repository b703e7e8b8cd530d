use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use orderclean_core::schema::XLSX_MIME;
use orderclean_core::{process, write_xlsx, CleanedOrders, DispatchDateRange, Preview};
use serde::Serialize;
use tracing::{info, warn};

use super::error::{ApiError, ApiResult};
use super::AppState;

static INDEX_HTML: &str = include_str!("../../assets/index.html");

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub file_name: String,
    pub date_range: DispatchDateRange,
    pub row_count: usize,
    pub preview: Preview,
}

struct Upload {
    file_name: String,
    bytes: Bytes,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn healthz() -> &'static str {
    "ok"
}

/// POST /api/preview
///
/// Clean the uploaded export and return its date range, suggested file name
/// and the first rows of the cleaned table.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Json<PreviewResponse>> {
    let upload = read_upload(multipart).await?;
    let cleaned = clean_upload(&upload)?;

    Ok(Json(PreviewResponse {
        preview: Preview::of(&cleaned.table, state.preview_rows),
        row_count: cleaned.table.height(),
        date_range: cleaned.range,
        file_name: cleaned.file_name,
    }))
}

/// POST /api/export
///
/// Clean the uploaded export and answer with the workbook as an attachment.
pub async fn export(multipart: Multipart) -> ApiResult<Response> {
    let upload = read_upload(multipart).await?;
    let cleaned = clean_upload(&upload)?;
    let workbook = write_xlsx(&cleaned.table)?;

    info!(
        file_name = %cleaned.file_name,
        bytes = workbook.len(),
        "serving cleaned workbook"
    );

    let headers = [
        (header::CONTENT_TYPE, XLSX_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", cleaned.file_name),
        ),
    ];
    Ok((headers, workbook).into_response())
}

async fn read_upload(mut multipart: Multipart) -> ApiResult<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.csv").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        return Ok(Upload { file_name, bytes });
    }

    Err(ApiError::BadRequest(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}

fn clean_upload(upload: &Upload) -> ApiResult<CleanedOrders> {
    let digest = blake3::hash(&upload.bytes).to_hex().to_string();

    match process(&upload.bytes) {
        Ok(cleaned) => {
            info!(
                upload = %upload.file_name,
                digest = %digest,
                rows = cleaned.table.height(),
                range = %cleaned.range,
                "cleaned upload"
            );
            Ok(cleaned)
        }
        Err(err) => {
            warn!(upload = %upload.file_name, digest = %digest, error = %err, "rejected upload");
            Err(err.into())
        }
    }
}
