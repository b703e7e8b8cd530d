use std::path::Path;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use super::router;
use crate::config::ServerConfig;

const BOUNDARY: &str = "orderclean-test-boundary";

fn fixture(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../orderclean-core/tests/data")
        .join(name);
    std::fs::read(path).expect("read fixture")
}

fn app() -> Router {
    router(&ServerConfig {
        preview_rows: 2,
        ..ServerConfig::default()
    })
}

fn upload_request(uri: &str, field: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"orders.csv\"\r\nContent-Type: text/csv\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request builds")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn index_serves_upload_page() {
    let response = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Order Data Cleaning"));
    assert!(html.contains("/api/export"));
}

#[tokio::test]
async fn preview_returns_range_and_limited_rows() {
    let response = app()
        .oneshot(upload_request(
            "/api/preview",
            "file",
            &fixture("orders_export.csv"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["file_name"],
        "cleaned_orders_15-01-2024_to_05-03-2024.xlsx"
    );
    assert_eq!(body["date_range"]["start"], "15-01-2024");
    assert_eq!(body["date_range"]["end"], "05-03-2024");
    assert_eq!(body["row_count"], 4);
    assert_eq!(body["preview"]["columns"].as_array().unwrap().len(), 23);
    assert_eq!(body["preview"]["rows"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn export_returns_workbook_attachment() {
    let response = app()
        .oneshot(upload_request(
            "/api/export",
            "file",
            &fixture("orders_export.csv"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"cleaned_orders_15-01-2024_to_05-03-2024.xlsx\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"PK"), "xlsx is a zip container");
}

#[tokio::test]
async fn missing_columns_are_reported() {
    let response = app()
        .oneshot(upload_request(
            "/api/preview",
            "file",
            &fixture("orders_missing_columns.csv"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["code"], "MISSING_COLUMNS");
    assert_eq!(body["missing"], serde_json::json!(["COD", "Batch Code"]));
}

#[tokio::test]
async fn export_without_dates_is_rejected() {
    let response = app()
        .oneshot(upload_request(
            "/api/export",
            "file",
            &fixture("orders_no_dates.csv"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["code"], "NO_VALID_DATES");
}

#[tokio::test]
async fn unreadable_upload_is_a_bad_request() {
    let response = app()
        .oneshot(upload_request("/api/preview", "file", &[0xff, 0xfe, 0xfd]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "UNREADABLE_FILE");
}

#[tokio::test]
async fn upload_without_file_field_is_a_bad_request() {
    let response = app()
        .oneshot(upload_request(
            "/api/preview",
            "attachment",
            &fixture("orders_export.csv"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
}
