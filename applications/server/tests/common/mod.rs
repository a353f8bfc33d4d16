/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use catalog_server::{api, services::CoverStorage, AlbumStore, AppState};
use std::sync::Arc;
use tempfile::TempDir;

pub const HOST: &str = "localhost:5000";
pub const ORIGIN: &str = "http://localhost:5000";

/// Router over the seeded catalog with covers stored in a temp directory
pub async fn create_test_app() -> (Router, TempDir) {
    create_test_app_with_limit(5 * 1024 * 1024).await
}

pub async fn create_test_app_with_limit(max_bytes: u64) -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let covers = CoverStorage::new(temp_dir.path().to_path_buf(), max_bytes);
    covers.initialize().await.unwrap();

    let app_state = AppState::new(Arc::new(AlbumStore::seeded()), Arc::new(covers));
    (api::router(app_state), temp_dir)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::HOST, HOST)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::HOST, HOST)
        .body(Body::empty())
        .unwrap()
}

pub fn json(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, HOST)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Multipart request with a single file part
pub fn multipart(field: &str, file_name: &str, data: &[u8]) -> Request<Body> {
    let boundary = "catalog-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload-cover")
        .header(header::HOST, HOST)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
