//! Shared helpers for HTTP-level tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use docvault::config::{Config, DatabaseConfig, StorageConfig};
use docvault::db::Database;
use docvault::storage::LocalBlobStore;
use docvault::{create_router, AppState};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "----docvault-test-boundary";

/// Router backed by a throwaway database and upload directory.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    pub upload_dir: PathBuf,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let upload_dir = temp_dir.path().join("uploads");
        let db_path = temp_dir.path().join("docvault.db");

        let config = Config {
            database: DatabaseConfig {
                path: db_path.to_string_lossy().into_owned(),
            },
            storage: StorageConfig {
                upload_dir: upload_dir.to_string_lossy().into_owned(),
                ..Default::default()
            },
            ..Default::default()
        };

        let db = Database::new(&config.database.path)
            .await
            .expect("Failed to open database");
        db.run_migrations().await.expect("Failed to run migrations");

        let state = AppState {
            db,
            config: Arc::new(config),
            blobs: Arc::new(LocalBlobStore::new(&upload_dir)),
        };

        Self {
            router: create_router(state.clone()),
            state,
            upload_dir,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request and collect the body.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    pub async fn json(&self, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, bytes) = self.send(request).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// POST a single `file` part to the upload endpoint.
    pub async fn upload(&self, filename: &str, content_type: &str, data: &[u8]) -> (StatusCode, Value) {
        let body = multipart_body("file", filename, content_type, data);
        self.upload_raw(body).await
    }

    pub async fn upload_raw(&self, body: Vec<u8>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/documents/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, bytes) = self.send(request).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    /// Number of files currently in the upload directory.
    pub fn blob_count(&self) -> usize {
        std::fs::read_dir(&self.upload_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Build a multipart/form-data body with one file part.
#[allow(dead_code)]
pub fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// PDF-looking payload of exactly `len` bytes.
#[allow(dead_code)]
pub fn pdf_payload(len: usize) -> Vec<u8> {
    let mut data = b"%PDF-1.4\n".to_vec();
    data.resize(len, 0);
    for (i, byte) in data.iter_mut().enumerate().skip(9) {
        *byte = (i % 251) as u8;
    }
    data
}
