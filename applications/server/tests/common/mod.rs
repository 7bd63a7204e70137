/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use sociaty_server::{
    config::{PasswordStorage, ServerConfig},
    create_router,
    services::{PasswordService, UploadStore},
    state::AppState,
};
use sociaty_storage::JsonStore;
use std::sync::Arc;
use tempfile::TempDir;

pub const BOUNDARY: &str = "----sociaty-test-boundary";

/// A router over a throwaway data directory
pub struct TestApp {
    pub router: Router,
    pub store: Arc<JsonStore>,
    pub config: ServerConfig,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(customize: impl FnOnce(&mut ServerConfig)) -> Self {
        let temp_dir = TempDir::new().unwrap();

        let mut config = ServerConfig::default();
        config.storage.database_path = temp_dir.path().join("db.json");
        config.storage.upload_dir = temp_dir.path().join("uploads");
        config.storage.public_dir = temp_dir.path().join("public");
        config.auth.password_storage = PasswordStorage::Plaintext;
        config.auth.bcrypt_cost = 4;
        customize(&mut config);

        std::fs::create_dir_all(&config.storage.public_dir).unwrap();

        let store = Arc::new(JsonStore::open(&config.storage.database_path).await.unwrap());
        let uploads = UploadStore::new(config.storage.upload_dir.clone(), config.uploads.max_files);
        uploads.initialize().await.unwrap();
        let passwords = PasswordService::new(config.auth.password_storage, config.auth.bcrypt_cost);

        let app_state = AppState::new(Arc::clone(&store), Arc::new(passwords), Arc::new(uploads));
        let router = create_router(app_state, &config);

        Self {
            router,
            store,
            config,
            _temp_dir: temp_dir,
        }
    }
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// One part of a multipart body: `(field, file name, content)`
pub type Part<'a> = (&'a str, Option<&'a str>, &'a str);

pub fn multipart_request(method: &str, uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n",
                    name, file_name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
