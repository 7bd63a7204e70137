/// Shared application state
use crate::services::{PasswordService, UploadStore};
use sociaty_storage::JsonStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub passwords: Arc<PasswordService>,
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    pub fn new(
        store: Arc<JsonStore>,
        passwords: Arc<PasswordService>,
        uploads: Arc<UploadStore>,
    ) -> Self {
        Self {
            store,
            passwords,
            uploads,
        }
    }
}
