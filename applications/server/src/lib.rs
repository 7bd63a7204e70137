//! Sociaty Server Library
//!
//! HTTP backend for the campus marketplace: account registration and login,
//! listing publication with media uploads, and filtered browsing.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod router;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{PasswordStorage, ServerConfig};
pub use error::{Result, ServerError};
pub use router::create_router;
pub use services::{PasswordService, UploadStore};
pub use state::AppState;
