//! Sociaty Storage
//!
//! File-backed document store for the Sociaty marketplace.
//!
//! All records live in a single JSON document with a `users` array and a
//! `listings` array. Every operation re-reads the whole document, and every
//! mutation rewrites it.
//!
//! # Architecture
//!
//! - **Single Document**: `document` owns the on-disk format and atomic writes
//! - **Vertical Slicing**: `users` and `listings` own their rules and queries
//! - **Serialised Writes**: `JsonStore` holds a process-wide lock across each
//!   read-modify-write cycle
//!
//! # Example
//!
//! ```rust,no_run
//! use sociaty_storage::JsonStore;
//! use sociaty_core::MarketStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonStore::open("./db.json").await?;
//!
//! let listings = store.get_all_listings().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

pub mod document;

// Vertical slices
pub mod listings;
pub mod users;

pub use document::Document;
pub use error::StorageError;
pub use store::JsonStore;
