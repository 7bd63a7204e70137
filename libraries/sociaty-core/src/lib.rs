//! Sociaty Core
//!
//! Domain types, listing queries, and the store abstraction for the Sociaty
//! campus marketplace.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Listing` and their identifiers
//! - **Queries**: `ListingFilter` and the fixed `PriceBucket` ranges
//! - **Store Trait**: `MarketStore`, implemented by `sociaty-storage`
//! - **Error Handling**: Unified `MarketError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use sociaty_core::{ListingFilter, PriceBucket};
//!
//! let filter = ListingFilter {
//!     category: Some("books".to_string()),
//!     search: Some("calculus".to_string()),
//!     price: Some(PriceBucket::UpTo50),
//! };
//! assert!(!filter.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod filter;
pub mod storage;
pub mod types;

pub use error::{MarketError, Result};
pub use filter::{ListingFilter, PriceBucket};
pub use storage::MarketStore;
pub use types::{
    parse_price, validate_price, CreateListing, Listing, ListingId, NewUser, PublicUser,
    StudentId, UpdateListing, User, UserId, DEFAULT_CATEGORY,
};
