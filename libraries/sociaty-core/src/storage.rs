//! Store trait for users and listings

use crate::error::Result;
use crate::filter::ListingFilter;
use crate::types::{
    CreateListing, Listing, ListingId, NewUser, StudentId, UpdateListing, User,
};
use async_trait::async_trait;

/// Persistent store of marketplace records
///
/// Every call observes the latest persisted state; there is no caching
/// between calls.
#[async_trait]
pub trait MarketStore: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Get all users in registration order
    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// Find a user by student identifier
    async fn find_user(&self, student_id: &StudentId) -> Result<Option<User>>;

    /// Register a new user
    ///
    /// Fails with [`crate::MarketError::Duplicate`] when the student
    /// identifier is already taken.
    async fn create_user(&self, user: NewUser) -> Result<User>;

    // ========================================================================
    // Listings
    // ========================================================================

    /// Get listings matching `filter`, newest first
    async fn get_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>>;

    /// Get listing by ID
    async fn get_listing(&self, id: ListingId) -> Result<Option<Listing>>;

    /// Publish a new listing
    async fn create_listing(&self, listing: CreateListing) -> Result<Listing>;

    /// Apply a partial update to a listing
    ///
    /// Fails with [`crate::MarketError::NotFound`] when no listing has `id`.
    async fn update_listing(&self, id: ListingId, update: UpdateListing) -> Result<Listing>;

    /// Delete a listing, returning whether anything was removed
    async fn delete_listing(&self, id: ListingId) -> Result<bool>;

    /// Convenience wrapper over `get_listings` with no filter
    async fn get_all_listings(&self) -> Result<Vec<Listing>> {
        self.get_listings(&ListingFilter::default()).await
    }
}
