use crate::{document, error::StorageError, listings, users, Document};
use async_trait::async_trait;
use chrono::Utc;
use sociaty_core::{
    CreateListing, Listing, ListingFilter, ListingId, MarketStore, NewUser, Result, StudentId,
    UpdateListing, User,
};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Store backed by a single JSON file
pub struct JsonStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Open the store at `path`, creating an empty document if none exists
    pub async fn open(path: impl Into<PathBuf>) -> std::result::Result<Self, StorageError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        if tokio::fs::try_exists(&path).await? {
            let doc = document::load(&path).await?;
            tracing::info!(
                path = %path.display(),
                users = doc.users.len(),
                listings = doc.listings.len(),
                "Opened store"
            );
        } else {
            document::save(&path, &Document::default()).await?;
            tracing::info!(path = %path.display(), "Initialised empty store");
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current document
    pub async fn snapshot(&self) -> Result<Document> {
        Ok(document::load(&self.path).await?)
    }

    /// Read, modify and rewrite the document under the write lock
    ///
    /// Nothing is written when `f` fails.
    async fn mutate<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> Result<T> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut doc = document::load(&self.path).await?;
        let value = f(&mut doc)?;
        document::save(&self.path, &doc).await?;

        Ok(value)
    }
}

#[async_trait]
impl MarketStore for JsonStore {
    // Users
    async fn get_all_users(&self) -> Result<Vec<User>> {
        let doc = self.snapshot().await?;
        Ok(users::get_all(&doc))
    }

    async fn find_user(&self, student_id: &StudentId) -> Result<Option<User>> {
        let doc = self.snapshot().await?;
        Ok(users::find_by_student_id(&doc, student_id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let user = self.mutate(move |doc| users::insert(doc, user)).await?;
        tracing::debug!(student_id = %user.student_id, "Stored user");
        Ok(user)
    }

    // Listings
    async fn get_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>> {
        let doc = self.snapshot().await?;
        Ok(listings::query(&doc, filter))
    }

    async fn get_listing(&self, id: ListingId) -> Result<Option<Listing>> {
        let doc = self.snapshot().await?;
        Ok(listings::get_by_id(&doc, id).cloned())
    }

    async fn create_listing(&self, listing: CreateListing) -> Result<Listing> {
        let now = Utc::now();
        let listing = self
            .mutate(move |doc| listings::insert(doc, listing, now))
            .await?;
        tracing::debug!(listing_id = %listing.id, "Stored listing");
        Ok(listing)
    }

    async fn update_listing(&self, id: ListingId, update: UpdateListing) -> Result<Listing> {
        self.mutate(move |doc| listings::update(doc, id, update))
            .await
    }

    async fn delete_listing(&self, id: ListingId) -> Result<bool> {
        self.mutate(move |doc| Ok(listings::delete(doc, id))).await
    }
}
