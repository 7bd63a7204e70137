//! Listing queries and mutations

use crate::Document;
use chrono::{DateTime, SecondsFormat, Utc};
use sociaty_core::{
    validate_price, CreateListing, Listing, ListingFilter, ListingId, MarketError, Result,
    UpdateListing,
};

/// Get listings matching `filter`, in stored (newest first) order
pub fn query(doc: &Document, filter: &ListingFilter) -> Vec<Listing> {
    doc.listings
        .iter()
        .filter(|l| filter.matches(l))
        .cloned()
        .collect()
}

/// Get listing by ID
pub fn get_by_id(doc: &Document, id: ListingId) -> Option<&Listing> {
    doc.listings.iter().find(|l| l.id == id)
}

/// Allocate an ID for a listing created at `now`
///
/// IDs are the creation time in milliseconds. When that value is already
/// taken the next free value above the current maximum is used instead.
pub fn next_id(doc: &Document, now: DateTime<Utc>) -> ListingId {
    let candidate = ListingId::new(now.timestamp_millis());
    if get_by_id(doc, candidate).is_none() {
        return candidate;
    }

    doc.listings
        .iter()
        .map(|l| l.id)
        .max()
        .map_or(candidate, ListingId::next)
}

/// Publish a listing at the front of the collection
pub fn insert(doc: &mut Document, listing: CreateListing, now: DateTime<Utc>) -> Result<Listing> {
    if listing.title.is_empty() || listing.student_id.as_str().is_empty() {
        return Err(MarketError::invalid_input("Missing title or studentId"));
    }
    let price = validate_price(listing.price)?;

    let listing = Listing {
        id: next_id(doc, now),
        title: listing.title,
        description: listing.description,
        price,
        category: listing.category,
        student_id: listing.student_id,
        media: listing.media,
        created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    doc.listings.insert(0, listing.clone());

    Ok(listing)
}

/// Apply a partial update to the listing with `id`
pub fn update(doc: &mut Document, id: ListingId, update: UpdateListing) -> Result<Listing> {
    if let Some(price) = update.price {
        validate_price(price)?;
    }

    let listing = doc
        .listings
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or_else(|| MarketError::not_found("Listing", id.to_string()))?;

    update.apply_to(listing);
    Ok(listing.clone())
}

/// Remove the listing with `id`, returning whether it existed
pub fn delete(doc: &mut Document, id: ListingId) -> bool {
    let before = doc.listings.len();
    doc.listings.retain(|l| l.id != id);
    doc.listings.len() != before
}
