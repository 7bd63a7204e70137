//! Listing types

use super::ids::{ListingId, StudentId};
use crate::error::{MarketError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Category assigned when a listing is published without one
pub const DEFAULT_CATEGORY: &str = "misc";

/// A for-sale item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique listing identifier
    pub id: ListingId,

    /// Short title
    pub title: String,

    /// Free-form description
    #[serde(rename = "desc", default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Asking price, never negative
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,

    /// Category name
    #[serde(default = "default_category", deserialize_with = "null_as_category")]
    pub category: String,

    /// Seller's student identifier
    pub student_id: StudentId,

    /// Public paths of the attached images and videos, in upload order
    #[serde(default, deserialize_with = "null_as_default")]
    pub media: Vec<String>,

    /// Creation timestamp (RFC 3339, UTC)
    pub created_at: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

// Older data files hold `null` where a value was never set (or a price was NaN)
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_category<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_category))
}

/// Data for publishing a new listing
#[derive(Debug, Clone, PartialEq)]
pub struct CreateListing {
    /// Short title, required
    pub title: String,
    /// Free-form description, may be empty
    pub description: String,
    /// Asking price
    pub price: f64,
    /// Category name
    pub category: String,
    /// Seller's student identifier, required
    pub student_id: StudentId,
    /// Public paths of already stored media
    pub media: Vec<String>,
}

/// Partial update of a listing
///
/// Fields holding a "falsy" value (empty text, a zero price, no media) are
/// ignored rather than applied, so a price can never be reset to zero
/// through an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateListing {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New price
    pub price: Option<f64>,
    /// New category
    pub category: Option<String>,
    /// Replacement media list
    pub media: Option<Vec<String>>,
}

impl UpdateListing {
    /// Apply the update to `listing` in place
    pub fn apply_to(self, listing: &mut Listing) {
        if let Some(title) = self.title.filter(|t| !t.is_empty()) {
            listing.title = title;
        }
        if let Some(description) = self.description.filter(|d| !d.is_empty()) {
            listing.description = description;
        }
        if let Some(price) = self.price.filter(|p| *p != 0.0 && !p.is_nan()) {
            listing.price = price;
        }
        if let Some(category) = self.category.filter(|c| !c.is_empty()) {
            listing.category = category;
        }
        if let Some(media) = self.media.filter(|m| !m.is_empty()) {
            listing.media = media;
        }
    }
}

/// Parse a price submitted as text
///
/// Blank input means "no price given". Anything that is not a finite,
/// non-negative number is rejected.
pub fn parse_price(raw: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let price: f64 = raw
        .parse()
        .map_err(|_| MarketError::invalid_input("Invalid price"))?;

    validate_price(price).map(Some)
}

/// Check that a numeric price is finite and non-negative
pub fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(MarketError::invalid_input("Invalid price"));
    }
    Ok(price)
}
