//! Listing queries
//!
//! Filters are independent predicates evaluated over the whole collection;
//! every predicate that is set must hold for a listing to be returned.

use crate::types::Listing;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed price ranges offered by the listings page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBucket {
    /// `0-50`: price at most 50
    #[serde(rename = "0-50")]
    UpTo50,
    /// `50-200`: above 50, at most 200
    #[serde(rename = "50-200")]
    From50To200,
    /// `200+`: above 200
    #[serde(rename = "200+")]
    Over200,
}

impl PriceBucket {
    /// All buckets, cheapest first
    pub const ALL: [PriceBucket; 3] = [Self::UpTo50, Self::From50To200, Self::Over200];

    /// Query-string form of the bucket
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBucket::UpTo50 => "0-50",
            PriceBucket::From50To200 => "50-200",
            PriceBucket::Over200 => "200+",
        }
    }

    /// Whether `price` falls inside this bucket
    pub fn contains(&self, price: f64) -> bool {
        match self {
            PriceBucket::UpTo50 => price <= 50.0,
            PriceBucket::From50To200 => price > 50.0 && price <= 200.0,
            PriceBucket::Over200 => price > 200.0,
        }
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a price bucket name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPriceBucket(pub String);

impl fmt::Display for UnknownPriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown price bucket: {}", self.0)
    }
}

impl std::error::Error for UnknownPriceBucket {}

impl FromStr for PriceBucket {
    type Err = UnknownPriceBucket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // An unescaped `+` in a query string decodes to a space.
        match s.trim() {
            "0-50" => Ok(Self::UpTo50),
            "50-200" => Ok(Self::From50To200),
            "200+" | "200" => Ok(Self::Over200),
            other => Err(UnknownPriceBucket(other.to_string())),
        }
    }
}

/// Combinable predicates over listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Case-insensitive substring of `title + " " + description`
    pub search: Option<String>,
    /// Price range
    pub price: Option<PriceBucket>,
}

impl ListingFilter {
    /// Build a filter from raw query parameters
    ///
    /// Empty parameters and unknown price buckets apply no predicate.
    pub fn from_query(cat: Option<&str>, search: Option<&str>, price: Option<&str>) -> Self {
        Self {
            category: cat.filter(|c| !c.is_empty()).map(str::to_string),
            search: search.filter(|s| !s.is_empty()).map(str::to_string),
            price: price.and_then(|p| p.parse().ok()),
        }
    }

    /// Whether no predicate is set
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.search.is_none() && self.price.is_none()
    }

    /// Whether `listing` satisfies every predicate that is set
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(category) = &self.category {
            if listing.category != *category {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let haystack = format!("{} {}", listing.title, listing.description).to_lowercase();
            if !haystack.contains(&search.to_lowercase()) {
                return false;
            }
        }

        if let Some(bucket) = &self.price {
            if !bucket.contains(listing.price) {
                return false;
            }
        }

        true
    }

    /// Keep the listings that match, preserving order
    pub fn apply(&self, listings: Vec<Listing>) -> Vec<Listing> {
        if self.is_empty() {
            return listings;
        }
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }
}
