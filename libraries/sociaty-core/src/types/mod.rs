mod ids;
mod listing;
mod user;

pub use ids::{ListingId, StudentId, UserId};
pub use listing::{
    parse_price, validate_price, CreateListing, Listing, UpdateListing, DEFAULT_CATEGORY,
};
pub use user::{NewUser, PublicUser, User};
