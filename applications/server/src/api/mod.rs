/// API route modules
pub mod accounts;
pub mod form;
pub mod health;
pub mod listings;
