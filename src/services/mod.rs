pub mod analytics;
pub mod auth;
pub mod costs;
pub mod customers;
pub mod measurements;
pub mod orders;
pub mod outfits;
pub mod payments;
pub mod shops;
pub mod tailors;
