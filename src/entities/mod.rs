pub mod cloth;
pub mod cost;
pub mod customer;
pub mod measurement;
pub mod order;
pub mod payment;
pub mod shop;
pub mod tailor;
pub mod user;
