pub mod auth;
pub mod customers;
pub mod health;
pub mod metrics;
pub mod shared;
pub mod stays;
pub mod travels;
pub mod users;
