//! API-key gate shared by every protected plugin.

pub mod api_key;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repo;

pub use middleware::{require_api_key, Principal, API_KEY_HEADER};
