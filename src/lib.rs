pub mod config;
pub mod db;
pub mod fixtures;
pub mod http_error;
pub mod kernel;
pub mod pagination;
pub mod plugins;

pub use crate::db::*;
pub use crate::kernel::*;
