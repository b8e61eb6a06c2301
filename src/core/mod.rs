pub mod classify;
pub mod ip_cache;
pub mod ip_lookup;
pub mod links;
pub mod phone;
pub mod search;
pub mod username;
pub mod variants;

pub use crate::domain::ports::{ConfigProvider, SearchBackend};
pub use crate::utils::error::Result;
