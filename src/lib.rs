pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::{router, AppState};
pub use config::{toml_config::TomlConfig, CliConfig};
pub use crate::core::{ip_lookup::IpLookupClient, phone::PhoneLookup, username::UsernameSearch};
pub use utils::error::{LookupError, Result};
