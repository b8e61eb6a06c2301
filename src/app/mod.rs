// HTTP front end: axum router, shared state and JSON error mapping.

pub mod routes;

use crate::core::ip_lookup::IpLookupClient;
use crate::core::phone::PhoneLookup;
use crate::core::search::DuckDuckGoClient;
use crate::core::username::UsernameSearch;
use crate::core::ConfigProvider;
use crate::utils::error::{LookupError, Result};
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

pub use routes::router;

pub struct AppState {
    pub username: UsernameSearch,
    pub ip: IpLookupClient,
    pub phone: PhoneLookup,
}

impl AppState {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let backend = DuckDuckGoClient::new(config)?;
        Ok(Self {
            username: UsernameSearch::new(Arc::new(backend)),
            ip: IpLookupClient::new(config)?,
            phone: PhoneLookup::new(),
        })
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::info!("Request rejected: {}", self);
        }
        (status, Json(self.to_payload())).into_response()
    }
}

impl From<JsonRejection> for LookupError {
    fn from(rejection: JsonRejection) -> Self {
        LookupError::InvalidRequestError {
            message: rejection.body_text(),
        }
    }
}
