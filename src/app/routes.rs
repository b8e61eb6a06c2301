use crate::app::AppState;
use crate::domain::model::{IpRecord, PhoneRecord, UsernameReport};
use crate::utils::error::Result;
use crate::utils::validation::require_field;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const LIVENESS_TEXT: &str = "API Multiuso Activa";

#[derive(Debug, Deserialize)]
pub struct UsernameRequest {
    usuario: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IpRequest {
    ip: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhoneRequest {
    numero: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/buscar", post(search_username))
        .route("/ip", post(lookup_ip))
        .route("/telefono", post(lookup_phone))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

async fn index() -> &'static str {
    LIVENESS_TEXT
}

async fn search_username(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<UsernameRequest>, JsonRejection>,
) -> Result<Json<UsernameReport>> {
    let Json(body) = body?;
    let usuario = require_field("usuario", &body.usuario)?;
    Ok(Json(state.username.run(usuario).await))
}

async fn lookup_ip(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<IpRequest>, JsonRejection>,
) -> Result<Json<IpRecord>> {
    let Json(body) = body?;
    let ip = require_field("ip", &body.ip)?;
    Ok(Json(state.ip.lookup(ip).await?))
}

async fn lookup_phone(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<PhoneRequest>, JsonRejection>,
) -> Result<Json<PhoneRecord>> {
    let Json(body) = body?;
    let numero = require_field("numero", &body.numero)?;
    Ok(Json(state.phone.lookup(numero)?))
}
