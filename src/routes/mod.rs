//! Route tables and the assembled application router.

mod common;
mod person;

pub use common::common_routes;
pub use person::person_routes;

use crate::config::AppConfig;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Static origin allow-list for GET/POST/PUT/DELETE with any request header.
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Common and person routes behind CORS, request tracing and the body size limit.
pub fn app_router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(person_routes(state))
        .layer(RequestBodyLimitLayer::new(config.request_body_limit))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}
