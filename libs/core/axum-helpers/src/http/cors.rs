use axum::http::{HeaderValue, Method, header};
use core_config::cors::CorsConfig;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Builds the CORS layer for the configured client origins.
///
/// With no origins configured this falls back to [`create_permissive_cors_layer`].
///
/// # Errors
/// Returns `InvalidInput` when an origin is not a valid header value.
pub fn create_cors_layer(config: &CorsConfig) -> io::Result<CorsLayer> {
    if config.is_permissive() {
        tracing::warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        return Ok(create_permissive_cors_layer());
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    tracing::info!(origins = ?config.allowed_origins, "CORS configured");

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

/// Allows any origin, method and header, like a bare `cors()` middleware.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
