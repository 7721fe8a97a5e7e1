//! HTTP routes for the relay.
//!
//! Only one data endpoint exists. Everything else is either a CORS
//! pre-flight or a 404.

pub mod wind_speed;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{error::ApiError, AppState};

/// Create the Axum router.
///
/// - `POST /wind-speed` - relay a reading to the serial sink
/// - `OPTIONS *` - pre-flight, 204 with no body
/// - anything else - 404 `{"error":"not_found"}`
///
/// Every response carries the CORS headers. Request bodies are not size
/// limited, so any payload reaches the JSON parser.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/wind-speed",
            post(wind_speed::post_wind_speed)
                .options(preflight)
                .fallback(not_found),
        )
        .fallback(fallback)
        .layer(DefaultBodyLimit::disable())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handler for `OPTIONS` on any path.
async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Router fallback: pre-flight for `OPTIONS`, 404 for the rest.
async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        preflight().await.into_response()
    } else {
        ApiError::NotFound.into_response()
    }
}
