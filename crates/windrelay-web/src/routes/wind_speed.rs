//! Wind speed relay endpoint.
//!
//! ### `POST /wind-speed`
//!
//! **Request:**
//! ```json
//! { "windSpeedKmh": 12.3 }
//! ```
//!
//! **Response:** `200 {"status":"ok"}` once the line `12.3\n` has been
//! written to the serial device.
//!
//! The body is read as raw bytes, so no `Content-Type` is required. An empty
//! body counts as `{}`.

use axum::{body::Bytes, extract::State, response::Json};
use serde::Serialize;
use tracing::info;

use windrelay_core::Reading;

use crate::{error::ApiError, AppState};

/// Success body.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

/// POST /wind-speed
pub async fn post_wind_speed(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StatusBody>, ApiError> {
    let reading = Reading::from_payload(&body)?;
    relay(&state, reading).await?;
    Ok(Json(StatusBody { status: "ok" }))
}

/// Forward one reading to the sink.
///
/// The write blocks on device I/O, so it runs on the blocking pool. The
/// write is not undone if the client goes away in the meantime.
pub async fn relay(state: &AppState, reading: Reading) -> Result<(), ApiError> {
    let sink = state.sink.clone();
    let line = reading.to_wire_line();

    tokio::task::spawn_blocking(move || sink.write_line(&line))
        .await
        .map_err(|e| ApiError::Serial(format!("serial writer task failed: {}", e)))??;

    info!("Relayed wind speed {}", reading);
    Ok(())
}
