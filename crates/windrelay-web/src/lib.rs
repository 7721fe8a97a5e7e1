//! # windrelay-web
//!
//! HTTP relay server for wind speed readings.
//!
//! This crate provides:
//! - The `POST /wind-speed` endpoint that forwards readings to the serial sink
//! - CORS pre-flight handling for browser clients
//! - JSON error bodies for every failure
//! - A `serve` entry point with graceful shutdown
//!
//! ## Usage
//!
//! ```rust,ignore
//! use windrelay_web::{serve, RelayState};
//!
//! let state = Arc::new(RelayState::new(sink.clone()));
//! let listener = TcpListener::bind("0.0.0.0:5000").await?;
//! serve(listener, state, shutdown_signal()).await?;
//! sink.close();
//! ```

pub mod error;
pub mod routes;
pub mod server;

// Re-exports
pub use error::ApiError;
pub use routes::create_router;
pub use server::serve;

use std::sync::Arc;

use windrelay_serial::LineSink;

/// Shared state for all route handlers.
///
/// Holds the only reference path to the serial sink. Handlers never touch
/// the device directly.
pub struct RelayState {
    pub sink: Arc<dyn LineSink>,
}

impl RelayState {
    pub fn new(sink: Arc<dyn LineSink>) -> Self {
        Self { sink }
    }
}

/// Type alias for shared state in Axum handlers.
pub type AppState = Arc<RelayState>;
