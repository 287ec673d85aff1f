//! API module for HTTP and WebSocket endpoints
//!
//! REST endpoints for the scoring client plus a WebSocket live feed.

pub mod error;
pub mod http;
pub mod rest;
pub mod websocket;

pub use error::ApiError;
pub use http::create_router;
pub use websocket::AppState;
