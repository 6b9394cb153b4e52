//! HTTP gateway: axum surface over the command gateway ([`crate::engine::Engine`]).
//!
//! Performs request/response marshalling only; all business logic and
//! status discrimination happens inside the engine.

mod error_response;
mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::engine::Engine;

pub use routes::SharedEngine;

/// Build the bare router with all routes registered, no middleware.
pub fn build_router() -> Router<SharedEngine> {
    routes::router()
}

/// Build the fully configured app: routes plus middleware, ready to serve.
pub fn build_app(engine: Arc<Engine>) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}
