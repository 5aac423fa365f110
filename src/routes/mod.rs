// src/routes/mod.rs
pub mod chat;

use axum::{
    Router,
    routing::{get, post},
};
use chat::{chat_handler, method_not_allowed};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/api/chat", post(chat_handler).fallback(method_not_allowed))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new("public"))
        .layer(TraceLayer::new_for_http())
}
