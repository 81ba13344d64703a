use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use lq_store::QueueStore;

use crate::config::DEFAULT_MAX_BODY_BYTES;
use crate::handler;

/// Build the router with the default body limit.
pub fn build_router(store: Arc<QueueStore>) -> Router {
    build_router_with_limit(store, DEFAULT_MAX_BODY_BYTES)
}

/// Build the router for every linequeue endpoint.
///
/// Paths and methods outside the table below answer `404` with an empty body.
///
/// | Path | Methods |
/// |---|---|
/// | `/` | `GET`, `DELETE` |
/// | `/:topic` | `GET`, `PUT`, `POST`, `DELETE` |
/// | `/:topic/shift` | `POST` |
/// | `/:topic/to/:dest` | `POST` |
pub fn build_router_with_limit(store: Arc<QueueStore>, max_body_bytes: usize) -> Router {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .delete(handler::clear_all)
                .fallback(handler::not_found),
        )
        .route(
            "/:topic",
            get(handler::read)
                .put(handler::replace)
                .post(handler::push)
                .delete(handler::delete)
                .fallback(handler::not_found),
        )
        .route(
            "/:topic/shift",
            post(handler::shift).fallback(handler::not_found),
        )
        .route(
            "/:topic/to/:dest",
            post(handler::transfer).fallback(handler::not_found),
        )
        .fallback(handler::not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
