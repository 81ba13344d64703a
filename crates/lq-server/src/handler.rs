//! Request handlers: one per verb/path pair.
//!
//! Handlers that accept an optional body pick between two store calls: an
//! empty body (or one holding only blank lines) selects the whole-queue form.

use std::sync::Arc;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use tracing::debug;

use lq_store::QueueStore;

use crate::body::{parse_lines, render_count, render_line, render_lines, render_listing};

pub type StoreState = State<Arc<QueueStore>>;

/// The `:topic` segment of a request path.
///
/// A segment that does not percent-decode to UTF-8 cannot name a topic, so
/// the request is answered like an unrouted path: `404` with an empty body.
pub struct Topic(pub String);

/// The `:topic` and `:dest` segments of a `/:topic/to/:dest` path.
pub struct TopicPair(pub String, pub String);

fn unroutable(rejection: PathRejection) -> StatusCode {
    debug!(%rejection, "unroutable path");
    StatusCode::NOT_FOUND
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Topic {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(topic) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(unroutable)?;
        Ok(Self(topic))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for TopicPair {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((from, to)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(unroutable)?;
        Ok(Self(from, to))
    }
}

/// `GET /`: non-empty topics with their counts.
pub async fn list(State(store): StoreState) -> String {
    let listing = store.list();
    debug!(topics = listing.len(), "list");
    render_listing(&listing)
}

/// `DELETE /`: drop every topic.
pub async fn clear_all(State(store): StoreState) -> String {
    let cleared = store.clear_all();
    debug!(cleared, "clear all");
    render_count(cleared)
}

/// `GET /:topic`: the whole queue, or those body lines present in it.
pub async fn read(State(store): StoreState, Topic(topic): Topic, body: Bytes) -> String {
    let lines = parse_lines(&body);
    let found = if lines.is_empty() {
        store.read_all(&topic)
    } else {
        store.read_matching(&topic, &lines)
    };
    debug!(%topic, requested = lines.len(), found = found.len(), "read");
    render_lines(&found)
}

/// `PUT /:topic`: replace the queue with the body lines.
pub async fn replace(State(store): StoreState, Topic(topic): Topic, body: Bytes) -> String {
    let size = store.replace(&topic, parse_lines(&body));
    debug!(%topic, size, "replace");
    render_count(size)
}

/// `POST /:topic`: append the body lines.
pub async fn push(State(store): StoreState, Topic(topic): Topic, body: Bytes) -> String {
    let inserted = store.push(&topic, parse_lines(&body));
    debug!(%topic, inserted, "push");
    render_count(inserted)
}

/// `DELETE /:topic`: clear the queue, or remove just the body lines.
pub async fn delete(State(store): StoreState, Topic(topic): Topic, body: Bytes) -> String {
    let lines = parse_lines(&body);
    let removed = if lines.is_empty() {
        store.clear(&topic)
    } else {
        store.delete_lines(&topic, &lines)
    };
    debug!(%topic, removed, "delete");
    render_count(removed)
}

/// `POST /:topic/shift`: pop the oldest line.
pub async fn shift(State(store): StoreState, Topic(topic): Topic) -> String {
    let line = store.shift(&topic);
    debug!(%topic, hit = line.is_some(), "shift");
    render_line(line)
}

/// `POST /:topic/to/:dest`: shift one line over, or move the body lines.
pub async fn transfer(
    State(store): StoreState,
    TopicPair(from, to): TopicPair,
    body: Bytes,
) -> String {
    let lines = parse_lines(&body);
    if lines.is_empty() {
        let line = store.shift_over(&from, &to);
        debug!(%from, %to, hit = line.is_some(), "shift over");
        render_line(line)
    } else {
        let moved = store.move_lines(&from, &to, &lines);
        debug!(%from, %to, requested = lines.len(), moved = moved.len(), "move");
        render_lines(&moved)
    }
}

/// Anything unrouted: `404` with an empty body.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
