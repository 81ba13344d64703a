//! HTTP server for linequeue.
//!
//! Maps plain-text verbs onto a shared [`lq_store::QueueStore`]. Request
//! bodies are newline-separated lines; responses are a count, a single line,
//! or one line per result, each terminated by `\n`.

pub mod body;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{ServerConfig, DEFAULT_MAX_BODY_BYTES};
pub use error::{ServerError, ServerResult};
pub use router::{build_router, build_router_with_limit};
pub use server::LqServer;
