//! In-memory registry of named queues of unique, insertion-ordered lines.
//!
//! A queue belongs to a *topic* and holds text lines. A line appears at most
//! once per queue, and lines iterate in the order they were first inserted.
//!
//! # Architecture
//!
//! - [`LineSet`] is the ordered unique collection: a plain data structure
//!   with hash-based membership and stable ordering.
//! - [`Queue`] wraps one `LineSet` in a mutex scoped to that topic.
//! - [`TopicDirectory`] maps topic names to queues. The map is an immutable
//!   snapshot replaced by compare-and-swap, so structural changes never wait
//!   on a queue lock.
//! - [`QueueStore`] exposes the line-level operations (push, delete, shift,
//!   move, ...) and owns the locking discipline: at most one queue lock is
//!   held at any time.
//! - [`TopicCount`] is one row of the sorted, non-empty index listing.
//!
//! # Consistency
//!
//! Within one queue, operations are serialized by that queue's lock. There
//! is no ordering across topics. Moves are two-phase and a moved line is
//! briefly in neither queue. Operations racing with a `replace` or removal
//! of their topic may act on a detached queue, and then their effect is lost.
//! Empty topics stay in the directory until they are removed; they are only
//! hidden from the listing.

pub mod directory;
pub mod line_set;
pub mod listing;
pub mod queue;
pub mod store;

pub use directory::TopicDirectory;
pub use line_set::LineSet;
pub use listing::TopicCount;
pub use queue::Queue;
pub use store::QueueStore;
