//! Storage Module
//!
//! The engine owns no durable state. Persistence is a collaborator behind
//! the [`TopicStore`] trait (read-one, write-one, append-event, list); the
//! in-memory implementation backs tests and ephemeral embeddings.

mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::topic::{ReviewEvent, TopicLog};

/// Storage collaborator contract for topic logs and their audit trail.
///
/// Each method must be individually atomic. The lifecycle engine serializes
/// its read-modify-write sequences behind its own writer gate, so stores do
/// not need cross-call transactions; an embedding that writes to the store
/// without going through one engine must provide its own per-(user, topic,
/// kind) serialization or risk losing updates last-write-wins.
pub trait TopicStore: Send + Sync {
    /// Fetch the log for an exact (user, topic, kind) tuple.
    fn get(&self, user_id: &str, topic_id: &str, topic_kind: &str) -> Result<Option<TopicLog>>;

    /// Fetch a user's log for a topic regardless of kind.
    ///
    /// Recall tests identify the topic only; the first match in insertion
    /// order wins.
    fn find_topic(&self, user_id: &str, topic_id: &str) -> Result<Option<TopicLog>>;

    /// Insert or replace a log, keyed by its id.
    fn put(&self, log: &TopicLog) -> Result<()>;

    /// Append an immutable review event.
    fn append_event(&self, event: &ReviewEvent) -> Result<()>;

    /// All logs for a user, active or not, in insertion order.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<TopicLog>>;

    /// Events for one log, oldest first.
    fn events_for(&self, topic_log_id: &str) -> Result<Vec<ReviewEvent>>;
}
