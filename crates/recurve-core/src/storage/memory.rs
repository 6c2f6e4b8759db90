//! In-Memory Store
//!
//! Reference [`TopicStore`] used by the lifecycle tests and by embeddings
//! that do not need durability. A single mutex guards the whole state, so
//! every trait method is atomic on its own.

use std::sync::{Mutex, MutexGuard};

use crate::error::{RetentionError, Result};
use crate::topic::{ReviewEvent, TopicLog};

use super::TopicStore;

#[derive(Debug, Default)]
struct Inner {
    logs: Vec<TopicLog>,
    events: Vec<ReviewEvent>,
}

/// In-memory topic store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| RetentionError::Store("store lock poisoned".to_string()))
    }
}

impl TopicStore for MemoryStore {
    fn get(&self, user_id: &str, topic_id: &str, topic_kind: &str) -> Result<Option<TopicLog>> {
        let inner = self.lock()?;
        Ok(inner
            .logs
            .iter()
            .find(|log| {
                log.user_id == user_id
                    && log.topic_id == topic_id
                    && log.topic_kind == topic_kind
            })
            .cloned())
    }

    fn find_topic(&self, user_id: &str, topic_id: &str) -> Result<Option<TopicLog>> {
        let inner = self.lock()?;
        Ok(inner
            .logs
            .iter()
            .find(|log| log.user_id == user_id && log.topic_id == topic_id)
            .cloned())
    }

    fn put(&self, log: &TopicLog) -> Result<()> {
        let mut inner = self.lock()?;
        match inner.logs.iter_mut().find(|existing| existing.id == log.id) {
            Some(existing) => *existing = log.clone(),
            None => inner.logs.push(log.clone()),
        }
        Ok(())
    }

    fn append_event(&self, event: &ReviewEvent) -> Result<()> {
        let mut inner = self.lock()?;
        inner.events.push(event.clone());
        Ok(())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<TopicLog>> {
        let inner = self.lock()?;
        Ok(inner
            .logs
            .iter()
            .filter(|log| log.user_id == user_id)
            .cloned()
            .collect())
    }

    fn events_for(&self, topic_log_id: &str) -> Result<Vec<ReviewEvent>> {
        let inner = self.lock()?;
        Ok(inner
            .events
            .iter()
            .filter(|event| event.topic_log_id == topic_log_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================
