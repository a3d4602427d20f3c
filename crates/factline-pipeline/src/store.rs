//! In-memory submission store

use async_trait::async_trait;
use factline_domain::traits::{Submission, SubmissionStore};
use std::collections::{HashMap, VecDeque};
use std::convert::Infallible;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;
use uuid::Uuid;

/// Default number of submissions kept before the oldest are evicted
pub const DEFAULT_SUBMISSION_CAPACITY: usize = 10_000;

#[derive(Debug, Default)]
struct Submissions {
    by_id: HashMap<String, String>,
    // Ids in insertion order, oldest first
    order: VecDeque<String>,
}

/// Process-local submission store keyed by UUIDv7 strings
///
/// Holds at most `capacity` submissions; inserting past that evicts the
/// oldest. Contents are lost when the process exits.
#[derive(Debug)]
pub struct InMemorySubmissionStore {
    capacity: usize,
    submissions: RwLock<Submissions>,
}

impl Default for InMemorySubmissionStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SUBMISSION_CAPACITY)
    }
}

impl InMemorySubmissionStore {
    /// Create an empty store with the default capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store holding at most `capacity` submissions (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            submissions: RwLock::new(Submissions::default()),
        }
    }

    /// Maximum number of submissions kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store `content` and return its new id, evicting the oldest entries when full
    pub fn insert(&self, content: impl Into<String>) -> String {
        let id = Uuid::now_v7().to_string();
        let mut submissions = self.write();
        while submissions.order.len() >= self.capacity {
            if let Some(oldest) = submissions.order.pop_front() {
                submissions.by_id.remove(&oldest);
                debug!(submission_id = %oldest, "Evicted oldest submission");
            }
        }
        submissions.by_id.insert(id.clone(), content.into());
        submissions.order.push_back(id.clone());
        id
    }

    /// Number of stored submissions
    pub fn len(&self) -> usize {
        self.read().by_id.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.read().by_id.is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Submissions> {
        self.submissions.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Submissions> {
        self.submissions.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    type Error = Infallible;

    async fn get_submission(&self, id: &str) -> Result<Option<Submission>, Self::Error> {
        Ok(self.read().by_id.get(id).map(|content| Submission {
            id: id.to_string(),
            content: content.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemorySubmissionStore::new();
        let id = store.insert("The Eiffel Tower is 330 meters tall.");
        assert!(Uuid::parse_str(&id).is_ok());
        assert_eq!(store.len(), 1);

        let submission = store.get_submission(&id).await.unwrap().unwrap();
        assert_eq!(submission.content, "The Eiffel Tower is 330 meters tall.");
        assert_eq!(submission.id, id);
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let store = InMemorySubmissionStore::new();
        assert!(store.is_empty());
        assert!(store.get_submission("missing").await.unwrap().is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let store = InMemorySubmissionStore::new();
        let a = store.insert("a");
        let b = store.insert("b");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_oldest_submission_evicted_at_capacity() {
        let store = InMemorySubmissionStore::with_capacity(2);
        let first = store.insert("first");
        let second = store.insert("second");
        let third = store.insert("third");

        assert_eq!(store.len(), 2);
        assert!(store.get_submission(&first).await.unwrap().is_none());
        assert_eq!(store.get_submission(&second).await.unwrap().unwrap().content, "second");
        assert_eq!(store.get_submission(&third).await.unwrap().unwrap().content, "third");
    }

    #[test]
    fn test_capacity_floor() {
        assert_eq!(InMemorySubmissionStore::with_capacity(0).capacity(), 1);
        assert_eq!(InMemorySubmissionStore::new().capacity(), DEFAULT_SUBMISSION_CAPACITY);
    }
}
