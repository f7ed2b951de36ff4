//! Domain ports defining the edge towards the user store.
//!
//! The port exposes strongly typed errors so adapters map their failures into
//! predictable variants instead of returning `anyhow::Result`. Besides the
//! Diesel adapter in `outbound::persistence`, an in-memory implementation
//! lives here for tests and for running the service without a database.

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use super::{User, UserDraft, UserFilter, UserId};

/// Errors surfaced by a user store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// Connectivity failure between the service and the store.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// The targeted record does not exist.
    #[error("user not found")]
    NotFound,
    /// Any other query or write failure reported by the store.
    #[error("user store query failed: {message}")]
    Query { message: String },
}

impl UserStoreError {
    /// Helper for connection-level failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query and write failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for user records.
///
/// Each operation is a single stateless transaction against the store; the
/// store's own semantics govern concurrent writes.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new record and return it with its assigned identifier.
    async fn create(&self, draft: UserDraft) -> Result<User, UserStoreError>;

    /// Return every record satisfying the filter, in ascending id order.
    async fn find(&self, filter: UserFilter) -> Result<Vec<User>, UserStoreError>;

    /// Overwrite the email, name, and age of an existing record.
    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, UserStoreError>;

    /// Remove a record.
    async fn delete(&self, id: UserId) -> Result<(), UserStoreError>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i32,
    records: Vec<User>,
}

/// In-memory [`UserRepository`] used when no database is configured.
///
/// Identifiers are assigned sequentially from 1 and never reused, matching
/// the autoincrement behaviour of the relational store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<InMemoryState>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, UserStoreError> {
        self.state
            .lock()
            .map_err(|_| UserStoreError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, draft: UserDraft) -> Result<User, UserStoreError> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let user = User::new(UserId::new(state.next_id), draft.email, draft.name, draft.age);
        state.records.push(user.clone());
        Ok(user)
    }

    async fn find(&self, filter: UserFilter) -> Result<Vec<User>, UserStoreError> {
        let state = self.lock()?;
        Ok(state
            .records
            .iter()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect())
    }

    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, UserStoreError> {
        let mut state = self.lock()?;
        let slot = state
            .records
            .iter_mut()
            .find(|user| user.id() == id)
            .ok_or(UserStoreError::NotFound)?;
        *slot = User::new(id, draft.email, draft.name, draft.age);
        Ok(slot.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut state = self.lock()?;
        let before = state.records.len();
        state.records.retain(|user| user.id() != id);
        if state.records.len() == before {
            return Err(UserStoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(email: &str, name: &str, age: i32) -> UserDraft {
        UserDraft {
            email: email.to_owned(),
            name: name.to_owned(),
            age,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo
            .create(draft("a@x.com", "Ana", 30))
            .await
            .expect("create first");
        let second = repo
            .create(draft("b@x.com", "Bea", 25))
            .await
            .expect("create second");

        assert_eq!(first.id(), UserId::new(1));
        assert_eq!(second.id(), UserId::new(2));
    }

    #[tokio::test]
    async fn update_overwrites_all_fields_in_place() {
        let repo = InMemoryUserRepository::new();
        let created = repo
            .create(draft("a@x.com", "Ana", 30))
            .await
            .expect("create");

        let updated = repo
            .update(created.id(), draft("ana@corp.com", "Ana Maria", 31))
            .await
            .expect("update");

        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.email(), "ana@corp.com");
        assert_eq!(updated.name(), "Ana Maria");
        assert_eq!(updated.age(), 31);
    }

    #[tokio::test]
    async fn update_missing_record_reports_not_found_and_leaves_store_unchanged() {
        let repo = InMemoryUserRepository::new();
        repo.create(draft("a@x.com", "Ana", 30))
            .await
            .expect("create");

        let err = repo
            .update(UserId::new(99), draft("x@x.com", "X", 1))
            .await
            .expect_err("missing id");
        assert_eq!(err, UserStoreError::NotFound);

        let all = repo.find(UserFilter::none()).await.expect("list");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name(), "Ana");
    }

    #[tokio::test]
    async fn delete_removes_exactly_the_targeted_record() {
        let repo = InMemoryUserRepository::new();
        let ana = repo
            .create(draft("a@x.com", "Ana", 30))
            .await
            .expect("create ana");
        repo.create(draft("b@x.com", "Bea", 25))
            .await
            .expect("create bea");

        repo.delete(ana.id()).await.expect("delete ana");

        let remaining = repo.find(UserFilter::none()).await.expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name(), "Bea");

        let err = repo.delete(ana.id()).await.expect_err("already deleted");
        assert_eq!(err, UserStoreError::NotFound);
    }

    #[tokio::test]
    async fn find_applies_contains_and_exact_filters() {
        let repo = InMemoryUserRepository::new();
        repo.create(draft("jo@x.com", "john", 30))
            .await
            .expect("create john");
        repo.create(draft("m@x.com", "mary", 30))
            .await
            .expect("create mary");
        repo.create(draft("jm@x.com", "major", 40))
            .await
            .expect("create major");

        let by_name = repo
            .find(UserFilter {
                name: Some("jo".to_owned()),
                ..UserFilter::default()
            })
            .await
            .expect("filter by name");
        assert_eq!(by_name.len(), 2);

        let by_name_and_age = repo
            .find(UserFilter {
                name: Some("jo".to_owned()),
                age: Some(30),
                ..UserFilter::default()
            })
            .await
            .expect("filter by name and age");
        assert_eq!(by_name_and_age.len(), 1);
        assert_eq!(by_name_and_age[0].name(), "john");
    }
}
