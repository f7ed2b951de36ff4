//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` and depend only on
//! the domain port, so they stay testable without real I/O. The store handle
//! is constructed explicitly at startup and injected here instead of living
//! in process-wide shared state.

use std::sync::Arc;

use crate::domain::ports::UserRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User store port backing every CRUD operation.
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    /// Construct state around a repository implementation.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}
