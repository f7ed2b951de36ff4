//! Domain types for the user registry.
//!
//! Purpose: define the strongly typed entities and ports shared by the HTTP
//! and persistence layers. Types here are transport and storage agnostic;
//! inbound adapters map [`Error`] to HTTP responses and outbound adapters map
//! their failures into [`ports::UserStoreError`] variants.

pub mod error;
pub mod ports;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::user::{User, UserDraft, UserFilter, UserId};

/// Convenient result alias for operations that fail with a domain [`Error`].
pub type ApiResult<T> = Result<T, Error>;
