//! User registry backend.
//!
//! A small CRUD service arranged hexagonally: the `domain` layer owns the
//! user model and the repository port, `inbound::http` adapts it to REST
//! endpoints, and `outbound::persistence` implements the port over
//! PostgreSQL. `server` wires the pieces into an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Request tracing middleware attaching a trace id to every response.
pub use middleware::trace::Trace;
