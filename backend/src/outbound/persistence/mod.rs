//! PostgreSQL persistence adapter built on Diesel.
//!
//! The adapter implements the domain's `UserRepository` port over an async
//! connection pool. Row structs in `models` stay private to this module;
//! only domain types cross the port boundary.

mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
