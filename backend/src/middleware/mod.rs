//! Actix middleware for the user registry.

pub mod trace;
