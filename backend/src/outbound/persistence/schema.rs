//! Diesel table definition for the user registry schema.
//!
//! Must match the deployed database exactly; regenerate with
//! `diesel print-schema` if the schema changes.

diesel::table! {
    /// Registered users.
    ///
    /// `id` is a `SERIAL` primary key assigned by the database. No uniqueness
    /// constraint exists on `email`.
    users (id) {
        id -> Int4,
        email -> Varchar,
        name -> Varchar,
        age -> Int4,
    }
}
