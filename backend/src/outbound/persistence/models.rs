//! Internal Diesel row structs for the users table.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain.

use diesel::prelude::*;

use super::schema::users;
use crate::domain::{User, UserId};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub age: i32,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self::new(UserId::new(row.id), row.email, row.name, row.age)
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub age: i32,
}

/// Changeset overwriting every mutable column of an existing record.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserRowChanges<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub age: i32,
}
