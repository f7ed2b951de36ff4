//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable user identifier assigned by the store on creation.
///
/// The identifier is an `i32` end-to-end; every lookup (update and delete
/// alike) parses and compares it as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw store-assigned identifier.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Access the raw integer value.
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: String,
    name: String,
    age: i32,
}

impl User {
    /// Assemble a record from its stored fields.
    pub fn new(id: UserId, email: impl Into<String>, name: impl Into<String>, age: i32) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            age,
        }
    }

    /// Store-assigned identifier, immutable for the record's lifetime.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Contact email. No uniqueness constraint is enforced.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Age in years, stored as an integer.
    pub fn age(&self) -> i32 {
        self.age
    }
}

/// Validated payload for creating a user or overwriting an existing one.
///
/// Updates rewrite all three fields every time; the inbound adapter enforces
/// the same required-field checks for update as for create, so a draft always
/// carries complete data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub email: String,
    pub name: String,
    pub age: i32,
}

/// Conjunctive query filter for listing users.
///
/// `name` and `email` match as substrings (the store's contains operator,
/// case-sensitive); `age` matches exactly. Absent fields impose no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl UserFilter {
    /// A filter imposing no constraints.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether a record satisfies every supplied constraint.
    pub fn matches(&self, user: &User) -> bool {
        let name_ok = self
            .name
            .as_deref()
            .is_none_or(|needle| user.name().contains(needle));
        let email_ok = self
            .email
            .as_deref()
            .is_none_or(|needle| user.email().contains(needle));
        let age_ok = self.age.is_none_or(|age| user.age() == age);
        name_ok && email_ok && age_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ana() -> User {
        User::new(UserId::new(1), "ana@example.com", "Ana Jones", 30)
    }

    #[rstest]
    fn empty_filter_matches_everything() {
        assert!(UserFilter::none().matches(&ana()));
    }

    #[rstest]
    #[case(Some("Jo"), None, None, true)]
    #[case(Some("jo"), None, None, false)]
    #[case(None, Some("@example"), None, true)]
    #[case(None, Some("@corp"), None, false)]
    #[case(None, None, Some(30), true)]
    #[case(None, None, Some(31), false)]
    #[case(Some("Ana"), Some("ana@"), Some(30), true)]
    #[case(Some("Ana"), Some("ana@"), Some(29), false)]
    fn filters_compose_conjunctively(
        #[case] name: Option<&str>,
        #[case] email: Option<&str>,
        #[case] age: Option<i32>,
        #[case] expected: bool,
    ) {
        let filter = UserFilter {
            name: name.map(str::to_owned),
            email: email.map(str::to_owned),
            age,
        };
        assert_eq!(filter.matches(&ana()), expected);
    }

    #[rstest]
    fn user_id_displays_raw_value() {
        assert_eq!(UserId::new(7).to_string(), "7");
    }
}
