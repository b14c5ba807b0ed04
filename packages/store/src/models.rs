//! # Session domain models
//!
//! The records persisted by [`crate::SessionStore`] and handed to every screen
//! that needs to know who is signed in.
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`User`] | The cached user record returned by the backend on login or re-validation: numeric `id`, `username`, and a [`Role`]. Always replaced whole, never patched field by field. |
//! | [`Role`] | The closed set of roles the portal knows about. Role names travel as lowercase strings (`"admin"`, `"editor"`). |
//! | [`Session`] | A bearer token paired with the user it belongs to. A session without a user (or a user without a token) is never produced by the store. |

use serde::{Deserialize, Serialize};

/// Roles a backend account can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record cached alongside the bearer token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A bearer token and the user it was issued for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}
