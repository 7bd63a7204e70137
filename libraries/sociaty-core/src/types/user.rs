/// User domain type
use super::ids::{StudentId, UserId};
use serde::{Deserialize, Serialize};

/// User account as persisted in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Student identifier used to log in
    pub student_id: StudentId,

    /// Stored password (plaintext or a bcrypt hash, depending on policy)
    pub password: String,
}

/// User account without its password, safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Unique user identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Student identifier used to log in
    pub student_id: StudentId,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            student_id: user.student_id.clone(),
        }
    }
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            student_id: user.student_id,
        }
    }
}

/// Data for registering a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name
    pub name: String,

    /// Student identifier, must be unique
    pub student_id: StudentId,

    /// Password in its stored form
    pub password: String,
}
