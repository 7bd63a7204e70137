//! User registration and lookup

use crate::Document;
use sociaty_core::{MarketError, NewUser, Result, StudentId, User, UserId};

/// Get all users
pub fn get_all(doc: &Document) -> Vec<User> {
    doc.users.clone()
}

/// Find a user by student identifier
pub fn find_by_student_id<'a>(doc: &'a Document, student_id: &StudentId) -> Option<&'a User> {
    doc.users.iter().find(|u| u.student_id == *student_id)
}

/// Register a user
///
/// Rejects blank fields and student identifiers that are already taken.
pub fn insert(doc: &mut Document, user: NewUser) -> Result<User> {
    if user.name.is_empty() || user.student_id.as_str().is_empty() || user.password.is_empty() {
        return Err(MarketError::invalid_input("Missing fields"));
    }

    if find_by_student_id(doc, &user.student_id).is_some() {
        return Err(MarketError::duplicate("Student ID already used"));
    }

    let user = User {
        id: UserId::generate(),
        name: user.name,
        student_id: user.student_id,
        password: user.password,
    };
    doc.users.push(user.clone());

    Ok(user)
}
