//! Request DTOs for the users API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for creating or updating a user.
///
/// The id is never client-supplied; it is assigned by the repository on
/// create and taken from the path on update.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub age: u32,
}

impl UserPayload {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if self.name.len() > 256 {
            return Some("Name exceeds maximum length of 256 characters".to_string());
        }
        if self.email.trim().is_empty() {
            return Some("Email cannot be empty".to_string());
        }
        if !self.email.contains('@') {
            return Some("Email must contain '@'".to_string());
        }
        None
    }
}
