//! User domain model.

use serde::{Deserialize, Serialize};

/// A user record as stored and served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Repository-assigned identifier
    pub id: u64,
    pub name: String,
    pub email: String,
    pub age: u32,
}
