//! User Repository Module
//!
//! In-memory store for the users collection. Stands in for the relational
//! backend behind the same handler seam: the API layer only sees the CRUD
//! and search operations, never the storage.

use std::collections::HashMap;

use crate::models::{QueryParams, User, UserPayload};

// == User Repo ==
/// In-memory users collection with a monotonically increasing id sequence.
#[derive(Debug, Default)]
pub struct UserRepo {
    users: HashMap<u64, User>,
    next_id: u64,
}

impl UserRepo {
    // == Constructor ==
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    // == List ==
    /// Returns all users ordered by id.
    pub fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by_key(|user| user.id);
        users
    }

    // == Create ==
    /// Inserts a new user and returns it with its assigned id.
    pub fn create(&mut self, payload: UserPayload) -> User {
        self.next_id += 1;
        let user = User {
            id: self.next_id,
            name: payload.name,
            email: payload.email,
            age: payload.age,
        };
        self.users.insert(user.id, user.clone());
        user
    }

    // == Get ==
    /// Fetches a user by id.
    pub fn get(&self, id: u64) -> Option<User> {
        self.users.get(&id).cloned()
    }

    // == Update ==
    /// Replaces an existing user's fields. Returns None when the id is
    /// unknown.
    pub fn update(&mut self, id: u64, payload: UserPayload) -> Option<User> {
        let user = self.users.get_mut(&id)?;
        user.name = payload.name;
        user.email = payload.email;
        user.age = payload.age;
        Some(user.clone())
    }

    // == Delete ==
    /// Removes a user by id. Returns whether anything was removed.
    pub fn delete(&mut self, id: u64) -> bool {
        self.users.remove(&id).is_some()
    }

    // == Count ==
    /// Returns the number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns true when the repository holds no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    // == Search ==
    /// Filtered, sorted, paginated search.
    ///
    /// Returns the requested page plus the total number of matches before
    /// paging. Expects normalized params (see `QueryParams::normalized`).
    pub fn search(&self, params: &QueryParams) -> (Vec<User>, usize) {
        let needle = params.search.to_lowercase();
        let mut matches: Vec<User> = self
            .users
            .values()
            .filter(|user| {
                if !needle.is_empty() {
                    let matched = match params.search_by.as_str() {
                        "name" => user.name.to_lowercase().contains(&needle),
                        "email" => user.email.to_lowercase().contains(&needle),
                        // Unknown search field: no text filter applied
                        _ => true,
                    };
                    if !matched {
                        return false;
                    }
                }
                if let Some(min_age) = params.min_age {
                    if user.age < min_age {
                        return false;
                    }
                }
                if let Some(max_age) = params.max_age {
                    if user.age > max_age {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        match params.sort_by.as_str() {
            "name" => matches.sort_by(|a, b| a.name.cmp(&b.name)),
            "email" => matches.sort_by(|a, b| a.email.cmp(&b.email)),
            "age" => matches.sort_by_key(|user| user.age),
            _ => matches.sort_by_key(|user| user.id),
        }
        if params.sort_order == "desc" {
            matches.reverse();
        }

        let total = matches.len();
        let offset = (params.page - 1) * params.page_size;
        let page: Vec<User> = matches
            .into_iter()
            .skip(offset)
            .take(params.page_size)
            .collect();

        (page, total)
    }
}
