// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use doc_approval_domain::{Department, Role, User, UserId, validate_user_fields};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where a notification is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recipient {
    /// A known user.
    User {
        /// The user's identifier.
        id: UserId,
        /// The user's notification address.
        email: String,
    },
    /// A bare address with no user behind it.
    Address {
        /// The notification address.
        email: String,
    },
}

impl Recipient {
    /// Creates a recipient for a known user.
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self::User {
            id: user.id.clone(),
            email: user.email.clone(),
        }
    }

    /// The address the notification goes to.
    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::User { email, .. } | Self::Address { email } => email,
        }
    }
}

/// The known users, with an index from department to its manager.
///
/// The manager of a department is the first manager registered in it.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<UserId, User>,
    /// Registration order, used for stable listings.
    order: Vec<UserId>,
    managers: HashMap<Department, UserId>,
}

impl UserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user's fields are invalid or the id is taken.
    pub fn register(&mut self, user: User) -> Result<(), CoreError> {
        validate_user_fields(&user)?;
        if self.users.contains_key(&user.id) {
            return Err(CoreError::DuplicateUser(user.id));
        }
        if user.role == Role::Manager {
            self.managers
                .entry(user.department.clone())
                .or_insert_with(|| user.id.clone());
        }
        self.order.push(user.id.clone());
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    /// Looks a user up by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownUser` if the id is not registered.
    pub fn get(&self, id: &UserId) -> Result<&User, CoreError> {
        self.users
            .get(id)
            .ok_or_else(|| CoreError::UnknownUser(id.clone()))
    }

    #[must_use]
    pub fn find(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Returns the manager responsible for a department, if any.
    #[must_use]
    pub fn manager_for(&self, department: &Department) -> Option<&User> {
        self.managers
            .get(department)
            .and_then(|id| self.users.get(id))
    }

    /// Returns every user in registration order.
    #[must_use]
    pub fn all(&self) -> Vec<User> {
        self.order
            .iter()
            .filter_map(|id| self.users.get(id))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
