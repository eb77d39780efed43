// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Identity is a stub: the bearer token is the user id, resolved against the
//! engine's directory. No credential is checked.

use doc_approval::ApprovalEngine;
use doc_approval_audit::Actor;
use doc_approval_domain::{Role, User, UserId};

use crate::error::AuthError;

/// A user whose identity has been resolved for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The directory entry for this user.
    pub user: User,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    #[must_use]
    pub const fn new(user: User) -> Self {
        Self { user }
    }

    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.user.id
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.user.role
    }

    /// Converts this user into an audit actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::from_user(&self.user)
    }
}

/// Resolves request credentials to a user.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Extracts the token from an `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not `Bearer <token>` with a
    /// non-empty token.
    pub fn parse_bearer(header_value: &str) -> Result<&str, AuthError> {
        let token: &str = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Authorization header must use the Bearer scheme"),
            })?
            .trim();
        if token.is_empty() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Bearer token is empty"),
            });
        }
        Ok(token)
    }

    /// Resolves a token to a registered user.
    ///
    /// # Errors
    ///
    /// Returns an error if no user with this id exists.
    pub fn authenticate(
        engine: &ApprovalEngine,
        token: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        engine
            .user(&UserId::new(token))
            .map(AuthenticatedUser::new)
            .map_err(|_| AuthError::AuthenticationFailed {
                reason: format!("Unknown user '{token}'"),
            })
    }
}

/// Call-level role checks made before the engine is invoked.
///
/// Per-document rules (department scope, visibility, terminal states) are
/// enforced by the engine itself.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a user may upload documents.
    ///
    /// Only Admin users may upload.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the Admin role.
    pub fn authorize_upload(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        match actor.role() {
            Role::Admin => Ok(()),
            Role::Manager | Role::Employee => Err(AuthError::Unauthorized {
                action: String::from("upload_document"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a user may run bulk approvals or rejections.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is an Employee.
    pub fn authorize_bulk_decision(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        match actor.role() {
            Role::Admin | Role::Manager => Ok(()),
            Role::Employee => Err(AuthError::Unauthorized {
                action: String::from("bulk_decision"),
                required_role: String::from("Admin or Manager"),
            }),
        }
    }

    /// Checks if a user may add departments.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the Admin role.
    pub fn authorize_manage_departments(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        match actor.role() {
            Role::Admin => Ok(()),
            Role::Manager | Role::Employee => Err(AuthError::Unauthorized {
                action: String::from("add_department"),
                required_role: String::from("Admin"),
            }),
        }
    }
}
