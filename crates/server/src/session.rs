// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer-token extraction for authenticated routes.
//!
//! The token is a directory user id. There are no passwords or sessions;
//! the token only tells the server which user is acting.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use doc_approval_api::{AuthenticatedUser, AuthenticationService};
use tracing::{debug, warn};

use crate::AppState;

/// Extractor for the calling user.
///
/// # Authentication Flow
///
/// 1. Extract the `Authorization: Bearer <user-id>` header
/// 2. Resolve the id against the engine's user directory
/// 3. Return the `AuthenticatedUser`
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing, malformed, or names an
/// unknown user.
pub struct SessionUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header: &str = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader(String::from(
                    "header is not valid ASCII",
                ))
            })?;

        let token: &str = AuthenticationService::parse_bearer(header).map_err(|e| {
            warn!(error = %e, "Malformed Authorization header");
            SessionError::InvalidAuthorizationHeader(e.to_string())
        })?;

        let user: AuthenticatedUser = AuthenticationService::authenticate(&state.engine, token)
            .map_err(|e| {
                warn!(error = %e, "Authentication failed");
                SessionError::UnknownUser(e.to_string())
            })?;

        debug!(user_id = %user.id(), role = %user.role(), "Request authenticated");
        Ok(Self(user))
    }
}

/// Reasons a request could not be authenticated.
#[derive(Debug)]
pub enum SessionError {
    /// No `Authorization` header was sent.
    MissingAuthorizationHeader,
    /// The header is not `Bearer <token>`.
    InvalidAuthorizationHeader(String),
    /// The token does not name a registered user.
    UnknownUser(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader(reason) => format!(
                "Invalid Authorization header format. Expected: 'Bearer <user-id>' ({reason})"
            ),
            Self::UnknownUser(reason) => reason,
        };
        crate::HttpError::new(StatusCode::UNAUTHORIZED, message).into_response()
    }
}
