// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{DocumentId, UserId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// How a user acknowledged a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceptanceType {
    /// The user signed the document.
    Signed,
    /// The user acknowledged having read the document.
    Acknowledged,
}

impl AcceptanceType {
    /// Converts this acceptance type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Signed => "signed",
            Self::Acknowledged => "acknowledged",
        }
    }
}

impl FromStr for AcceptanceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "signed" => Ok(Self::Signed),
            "acknowledged" => Ok(Self::Acknowledged),
            _ => Err(DomainError::InvalidAcceptanceType(s.to_string())),
        }
    }
}

impl std::fmt::Display for AcceptanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single user's acknowledgement of a document.
///
/// Acceptances are keyed by `(document_id, user_id)`; a user accepts a
/// document at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAcceptance {
    /// The accepted document.
    pub document_id: DocumentId,
    /// The accepting user.
    pub user_id: UserId,
    /// When the acceptance was recorded.
    pub accepted_at: OffsetDateTime,
    /// How the document was accepted.
    pub acceptance_type: AcceptanceType,
}

impl DocumentAcceptance {
    /// Creates a new `DocumentAcceptance`.
    #[must_use]
    pub const fn new(
        document_id: DocumentId,
        user_id: UserId,
        accepted_at: OffsetDateTime,
        acceptance_type: AcceptanceType,
    ) -> Self {
        Self {
            document_id,
            user_id,
            accepted_at,
            acceptance_type,
        }
    }
}
