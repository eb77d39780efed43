// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod acceptance;
mod department;
mod error;
mod filter;
mod types;
mod validation;
mod visibility;

#[cfg(test)]
mod tests;

pub use acceptance::{AcceptanceType, DocumentAcceptance};
pub use department::{DEFAULT_DEPARTMENT_COLOR, DepartmentRecord};
pub use error::DomainError;
pub use filter::{DocumentFilter, SortKey, SortOrder, sort_documents};
pub use types::{
    AccessType, ApprovalStatus, Department, Document, DocumentId, DocumentType, FileType,
    NewDocument, Role, User, UserId,
};
pub use validation::{
    validate_department, validate_feedback, validate_new_document, validate_user_fields,
};
pub use visibility::can_view;
