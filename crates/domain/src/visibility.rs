// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{AccessType, Document, Role, User};

/// Determines whether a user may see a document.
///
/// Visibility is independent of approval status:
/// - `Public` documents are visible to everyone
/// - `Department` documents are visible to admins and to members of the
///   owning department
/// - `Restricted` documents are visible to admins and to managers of the
///   owning department
#[must_use]
pub fn can_view(user: &User, document: &Document) -> bool {
    let same_department: bool = user.department == document.department;

    match (document.access_type, user.role) {
        (AccessType::Public, _) | (_, Role::Admin) => true,
        (AccessType::Department, Role::Manager | Role::Employee) => same_department,
        (AccessType::Restricted, Role::Manager) => same_department,
        (AccessType::Restricted, Role::Employee) => false,
    }
}
