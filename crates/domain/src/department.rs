// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::Department;
use serde::{Deserialize, Serialize};

/// Display color for departments that were never registered.
pub const DEFAULT_DEPARTMENT_COLOR: &str = "#6B7280";

/// A registered department.
///
/// Documents refer to departments by name only. Registration adds an id and
/// a display color; documents of unregistered departments stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRecord {
    /// Registry identifier.
    pub id: String,
    /// The department name documents and users refer to.
    pub name: Department,
    /// `#RRGGBB` display color.
    pub color: String,
}

impl DepartmentRecord {
    #[must_use]
    pub const fn new(id: String, name: Department, color: String) -> Self {
        Self { id, name, color }
    }

    /// A stand-in record for a department that has documents but no
    /// registration. The name doubles as the id.
    #[must_use]
    pub fn unregistered(name: Department) -> Self {
        Self {
            id: name.name().to_string(),
            name,
            color: DEFAULT_DEPARTMENT_COLOR.to_string(),
        }
    }
}
