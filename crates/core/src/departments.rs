// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use doc_approval_domain::{Department, DepartmentRecord, validate_department};

/// The registered departments, in registration order.
///
/// Ids are assigned sequentially from 1 and never reused.
#[derive(Debug, Clone, Default)]
pub struct DepartmentRegistry {
    records: Vec<DepartmentRecord>,
}

impl DepartmentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a department under a new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or color is invalid or the name is
    /// already registered.
    pub fn register(
        &mut self,
        name: Department,
        color: String,
    ) -> Result<DepartmentRecord, CoreError> {
        validate_department(&name, &color)?;
        if self.get(&name).is_some() {
            return Err(CoreError::DuplicateDepartment(name));
        }
        let record: DepartmentRecord =
            DepartmentRecord::new((self.records.len() + 1).to_string(), name, color);
        self.records.push(record.clone());
        Ok(record)
    }

    #[must_use]
    pub fn get(&self, name: &Department) -> Option<&DepartmentRecord> {
        self.records.iter().find(|record| &record.name == name)
    }

    #[must_use]
    pub fn all(&self) -> &[DepartmentRecord] {
        &self.records
    }
}
