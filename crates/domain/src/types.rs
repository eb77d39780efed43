// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// The unique, immutable identifier of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new document identifier.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The unique identifier of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new user identifier.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A department name.
///
/// Departments scope manager authority and department-level visibility.
/// Two departments are the same only when their names match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Department(String);

impl Department {
    /// Creates a new department.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Returns the department name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The role of a user.
///
/// Roles are fixed for the lifetime of a session and gate every
/// approval transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May decide on any document in any department.
    Admin,
    /// May decide on documents belonging to their own department.
    Manager,
    /// May upload, view and accept documents, but never decide on them.
    Employee,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The approval state of a document.
///
/// Valid transitions are:
/// - `Pending` → `Approved`
/// - `Pending` → `Rejected`
///
/// `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Approved by an admin or department manager.
    Approved,
    /// Rejected with feedback.
    Rejected,
}

impl ApprovalStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns whether no further transition is permitted from this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved | Self::Rejected)
        )
    }
}

impl FromStr for ApprovalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidApprovalStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who may see a document, independent of its approval status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Visible to everyone.
    Public,
    /// Visible to members of the owning department and to admins.
    Department,
    /// Visible to admins and to the owning department's managers.
    Restricted,
}

impl AccessType {
    /// Converts this access type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Department => "department",
            Self::Restricted => "restricted",
        }
    }
}

impl FromStr for AccessType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "department" => Ok(Self::Department),
            "restricted" => Ok(Self::Restricted),
            _ => Err(DomainError::InvalidAccessType(s.to_string())),
        }
    }
}

impl std::fmt::Display for AccessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Standard operating procedure.
    #[serde(rename = "SOP")]
    Sop,
    /// Policy.
    Policy,
    /// Manual.
    Manual,
    /// Guide.
    Guide,
    /// Form.
    Form,
}

impl DocumentType {
    /// Converts this document type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sop => "SOP",
            Self::Policy => "Policy",
            Self::Manual => "Manual",
            Self::Guide => "Guide",
            Self::Form => "Form",
        }
    }
}

impl FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sop" => Ok(Self::Sop),
            "policy" => Ok(Self::Policy),
            "manual" => Ok(Self::Manual),
            "guide" => Ok(Self::Guide),
            "form" => Ok(Self::Form),
            _ => Err(DomainError::InvalidDocumentType(s.to_string())),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The file format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF.
    Pdf,
    /// Legacy Word document.
    Doc,
    /// Word document.
    Docx,
    /// Legacy Excel workbook.
    Xls,
    /// Excel workbook.
    Xlsx,
    /// Any image format.
    Image,
}

impl FileType {
    /// Converts this file type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Doc => "doc",
            Self::Docx => "docx",
            Self::Xls => "xls",
            Self::Xlsx => "xlsx",
            Self::Image => "image",
        }
    }
}

impl FromStr for FileType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "doc" => Ok(Self::Doc),
            "docx" => Ok(Self::Docx),
            "xls" => Ok(Self::Xls),
            "xlsx" => Ok(Self::Xlsx),
            "image" | "png" | "jpg" | "jpeg" => Ok(Self::Image),
            _ => Err(DomainError::InvalidFileType(s.to_string())),
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user of the document system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user's unique identifier.
    pub id: UserId,
    /// The user's display name.
    pub name: String,
    /// The address notifications for this user are sent to.
    pub email: String,
    /// The user's role.
    pub role: Role,
    /// The department the user belongs to.
    pub department: Department,
}

impl User {
    /// Creates a new `User`.
    ///
    /// # Arguments
    ///
    /// * `id` - The user's unique identifier
    /// * `name` - The user's display name
    /// * `email` - The user's notification address
    /// * `role` - The user's role
    /// * `department` - The user's department
    #[must_use]
    pub const fn new(
        id: UserId,
        name: String,
        email: String,
        role: Role,
        department: Department,
    ) -> Self {
        Self {
            id,
            name,
            email,
            role,
            department,
        }
    }
}

/// The data supplied by the upload collaborator for a new document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    /// An explicit identifier. One is generated when absent.
    pub id: Option<DocumentId>,
    /// The document title.
    pub title: String,
    /// The kind of document.
    pub document_type: DocumentType,
    /// The file format.
    pub file_type: FileType,
    /// The owning department.
    pub department: Department,
    /// The visibility gate.
    pub access_type: AccessType,
    /// Free-form tags used by search.
    pub tags: Vec<String>,
    /// A description of the document.
    pub description: String,
    /// Where the file can be fetched from.
    pub url: String,
    /// The date after which the document is considered expired.
    pub expiry_date: Option<Date>,
    /// Whether employees must individually acknowledge the document.
    pub requires_acceptance: bool,
    /// Whether all employees are notified once the document is approved.
    pub notify_all_after_approval: bool,
    /// Whether the document must pass through approval.
    ///
    /// When false the document is created already approved.
    pub approval_required: bool,
}

/// A managed document and its approval state.
///
/// `approval_status`, `approved_by` and `approved_at` change only through
/// approval transitions. `approved_by` and `approved_at` are set together on
/// the single transition out of `Pending` and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The document's unique identifier.
    pub id: DocumentId,
    /// The document title.
    pub title: String,
    /// The kind of document.
    pub document_type: DocumentType,
    /// The file format.
    pub file_type: FileType,
    /// The owning department.
    pub department: Department,
    /// The user who uploaded the document.
    pub uploaded_by: UserId,
    /// When the document was uploaded.
    pub uploaded_at: OffsetDateTime,
    /// When the document was last modified.
    pub last_modified: OffsetDateTime,
    /// The visibility gate.
    pub access_type: AccessType,
    /// The approval state.
    pub approval_status: ApprovalStatus,
    /// The user who approved or rejected the document.
    pub approved_by: Option<UserId>,
    /// When the document was approved or rejected.
    pub approved_at: Option<OffsetDateTime>,
    /// Free-form tags used by search.
    pub tags: Vec<String>,
    /// A description of the document.
    pub description: String,
    /// Where the file can be fetched from.
    pub url: String,
    /// The date after which the document is considered expired.
    pub expiry_date: Option<Date>,
    /// Whether employees must individually acknowledge the document.
    pub requires_acceptance: bool,
    /// Whether all employees are notified once the document is approved.
    pub notify_all_after_approval: bool,
}

impl Document {
    /// Builds a document from upload data.
    ///
    /// The initial status is `Pending` when approval is required, otherwise
    /// `Approved`. The approved bypass is not a transition, so `approved_by`
    /// and `approved_at` stay unset.
    ///
    /// # Arguments
    ///
    /// * `id` - The identifier to assign
    /// * `upload` - The upload data
    /// * `uploaded_by` - The uploading user
    /// * `now` - The upload timestamp
    #[must_use]
    pub fn from_upload(
        id: DocumentId,
        upload: NewDocument,
        uploaded_by: UserId,
        now: OffsetDateTime,
    ) -> Self {
        let approval_status: ApprovalStatus = if upload.approval_required {
            ApprovalStatus::Pending
        } else {
            ApprovalStatus::Approved
        };

        Self {
            id,
            title: upload.title,
            document_type: upload.document_type,
            file_type: upload.file_type,
            department: upload.department,
            uploaded_by,
            uploaded_at: now,
            last_modified: now,
            access_type: upload.access_type,
            approval_status,
            approved_by: None,
            approved_at: None,
            tags: upload.tags,
            description: upload.description,
            url: upload.url,
            expiry_date: upload.expiry_date,
            requires_acceptance: upload.requires_acceptance,
            notify_all_after_approval: upload.notify_all_after_approval,
        }
    }

    /// Returns whether the document is still awaiting a decision.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.approval_status == ApprovalStatus::Pending
    }

    /// Returns whether the document has expired as of `today`.
    #[must_use]
    pub fn is_expired(&self, today: Date) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < today)
    }

    /// A short textual summary used for audit snapshots.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "document={},status={},approved_by={}",
            self.id,
            self.approval_status,
            self.approved_by.as_ref().map_or("-", UserId::as_str)
        )
    }
}
