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
#![allow(clippy::multiple_crate_versions)]

mod acceptance;
mod apply;
mod authorization;
mod command;
mod departments;
mod directory;
mod engine;
mod error;
mod notification;
mod selection;
mod state;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use acceptance::AcceptanceLedger;
pub use apply::apply;
pub use authorization::{
    authorize_decision, authorize_history, authorize_manage_departments, authorize_update,
    authorize_upload, authorize_view,
};
pub use command::{AccessKind, BulkAction, Command};
pub use departments::DepartmentRegistry;
pub use directory::{Recipient, UserDirectory};
pub use engine::{ApprovalEngine, DEFAULT_MANAGER_ADDRESS, EngineConfig};
pub use error::CoreError;
pub use notification::{
    NotificationDispatcher, NotificationEvent, RecordingDispatcher, TracingDispatcher,
};
pub use selection::SelectionTracker;
pub use state::{
    BulkFailure, BulkResult, DepartmentSummary, DispatchReport, DocumentStatistics, Effect,
    RECENT_UPLOAD_DAYS, TransitionResult,
};
pub use store::{DocumentChange, DocumentPatch, DocumentStore};
