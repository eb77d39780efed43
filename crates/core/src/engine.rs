// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::acceptance::AcceptanceLedger;
use crate::apply::apply;
use crate::authorization::{
    authorize_history, authorize_manage_departments, authorize_update, authorize_upload,
    authorize_view,
};
use crate::command::{AccessKind, BulkAction, Command};
use crate::departments::DepartmentRegistry;
use crate::directory::{Recipient, UserDirectory};
use crate::error::CoreError;
use crate::notification::{NotificationDispatcher, NotificationEvent};
use crate::selection::SelectionTracker;
use crate::state::{
    BulkFailure, BulkResult, DepartmentSummary, DispatchReport, DocumentStatistics, Effect,
    TransitionResult,
};
use crate::store::{DocumentChange, DocumentPatch, DocumentStore};
use dashmap::DashMap;
use doc_approval_audit::{Action, Actor, AuditEvent, AuditLog, Cause, StateSnapshot};
use doc_approval_domain::{
    AcceptanceType, ApprovalStatus, Department, DepartmentRecord, Document, DocumentAcceptance,
    DocumentFilter, DocumentId, NewDocument, SortKey, SortOrder, User, UserId, can_view,
    sort_documents, validate_feedback, validate_new_document,
};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tracing::{debug, info};

/// Where approval requests go when a department has no manager.
pub const DEFAULT_MANAGER_ADDRESS: &str = "manager@edaratgroup.com";

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Fallback recipient for approval requests and reminders.
    pub default_manager_address: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_manager_address: DEFAULT_MANAGER_ADDRESS.to_string(),
        }
    }
}

/// Which fan-out a manager notification belongs to.
#[derive(Debug, Clone, Copy)]
enum ManagerNotice {
    Request { is_individual: bool },
    Reminder,
}

/// Coordinates documents, departments, selections, acceptances, the audit
/// log and notifications.
///
/// All methods take `&self`; the engine is shared behind an `Arc`.
/// Approval decisions are validated and committed under the target
/// document's lock, and notifications are dispatched only after commit.
pub struct ApprovalEngine {
    config: EngineConfig,
    store: DocumentStore,
    directory: RwLock<UserDirectory>,
    departments: RwLock<DepartmentRegistry>,
    selections: DashMap<UserId, SelectionTracker>,
    acceptances: AcceptanceLedger,
    audit: AuditLog,
    dispatcher: Arc<dyn NotificationDispatcher>,
    request_seq: AtomicU64,
}

impl std::fmt::Debug for ApprovalEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalEngine")
            .field("config", &self.config)
            .field("documents", &self.store.len())
            .field("audit_events", &self.audit.len())
            .finish_non_exhaustive()
    }
}

impl ApprovalEngine {
    /// Creates an engine with an empty store and directory.
    #[must_use]
    pub fn new(config: EngineConfig, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self {
            config,
            store: DocumentStore::new(),
            directory: RwLock::new(UserDirectory::new()),
            departments: RwLock::new(DepartmentRegistry::new()),
            selections: DashMap::new(),
            acceptances: AcceptanceLedger::new(),
            audit: AuditLog::new(),
            dispatcher,
            request_seq: AtomicU64::new(1),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn next_cause(&self, description: String) -> Cause {
        let seq: u64 = self.request_seq.fetch_add(1, Ordering::Relaxed);
        Cause::new(format!("req-{seq}"), description)
    }

    // ---- users ----

    /// Registers a user in the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is invalid or already registered.
    pub fn register_user(&self, user: User) -> Result<(), CoreError> {
        let id: UserId = user.id.clone();
        self.directory.write().register(user)?;
        debug!(user_id = %id, "Registered user");
        Ok(())
    }

    /// Looks a user up by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownUser` if the id is not registered.
    pub fn user(&self, id: &UserId) -> Result<User, CoreError> {
        self.directory.read().get(id).cloned()
    }

    /// Returns every registered user.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.directory.read().all()
    }

    // ---- departments ----

    /// Registers a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an administrator, the name or
    /// color is invalid, or the name is already registered.
    pub fn add_department(
        &self,
        actor: &User,
        name: Department,
        color: String,
    ) -> Result<DepartmentRecord, CoreError> {
        authorize_manage_departments(actor)?;
        let record: DepartmentRecord = self.departments.write().register(name, color)?;
        info!(
            department = %record.name,
            department_id = %record.id,
            actor = %actor.id,
            "Department added"
        );
        Ok(record)
    }

    /// Lists departments with the number of documents `user` can see in
    /// each.
    ///
    /// Registered departments come first, in registration order. A
    /// department that has visible documents but no registration follows,
    /// by name, with the default color.
    #[must_use]
    pub fn departments(&self, user: &User) -> Vec<DepartmentSummary> {
        let mut counts: BTreeMap<Department, usize> = BTreeMap::new();
        for document in self.store.list(|d| can_view(user, d)) {
            *counts.entry(document.department).or_default() += 1;
        }

        let registry = self.departments.read();
        let mut summaries: Vec<DepartmentSummary> = registry
            .all()
            .iter()
            .map(|record| DepartmentSummary {
                document_count: counts.remove(&record.name).unwrap_or(0),
                department: record.clone(),
            })
            .collect();
        drop(registry);

        summaries.extend(counts.into_iter().map(|(name, document_count)| DepartmentSummary {
            department: DepartmentRecord::unregistered(name),
            document_count,
        }));
        summaries
    }

    // ---- documents ----

    /// Creates a document from upload data.
    ///
    /// The document starts pending when approval is required and approved
    /// otherwise. An id is generated when the upload does not carry one.
    ///
    /// # Errors
    ///
    /// Returns an error if the uploader is not an administrator, the upload
    /// is invalid, or an explicit id is already taken.
    pub fn upload(&self, upload: NewDocument, uploader: &User) -> Result<Document, CoreError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        validate_new_document(&upload, now.date())?;

        let explicit: bool = upload.id.is_some();
        let mut document: Document = Document::from_upload(
            upload.id.clone().unwrap_or_else(generate_document_id),
            upload,
            uploader.id.clone(),
            now,
        );
        authorize_upload(uploader, &document)?;

        loop {
            match self.store.insert(document.clone()) {
                Ok(()) => break,
                Err(CoreError::DuplicateDocument(_)) if !explicit => {
                    document.id = generate_document_id();
                }
                Err(e) => return Err(e),
            }
        }

        let cause: Cause = self.next_cause(format!("Upload of '{}'", document.title));
        self.audit.record(AuditEvent::new(
            Actor::from_user(uploader),
            cause,
            Action::new(
                String::from("Upload"),
                Some(format!("Uploaded '{}'", document.title)),
            ),
            StateSnapshot::new(String::from("none")),
            StateSnapshot::new(document.summary()),
            document.id.clone(),
            now,
        ));

        info!(
            document_id = %document.id,
            actor = %uploader.id,
            status = %document.approval_status,
            "Document uploaded"
        );
        Ok(document)
    }

    /// Returns a document the actor may see.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` or `CoreError::Unauthorized`.
    pub fn get_document(&self, id: &DocumentId, actor: &User) -> Result<Document, CoreError> {
        let document: Document = self.store.get(id)?;
        authorize_view(actor, &document)?;
        Ok(document)
    }

    /// Edits a document's descriptive fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is unknown, the actor may not edit
    /// it, or the patch is invalid.
    pub fn update_document(
        &self,
        id: &DocumentId,
        actor: &User,
        patch: DocumentPatch,
    ) -> Result<Document, CoreError> {
        let current: Document = self.store.get(id)?;
        // Edits never move a document between departments.
        authorize_update(actor, &current)?;
        if patch.is_empty() {
            return Ok(current);
        }

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let DocumentChange { before, after } = self.store.update(id, patch, now)?;
        let cause: Cause = self.next_cause(format!("Edit of {id}"));
        self.audit.record(AuditEvent::new(
            Actor::from_user(actor),
            cause,
            Action::new(String::from("Update"), Some(format!("Edited '{}'", after.title))),
            StateSnapshot::new(before.summary()),
            StateSnapshot::new(after.summary()),
            id.clone(),
            now,
        ));
        info!(document_id = %id, actor = %actor.id, "Document updated");
        Ok(after)
    }

    /// Records that a user viewed or downloaded a document.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` or `CoreError::Unauthorized`.
    pub fn record_access(
        &self,
        id: &DocumentId,
        actor: &User,
        kind: AccessKind,
    ) -> Result<Document, CoreError> {
        let document: Document = self.get_document(id, actor)?;
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let cause: Cause = self.next_cause(format!("{} of {id}", kind.action_name()));
        self.audit.record(AuditEvent::new(
            Actor::from_user(actor),
            cause,
            Action::new(kind.action_name().to_string(), None),
            StateSnapshot::new(document.summary()),
            StateSnapshot::new(document.summary()),
            id.clone(),
            now,
        ));
        debug!(document_id = %id, actor = %actor.id, kind = kind.action_name(), "Access recorded");
        Ok(document)
    }

    /// Lists the documents a user may see that match `filter`.
    #[must_use]
    pub fn list_visible(
        &self,
        user: &User,
        filter: &DocumentFilter,
        sort: Option<SortKey>,
        order: SortOrder,
    ) -> Vec<Document> {
        let mut documents: Vec<Document> = self
            .store
            .list(|d| can_view(user, d) && filter.matches(d));
        sort_documents(&mut documents, sort, order);
        documents
    }

    /// Counts the documents a user may see.
    #[must_use]
    pub fn statistics(&self, user: &User) -> DocumentStatistics {
        let visible: Vec<Document> = self.store.list(|d| can_view(user, d));
        DocumentStatistics::collect(user, &visible, OffsetDateTime::now_utc())
    }

    /// Returns a document's audit history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` or `CoreError::Unauthorized`.
    pub fn audit_trail(&self, id: &DocumentId, actor: &User) -> Result<Vec<AuditEvent>, CoreError> {
        let document: Document = self.store.get(id)?;
        authorize_history(actor, &document)?;
        Ok(self.audit.for_document(id))
    }

    /// Returns every recorded audit event, oldest first.
    #[must_use]
    pub fn audit_events(&self) -> Vec<AuditEvent> {
        self.audit.all()
    }

    // ---- decisions ----

    /// Approves a pending document.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Unauthorized` or `InvalidTransition`.
    pub fn approve(&self, id: &DocumentId, actor: &User) -> Result<Document, CoreError> {
        let document: Document = self.decide(id, Command::Approve, actor)?;
        self.forget_selected(std::slice::from_ref(id));
        Ok(document)
    }

    /// Rejects a pending document with feedback.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Unauthorized`, `Validation` for empty feedback,
    /// or `InvalidTransition`.
    pub fn reject(
        &self,
        id: &DocumentId,
        actor: &User,
        feedback: &str,
    ) -> Result<Document, CoreError> {
        let command: Command = Command::Reject {
            feedback: feedback.to_string(),
        };
        let document: Document = self.decide(id, command, actor)?;
        self.forget_selected(std::slice::from_ref(id));
        Ok(document)
    }

    /// Applies one decision to many documents.
    ///
    /// Each document is decided independently. Per-document failures are
    /// collected and never abort the batch. Duplicate ids are decided once.
    /// Every succeeded id is removed from all selections.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` before touching any document when a
    /// bulk rejection has empty feedback.
    pub fn bulk_apply(
        &self,
        action: BulkAction,
        ids: &[DocumentId],
        actor: &User,
        feedback: Option<&str>,
    ) -> Result<BulkResult, CoreError> {
        let command: Command = match action {
            BulkAction::Approve => Command::Approve,
            BulkAction::Reject => {
                let feedback: &str = feedback.unwrap_or_default();
                validate_feedback(feedback)?;
                Command::Reject {
                    feedback: feedback.to_string(),
                }
            }
        };

        let unique: BTreeSet<&DocumentId> = ids.iter().collect();
        let mut result: BulkResult = BulkResult::default();
        for id in unique {
            match self.decide(id, command.clone(), actor) {
                Ok(_) => result.succeeded.push(id.clone()),
                Err(error) => {
                    debug!(document_id = %id, error = %error, "Bulk item failed");
                    result.failed.push(BulkFailure {
                        document_id: id.clone(),
                        error,
                    });
                }
            }
        }
        self.forget_selected(&result.succeeded);

        info!(
            action = action.as_str(),
            actor = %actor.id,
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            "Bulk decision applied"
        );
        Ok(result)
    }

    /// Applies one decision to everything the actor has selected.
    ///
    /// # Errors
    ///
    /// See [`ApprovalEngine::bulk_apply`].
    pub fn bulk_apply_selection(
        &self,
        action: BulkAction,
        actor: &User,
        feedback: Option<&str>,
    ) -> Result<BulkResult, CoreError> {
        let ids: Vec<DocumentId> = self.selection(&actor.id);
        self.bulk_apply(action, &ids, actor, feedback)
    }

    fn decide(&self, id: &DocumentId, command: Command, actor: &User) -> Result<Document, CoreError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let cause: Cause =
            self.next_cause(format!("{} requested by {}", command.action_name(), actor.id));
        let result: TransitionResult = self.store.transition(id, |current| {
            let result: TransitionResult = apply(current, command, actor, cause, now)?;
            Ok((result.document.clone(), result))
        })?;

        self.audit.record(result.audit_event);
        info!(
            document_id = %id,
            actor = %actor.id,
            status = %result.document.approval_status,
            "Document decided"
        );
        self.run_effects(&result.document, actor, result.effects);
        Ok(result.document)
    }

    fn run_effects(&self, document: &Document, actor: &User, effects: Vec<Effect>) {
        for effect in effects {
            let event: NotificationEvent = match effect {
                Effect::BroadcastApproval => {
                    let recipients: Vec<Recipient> = self
                        .directory
                        .read()
                        .all()
                        .iter()
                        .filter(|u| u.id != actor.id)
                        .map(Recipient::for_user)
                        .collect();
                    NotificationEvent::BroadcastApproval {
                        document_id: document.id.clone(),
                        acting_user_id: actor.id.clone(),
                        recipients,
                    }
                }
                Effect::RecordFeedback { feedback } => {
                    let recipients: Vec<Recipient> = self
                        .directory
                        .read()
                        .find(&document.uploaded_by)
                        .map(Recipient::for_user)
                        .into_iter()
                        .collect();
                    NotificationEvent::FeedbackRecorded {
                        document_id: document.id.clone(),
                        acting_user_id: actor.id.clone(),
                        feedback,
                        recipients,
                    }
                }
            };
            debug!(
                kind = event.kind(),
                document_id = %document.id,
                recipients = event.recipients().len(),
                "Dispatching notification"
            );
            self.dispatcher.dispatch(event);
        }
    }

    // ---- manager notifications ----

    /// Asks each document's department manager to review it.
    ///
    /// Only pending documents the actor can see are requested; the rest are
    /// reported as failures. A bulk (non-individual) request clears the
    /// requested ids from the actor's selection.
    pub fn send_approval_request(
        &self,
        ids: &[DocumentId],
        actor: &User,
        is_individual: bool,
    ) -> DispatchReport {
        let report: DispatchReport =
            self.notify_managers(ids, actor, ManagerNotice::Request { is_individual });
        if !is_individual && let Some(mut tracker) = self.selections.get_mut(&actor.id) {
            tracker.remove_all(ids);
        }
        info!(
            actor = %actor.id,
            dispatched = report.dispatched.len(),
            failed = report.failed.len(),
            "Approval requests sent"
        );
        report
    }

    /// Reminds each document's department manager that it awaits review.
    pub fn send_reminder(&self, ids: &[DocumentId], actor: &User) -> DispatchReport {
        let report: DispatchReport = self.notify_managers(ids, actor, ManagerNotice::Reminder);
        info!(
            actor = %actor.id,
            dispatched = report.dispatched.len(),
            failed = report.failed.len(),
            "Reminders sent"
        );
        report
    }

    fn notify_managers(
        &self,
        ids: &[DocumentId],
        actor: &User,
        notice: ManagerNotice,
    ) -> DispatchReport {
        let action: &str = match notice {
            ManagerNotice::Request { .. } => "request approval of",
            ManagerNotice::Reminder => "send a reminder for",
        };
        let unique: BTreeSet<&DocumentId> = ids.iter().collect();
        let mut report: DispatchReport = DispatchReport::default();

        for id in unique {
            let checked: Result<Document, CoreError> =
                self.get_document(id, actor).and_then(|document| {
                    if document.is_pending() {
                        Ok(document)
                    } else {
                        Err(CoreError::InvalidTransition {
                            document_id: id.clone(),
                            from: document.approval_status,
                            action: action.to_string(),
                        })
                    }
                });
            let document: Document = match checked {
                Ok(document) => document,
                Err(error) => {
                    report.failed.push(BulkFailure {
                        document_id: id.clone(),
                        error,
                    });
                    continue;
                }
            };

            let recipients: Vec<Recipient> = vec![self.manager_recipient(&document)];
            let event: NotificationEvent = match notice {
                ManagerNotice::Request { is_individual } => NotificationEvent::ApprovalRequested {
                    document_id: id.clone(),
                    acting_user_id: actor.id.clone(),
                    is_individual,
                    recipients,
                },
                ManagerNotice::Reminder => NotificationEvent::ReminderRequested {
                    document_id: id.clone(),
                    acting_user_id: actor.id.clone(),
                    recipients,
                },
            };
            self.dispatcher.dispatch(event);
            report.dispatched.push(id.clone());
        }
        report
    }

    fn manager_recipient(&self, document: &Document) -> Recipient {
        self.directory
            .read()
            .manager_for(&document.department)
            .map_or_else(
                || Recipient::Address {
                    email: self.config.default_manager_address.clone(),
                },
                Recipient::for_user,
            )
    }

    // ---- selection ----

    /// Adds a document to the user's selection.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids and `Unauthorized` for documents
    /// the user cannot see.
    pub fn select(&self, user: &User, id: &DocumentId) -> Result<(), CoreError> {
        self.get_document(id, user)?;
        self.selections
            .entry(user.id.clone())
            .or_default()
            .add(id.clone());
        debug!(user_id = %user.id, document_id = %id, "Document selected");
        Ok(())
    }

    /// Removes a document from the user's selection.
    pub fn deselect(&self, user_id: &UserId, id: &DocumentId) {
        if let Some(mut tracker) = self.selections.get_mut(user_id) {
            tracker.remove(id);
        }
        debug!(user_id = %user_id, document_id = %id, "Document deselected");
    }

    /// Sets whether a document is selected and returns the new selection.
    ///
    /// # Errors
    ///
    /// See [`ApprovalEngine::select`].
    pub fn toggle_selection(
        &self,
        user: &User,
        id: &DocumentId,
        selected: bool,
    ) -> Result<Vec<DocumentId>, CoreError> {
        if selected {
            self.select(user, id)?;
        } else {
            self.deselect(&user.id, id);
        }
        Ok(self.selection(&user.id))
    }

    /// Empties the user's selection.
    pub fn clear_selection(&self, user_id: &UserId) {
        if let Some(mut tracker) = self.selections.get_mut(user_id) {
            tracker.clear();
        }
        debug!(user_id = %user_id, "Selection cleared");
    }

    /// Returns the user's selection in sorted order.
    #[must_use]
    pub fn selection(&self, user_id: &UserId) -> Vec<DocumentId> {
        self.selections
            .get(user_id)
            .map(|tracker| tracker.snapshot())
            .unwrap_or_default()
    }

    fn forget_selected(&self, ids: &[DocumentId]) {
        if ids.is_empty() {
            return;
        }
        for mut tracker in self.selections.iter_mut() {
            tracker.remove_all(ids);
        }
    }

    // ---- acceptance ----

    /// Records that a user accepted an approved document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is unknown or hidden, does not
    /// require acceptance, is not approved, or was already accepted by
    /// this user.
    pub fn accept(
        &self,
        id: &DocumentId,
        user: &User,
        acceptance_type: AcceptanceType,
    ) -> Result<DocumentAcceptance, CoreError> {
        let document: Document = self.get_document(id, user)?;
        if !document.requires_acceptance {
            return Err(CoreError::AcceptanceNotAllowed {
                document_id: id.clone(),
                reason: String::from("document does not require acceptance"),
            });
        }
        if document.approval_status != ApprovalStatus::Approved {
            return Err(CoreError::AcceptanceNotAllowed {
                document_id: id.clone(),
                reason: format!("document is {}", document.approval_status),
            });
        }

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let acceptance: DocumentAcceptance =
            DocumentAcceptance::new(id.clone(), user.id.clone(), now, acceptance_type);
        self.acceptances.record(acceptance.clone())?;

        let cause: Cause = self.next_cause(format!("Acceptance of {id}"));
        self.audit.record(AuditEvent::new(
            Actor::from_user(user),
            cause,
            Action::new(
                String::from("Accept"),
                Some(format!("Document {}", acceptance_type.as_str())),
            ),
            StateSnapshot::new(document.summary()),
            StateSnapshot::new(document.summary()),
            id.clone(),
            now,
        ));
        info!(
            document_id = %id,
            actor = %user.id,
            acceptance_type = acceptance_type.as_str(),
            "Document accepted"
        );
        Ok(acceptance)
    }

    /// Returns every acceptance of a document.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Unauthorized`.
    pub fn acceptances_for(
        &self,
        id: &DocumentId,
        actor: &User,
    ) -> Result<Vec<DocumentAcceptance>, CoreError> {
        self.get_document(id, actor)?;
        Ok(self.acceptances.for_document(id))
    }

    /// Returns whether a user has accepted a document.
    #[must_use]
    pub fn has_accepted(&self, id: &DocumentId, user_id: &UserId) -> bool {
        self.acceptances.has_accepted(id, user_id)
    }

    /// Returns approved documents the user must still accept.
    #[must_use]
    pub fn pending_acceptances(&self, user: &User) -> Vec<Document> {
        let mut documents: Vec<Document> = self.store.list(|d| {
            d.requires_acceptance
                && d.approval_status == ApprovalStatus::Approved
                && can_view(user, d)
        });
        documents.retain(|d| !self.acceptances.has_accepted(&d.id, &user.id));
        sort_documents(&mut documents, None, SortOrder::Ascending);
        documents
    }
}

fn generate_document_id() -> DocumentId {
    DocumentId::new(&format!("doc-{:016x}", rand::random::<u64>()))
}
