// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Demo users and documents loaded with `--seed`.

use doc_approval::{ApprovalEngine, CoreError};
use doc_approval_domain::{
    AccessType, Department, DocumentId, DocumentType, FileType, NewDocument, Role, User, UserId,
};
use time::{Date, Duration, OffsetDateTime};
use tracing::info;

const HUMAN_RESOURCES: &str = "Human Resources";
const INFORMATION_TECHNOLOGY: &str = "Information Technology";
const FINANCE: &str = "Finance";
const OPERATIONS: &str = "Operations";
const MARKETING: &str = "Marketing";
const LEGAL: &str = "Legal";

const DEPARTMENTS: [(&str, &str); 6] = [
    (HUMAN_RESOURCES, "#3B82F6"),
    (INFORMATION_TECHNOLOGY, "#10B981"),
    (FINANCE, "#F59E0B"),
    (OPERATIONS, "#EF4444"),
    (MARKETING, "#8B5CF6"),
    (LEGAL, "#06B6D4"),
];

/// The id of the seeded admin, who uploads every seeded document.
pub const SEED_ADMIN_ID: &str = "1";

const USERS: [(&str, &str, &str, Role, &str); 3] = [
    (
        SEED_ADMIN_ID,
        "Sarah Johnson",
        "fms-admin@edaratgroup.com",
        Role::Admin,
        INFORMATION_TECHNOLOGY,
    ),
    (
        "2",
        "Ahmed Al-Rashid",
        "fms-hr@edaratgroup.com",
        Role::Manager,
        HUMAN_RESOURCES,
    ),
    (
        "3",
        "Fatima Al-Zahra",
        "fms-em001@edaratgroup.com",
        Role::Employee,
        HUMAN_RESOURCES,
    ),
];

struct SeedDocument {
    id: &'static str,
    title: &'static str,
    document_type: DocumentType,
    file_type: FileType,
    department: &'static str,
    access_type: AccessType,
    pending: bool,
    tags: &'static [&'static str],
    description: &'static str,
    /// Days from today.
    expires_in: Option<i64>,
    requires_acceptance: bool,
    notify_all_after_approval: bool,
}

const DOCUMENTS: [SeedDocument; 10] = [
    SeedDocument {
        id: "1",
        title: "Employee Handbook 2024",
        document_type: DocumentType::Manual,
        file_type: FileType::Pdf,
        department: HUMAN_RESOURCES,
        access_type: AccessType::Public,
        pending: false,
        tags: &["handbook", "policies", "hr"],
        description: "Comprehensive guide for all employees covering company policies, procedures, and benefits.",
        expires_in: Some(365),
        requires_acceptance: true,
        notify_all_after_approval: false,
    },
    SeedDocument {
        id: "2",
        title: "IT Security Policy",
        document_type: DocumentType::Policy,
        file_type: FileType::Docx,
        department: INFORMATION_TECHNOLOGY,
        access_type: AccessType::Department,
        pending: true,
        tags: &["security", "it", "compliance"],
        description: "Security protocols and guidelines for all IT systems and data handling.",
        expires_in: Some(180),
        requires_acceptance: true,
        notify_all_after_approval: false,
    },
    SeedDocument {
        id: "3",
        title: "Financial Report Q1 2024",
        document_type: DocumentType::Form,
        file_type: FileType::Xlsx,
        department: FINANCE,
        access_type: AccessType::Restricted,
        pending: false,
        tags: &["financial", "quarterly", "report"],
        description: "First quarter financial performance and budget analysis.",
        expires_in: None,
        requires_acceptance: false,
        notify_all_after_approval: false,
    },
    SeedDocument {
        id: "4",
        title: "Emergency Response Procedures",
        document_type: DocumentType::Sop,
        file_type: FileType::Pdf,
        department: OPERATIONS,
        access_type: AccessType::Public,
        pending: false,
        tags: &["emergency", "safety", "procedures"],
        description: "Step-by-step emergency response and evacuation procedures.",
        expires_in: Some(90),
        requires_acceptance: true,
        notify_all_after_approval: false,
    },
    SeedDocument {
        id: "5",
        title: "Marketing Strategy 2024",
        document_type: DocumentType::Guide,
        file_type: FileType::Docx,
        department: MARKETING,
        access_type: AccessType::Department,
        pending: true,
        tags: &["marketing", "strategy", "2024"],
        description: "Comprehensive marketing strategy and campaign planning for 2024.",
        expires_in: None,
        requires_acceptance: false,
        notify_all_after_approval: false,
    },
    SeedDocument {
        id: "6",
        title: "Performance Review Guidelines",
        document_type: DocumentType::Manual,
        file_type: FileType::Pdf,
        department: HUMAN_RESOURCES,
        access_type: AccessType::Department,
        pending: false,
        tags: &["performance", "review", "hr", "evaluation"],
        description: "Complete guide for conducting employee performance reviews and evaluations.",
        expires_in: None,
        requires_acceptance: false,
        notify_all_after_approval: false,
    },
    SeedDocument {
        id: "7",
        title: "Remote Work Policy",
        document_type: DocumentType::Policy,
        file_type: FileType::Docx,
        department: HUMAN_RESOURCES,
        access_type: AccessType::Public,
        pending: true,
        tags: &["remote", "work", "policy", "flexible"],
        description: "Guidelines and requirements for remote work arrangements and hybrid schedules.",
        expires_in: Some(240),
        requires_acceptance: true,
        notify_all_after_approval: false,
    },
    SeedDocument {
        id: "8",
        title: "Benefits Enrollment Guide",
        document_type: DocumentType::Guide,
        file_type: FileType::Pdf,
        department: HUMAN_RESOURCES,
        access_type: AccessType::Public,
        pending: true,
        tags: &["benefits", "enrollment", "health", "insurance"],
        description: "Step-by-step guide for employee benefits enrollment and coverage options.",
        expires_in: Some(330),
        requires_acceptance: true,
        notify_all_after_approval: true,
    },
    SeedDocument {
        id: "9",
        title: "Onboarding Checklist Template",
        document_type: DocumentType::Form,
        file_type: FileType::Xlsx,
        department: HUMAN_RESOURCES,
        access_type: AccessType::Department,
        pending: true,
        tags: &["onboarding", "checklist", "new hire"],
        description: "Template checklist for new employee onboarding process and documentation.",
        expires_in: None,
        requires_acceptance: false,
        notify_all_after_approval: false,
    },
    SeedDocument {
        id: "10",
        title: "Software Installation Guidelines",
        document_type: DocumentType::Sop,
        file_type: FileType::Pdf,
        department: INFORMATION_TECHNOLOGY,
        access_type: AccessType::Department,
        pending: false,
        tags: &["software", "installation", "procedures", "it"],
        description: "Standard procedures for software installation and approval process.",
        expires_in: None,
        requires_acceptance: false,
        notify_all_after_approval: false,
    },
];

fn url_for(seed: &SeedDocument) -> String {
    let slug: String = seed
        .title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-");
    format!("/documents/{slug}.{}", seed.file_type)
}

/// Registers the demo users and departments and uploads the demo documents.
///
/// Documents seeded as approved skip the approval workflow. Expiry dates
/// are relative to today so the seed always validates.
///
/// # Errors
///
/// Returns an error if the engine already holds any of the seeded ids or
/// departments.
pub fn load(engine: &ApprovalEngine) -> Result<(), CoreError> {
    for (id, name, email, role, department) in USERS {
        engine.register_user(User::new(
            UserId::new(id),
            name.to_string(),
            email.to_string(),
            role,
            Department::new(department),
        ))?;
    }

    let admin: User = engine.user(&UserId::new(SEED_ADMIN_ID))?;
    for (name, color) in DEPARTMENTS {
        engine.add_department(&admin, Department::new(name), color.to_string())?;
    }

    let today: Date = OffsetDateTime::now_utc().date();

    for seed in &DOCUMENTS {
        engine.upload(
            NewDocument {
                id: Some(DocumentId::new(seed.id)),
                title: seed.title.to_string(),
                document_type: seed.document_type,
                file_type: seed.file_type,
                department: Department::new(seed.department),
                access_type: seed.access_type,
                tags: seed.tags.iter().map(ToString::to_string).collect(),
                description: seed.description.to_string(),
                url: url_for(seed),
                expiry_date: seed.expires_in.map(|days| today + Duration::days(days)),
                requires_acceptance: seed.requires_acceptance,
                notify_all_after_approval: seed.notify_all_after_approval,
                approval_required: seed.pending,
            },
            &admin,
        )?;
    }

    info!(
        users = USERS.len(),
        departments = DEPARTMENTS.len(),
        documents = DOCUMENTS.len(),
        "Loaded seed data"
    );
    Ok(())
}
