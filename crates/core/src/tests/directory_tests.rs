// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{HR, IT, admin, create_test_user, hr_employee, hr_manager};
use crate::{CoreError, Recipient, UserDirectory};
use doc_approval_domain::{Department, DomainError, Role, User, UserId};

#[test]
fn test_first_manager_owns_department() {
    let mut directory: UserDirectory = UserDirectory::new();
    directory.register(hr_employee()).unwrap();
    directory.register(hr_manager()).unwrap();
    directory
        .register(create_test_user("hr-manager-2", Role::Manager, HR))
        .unwrap();

    let manager: &User = directory.manager_for(&Department::new(HR)).unwrap();

    assert_eq!(manager.id, UserId::new("hr-manager"));
    assert!(directory.manager_for(&Department::new(IT)).is_none());
}

#[test]
fn test_admin_is_not_indexed_as_manager() {
    let mut directory: UserDirectory = UserDirectory::new();
    directory.register(admin()).unwrap();

    assert!(directory.manager_for(&Department::new(IT)).is_none());
}

#[test]
fn test_duplicate_user_rejected() {
    let mut directory: UserDirectory = UserDirectory::new();
    directory.register(hr_manager()).unwrap();

    let result: Result<(), CoreError> = directory.register(hr_manager());

    assert_eq!(
        result,
        Err(CoreError::DuplicateUser(UserId::new("hr-manager")))
    );
    assert_eq!(directory.len(), 1);
}

#[test]
fn test_invalid_user_rejected() {
    let mut directory: UserDirectory = UserDirectory::new();
    let mut user: User = hr_employee();
    user.email = String::from("not-an-address");

    let result: Result<(), CoreError> = directory.register(user);

    assert!(matches!(
        result,
        Err(CoreError::Validation(DomainError::InvalidEmail(_)))
    ));
    assert!(directory.is_empty());
}

#[test]
fn test_lookup_and_listing_order() {
    let mut directory: UserDirectory = UserDirectory::new();
    directory.register(hr_manager()).unwrap();
    directory.register(admin()).unwrap();

    assert_eq!(
        directory.get(&UserId::new("ghost")),
        Err(CoreError::UnknownUser(UserId::new("ghost")))
    );
    let ids: Vec<UserId> = directory.all().into_iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![UserId::new("hr-manager"), UserId::new("admin")]);
}

#[test]
fn test_recipient_email() {
    let user: Recipient = Recipient::for_user(&hr_manager());
    let address: Recipient = Recipient::Address {
        email: String::from("fallback@example.com"),
    };

    assert_eq!(user.email(), "hr-manager@example.com");
    assert_eq!(address.email(), "fallback@example.com");
}
