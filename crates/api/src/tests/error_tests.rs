// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use farnsworth::{CoreError, StoreError};
use farnsworth_domain::{DomainError, InstanceId, PoolId, SemesterId, VerifyPolicy};

use crate::{ApiError, translate_core_error, translate_domain_error};

#[test]
fn test_field_errors_become_invalid_input() {
    let err: ApiError = translate_domain_error(DomainError::InvalidUsername(String::from("a b")));
    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "username"
    ));
}

#[test]
fn test_pool_from_another_semester_names_pool_field() {
    let err: ApiError = translate_domain_error(DomainError::PoolNotInSemester {
        pool_id: PoolId::new(2),
        semester_id: SemesterId::new(1),
    });
    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, ref message }
            if field == "pool_id" && message.contains("does not belong to semester 1")
    ));
}

#[test]
fn test_interaction_failures_are_rule_violations() {
    let cases: [(DomainError, &str); 4] = [
        (DomainError::InstanceClosed(InstanceId::new(1)), "instance_closed"),
        (DomainError::InstanceAlreadyFilled(InstanceId::new(1)), "instance_filled"),
        (DomainError::SelfVerifyForbidden, "no_self_verify"),
        (
            DomainError::VerifyNotPermitted(VerifyPolicy::PoolManager),
            "verify_policy",
        ),
    ];
    for (domain_err, expected) in cases {
        match translate_domain_error(domain_err) {
            ApiError::DomainRuleViolation { rule, .. } => assert_eq!(rule, expected),
            other => panic!("expected a rule violation, got {other:?}"),
        }
    }
}

#[test]
fn test_missing_records_name_their_resource() {
    let err: ApiError = translate_domain_error(DomainError::SemesterNotFound(SemesterId::new(9)));
    assert!(matches!(
        err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Semester"
    ));
    assert!(matches!(
        translate_domain_error(DomainError::NoCurrentSemester),
        ApiError::ResourceNotFound { .. }
    ));
}

#[test]
fn test_integrity_violations_are_internal() {
    assert!(matches!(
        translate_domain_error(DomainError::InstanceSourceMissing),
        ApiError::Internal { .. }
    ));
    assert!(matches!(
        translate_core_error(CoreError::Storage(StoreError::Integrity(String::from(
            "instance 4 has two sources"
        )))),
        ApiError::Internal { .. }
    ));
}

#[test]
fn test_core_errors_unwrap_domain_violations() {
    let err: ApiError = translate_core_error(CoreError::DomainViolation(
        DomainError::BlownNotPermitted,
    ));
    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "blown_policy"
    ));
}

#[test]
fn test_display_includes_context() {
    let err: ApiError = ApiError::InvalidInput {
        field: String::from("hours"),
        message: String::from("must not be negative"),
    };
    assert_eq!(
        err.to_string(),
        "Invalid input for field 'hours': must not be negative"
    );
}
