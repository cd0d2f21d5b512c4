// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, ErrorKind, InstanceId, InstanceInfoId, PoolId, RegularShiftId, Season,
    SemesterId, VerifyPolicy,
};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::DuplicateSemester {
        season: Season::Fall,
        year: 2024,
    };
    assert_eq!(format!("{err}"), "Semester Fall 2024 already exists");

    let err: DomainError = DomainError::InstanceAlreadyFilled(InstanceId::new(7));
    assert_eq!(format!("{err}"), "Shift 7 is already filled");

    let err: DomainError = DomainError::VerifyNotPermitted(VerifyPolicy::PoolManager);
    assert_eq!(
        format!("{err}"),
        "You are not permitted to verify this shift (verified by: Pool Managers only)"
    );

    let err: DomainError = DomainError::SemesterNotFound(SemesterId::new(3));
    assert_eq!(format!("{err}"), "Semester 3 not found");
}

#[test]
fn test_error_kinds() {
    assert_eq!(
        DomainError::PoolNotFound(PoolId::new(1)).kind(),
        ErrorKind::NotFound
    );
    assert_eq!(DomainError::SelfVerifyForbidden.kind(), ErrorKind::Validation);
    assert_eq!(
        DomainError::InstanceSourceConflict {
            regular_shift_id: RegularShiftId::new(1),
            info_id: InstanceInfoId::new(1),
        }
        .kind(),
        ErrorKind::Integrity
    );
}

#[test]
fn test_validation_errors_name_their_field() {
    assert_eq!(DomainError::SelfVerifyForbidden.field(), Some("pk"));
    assert_eq!(
        DomainError::InvalidHours {
            field: "hour_adjustment",
            reason: String::from("bad"),
        }
        .field(),
        Some("hour_adjustment")
    );
    assert_eq!(DomainError::NoCurrentSemester.field(), None);
}
