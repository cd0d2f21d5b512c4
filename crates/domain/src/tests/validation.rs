// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, Hours, MAX_SHIFT_COUNT, NewSemester, PoolDraft, PoolId, Preference, ProfileId,
    RegularWorkshiftDraft, Schedule, Season, TimeBlockSpec, VerifyPolicy, WorkshiftTypeId,
    is_valid_name, is_valid_username, validate_instance_hours, validate_member_fields,
    validate_pool, validate_regular_shift, validate_semester, validate_time_block, validate_title,
};
use time::Weekday;
use time::macros::{date, time};

fn create_test_draft() -> RegularWorkshiftDraft {
    RegularWorkshiftDraft {
        workshift_type_id: WorkshiftTypeId::new(1),
        pool_id: PoolId::new(1),
        schedule: Schedule::Day(Weekday::Monday),
        count: 2,
        hours: Hours::from_whole(2),
        active: true,
        current_assignees: vec![ProfileId::new(1)],
        start_time: Some(time!(9:00)),
        end_time: Some(time!(11:00)),
        verify: VerifyPolicy::OtherMember,
        addendum: String::new(),
        is_manager_shift: false,
    }
}

#[test]
fn test_valid_usernames() {
    assert!(is_valid_username("alice_1"));
    assert!(!is_valid_username(""));
    assert!(!is_valid_username("alice smith"));
    assert!(!is_valid_username("alice@home"));
}

#[test]
fn test_valid_names_return_true() {
    assert!(is_valid_name("Alice"));
    assert!(is_valid_name("O'Neil"));
    assert!(!is_valid_name(""));
    assert!(!is_valid_name("R2D2"));
    assert!(!is_valid_name("Anne-Marie"));
}

#[test]
fn test_member_fields() {
    assert_eq!(validate_member_fields("alice", "Alice", "Smith"), Ok(()));
    assert_eq!(
        validate_member_fields("al ice", "Alice", "Smith"),
        Err(DomainError::InvalidUsername(String::from("al ice")))
    );
    assert_eq!(
        validate_member_fields("alice", "Alice", "Sm1th"),
        Err(DomainError::InvalidName(String::from("Sm1th")))
    );
}

#[test]
fn test_title_bounds() {
    assert!(validate_title("Kitchen").is_ok());
    assert!(validate_title("   ").is_err());
    assert!(validate_title(&"x".repeat(101)).is_err());
}

#[test]
fn test_semester_dates_ordered() {
    let mut semester: NewSemester = NewSemester {
        season: Season::Fall,
        year: 2024,
        rate_cents: None,
        policy: None,
        start_date: date!(2024 - 08 - 26),
        end_date: date!(2024 - 12 - 15),
    };
    assert_eq!(validate_semester(&semester), Ok(()));

    semester.end_date = semester.start_date;
    assert!(matches!(
        validate_semester(&semester),
        Err(DomainError::InvalidSemesterDates { .. })
    ));
}

#[test]
fn test_pool_rejects_negative_hours() {
    let pool: PoolDraft =
        PoolDraft::with_defaults(String::from("Kitchen"), Hours::from_whole(-1), 24, 8);
    assert!(matches!(
        validate_pool(&pool),
        Err(DomainError::InvalidHours { field: "hours", .. })
    ));
}

#[test]
fn test_pool_rejects_oversized_hours() {
    let pool: PoolDraft =
        PoolDraft::with_defaults(String::from("Huge"), Hours::from_whole(1001), 24, 8);
    assert!(matches!(
        validate_pool(&pool),
        Err(DomainError::InvalidHours { field: "hours", .. })
    ));

    let pool: PoolDraft =
        PoolDraft::with_defaults(String::from("Semester"), Hours::from_whole(1000), 24, 8);
    assert_eq!(validate_pool(&pool), Ok(()));
}

#[test]
fn test_shift_hours_are_capped_at_one_week() {
    let mut draft: RegularWorkshiftDraft = create_test_draft();
    draft.hours = Hours::from_hundredths(168 * 100 + 1);
    assert!(matches!(
        validate_regular_shift(&draft),
        Err(DomainError::InvalidHours { field: "hours", .. })
    ));

    assert_eq!(validate_instance_hours(Hours::from_whole(168)), Ok(()));
    assert!(validate_instance_hours(Hours::from_whole(169)).is_err());
}

#[test]
fn test_shift_count_is_capped() {
    let mut draft: RegularWorkshiftDraft = create_test_draft();
    draft.count = MAX_SHIFT_COUNT;
    assert_eq!(validate_regular_shift(&draft), Ok(()));

    draft.count = MAX_SHIFT_COUNT + 1;
    assert_eq!(
        validate_regular_shift(&draft),
        Err(DomainError::InvalidShiftCount { count: 21 })
    );

    draft.count = 1_000_000;
    assert_eq!(
        validate_regular_shift(&draft),
        Err(DomainError::InvalidShiftCount { count: 1_000_000 })
    );
}

#[test]
fn test_regular_shift_validation() {
    assert_eq!(validate_regular_shift(&create_test_draft()), Ok(()));

    let mut draft: RegularWorkshiftDraft = create_test_draft();
    draft.count = 0;
    assert_eq!(
        validate_regular_shift(&draft),
        Err(DomainError::InvalidShiftCount { count: 0 })
    );

    let mut draft: RegularWorkshiftDraft = create_test_draft();
    draft.current_assignees = vec![ProfileId::new(1), ProfileId::new(2), ProfileId::new(3)];
    assert_eq!(
        validate_regular_shift(&draft),
        Err(DomainError::TooManyAssignees {
            count: 2,
            assignees: 3
        })
    );

    let mut draft: RegularWorkshiftDraft = create_test_draft();
    draft.current_assignees = vec![ProfileId::new(1), ProfileId::new(1)];
    assert_eq!(
        validate_regular_shift(&draft),
        Err(DomainError::DuplicateAssignee(ProfileId::new(1)))
    );

    let mut draft: RegularWorkshiftDraft = create_test_draft();
    draft.start_time = Some(time!(12:00));
    assert!(matches!(
        validate_regular_shift(&draft),
        Err(DomainError::InvalidTimeRange { .. })
    ));
}

#[test]
fn test_time_block_start_not_after_end() {
    let mut block: TimeBlockSpec = TimeBlockSpec {
        preference: Preference::Busy,
        day: Weekday::Tuesday,
        start_time: time!(9:00),
        end_time: time!(9:00),
    };
    assert_eq!(validate_time_block(&block), Ok(()));

    block.start_time = time!(10:00);
    assert!(validate_time_block(&block).is_err());
}
