// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_instance;
use crate::{
    AssignmentMode, DomainError, Hours, InstanceDetails, InstanceInfo, InstanceInfoId,
    InstanceSource, InstanceState, PoolId, ProfileId, RegularShiftId, RegularWorkshift, Schedule,
    VerifyPolicy, WorkshiftInstance, WorkshiftType, WorkshiftTypeId,
};
use time::Weekday;
use time::macros::time;

#[test]
fn test_source_from_exactly_one_part() {
    assert_eq!(
        InstanceSource::from_parts(Some(RegularShiftId::new(4)), None),
        Ok(InstanceSource::Recurring(RegularShiftId::new(4)))
    );
    assert_eq!(
        InstanceSource::from_parts(None, Some(InstanceInfoId::new(9))),
        Ok(InstanceSource::Standalone(InstanceInfoId::new(9)))
    );
}

#[test]
fn test_source_with_both_parts_is_integrity_error() {
    let result = InstanceSource::from_parts(Some(RegularShiftId::new(4)), Some(InstanceInfoId::new(9)));
    assert_eq!(
        result,
        Err(DomainError::InstanceSourceConflict {
            regular_shift_id: RegularShiftId::new(4),
            info_id: InstanceInfoId::new(9),
        })
    );
    assert_eq!(
        InstanceSource::from_parts(None, None),
        Err(DomainError::InstanceSourceMissing)
    );
}

#[test]
fn test_instance_state() {
    let mut instance: WorkshiftInstance = create_test_instance(None);
    assert_eq!(instance.state(), InstanceState::Unfilled);

    instance.workshifter = Some(ProfileId::new(1));
    assert_eq!(instance.state(), InstanceState::Assigned);

    instance.closed = true;
    assert_eq!(instance.state(), InstanceState::Verified);

    instance.blown = true;
    assert_eq!(instance.state(), InstanceState::Blown);
}

#[test]
fn test_standing_effect_only_when_closed() {
    let mut instance: WorkshiftInstance = create_test_instance(Some(ProfileId::new(1)));
    assert_eq!(instance.standing_effect(), None);

    instance.closed = true;
    assert_eq!(
        instance.standing_effect(),
        Some((ProfileId::new(1), Hours::from_whole(2)))
    );

    instance.blown = true;
    assert_eq!(
        instance.standing_effect(),
        Some((ProfileId::new(1), Hours::from_whole(-2)))
    );
}

#[test]
fn test_details_accessors_match_for_both_sources() {
    let shift: RegularWorkshift = RegularWorkshift {
        id: RegularShiftId::new(1),
        workshift_type_id: WorkshiftTypeId::new(1),
        pool_id: PoolId::new(2),
        schedule: Schedule::Day(Weekday::Monday),
        count: 1,
        hours: Hours::from_whole(2),
        active: true,
        current_assignees: Vec::new(),
        start_time: Some(time!(18:00)),
        end_time: Some(time!(20:00)),
        verify: VerifyPolicy::PoolManager,
        addendum: String::new(),
        is_manager_shift: false,
    };
    let workshift_type: WorkshiftType = WorkshiftType {
        id: WorkshiftTypeId::new(1),
        title: String::from("Kitchen Clean"),
        description: String::from("Clean the kitchen"),
        quick_tips: String::new(),
        rateable: true,
        assignment: AssignmentMode::Auto,
    };

    let recurring: InstanceDetails = InstanceDetails::Recurring {
        shift,
        workshift_type,
    };
    let snapshot = recurring.to_info_draft();
    let standalone: InstanceDetails = InstanceDetails::Standalone(InstanceInfo {
        id: InstanceInfoId::new(1),
        title: snapshot.title.clone(),
        description: snapshot.description.clone(),
        pool_id: snapshot.pool_id,
        verify: snapshot.verify,
        start_time: snapshot.start_time,
        end_time: snapshot.end_time,
        week_long: snapshot.week_long,
    });

    assert_eq!(recurring.title(), "Kitchen Clean");
    assert_eq!(standalone.title(), recurring.title());
    assert_eq!(standalone.description(), recurring.description());
    assert_eq!(standalone.pool_id(), PoolId::new(2));
    assert_eq!(standalone.verify(), VerifyPolicy::PoolManager);
    assert_eq!(standalone.start_time(), Some(time!(18:00)));
    assert_eq!(standalone.end_time(), Some(time!(20:00)));
    assert!(!standalone.week_long());
}
