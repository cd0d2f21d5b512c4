// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use farnsworth_domain::{
    Hours, Interaction, Manager, ManagerId, Member, MemberId, MemberStatus, PoolId, Season,
    Semester, SemesterId, WorkshiftPool,
};
use time::macros::date;

use crate::{
    AuthenticatedUser, Capability, InstanceCapabilities, SemesterCapabilities,
    compute_instance_capabilities, compute_semester_capabilities,
};

fn resident(id: i64) -> Member {
    Member {
        id: MemberId::new(id),
        username: format!("member{id}"),
        first_name: String::from("Test"),
        last_name: String::from("Member"),
        status: MemberStatus::Resident,
        is_superuser: false,
        active: true,
    }
}

fn semester(preferences_open: bool, managers: &[i64]) -> Semester {
    Semester {
        id: SemesterId::new(1),
        season: Season::Fall,
        year: 2024,
        rate_cents: Some(1000),
        policy: None,
        start_date: date!(2024 - 08 - 26),
        end_date: date!(2024 - 12 - 15),
        preferences_open,
        workshift_managers: managers.iter().copied().map(MemberId::new).collect(),
    }
}

fn humor_pool(managers: &[i64]) -> WorkshiftPool {
    WorkshiftPool {
        id: PoolId::new(2),
        semester_id: SemesterId::new(1),
        title: String::from("Humor Shift"),
        managers: managers.iter().copied().map(ManagerId::new).collect(),
        sign_out_cutoff: 24,
        verify_cutoff: 8,
        hours: Hours::from_whole(2),
        weeks_per_period: 6,
        first_fine_date: None,
        second_fine_date: None,
        third_fine_date: None,
        any_blown: false,
        self_verify: false,
        is_primary: false,
    }
}

#[test]
fn test_capability_serializes_as_bool() {
    assert_eq!(serde_json::to_string(&Capability::Allowed).unwrap(), "true");
    assert_eq!(serde_json::to_string(&Capability::Denied).unwrap(), "false");
    let parsed: Capability = serde_json::from_str("true").unwrap();
    assert_eq!(parsed, Capability::Allowed);
}

#[test]
fn test_members_edit_preferences_only_while_open() {
    let user: AuthenticatedUser = AuthenticatedUser::new(resident(1), Vec::new());

    let open: SemesterCapabilities = compute_semester_capabilities(&user, &semester(true, &[]));
    assert_eq!(open.can_edit_preferences, Capability::Allowed);
    assert_eq!(open.can_manage, Capability::Denied);
    assert_eq!(open.can_assign_shifts, Capability::Denied);

    let closed: SemesterCapabilities =
        compute_semester_capabilities(&user, &semester(false, &[]));
    assert_eq!(closed.can_edit_preferences, Capability::Denied);
}

#[test]
fn test_semester_managers_keep_every_capability() {
    let user: AuthenticatedUser = AuthenticatedUser::new(resident(1), Vec::new());
    let caps: SemesterCapabilities = compute_semester_capabilities(&user, &semester(false, &[1]));
    assert_eq!(caps.can_manage, Capability::Allowed);
    assert_eq!(caps.can_edit_preferences, Capability::Allowed);
    assert_eq!(caps.can_calculate_fines, Capability::Allowed);
}

#[test]
fn test_instance_capabilities_follow_available_interactions() {
    let user: AuthenticatedUser = AuthenticatedUser::new(resident(1), Vec::new());
    let caps: InstanceCapabilities = compute_instance_capabilities(
        &user,
        &semester(true, &[]),
        &humor_pool(&[]),
        &[Interaction::SignIn],
    );
    assert_eq!(caps.can_sign_in, Capability::Allowed);
    assert_eq!(caps.can_sign_out, Capability::Denied);
    assert_eq!(caps.can_verify, Capability::Denied);
    assert_eq!(caps.can_mark_blown, Capability::Denied);
    assert_eq!(caps.can_edit, Capability::Denied);
}

#[test]
fn test_pool_managers_may_edit_their_pool_shifts() {
    let humor_manager: Manager = Manager {
        id: ManagerId::new(4),
        title: String::from("Humor Manager"),
        incumbent: Some(MemberId::new(1)),
        workshift_manager: false,
        president: false,
        active: true,
        workshift_hours: Hours::ZERO,
    };
    let user: AuthenticatedUser = AuthenticatedUser::new(resident(1), vec![humor_manager]);

    let caps: InstanceCapabilities = compute_instance_capabilities(
        &user,
        &semester(true, &[]),
        &humor_pool(&[4]),
        &[Interaction::Verify, Interaction::Blown],
    );
    assert_eq!(caps.can_edit, Capability::Allowed);
    assert_eq!(caps.can_verify, Capability::Allowed);
    assert_eq!(caps.can_mark_blown, Capability::Allowed);
}
