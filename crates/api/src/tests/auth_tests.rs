// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use farnsworth_domain::{
    Hours, Manager, ManagerId, Member, MemberId, MemberStatus, Semester, SemesterId, Season,
};
use farnsworth_persistence::Persistence;
use time::macros::date;

use crate::{ApiError, AuthError, AuthenticatedUser, AuthorizationService};

use super::helpers::{House, setup_house, setup_test_persistence};

fn member(id: i64, username: &str) -> Member {
    Member {
        id: MemberId::new(id),
        username: username.to_string(),
        first_name: String::from("Test"),
        last_name: String::from("Member"),
        status: MemberStatus::Resident,
        is_superuser: false,
        active: true,
    }
}

fn position(id: i64, holder: Option<i64>, workshift_manager: bool, president: bool) -> Manager {
    Manager {
        id: ManagerId::new(id),
        title: format!("Position {id}"),
        incumbent: holder.map(MemberId::new),
        workshift_manager,
        president,
        active: true,
        workshift_hours: Hours::ZERO,
    }
}

fn semester_managed_by(managers: &[i64]) -> Semester {
    Semester {
        id: SemesterId::new(1),
        season: Season::Fall,
        year: 2024,
        rate_cents: None,
        policy: None,
        start_date: date!(2024 - 08 - 26),
        end_date: date!(2024 - 12 - 15),
        preferences_open: true,
        workshift_managers: managers.iter().copied().map(MemberId::new).collect(),
    }
}

#[test]
fn test_positions_held_by_someone_else_are_dropped() {
    let user: AuthenticatedUser = AuthenticatedUser::new(
        member(7, "alice"),
        vec![position(1, Some(7), false, false), position(2, Some(8), true, true)],
    );
    assert_eq!(user.positions.len(), 1);
    assert!(user.holds(ManagerId::new(1)));
    assert!(!user.holds(ManagerId::new(2)));
    assert!(!user.is_president());
}

#[test]
fn test_audit_actor_reflects_authority() {
    let plain: AuthenticatedUser = AuthenticatedUser::new(member(1, "alice"), Vec::new());
    assert_eq!(plain.to_audit_actor().actor_type, "member");
    assert_eq!(plain.to_audit_actor().id, "alice");

    let officer: AuthenticatedUser =
        AuthenticatedUser::new(member(2, "bob"), vec![position(1, Some(2), false, false)]);
    assert_eq!(officer.to_audit_actor().actor_type, "manager");

    let mut root: Member = member(3, "root");
    root.is_superuser = true;
    let root: AuthenticatedUser = AuthenticatedUser::new(root, Vec::new());
    assert_eq!(root.to_audit_actor().actor_type, "superuser");
}

#[test]
fn test_semester_managers_come_from_the_semester_record() {
    let semester: Semester = semester_managed_by(&[5]);
    let recorded: AuthenticatedUser = AuthenticatedUser::new(member(5, "wsm"), Vec::new());
    let position_only: AuthenticatedUser =
        AuthenticatedUser::new(member(6, "new-wsm"), vec![position(1, Some(6), true, false)]);

    assert!(AuthorizationService::can_manage(&recorded, Some(&semester)));
    assert!(!AuthorizationService::can_manage(&position_only, Some(&semester)));
    assert!(AuthorizationService::can_manage(&position_only, None));
    assert!(!AuthorizationService::can_manage(&recorded, None));
}

#[test]
fn test_presidents_and_superusers_always_manage() {
    let semester: Semester = semester_managed_by(&[]);
    let president: AuthenticatedUser =
        AuthenticatedUser::new(member(1, "pres"), vec![position(1, Some(1), false, true)]);
    let mut root: Member = member(2, "root");
    root.is_superuser = true;
    let root: AuthenticatedUser = AuthenticatedUser::new(root, Vec::new());

    for user in [&president, &root] {
        assert!(AuthorizationService::can_manage(user, Some(&semester)));
        assert!(AuthorizationService::require_president(user, "add manager").is_ok());
    }
    assert!(AuthorizationService::require_superuser(&president, "delete semester").is_err());
}

#[test]
fn test_require_manage_names_the_action() {
    let plain: AuthenticatedUser = AuthenticatedUser::new(member(1, "alice"), Vec::new());
    let err: ApiError = AuthorizationService::require_manage(&plain, None, "start semester")
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Unauthorized {
            action: String::from("start semester"),
            required: String::from("workshift manager"),
        }
    );
}

#[test]
fn test_resolve_rejects_missing_and_unknown_identities() {
    let mut persistence: Persistence = setup_test_persistence();

    assert_eq!(
        AuthenticatedUser::resolve(&mut persistence, "  ").unwrap_err(),
        AuthError::MissingIdentity
    );
    assert_eq!(
        AuthenticatedUser::resolve(&mut persistence, "nobody").unwrap_err(),
        AuthError::UnknownMember {
            username: String::from("nobody"),
        }
    );

    let admin: AuthenticatedUser = AuthenticatedUser::resolve(&mut persistence, "admin").unwrap();
    assert!(admin.member.is_superuser);
}

#[test]
fn test_auth_errors_map_to_authentication_failures() {
    assert!(matches!(
        ApiError::from(AuthError::MissingIdentity),
        ApiError::AuthenticationFailed { .. }
    ));
    assert!(matches!(
        ApiError::from(AuthError::Lookup {
            reason: String::from("disk on fire"),
        }),
        ApiError::Internal { .. }
    ));
}

#[test]
fn test_resolved_positions_grant_semester_management() {
    let House { wsm, alice, .. } = setup_house();

    assert!(wsm.user.holds_workshift_manager_position());
    assert!(!alice.user.is_manager());
    assert!(AuthorizationService::require_manage(&wsm.user, None, "create type").is_ok());
    assert!(AuthorizationService::require_manage(&alice.user, None, "create type").is_err());
}
