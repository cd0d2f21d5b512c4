// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Command;
use crate::tests::helpers::create_test_context;
use farnsworth_domain::{InstanceId, PoolHoursId, ProfileId, SemesterId, Viewer};
use time::macros::date;

#[test]
fn test_command_names_match_variants() {
    let viewer: Viewer = Viewer::default();
    let sign_in: Command = Command::SignIn {
        instance_id: InstanceId::new(1),
        viewer,
    };
    let blown: Command = Command::MarkBlown {
        instance_id: InstanceId::new(1),
        viewer,
    };
    let fines: Command = Command::CalculateFines {
        semester_id: SemesterId::new(1),
        clear: true,
    };
    let recompute: Command = Command::RecomputeStanding {
        pool_hours_id: PoolHoursId::new(9),
    };

    assert_eq!(sign_in.name(), "SignIn");
    assert_eq!(blown.name(), "MarkBlown");
    assert_eq!(fines.name(), "CalculateFines");
    assert_eq!(recompute.name(), "RecomputeStanding");
}

#[test]
fn test_commands_carry_viewer_by_value() {
    let viewer: Viewer = Viewer {
        profile_id: Some(ProfileId::new(5)),
        is_pool_manager: true,
        ..Viewer::default()
    };
    let command: Command = Command::Verify {
        instance_id: InstanceId::new(3),
        viewer,
    };

    let Command::Verify { viewer: carried, .. } = command else {
        panic!("expected a verify command");
    };
    assert_eq!(carried.profile_id, Some(ProfileId::new(5)));
    assert!(carried.is_pool_manager);
}

#[test]
fn test_context_today_is_date_of_now() {
    let ctx = create_test_context();
    assert_eq!(ctx.today(), date!(2024 - 09 - 02));
}
