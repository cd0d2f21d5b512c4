// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_instance;
use crate::{AutoAssignReport, Outcome};
use farnsworth_domain::{ProfileId, RegularShiftId, SemesterId};

#[test]
fn test_instance_outcome_reports_its_semester() {
    let outcome: Outcome = Outcome::Instance(create_test_instance(None));
    assert_eq!(outcome.semester_id(), Some(SemesterId::new(1)));
}

#[test]
fn test_counters_have_no_semester() {
    let outcome: Outcome = Outcome::StandingsUpdated {
        debited: 3,
        closed: 1,
    };
    assert_eq!(outcome.semester_id(), None);
    assert_eq!(outcome.summary(), "debited=3 closed=1");
}

#[test]
fn test_instance_summary_includes_state() {
    let mut instance = create_test_instance(Some(ProfileId::new(2)));
    instance.closed = true;
    let summary: String = Outcome::Instance(instance).summary();
    assert_eq!(summary, "instance=42 state=Verified hours=2.00");
}

#[test]
fn test_auto_assign_summary_counts_assignments() {
    let report: AutoAssignReport = AutoAssignReport {
        assigned: vec![
            (RegularShiftId::new(1), ProfileId::new(1)),
            (RegularShiftId::new(2), ProfileId::new(1)),
        ],
        unfinished: vec![ProfileId::new(3)],
    };
    assert_eq!(
        Outcome::AutoAssigned(report).summary(),
        "assigned=2 unfinished=1"
    );
}
