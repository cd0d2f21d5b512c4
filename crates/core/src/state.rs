// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::engine::assignment::AutoAssignReport;
use crate::engine::fines::FineRecord;
use farnsworth_audit::{Actor, AuditEvent, Cause};
use farnsworth_domain::{
    InstanceId, Manager, Member, PoolHours, ProfileId, RegularWorkshift, Semester, SemesterId,
    WorkshiftInstance, WorkshiftPool, WorkshiftProfile, WorkshiftSettings, WorkshiftType,
};
use time::{Date, OffsetDateTime};

/// Who is applying a command, why, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub actor: Actor,
    pub cause: Cause,
    /// The moment the command takes effect. Log entries and date cutoffs
    /// are derived from it.
    pub now: OffsetDateTime,
    pub settings: WorkshiftSettings,
}

impl CommandContext {
    /// Creates a new command context.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor applying the command
    /// * `cause` - The reason for the command
    /// * `now` - The current time
    /// * `settings` - Defaults for records the system creates
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        now: OffsetDateTime,
        settings: WorkshiftSettings,
    ) -> Self {
        Self {
            actor,
            cause,
            now,
            settings,
        }
    }

    #[must_use]
    pub const fn today(&self) -> Date {
        self.now.date()
    }
}

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Semester(Semester),
    Member(Member),
    Manager(Manager),
    Profile(WorkshiftProfile),
    Pool(WorkshiftPool),
    PoolHours(PoolHours),
    WorkshiftType(WorkshiftType),
    RegularShift(RegularWorkshift),
    Instance(WorkshiftInstance),
    /// A record was deleted.
    Deleted,
    StandingsUpdated {
        /// Hour records debited for newly completed periods.
        debited: usize,
        /// Instances closed because their time ran out.
        closed: usize,
    },
    AutoAssigned(AutoAssignReport),
    RandomAssigned(Vec<(InstanceId, ProfileId)>),
    /// Number of shifts whose assignees were cleared.
    AssignmentsCleared(usize),
    Fines(Vec<FineRecord>),
}

impl Outcome {
    /// The semester the outcome belongs to, when it says so itself.
    #[must_use]
    pub const fn semester_id(&self) -> Option<SemesterId> {
        match self {
            Self::Semester(semester) => Some(semester.id),
            Self::Profile(profile) => Some(profile.semester_id),
            Self::Pool(pool) => Some(pool.semester_id),
            Self::Instance(instance) => Some(instance.semester_id),
            _ => None,
        }
    }

    /// A short description of the outcome, used as the audit snapshot.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Semester(semester) => format!("semester={semester}"),
            Self::Member(member) => format!("member={}", member.username),
            Self::Manager(manager) => format!("manager={}", manager.title),
            Self::Profile(profile) => {
                format!("profile={} member={}", profile.id, profile.member_id)
            }
            Self::Pool(pool) => format!("pool={} hours={}", pool.title, pool.hours),
            Self::PoolHours(record) => format!(
                "pool_hours={} hours={} standing={}",
                record.id, record.hours, record.standing
            ),
            Self::WorkshiftType(workshift_type) => {
                format!("workshift_type={}", workshift_type.title)
            }
            Self::RegularShift(shift) => format!(
                "regular_shift={} active={} assignees={}",
                shift.id,
                shift.active,
                shift.current_assignees.len()
            ),
            Self::Instance(instance) => format!(
                "instance={} state={:?} hours={}",
                instance.id,
                instance.state(),
                instance.hours
            ),
            Self::Deleted => String::from("deleted"),
            Self::StandingsUpdated { debited, closed } => {
                format!("debited={debited} closed={closed}")
            }
            Self::AutoAssigned(report) => format!(
                "assigned={} unfinished={}",
                report.assigned.len(),
                report.unfinished.len()
            ),
            Self::RandomAssigned(assigned) => format!("assigned={}", assigned.len()),
            Self::AssignmentsCleared(count) => format!("cleared={count}"),
            Self::Fines(fines) => format!("fined={}", fines.len()),
        }
    }
}

/// The result of applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub outcome: Outcome,
    /// The audit event recorded for the transition.
    pub audit_event: AuditEvent,
}
