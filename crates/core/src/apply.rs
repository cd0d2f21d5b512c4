// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::engine::{
    assignment, fines, instances, interactions, pool_hours, preferences, semesters,
};
use crate::error::CoreError;
use crate::state::{CommandContext, Outcome, TransitionResult};
use crate::store::WorkshiftStore;
use farnsworth_audit::{Action, AuditEvent, StateSnapshot};
use farnsworth_domain::{PoolHours, SemesterId, WorkshiftInstance, WorkshiftPool};

/// Describes the record a command targets, before the command runs.
fn snapshot_before<S: WorkshiftStore>(
    store: &mut S,
    command: &Command,
) -> Result<StateSnapshot, CoreError> {
    let data: Option<String> = match command {
        Command::SignIn { instance_id, .. }
        | Command::SignOut { instance_id, .. }
        | Command::Verify { instance_id, .. }
        | Command::MarkBlown { instance_id, .. }
        | Command::EditInstance { instance_id, .. }
        | Command::DeleteInstance { instance_id }
        | Command::EditInstanceHours { instance_id, .. } => store
            .get_instance(*instance_id)?
            .map(|instance: WorkshiftInstance| Outcome::Instance(instance).summary()),
        Command::AdjustPoolHours { pool_hours_id, .. }
        | Command::RecomputeStanding { pool_hours_id } => store
            .get_pool_hours(*pool_hours_id)?
            .map(|record: PoolHours| Outcome::PoolHours(record).summary()),
        Command::EditPool { pool_id, .. } | Command::DeletePool { pool_id } => store
            .get_pool(*pool_id)?
            .map(|pool: WorkshiftPool| Outcome::Pool(pool).summary()),
        Command::EditRegularShift { shift_id, .. } | Command::DeleteRegularShift { shift_id } => {
            store
                .get_regular_shift(*shift_id)?
                .map(|shift| Outcome::RegularShift(shift).summary())
        }
        Command::UpdateSemester { semester_id, .. }
        | Command::DeleteSemester { semester_id }
        | Command::SetCurrentSemester { semester_id } => store
            .get_semester(*semester_id)?
            .map(|semester| Outcome::Semester(semester).summary()),
        _ => None,
    };
    Ok(data.map_or_else(StateSnapshot::empty, StateSnapshot::new))
}

/// The semester a command is scoped to when it names one directly.
const fn named_semester(command: &Command) -> Option<SemesterId> {
    match command {
        Command::UpdateSemester { semester_id, .. }
        | Command::SetCurrentSemester { semester_id }
        | Command::AddWorkshifter { semester_id, .. }
        | Command::CreatePool { semester_id, .. }
        | Command::UpdateStandings { semester_id }
        | Command::ClearAssignments { semester_id }
        | Command::CalculateFines { semester_id, .. } => Some(*semester_id),
        _ => None,
    }
}

fn run<S: WorkshiftStore>(
    store: &mut S,
    ctx: &CommandContext,
    command: Command,
) -> Result<Outcome, CoreError> {
    let now = ctx.now;
    let outcome: Outcome = match command {
        Command::StartSemester {
            semester,
            extra_pools,
        } => Outcome::Semester(semesters::start_semester(
            store,
            &semester,
            &extra_pools,
            &ctx.settings,
            now,
        )?),
        Command::UpdateSemester {
            semester_id,
            rate_cents,
            policy,
            preferences_open,
        } => Outcome::Semester(semesters::update_semester(
            store,
            semester_id,
            rate_cents,
            policy,
            preferences_open,
        )?),
        Command::SetCurrentSemester { semester_id } => {
            Outcome::Semester(semesters::set_current_semester(store, semester_id)?)
        }
        Command::DeleteSemester { semester_id } => {
            semesters::delete_semester(store, semester_id)?;
            Outcome::Deleted
        }
        Command::RegisterMember { member } => {
            Outcome::Member(semesters::register_member(store, &member)?)
        }
        Command::AddManager { manager } => {
            Outcome::Manager(semesters::add_manager(store, &manager, now)?)
        }
        Command::AddWorkshifter {
            semester_id,
            member_id,
            primary_hours,
        } => Outcome::Profile(semesters::add_workshifter(
            store,
            semester_id,
            member_id,
            primary_hours,
        )?),
        Command::CreatePool { semester_id, draft } => {
            Outcome::Pool(pool_hours::create_pool(store, semester_id, &draft, false)?)
        }
        Command::EditPool { pool_id, draft } => {
            Outcome::Pool(pool_hours::edit_pool(store, pool_id, &draft)?)
        }
        Command::DeletePool { pool_id } => {
            pool_hours::delete_pool(store, pool_id)?;
            Outcome::Deleted
        }
        Command::AdjustPoolHours {
            pool_hours_id,
            hours,
            hour_adjustment,
        } => Outcome::PoolHours(pool_hours::adjust_pool_hours(
            store,
            pool_hours_id,
            hours,
            hour_adjustment,
        )?),
        Command::RecomputeStanding { pool_hours_id } => {
            Outcome::PoolHours(pool_hours::recompute_pool_hours(store, pool_hours_id)?)
        }
        Command::UpdateStandings { semester_id } => {
            let debited: usize = pool_hours::debit_requirements(store, semester_id, ctx.today())?;
            let closed: usize = interactions::close_expired_instances(store, semester_id, now)?;
            Outcome::StandingsUpdated { debited, closed }
        }
        Command::CreateWorkshiftType { draft } => {
            Outcome::WorkshiftType(semesters::create_workshift_type(store, &draft)?)
        }
        Command::EditWorkshiftType {
            workshift_type_id,
            draft,
        } => Outcome::WorkshiftType(semesters::edit_workshift_type(
            store,
            workshift_type_id,
            &draft,
        )?),
        Command::CreateRegularShift { draft } => {
            Outcome::RegularShift(instances::create_regular_shift(store, &draft, now)?)
        }
        Command::EditRegularShift { shift_id, draft } => Outcome::RegularShift(
            instances::edit_regular_shift(store, shift_id, &draft, now)?,
        ),
        Command::DeleteRegularShift { shift_id } => {
            instances::delete_regular_shift(store, shift_id)?;
            Outcome::Deleted
        }
        Command::CreateInstance {
            info,
            date,
            workshifter,
            hours,
        } => Outcome::Instance(instances::create_instance(
            store,
            &info,
            date,
            workshifter,
            hours,
            now,
        )?),
        Command::EditInstance {
            instance_id,
            info,
            date,
            workshifter,
        } => Outcome::Instance(instances::edit_instance(
            store,
            instance_id,
            &info,
            date,
            workshifter,
            now,
        )?),
        Command::DeleteInstance { instance_id } => {
            instances::delete_instance(store, instance_id)?;
            Outcome::Deleted
        }
        Command::EditInstanceHours {
            instance_id,
            hours,
            editor,
            note,
        } => Outcome::Instance(instances::edit_instance_hours(
            store,
            instance_id,
            hours,
            editor,
            &note,
            now,
        )?),
        Command::SignIn {
            instance_id,
            viewer,
        } => Outcome::Instance(interactions::sign_in(store, instance_id, &viewer, now)?),
        Command::SignOut {
            instance_id,
            viewer,
        } => Outcome::Instance(interactions::sign_out(store, instance_id, &viewer, now)?),
        Command::Verify {
            instance_id,
            viewer,
        } => Outcome::Instance(interactions::verify(store, instance_id, &viewer, now)?),
        Command::MarkBlown {
            instance_id,
            viewer,
        } => Outcome::Instance(interactions::mark_blown(store, instance_id, &viewer, now)?),
        Command::SetPreferences {
            profile_id,
            blocks,
            ratings,
            note,
            can_manage,
        } => Outcome::Profile(preferences::set_preferences(
            store, profile_id, &blocks, &ratings, &note, can_manage, now,
        )?),
        Command::AutoAssign {
            pool_id,
            candidate_order,
        } => Outcome::AutoAssigned(assignment::auto_assign(
            store,
            pool_id,
            &candidate_order,
            now,
        )?),
        Command::RandomAssign {
            pool_id,
            candidate_order,
        } => Outcome::RandomAssigned(assignment::random_assign(
            store,
            pool_id,
            &candidate_order,
            now,
        )?),
        Command::ClearAssignments { semester_id } => Outcome::AssignmentsCleared(
            assignment::clear_assignments(store, semester_id, now)?,
        ),
        Command::CalculateFines { semester_id, clear } => Outcome::Fines(
            fines::calculate_fines(store, semester_id, ctx.today(), clear)?,
        ),
    };
    Ok(outcome)
}

/// Applies a command to the store and records its audit event.
///
/// The store is expected to run the whole call inside one transaction so
/// a failure part way through leaves nothing behind.
///
/// # Arguments
///
/// * `store` - The store to mutate
/// * `ctx` - Actor, cause, time and defaults for this command
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` with the outcome and the recorded audit event
/// * `Err(CoreError)` if the command is invalid or the store fails
///
/// # Errors
///
/// Returns an error if a domain rule is violated or the store fails.
pub fn apply<S: WorkshiftStore>(
    store: &mut S,
    ctx: &CommandContext,
    command: Command,
) -> Result<TransitionResult, CoreError> {
    let before: StateSnapshot = snapshot_before(store, &command)?;
    let name: String = command.name().to_string();
    let named: Option<SemesterId> = named_semester(&command);

    let outcome: Outcome = run(store, ctx, command)?;

    let semester_id: Option<SemesterId> = match named.or_else(|| outcome.semester_id()) {
        Some(id) => Some(id),
        None => store.current_semester_id()?,
    };
    let summary: String = outcome.summary();
    let audit_event: AuditEvent = AuditEvent::new(
        ctx.actor.clone(),
        ctx.cause.clone(),
        Action::new(name, Some(summary.clone())),
        before,
        StateSnapshot::new(summary),
        semester_id,
    );
    store.record_audit_event(&audit_event)?;

    Ok(TransitionResult {
        outcome,
        audit_event,
    })
}
