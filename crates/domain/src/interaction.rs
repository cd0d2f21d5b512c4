// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Preconditions of the shift interaction state machine.
//!
//! ```text
//! unfilled --sign in--> assigned --verify--> closed (verified)
//!     ^                    |      --blown---> closed (blown)
//!     +-----sign out-------+
//! ```
//!
//! These checks are pure. Applying the transition and writing its log
//! entry happens in the engine.

use crate::error::DomainError;
use crate::ids::ProfileId;
use crate::instance::WorkshiftInstance;
use crate::pool::WorkshiftPool;
use crate::shift::VerifyPolicy;
use serde::{Deserialize, Serialize};

/// What the engine knows about the member acting on an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewer {
    /// The caller's profile in the instance's semester.
    pub profile_id: Option<ProfileId>,
    /// Holds a workshift-manager position (or equivalent authority).
    pub is_workshift_manager: bool,
    /// Holds any active manager position.
    pub is_manager: bool,
    /// Manages the instance's pool.
    pub is_pool_manager: bool,
}

/// An interaction a member may perform on an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interaction {
    SignIn,
    SignOut,
    Verify,
    Blown,
}

impl Interaction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignIn => "sign_in",
            Self::SignOut => "sign_out",
            Self::Verify => "verify",
            Self::Blown => "blown",
        }
    }
}

const fn ensure_open(instance: &WorkshiftInstance) -> Result<(), DomainError> {
    if instance.closed {
        return Err(DomainError::InstanceClosed(instance.id));
    }
    Ok(())
}

const fn filled_by(instance: &WorkshiftInstance) -> Result<ProfileId, DomainError> {
    match instance.workshifter {
        Some(profile) => Ok(profile),
        None => Err(DomainError::InstanceNotFilled(instance.id)),
    }
}

/// Checks that `viewer` may sign in to `instance`.
///
/// # Returns
///
/// The profile that becomes the workshifter.
///
/// # Errors
///
/// Fails if the instance is closed or filled, or the viewer has no profile.
pub fn check_sign_in(
    instance: &WorkshiftInstance,
    viewer: &Viewer,
) -> Result<ProfileId, DomainError> {
    ensure_open(instance)?;
    if instance.workshifter.is_some() {
        return Err(DomainError::InstanceAlreadyFilled(instance.id));
    }
    viewer.profile_id.ok_or(DomainError::NoProfileInSemester)
}

/// Checks that `viewer` may sign out of `instance`.
///
/// # Errors
///
/// Fails if the instance is closed or the viewer is not its workshifter.
pub fn check_sign_out(
    instance: &WorkshiftInstance,
    viewer: &Viewer,
) -> Result<ProfileId, DomainError> {
    ensure_open(instance)?;
    let workshifter: ProfileId = filled_by(instance)?;
    if viewer.profile_id != Some(workshifter) {
        return Err(DomainError::NotWorkshifter(instance.id));
    }
    Ok(workshifter)
}

const fn policy_allows(policy: VerifyPolicy, viewer: &Viewer) -> bool {
    match policy {
        VerifyPolicy::Automatic => false,
        VerifyPolicy::SelfVerify | VerifyPolicy::OtherMember => true,
        VerifyPolicy::AnyManager => viewer.is_manager,
        VerifyPolicy::PoolManager => viewer.is_pool_manager,
        VerifyPolicy::WorkshiftManager => viewer.is_workshift_manager,
    }
}

/// Whether the workshifter may verify their own shift.
///
/// `OtherMember` always needs someone else. The pool flag opens the
/// manager policies to their own shifts.
const fn self_verify_allowed(pool: &WorkshiftPool, policy: VerifyPolicy) -> bool {
    match policy {
        VerifyPolicy::SelfVerify => true,
        VerifyPolicy::OtherMember | VerifyPolicy::Automatic => false,
        VerifyPolicy::AnyManager | VerifyPolicy::PoolManager | VerifyPolicy::WorkshiftManager => {
            pool.self_verify
        }
    }
}

/// Checks that `viewer` may verify `instance` under `policy`.
///
/// Self-verification is allowed under the `SelfVerify` policy, or under a
/// manager policy when the pool enables it.
///
/// # Returns
///
/// The verifying profile.
///
/// # Errors
///
/// Fails if the instance is closed or unfilled, the viewer has no profile,
/// the viewer is verifying their own shift without permission, or the
/// policy excludes the viewer.
pub fn check_verify(
    instance: &WorkshiftInstance,
    pool: &WorkshiftPool,
    policy: VerifyPolicy,
    viewer: &Viewer,
) -> Result<ProfileId, DomainError> {
    ensure_open(instance)?;
    let workshifter: ProfileId = filled_by(instance)?;
    let verifier: ProfileId = viewer.profile_id.ok_or(DomainError::NoProfileInSemester)?;

    if policy == VerifyPolicy::Automatic {
        return Err(DomainError::VerifyNotPermitted(policy));
    }
    if verifier == workshifter && !self_verify_allowed(pool, policy) {
        return Err(DomainError::SelfVerifyForbidden);
    }
    if !policy_allows(policy, viewer) {
        return Err(DomainError::VerifyNotPermitted(policy));
    }
    Ok(verifier)
}

/// Checks that `viewer` may mark `instance` blown.
///
/// # Errors
///
/// Fails if the instance is closed or unfilled, or the viewer is neither a
/// pool manager nor in a pool that lets anyone mark shifts blown.
pub fn check_blown(
    instance: &WorkshiftInstance,
    pool: &WorkshiftPool,
    viewer: &Viewer,
) -> Result<ProfileId, DomainError> {
    ensure_open(instance)?;
    let workshifter: ProfileId = filled_by(instance)?;
    if !(viewer.is_pool_manager || pool.any_blown) {
        return Err(DomainError::BlownNotPermitted);
    }
    Ok(workshifter)
}

/// Lists the interactions `viewer` may currently perform on `instance`.
#[must_use]
pub fn available_interactions(
    instance: &WorkshiftInstance,
    pool: &WorkshiftPool,
    policy: VerifyPolicy,
    viewer: &Viewer,
) -> Vec<Interaction> {
    let mut interactions: Vec<Interaction> = Vec::new();
    if check_sign_in(instance, viewer).is_ok() {
        interactions.push(Interaction::SignIn);
    }
    if check_sign_out(instance, viewer).is_ok() {
        interactions.push(Interaction::SignOut);
    }
    if check_verify(instance, pool, policy, viewer).is_ok() {
        interactions.push(Interaction::Verify);
    }
    if check_blown(instance, pool, viewer).is_ok() {
        interactions.push(Interaction::Blown);
    }
    interactions
}
