// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity and the access-control predicates built on it.
//!
//! Authority comes from three places: the member's superuser flag, the
//! manager positions the member holds, and the workshift managers recorded
//! on each semester.

use farnsworth::{CoreError, WorkshiftStore};
use farnsworth_audit::Actor;
use farnsworth_domain::{
    Manager, ManagerId, Member, Semester, SemesterId, Viewer, WorkshiftPool, WorkshiftProfile,
};
use farnsworth_persistence::Persistence;
use tracing::debug;

use crate::error::{ApiError, AuthError};

/// A member whose identity has been resolved for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub member: Member,
    /// Active manager positions the member currently holds.
    pub positions: Vec<Manager>,
}

impl AuthenticatedUser {
    /// Creates a user from an already loaded member and positions.
    ///
    /// Inactive positions and positions held by someone else are dropped.
    #[must_use]
    pub fn new(member: Member, positions: Vec<Manager>) -> Self {
        let held: Vec<Manager> = positions
            .into_iter()
            .filter(|position| position.is_held_by(member.id))
            .collect();
        Self {
            member,
            positions: held,
        }
    }

    /// Looks up a member by username together with the positions they hold.
    ///
    /// # Errors
    ///
    /// Fails if the username is empty, unknown or belongs to an inactive
    /// member, or if the lookup itself fails.
    pub fn resolve(persistence: &mut Persistence, username: &str) -> Result<Self, AuthError> {
        if username.trim().is_empty() {
            return Err(AuthError::MissingIdentity);
        }
        let (member, managers): (Option<Member>, Vec<Manager>) = persistence
            .transaction(|store| {
                let member: Option<Member> = store.find_member_by_username(username)?;
                let managers: Vec<Manager> = store.list_managers()?;
                Ok((member, managers))
            })
            .map_err(|err: CoreError| AuthError::Lookup {
                reason: err.to_string(),
            })?;

        let member: Member = member.ok_or_else(|| AuthError::UnknownMember {
            username: username.to_string(),
        })?;
        if !member.active {
            return Err(AuthError::InactiveMember {
                username: username.to_string(),
            });
        }

        debug!(username, member_id = %member.id, "Resolved caller");
        Ok(Self::new(member, managers))
    }

    /// Converts this user into the audit actor recorded with their commands.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: &str = if self.member.is_superuser {
            "superuser"
        } else if self.positions.is_empty() {
            "member"
        } else {
            "manager"
        };
        Actor::new(self.member.username.clone(), actor_type.to_string())
    }

    #[must_use]
    pub fn is_president(&self) -> bool {
        self.positions.iter().any(|position| position.president)
    }

    #[must_use]
    pub fn is_manager(&self) -> bool {
        !self.positions.is_empty()
    }

    #[must_use]
    pub fn holds(&self, manager_id: ManagerId) -> bool {
        self.positions.iter().any(|position| position.id == manager_id)
    }

    /// Holds a position that carries workshift-manager authority.
    #[must_use]
    pub fn holds_workshift_manager_position(&self) -> bool {
        self.positions
            .iter()
            .any(|position| position.workshift_manager)
    }
}

/// Access-control predicates consumed by every handler.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Whether `user` may manage workshift, either for one semester or in
    /// general.
    ///
    /// Superusers and presidents always may. For a semester, the member must
    /// be one of its recorded workshift managers; without one, holding a
    /// workshift-manager position is enough.
    #[must_use]
    pub fn can_manage(user: &AuthenticatedUser, semester: Option<&Semester>) -> bool {
        if user.member.is_superuser || user.is_president() {
            return true;
        }
        semester.map_or_else(
            || user.holds_workshift_manager_position(),
            |semester| semester.workshift_managers.contains(&user.member.id),
        )
    }

    /// Whether `user` holds one of the positions that manage `pool`.
    #[must_use]
    pub fn is_pool_manager(user: &AuthenticatedUser, pool: &WorkshiftPool) -> bool {
        pool.managers.iter().any(|id| user.holds(*id))
    }

    /// Fails unless `user` can manage `semester` (or workshift in general).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` naming `action`.
    pub fn require_manage(
        user: &AuthenticatedUser,
        semester: Option<&Semester>,
        action: &str,
    ) -> Result<(), ApiError> {
        if Self::can_manage(user, semester) {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: action.to_string(),
                required: String::from("workshift manager"),
            })
        }
    }

    /// Fails unless `user` can manage the pool's semester or manages the
    /// pool itself.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` naming `action`.
    pub fn require_pool_authority(
        user: &AuthenticatedUser,
        semester: &Semester,
        pool: &WorkshiftPool,
        action: &str,
    ) -> Result<(), ApiError> {
        if Self::can_manage(user, Some(semester)) || Self::is_pool_manager(user, pool) {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: action.to_string(),
                required: format!("workshift manager or manager of '{}'", pool.title),
            })
        }
    }

    /// Fails unless `user` is a superuser or holds the president position.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` naming `action`.
    pub fn require_president(user: &AuthenticatedUser, action: &str) -> Result<(), ApiError> {
        if user.member.is_superuser || user.is_president() {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: action.to_string(),
                required: String::from("president"),
            })
        }
    }

    /// Fails unless `user` is a superuser.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` naming `action`.
    pub fn require_superuser(user: &AuthenticatedUser, action: &str) -> Result<(), ApiError> {
        if user.member.is_superuser {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: action.to_string(),
                required: String::from("superuser"),
            })
        }
    }
}

/// Builds the engine's view of `user` acting on a shift in `pool`.
///
/// Workshift managers of the semester count as managers of every pool.
///
/// # Errors
///
/// Returns an error if the profile lookup fails.
pub fn viewer_for<S: WorkshiftStore>(
    store: &mut S,
    user: &AuthenticatedUser,
    semester: &Semester,
    pool: &WorkshiftPool,
) -> Result<Viewer, CoreError> {
    let semester_id: SemesterId = semester.id;
    let profile: Option<WorkshiftProfile> = store.find_profile(user.member.id, semester_id)?;
    let can_manage: bool = AuthorizationService::can_manage(user, Some(semester));
    Ok(Viewer {
        profile_id: profile.map(|profile| profile.id),
        is_workshift_manager: can_manage,
        is_manager: user.is_manager() || can_manage,
        is_pool_manager: can_manage || AuthorizationService::is_pool_manager(user, pool),
    })
}
