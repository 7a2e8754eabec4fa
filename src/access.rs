//! Write-access gate.
//!
//! The authority can answer yes, no, or fail in any number of ways. Only an
//! explicit yes grants access; the other outcomes are kept apart for the logs
//! but all collapse to `false` at the gate.

use std::fmt;

use tracing::{error, info, instrument};

use crate::event::RepoCoordinate;
use crate::github::{Authority, CollaboratorCheck};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionResult {
    Granted,
    Denied,
    /// The authority could not give a definitive answer.
    Indeterminate(String),
}

impl PermissionResult {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionResult::Granted)
    }
}

impl fmt::Display for PermissionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionResult::Granted => write!(f, "granted"),
            PermissionResult::Denied => write!(f, "denied"),
            PermissionResult::Indeterminate(_) => write!(f, "indeterminate"),
        }
    }
}

/// Ask the authority whether `login` is a collaborator on `repo`.
///
/// Never returns an error: authority failures become `Indeterminate`.
#[instrument(skip(authority, repo), fields(repo = %repo))]
pub async fn check_write_access(
    authority: &dyn Authority,
    login: &str,
    repo: &RepoCoordinate,
) -> PermissionResult {
    info!(user = %login, "checking if user has write access to {repo}");

    let result = match authority.check_collaborator(repo, login).await {
        Ok(CollaboratorCheck::Collaborator) => PermissionResult::Granted,
        Ok(CollaboratorCheck::NotCollaborator) => {
            info!(user = %login, "user not found in collaborators");
            PermissionResult::Denied
        }
        Err(err) => {
            error!(
                user = %login,
                status = ?err.status(),
                error = %err,
                "error checking if user has write access"
            );
            PermissionResult::Indeterminate(err.to_string())
        }
    };

    info!(
        user = %login,
        permission = %result,
        has_write_access = result.is_granted(),
        "resolved write access"
    );
    result
}

/// Fail-closed gate: `true` only when the authority explicitly confirmed access.
pub async fn has_write_access(
    authority: &dyn Authority,
    login: &str,
    repo: &RepoCoordinate,
) -> bool {
    check_write_access(authority, login, repo).await.is_granted()
}
