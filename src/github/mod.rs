pub mod client;

pub use client::GithubClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::event::RepoCoordinate;

#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error("GitHub API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GitHub API {operation} returned status {status}: {message}")]
    UnexpectedStatus {
        operation: &'static str,
        status: u16,
        message: String,
    },

    #[error("GitHub token not found in config or environment")]
    MissingToken,
}

impl AuthorityError {
    /// HTTP status behind the failure, if the authority answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthorityError::Request(err) => err.status().map(|status| status.as_u16()),
            AuthorityError::UnexpectedStatus { status, .. } => Some(*status),
            AuthorityError::MissingToken => None,
        }
    }
}

/// What the collaborator endpoint reported for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorCheck {
    /// 204 No Content
    Collaborator,
    /// 404 Not Found
    NotCollaborator,
}

/// The service that owns repository permissions and pull request labels.
///
/// Every status other than the two the collaborator endpoint documents comes
/// back as an `AuthorityError`; deciding what an error means for access is
/// left to the caller.
#[async_trait]
pub trait Authority: Send + Sync {
    async fn check_collaborator(
        &self,
        repo: &RepoCoordinate,
        login: &str,
    ) -> Result<CollaboratorCheck, AuthorityError>;

    async fn add_labels(
        &self,
        repo: &RepoCoordinate,
        issue_number: u64,
        labels: &[&str],
    ) -> Result<(), AuthorityError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status() {
        let err = AuthorityError::UnexpectedStatus {
            operation: "check collaborator",
            status: 403,
            message: "API rate limit exceeded".to_string(),
        };
        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("API rate limit exceeded"));
        assert_eq!(AuthorityError::MissingToken.status(), None);
    }
}
