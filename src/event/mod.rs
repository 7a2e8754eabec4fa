pub mod types;

pub use types::{CommentEvent, PullRequestEvent, RepoCoordinate};

use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

use types::{IssueCommentPayload, PullRequestPayload};

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Failed to read event payload: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to decode event payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid repository full name (expected owner/name): {0:?}")]
    InvalidRepository(String),
}

/// Split a repository full name into its owner and name.
///
/// Exactly one `/` with a non-empty segment on each side is accepted.
/// Anything else is rejected rather than guessed at, so a malformed name can
/// never address the collaborator check at the wrong repository.
pub fn parse_repo_full_name(full_name: &str) -> Result<RepoCoordinate, EventError> {
    let invalid = || EventError::InvalidRepository(full_name.to_string());

    let (owner, name) = full_name.split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return Err(invalid());
    }

    Ok(RepoCoordinate {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

/// Decode an `issue_comment` webhook payload.
pub fn parse_comment_event(json: &str) -> Result<CommentEvent, EventError> {
    let payload: IssueCommentPayload = serde_json::from_str(json)?;
    let repository = parse_repo_full_name(&payload.repository.full_name)?;

    Ok(CommentEvent {
        author_login: payload.comment.user.login,
        repository,
        body: payload.comment.body.unwrap_or_default(),
        issue_number: payload.issue.map(|issue| issue.number),
    })
}

/// Decode a `pull_request` webhook payload.
pub fn parse_pull_request_event(json: &str) -> Result<PullRequestEvent, EventError> {
    let payload: PullRequestPayload = serde_json::from_str(json)?;
    let repository = parse_repo_full_name(&payload.repository.full_name)?;

    Ok(PullRequestEvent {
        author_login: payload.pull_request.user.login,
        repository,
        pr_number: payload.pull_request.number,
    })
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_comment_event(path: &Path) -> Result<CommentEvent, EventError> {
    let contents = fs::read_to_string(path)?;
    let event = parse_comment_event(&contents)?;
    debug!(user = %event.author_login, repo = %event.repository, "loaded comment event");
    Ok(event)
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_pull_request_event(path: &Path) -> Result<PullRequestEvent, EventError> {
    let contents = fs::read_to_string(path)?;
    let event = parse_pull_request_event(&contents)?;
    debug!(user = %event.author_login, repo = %event.repository, pr = event.pr_number, "loaded pull request event");
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMENT_FIXTURE: &str = include_str!("../../tests/fixtures/issue_comment.json");
    const PULL_REQUEST_FIXTURE: &str = include_str!("../../tests/fixtures/pull_request_opened.json");

    #[test]
    fn test_parse_valid_full_name() {
        let repo = parse_repo_full_name("someOwner/SomeRepo").unwrap();
        assert_eq!(repo.owner, "someOwner");
        assert_eq!(repo.name, "SomeRepo");
    }

    #[test]
    fn test_parse_invalid_full_name() {
        assert!(parse_repo_full_name("no-separator").is_err());
        assert!(parse_repo_full_name("a/b/c").is_err());
        assert!(parse_repo_full_name("/name").is_err());
        assert!(parse_repo_full_name("owner/").is_err());
        assert!(parse_repo_full_name("").is_err());
    }

    #[test]
    fn test_parse_comment_fixture() {
        let event = parse_comment_event(COMMENT_FIXTURE).unwrap();
        assert_eq!(event.author_login, "octocat");
        assert_eq!(event.repository.to_string(), "someOwner/SomeRepo");
        assert_eq!(event.issue_number, Some(1347));
        assert!(event.body.starts_with("/test\n"));
    }

    #[test]
    fn test_parse_pull_request_fixture() {
        let event = parse_pull_request_event(PULL_REQUEST_FIXTURE).unwrap();
        assert_eq!(event.author_login, "drive-by-contributor");
        assert_eq!(event.repository.owner, "someOwner");
        assert_eq!(event.pr_number, 1348);
    }

    #[test]
    fn test_comment_without_body_or_issue() {
        let json = r#"{
            "comment": {"user": {"login": "Admin"}, "body": null},
            "repository": {"full_name": "o/r"}
        }"#;
        let event = parse_comment_event(json).unwrap();
        assert_eq!(event.author_login, "Admin");
        assert_eq!(event.body, "");
        assert_eq!(event.issue_number, None);
    }

    #[test]
    fn test_comment_with_malformed_repository_is_rejected() {
        let json = r#"{
            "comment": {"user": {"login": "admin"}, "body": "/test"},
            "repository": {"full_name": "just-a-name"}
        }"#;
        assert!(matches!(
            parse_comment_event(json),
            Err(EventError::InvalidRepository(name)) if name == "just-a-name"
        ));
    }

    #[test]
    fn test_pull_request_payload_missing_fields() {
        let json = r#"{"repository": {"full_name": "o/r"}}"#;
        assert!(matches!(
            parse_pull_request_event(json),
            Err(EventError::Decode(_))
        ));
    }

    #[test]
    fn test_load_comment_event_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, COMMENT_FIXTURE).unwrap();
        let event = load_comment_event(&path).unwrap();
        assert_eq!(event.author_login, "octocat");
    }

    #[test]
    fn test_load_missing_event_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_pull_request_event(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(EventError::FileRead(_))));
    }
}
