use serde::Deserialize;
use std::fmt;

/// Owner and name of a repository, split from its `owner/name` full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinate {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A comment left on a pull request (GitHub `issue_comment` event).
#[derive(Debug, Clone)]
pub struct CommentEvent {
    /// Login of the comment author, exactly as GitHub reports it
    pub author_login: String,
    pub repository: RepoCoordinate,
    /// Full comment body; only its first line is ever interpreted
    pub body: String,
    /// Number of the PR the comment belongs to, when the payload carries it
    pub issue_number: Option<u64>,
}

/// A newly opened pull request (GitHub `pull_request` event).
#[derive(Debug, Clone)]
pub struct PullRequestEvent {
    /// Login of the pull request author
    pub author_login: String,
    pub repository: RepoCoordinate,
    pub pr_number: u64,
}

// Raw webhook payload shapes. Only the fields the bot consumes are declared;
// serde ignores the rest of the payload.

#[derive(Debug, Deserialize)]
pub(super) struct User {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct Repository {
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct Comment {
    pub user: User,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Issue {
    pub number: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct IssueCommentPayload {
    pub comment: Comment,
    pub repository: Repository,
    #[serde(default)]
    pub issue: Option<Issue>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PullRequest {
    pub number: u64,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub(super) struct PullRequestPayload {
    pub pull_request: PullRequest,
    pub repository: Repository,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_coordinate_display() {
        let repo = RepoCoordinate {
            owner: "someOwner".to_string(),
            name: "SomeRepo".to_string(),
        };
        assert_eq!(repo.to_string(), "someOwner/SomeRepo");
    }
}
