use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use super::{Authority, AuthorityError, CollaboratorCheck};
use crate::config::Config;
use crate::event::RepoCoordinate;

/// GitHub REST implementation of [`Authority`].
///
/// One request per call: no retries and no caching, so every decision
/// reflects what GitHub says at that moment.
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl GithubClient {
    pub fn new(api_base: &str, token: String) -> Result<Self, AuthorityError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("pr-bot"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static("2022-11-28"));

        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AuthorityError> {
        let token = config.github_token().ok_or(AuthorityError::MissingToken)?;
        Self::new(config.api_base(), token)
    }

    fn repo_url(&self, repo: &RepoCoordinate, rest: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, repo.owner, repo.name, rest
        )
    }
}

/// Pull GitHub's `message` out of an error body, falling back to the raw text.
async fn error_message(response: reqwest::Response) -> String {
    #[derive(Deserialize)]
    struct ApiError {
        message: String,
    }

    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiError>(&body) {
        Ok(err) => err.message,
        Err(_) => body,
    }
}

#[async_trait]
impl Authority for GithubClient {
    #[instrument(skip(self, repo), fields(repo = %repo))]
    async fn check_collaborator(
        &self,
        repo: &RepoCoordinate,
        login: &str,
    ) -> Result<CollaboratorCheck, AuthorityError> {
        let url = self.repo_url(repo, &format!("collaborators/{login}"));

        debug!("querying collaborator endpoint");
        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(CollaboratorCheck::Collaborator),
            StatusCode::NOT_FOUND => Ok(CollaboratorCheck::NotCollaborator),
            status => Err(AuthorityError::UnexpectedStatus {
                operation: "check collaborator",
                status: status.as_u16(),
                message: error_message(response).await,
            }),
        }
    }

    #[instrument(skip(self, repo), fields(repo = %repo))]
    async fn add_labels(
        &self,
        repo: &RepoCoordinate,
        issue_number: u64,
        labels: &[&str],
    ) -> Result<(), AuthorityError> {
        let url = self.repo_url(repo, &format!("issues/{issue_number}/labels"));

        debug!("adding labels");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "labels": labels }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthorityError::UnexpectedStatus {
                operation: "add labels",
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }
        Ok(())
    }
}
