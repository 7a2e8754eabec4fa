use std::fmt;

use tracing::{error, info, instrument};

use crate::access;
use crate::event::PullRequestEvent;
use crate::github::Authority;

/// What the trust labeler did with a newly opened pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOutcome {
    /// Author has write access; nothing was changed.
    Trusted,
    Labeled,
    /// Author is untrusted but the label request failed.
    Failed,
}

impl LabelOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            LabelOutcome::Trusted => "trusted",
            LabelOutcome::Labeled => "labeled",
            LabelOutcome::Failed => "failed",
        }
    }
}

impl fmt::Display for LabelOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Add `label` to the pull request unless its author has write access.
///
/// Re-adding a label that is already present is a no-op on GitHub, so this is
/// safe to run more than once per pull request.
#[instrument(skip_all, fields(user = %event.author_login, repo = %event.repository, pr = event.pr_number))]
pub async fn apply_external_label_if_untrusted(
    authority: &dyn Authority,
    event: &PullRequestEvent,
    label: &str,
) -> LabelOutcome {
    if access::has_write_access(authority, &event.author_login, &event.repository).await {
        return LabelOutcome::Trusted;
    }

    info!(label = %label, "adding label to PR {}", event.pr_number);
    match authority
        .add_labels(&event.repository, event.pr_number, &[label])
        .await
    {
        Ok(()) => LabelOutcome::Labeled,
        Err(err) => {
            error!(label = %label, status = ?err.status(), error = %err, "failed to add label");
            LabelOutcome::Failed
        }
    }
}
