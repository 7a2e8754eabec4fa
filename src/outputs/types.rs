use sha1::{Digest, Sha1};

use crate::access::PermissionResult;
use crate::command::CommandKind;
use crate::label::LabelOutcome;

/// A single named value handed to later workflow steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    pub name: String,
    pub value: String,
}

/// The decision of one bot invocation, as an ordered list of step outputs.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    /// Short heading shown on the terminal
    pub title: String,
    pub entries: Vec<StepOutput>,
}

impl Outcome {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.entries.push(StepOutput {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.as_str())
    }
}

/// Merge ref CI checks out for a pull request.
pub fn ref_for_pr(pr_number: u64) -> String {
    format!("refs/pull/{pr_number}/merge")
}

/// Short id naming the PR's validation environment: the first 8 hex digits of
/// the SHA-1 of the merge ref plus a trailing newline (kept for compatibility
/// with ids computed by `sha1sum` in shell).
pub fn ref_id_for_pr(pr_number: u64) -> String {
    let digest = Sha1::digest(format!("{}\n", ref_for_pr(pr_number)).as_bytes());
    let mut hex = format!("{digest:x}");
    hex.truncate(8);
    hex
}

pub fn command_outcome(command: CommandKind, issue_number: Option<u64>) -> Outcome {
    let outcome = Outcome::new("pr-bot command").with("command", command);
    match issue_number {
        Some(number) if command != CommandKind::None => outcome
            .with("pr_number", number)
            .with("ci_git_ref", ref_for_pr(number))
            .with("pr_ref_id", ref_id_for_pr(number)),
        Some(number) => outcome.with("pr_number", number),
        None => outcome,
    }
}

pub fn label_outcome(result: LabelOutcome, label: &str) -> Outcome {
    Outcome::new("pr-bot trust label")
        .with("labeled", result == LabelOutcome::Labeled)
        .with("label", label)
        .with("label_outcome", result)
}

pub fn access_outcome(result: &PermissionResult) -> Outcome {
    let outcome = Outcome::new("pr-bot write access")
        .with("has_write_access", result.is_granted())
        .with("permission", result);
    match result {
        PermissionResult::Indeterminate(reason) => outcome.with("permission_error", reason),
        _ => outcome,
    }
}
