use std::fmt;

/// A pr-bot command recognised on the first line of a PR comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    RunTests,
    RunTestsExtended,
    ForceApprove,
    DestroyEnv,
    ShowHelp,
    None,
}

impl CommandKind {
    /// Every command a comment can trigger, in help-text order.
    pub const TRIGGERABLE: [CommandKind; 5] = [
        CommandKind::RunTests,
        CommandKind::RunTestsExtended,
        CommandKind::ForceApprove,
        CommandKind::DestroyEnv,
        CommandKind::ShowHelp,
    ];

    /// Exact, case-sensitive match of an already trimmed first line.
    pub fn from_first_line(line: &str) -> CommandKind {
        match line {
            "/test" => CommandKind::RunTests,
            "/test-extended" => CommandKind::RunTestsExtended,
            "/test-force-approve" => CommandKind::ForceApprove,
            "/test-destroy-env" => CommandKind::DestroyEnv,
            "/help" => CommandKind::ShowHelp,
            _ => CommandKind::None,
        }
    }

    /// The comment text that triggers this command.
    pub fn trigger(self) -> Option<&'static str> {
        match self {
            CommandKind::RunTests => Some("/test"),
            CommandKind::RunTestsExtended => Some("/test-extended"),
            CommandKind::ForceApprove => Some("/test-force-approve"),
            CommandKind::DestroyEnv => Some("/test-destroy-env"),
            CommandKind::ShowHelp => Some("/help"),
            CommandKind::None => None,
        }
    }

    /// Token handed to the CI workflow to pick the pipeline to run.
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::RunTests => "run-tests",
            CommandKind::RunTestsExtended => "run-tests-extended",
            CommandKind::ForceApprove => "test-force-approve",
            CommandKind::DestroyEnv => "test-destroy-env",
            CommandKind::ShowHelp => "show-help",
            CommandKind::None => "none",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CommandKind::RunTests => "build, deploy and run smoke tests on a PR",
            CommandKind::RunTestsExtended => "build, deploy and run smoke & extended tests on a PR",
            CommandKind::ForceApprove => {
                "force approval of the PR tests (i.e. skip the deployment checks)"
            }
            CommandKind::DestroyEnv => {
                "delete the validation environment for a PR (e.g. to enable testing a deployment from a clean start after previous tests)"
            }
            CommandKind::ShowHelp => "show this help",
            CommandKind::None => "no command",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markdown help listing every command, as posted in reply to `/help`.
///
/// When `invalid` is given the text opens by naming the unrecognised command.
pub fn render_help(invalid: Option<&str>) -> String {
    let mut body = match invalid {
        Some(command) => format!("`{command}` is not recognised as a valid command."),
        None => "Hello!".to_string(),
    };
    body.push_str("\n\nYou can use the following commands:\n");

    for kind in CommandKind::TRIGGERABLE {
        if let Some(trigger) = kind.trigger() {
            body.push_str(&format!(
                "&nbsp;&nbsp;&nbsp;&nbsp;{} - {}\n",
                trigger,
                kind.description()
            ));
        }
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_table() {
        assert_eq!(CommandKind::from_first_line("/test"), CommandKind::RunTests);
        assert_eq!(
            CommandKind::from_first_line("/test-extended"),
            CommandKind::RunTestsExtended
        );
        assert_eq!(
            CommandKind::from_first_line("/test-force-approve"),
            CommandKind::ForceApprove
        );
        assert_eq!(
            CommandKind::from_first_line("/test-destroy-env"),
            CommandKind::DestroyEnv
        );
        assert_eq!(CommandKind::from_first_line("/help"), CommandKind::ShowHelp);
    }

    #[test]
    fn test_no_partial_or_case_insensitive_match() {
        for line in ["/Test", "/TEST", "/tes", "/test-", "/testing", "/test abc123", "test", "", "/"] {
            assert_eq!(CommandKind::from_first_line(line), CommandKind::None, "{line:?}");
        }
    }

    #[test]
    fn test_trigger_round_trips_through_table() {
        for kind in CommandKind::TRIGGERABLE {
            let trigger = kind.trigger().unwrap();
            assert_eq!(CommandKind::from_first_line(trigger), kind);
        }
        assert_eq!(CommandKind::None.trigger(), None);
    }

    #[test]
    fn test_output_tokens() {
        assert_eq!(CommandKind::RunTests.to_string(), "run-tests");
        assert_eq!(CommandKind::RunTestsExtended.to_string(), "run-tests-extended");
        assert_eq!(CommandKind::ForceApprove.to_string(), "test-force-approve");
        assert_eq!(CommandKind::DestroyEnv.to_string(), "test-destroy-env");
        assert_eq!(CommandKind::ShowHelp.to_string(), "show-help");
        assert_eq!(CommandKind::None.to_string(), "none");
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = render_help(None);
        assert!(help.starts_with("Hello!"));
        for kind in CommandKind::TRIGGERABLE {
            assert!(help.contains(kind.trigger().unwrap()));
        }
        assert!(help.contains("/test-destroy-env - delete the validation environment"));
    }

    #[test]
    fn test_help_names_invalid_command() {
        let help = render_help(Some("/tset"));
        assert!(help.starts_with("`/tset` is not recognised as a valid command."));
    }
}
