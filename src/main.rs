mod access;
mod command;
mod config;
mod event;
mod github;
mod label;
mod outputs;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

/// pr-bot — decides what a pull request comment asks CI to do, and flags pull
/// requests from authors without write access.
#[derive(Parser, Debug)]
#[command(name = "pr-bot", version, about)]
struct Cli {
    /// Append step outputs to this file instead of printing them
    /// (defaults to $GITHUB_OUTPUT inside GitHub Actions)
    #[arg(short, long, global = true, env = "GITHUB_OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the command in an issue_comment event
    Command {
        /// Webhook payload file
        #[arg(long, env = "GITHUB_EVENT_PATH")]
        event: PathBuf,
    },

    /// Label a newly opened pull request as external if its author lacks write access
    Label {
        /// Webhook payload file
        #[arg(long, env = "GITHUB_EVENT_PATH")]
        event: PathBuf,
    },

    /// Check whether a user has write access to a repository
    CheckAccess {
        /// GitHub login
        user: String,
        /// Repository as owner/name
        repo: String,
    },

    /// Print the command help posted in reply to /help
    HelpText {
        /// Unrecognised command to mention at the top
        #[arg(long)]
        invalid: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let config = config::Config::load()?;
    debug!(api_base = %config.api_base(), "loaded configuration");

    let outcome = match cli.command {
        Commands::Command { event: event_path } => {
            let _span = info_span!("command", event = %event_path.display()).entered();
            let comment = event::load_comment_event(&event_path)?;
            let client = github::GithubClient::from_config(&config)?;

            let command = command::resolve_command(&client, &comment).await;
            outputs::command_outcome(command, comment.issue_number)
        }
        Commands::Label { event: event_path } => {
            let _span = info_span!("label", event = %event_path.display()).entered();
            let pull_request = event::load_pull_request_event(&event_path)?;
            let client = github::GithubClient::from_config(&config)?;

            let label = config.external_label();
            let result = label::apply_external_label_if_untrusted(&client, &pull_request, label).await;
            outputs::label_outcome(result, label)
        }
        Commands::CheckAccess { user, repo } => {
            let _span = info_span!("check_access", user = %user, repo = %repo).entered();
            let repo = event::parse_repo_full_name(&repo)?;
            let client = github::GithubClient::from_config(&config)?;

            let result = access::check_write_access(&client, &user, &repo).await;
            outputs::access_outcome(&result)
        }
        Commands::HelpText { invalid } => {
            outputs::Outcome::new("pr-bot help").with("help", command::render_help(invalid.as_deref()))
        }
    };

    outputs::output(&outcome, cli.output.as_deref())?;
    info!("done");

    Ok(())
}
