pub mod kind;

pub use kind::{render_help, CommandKind};

use tracing::{info, instrument, warn};

use crate::access;
use crate::event::CommentEvent;
use crate::github::Authority;

/// Resolve the pr-bot command carried by a PR comment.
///
/// Comments from users without write access resolve to `None` before the body
/// is looked at. Otherwise only the trimmed first line is matched; anything
/// below it is free-form commentary.
#[instrument(skip_all, fields(user = %event.author_login, repo = %event.repository))]
pub async fn resolve_command(authority: &dyn Authority, event: &CommentEvent) -> CommandKind {
    if !access::has_write_access(authority, &event.author_login, &event.repository).await {
        info!(command = %CommandKind::None, reason = "insufficient_permission", "user doesn't have write permission");
        return CommandKind::None;
    }

    let first_line = event.body.split('\n').next().unwrap_or_default().trim();
    let command = CommandKind::from_first_line(first_line);

    if command == CommandKind::None {
        if first_line.starts_with('/') {
            let command_text = first_line.split_whitespace().next().unwrap_or(first_line);
            warn!(command_text = %command_text, "not recognised as a valid command");
        }
        info!(command = %command, reason = "no_match", "no command text matched");
    } else {
        info!(command = %command, "resolved command");
    }
    command
}
