pub mod types;

pub use types::{access_outcome, command_outcome, label_outcome, Outcome};

use colored::Colorize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Base delimiter for multi-line values in a GitHub Actions output file.
const MULTILINE_DELIMITER: &str = "__PR_BOT_EOF__";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write step outputs: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// Emit the outcome to the terminal (default) or append it to a step output file.
///
/// The file form follows the `GITHUB_OUTPUT` contract: one `name=value` line
/// per output, existing contents preserved.
#[instrument(skip(outcome), fields(title = %outcome.title))]
pub fn output(outcome: &Outcome, output_path: Option<&Path>) -> Result<(), OutputError> {
    for entry in &outcome.entries {
        info!("setting output '{}: {}'", entry.name, entry.value);
    }

    match output_path {
        None => {
            debug!("writing outputs to terminal");
            print_terminal_outcome(outcome);
            Ok(())
        }
        Some(path) => {
            debug!(path = %path.display(), "appending outputs to file");
            append_step_outputs(outcome, path)
        }
    }
}

fn print_terminal_outcome(outcome: &Outcome) {
    println!("═══ {} ═══", outcome.title);
    for entry in &outcome.entries {
        println!("  {}: {}", entry.name, colorize_value(&entry.value));
    }
}

fn append_step_outputs(outcome: &Outcome, path: &Path) -> Result<(), OutputError> {
    let mut text = String::new();
    for entry in &outcome.entries {
        if entry.value.contains('\n') {
            let delimiter = delimiter_for(&entry.value);
            text.push_str(&format!(
                "{}<<{delimiter}\n{}\n{delimiter}\n",
                entry.name, entry.value
            ));
        } else {
            text.push_str(&format!("{}={}\n", entry.name, entry.value));
        }
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

/// A heredoc delimiter that occurs nowhere in `value`.
fn delimiter_for(value: &str) -> String {
    let mut delimiter = MULTILINE_DELIMITER.to_string();
    let mut suffix = 0_u32;
    while value.contains(&delimiter) {
        suffix += 1;
        delimiter = format!("{MULTILINE_DELIMITER}{suffix}");
    }
    delimiter
}

/// Highlight the values a reader scans for: grants and commands in green,
/// denials and failures in red.
fn colorize_value(value: &str) -> colored::ColoredString {
    match value {
        "true" | "granted" | "labeled" | "trusted" => value.green().bold(),
        "false" | "denied" | "indeterminate" | "failed" => value.red().bold(),
        "none" => value.yellow(),
        _ => value.bold(),
    }
}
