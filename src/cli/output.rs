use std::fmt::Write;

use anyhow::Result;
use glint_tui::SessionOutcome;

/// Plain-text rendering of the outcome, one line per target.
pub(crate) fn format_plain(outcome: &SessionOutcome) -> String {
	let mut out = String::new();
	match outcome {
		SessionOutcome::Committed(commit) => {
			for target in &commit.targets {
				let _ = writeln!(out, "{target}");
			}
		}
		SessionOutcome::ExternalList { entries, .. } => {
			for entry in entries {
				match entry.location {
					Some(location) => {
						let _ = writeln!(
							out,
							"{}:{}:{}:{}",
							entry.identifier, location.line, location.column, entry.text
						);
					}
					None => {
						let _ = writeln!(out, "{}", entry.identifier);
					}
				}
			}
		}
		SessionOutcome::Cancelled { query } => {
			let _ = writeln!(out, "Search cancelled (query: '{query}')");
		}
		SessionOutcome::Closed { reason } => {
			let _ = writeln!(out, "Session closed: {reason}");
		}
	}
	out
}

/// Print a plain-text representation of the session outcome.
pub(crate) fn print_plain(outcome: &SessionOutcome) {
	print!("{}", format_plain(outcome));
}

/// Format the session outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SessionOutcome) -> Result<String> {
	Ok(serde_json::to_string_pretty(outcome)?)
}

/// Print the JSON representation of the session outcome.
pub(crate) fn print_json(outcome: &SessionOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}
