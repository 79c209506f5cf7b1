//! Classic crontab text parsing.
//!
//! Each non-comment line is a cron spec followed by a shell command.
//! The spec is one token for `@shorthand` lines, six fields when the
//! first six tokens parse as a cron expression and a command still
//! follows, and five fields otherwise. Only the line shape is checked
//! here; spec grammar errors surface when the job is created.

use crontap_schedule::CronSchedule;

use crate::entry::JobEntry;
use crate::error::TabError;

/// Parse crontab text into job entries.
///
/// Blank lines and lines starting with `#` are skipped. Returns
/// `Malformed` for a line with no command after its spec.
pub fn parse(content: &str) -> Result<Vec<JobEntry>, TabError> {
    let mut entries = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let fields = spec_field_count(&tokens);

        let cmd = offset_after_tokens(line, fields)
            .map(|offset| line[offset..].trim_start())
            .unwrap_or_default();
        if cmd.is_empty() {
            return Err(TabError::Malformed {
                line: idx + 1,
                content: line.to_string(),
            });
        }

        entries.push(JobEntry {
            spec: tokens[..fields].join(" "),
            cmd: cmd.to_string(),
        });
    }

    Ok(entries)
}

/// Number of leading tokens that form the cron spec.
fn spec_field_count(tokens: &[&str]) -> usize {
    match tokens.first() {
        Some(first) if first.starts_with('@') => 1,
        _ if tokens.len() >= 7 && CronSchedule::parse(&tokens[..6].join(" ")).is_ok() => 6,
        _ => 5,
    }
}

/// Byte offset just past the `n`th whitespace-separated token, or
/// `None` if the line holds fewer than `n` tokens.
///
/// Slicing the raw line at this offset keeps the command verbatim,
/// inner whitespace included.
fn offset_after_tokens(line: &str, n: usize) -> Option<usize> {
    let mut seen = 0;
    let mut in_token = false;

    for (i, ch) in line.char_indices() {
        if ch.is_whitespace() {
            if in_token {
                seen += 1;
                if seen == n {
                    return Some(i);
                }
                in_token = false;
            }
        } else {
            in_token = true;
        }
    }

    if in_token && seen + 1 == n {
        return Some(line.len());
    }
    None
}

#[cfg(test)]
#[path = "crontab_tests.rs"]
mod tests;
