//! Thought-log editing: timestamped entries grouped under per-day date
//! headings, newest first.
//!
//! The log grows at the top. A day's heading (`8-07-26` over a `---`
//! line) is created on first use; entries are pushed directly under it so
//! the most recent one always comes first. An entry may be "empty" (time
//! label with nothing after the dash), a placeholder left by `start` for
//! the user to fill in.
//!
//! Unlike the daily note, the log file is created on demand; a missing
//! file behaves as empty content.

use std::sync::LazyLock;

use regex::Regex;

use crate::clock::Today;
use crate::note::SEPARATOR;

// Time label with nothing after the dash, e.g. "4:55 PM - "
static EMPTY_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}:\d{2} (?:AM|PM) -\s*$").unwrap());

/// Check if a line is an empty placeholder entry.
fn is_empty_label(line: &str) -> bool {
    EMPTY_LABEL_RE.is_match(line.trim_start())
}

/// Heading token for a date, as matched and written in the file.
fn header_for(date: &str) -> String {
    format!("{}\n{}\n", date, SEPARATOR)
}

/// Find today's heading in either date spelling, first match wins.
/// A heading only counts with its separator line in place.
fn heading_index(lines: &[String], today: &Today) -> Option<usize> {
    (0..lines.len().saturating_sub(1)).find(|&i| {
        let trimmed = lines[i].trim();
        today.labels.iter().any(|d| trimmed == d) && lines[i + 1].trim() == SEPARATOR
    })
}

// ============================================================================
// Completed entries
// ============================================================================

/// Append a completed entry (`H:MM AM/PM - text`) under today's heading,
/// creating the heading at the top of the file when absent.
///
/// The header token is matched by plain string replacement of the first
/// occurrence. An entry appended under an existing heading is followed by
/// two blank lines; a freshly created heading gets three before the old
/// content. The counts differ in the source revisions and are kept as-is.
pub fn append_entry(content: &str, today: &Today, entry: &str) -> String {
    let formatted = format!("{} - {}\n", today.time, entry);

    let existing = today
        .labels
        .iter()
        .map(|d| header_for(d))
        .find(|h| content.contains(h.as_str()));

    match existing {
        Some(header) => {
            let replacement = format!("{}{}\n\n", header, formatted);
            content.replacen(header.as_str(), &replacement, 1)
        }
        None => format!("{}{}\n\n\n{}", header_for(&today.emit), formatted, content),
    }
}

// ============================================================================
// Placeholder merge
// ============================================================================

/// What `start_entry` did to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A placeholder was written where none was pending.
    Created,
    /// Pending empty placeholder(s) were collapsed into one fresh block.
    Refreshed,
}

/// Prepare an empty timestamp placeholder under today's heading.
///
/// State machine over the leading region of the log:
/// - no heading for today: prepend heading, separator, and a fresh
///   placeholder block above the old content;
/// - heading present, most recent entry non-empty: insert a fresh block
///   directly under the separator;
/// - heading present with leading empty placeholder(s): remove every
///   consecutive leading empty block (label line plus up to two blank
///   lines each) and put exactly one fresh block in their place.
///
/// Running this repeatedly without an intervening completed entry always
/// leaves exactly one placeholder.
pub fn start_entry(content: &str, today: &Today) -> (String, StartOutcome) {
    let fresh = format!("{} - ", today.time);

    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
    let had_final_newline = content.ends_with('\n');

    let Some(heading) = heading_index(&lines, today) else {
        let mut out = header_for(&today.emit);
        out.push_str(&fresh);
        out.push_str("\n\n\n");
        out.push_str(content);
        return (out, StartOutcome::Created);
    };

    let start = heading + 2;

    // Collapse leading empty placeholder blocks.
    let mut removed = 0;
    while start < lines.len() && is_empty_label(&lines[start]) {
        let mut block_end = start + 1;
        for _ in 0..2 {
            if block_end < lines.len() && lines[block_end].trim().is_empty() {
                block_end += 1;
            }
        }
        lines.drain(start..block_end);
        removed += 1;
    }

    lines.splice(start..start, [fresh, String::new(), String::new()]);

    let mut out = lines.join("\n");
    if had_final_newline {
        out.push('\n');
    }

    let outcome = if removed > 0 {
        StartOutcome::Refreshed
    } else {
        StartOutcome::Created
    };
    (out, outcome)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> Today {
        Today {
            labels: ["08-07-26".to_string(), "8-07-26".to_string()],
            emit: "8-07-26".to_string(),
            time: "4:55 PM".to_string(),
        }
    }

    #[test]
    fn test_append_entry_new_file() {
        let out = append_entry("", &today(), "first thought");
        // Entry line followed by three blank lines on file creation
        assert_eq!(out, "8-07-26\n---\n4:55 PM - first thought\n\n\n\n");
    }

    #[test]
    fn test_append_entry_new_heading_above_old_content() {
        let old = "8-06-26\n---\n9:00 AM - yesterday\n\n\n";
        let out = append_entry(old, &today(), "fresh");
        assert_eq!(
            out,
            "8-07-26\n---\n4:55 PM - fresh\n\n\n\n8-06-26\n---\n9:00 AM - yesterday\n\n\n"
        );
    }

    #[test]
    fn test_append_entry_under_existing_heading() {
        let old = "8-07-26\n---\n2:10 PM - earlier\n\n\n";
        let out = append_entry(old, &today(), "later thought");
        // New entry directly under the heading, two blank lines, then the
        // older entry shifted down
        assert_eq!(
            out,
            "8-07-26\n---\n4:55 PM - later thought\n\n\n2:10 PM - earlier\n\n\n"
        );
    }

    #[test]
    fn test_append_entry_matches_padded_heading() {
        // Heading written in the other date spelling is still today
        let old = "08-07-26\n---\n2:10 PM - earlier\n\n\n";
        let out = append_entry(old, &today(), "x");
        assert!(out.starts_with("08-07-26\n---\n4:55 PM - x\n"));
        assert!(
            !out.contains("8-07-26\n---\n4:55 PM - x\n\n08-07-26"),
            "must not create a second heading for today"
        );
    }

    #[test]
    fn test_start_entry_no_heading() {
        let old = "8-06-26\n---\n9:00 AM - yesterday\n\n\n";
        let (out, outcome) = start_entry(old, &today());
        assert_eq!(outcome, StartOutcome::Created);
        assert_eq!(
            out,
            "8-07-26\n---\n4:55 PM - \n\n\n8-06-26\n---\n9:00 AM - yesterday\n\n\n"
        );
    }

    #[test]
    fn test_start_entry_empty_file() {
        let (out, outcome) = start_entry("", &today());
        assert_eq!(outcome, StartOutcome::Created);
        assert_eq!(out, "8-07-26\n---\n4:55 PM - \n\n\n");
    }

    #[test]
    fn test_start_entry_after_completed_entry() {
        let old = "8-07-26\n---\n2:10 PM - earlier\n\n\n";
        let (out, outcome) = start_entry(old, &today());
        assert_eq!(outcome, StartOutcome::Created);
        assert_eq!(out, "8-07-26\n---\n4:55 PM - \n\n\n2:10 PM - earlier\n\n\n");
    }

    #[test]
    fn test_start_entry_idempotent() {
        let (once, outcome1) = start_entry("", &today());
        assert_eq!(outcome1, StartOutcome::Created);

        let (twice, outcome2) = start_entry(&once, &today());
        assert_eq!(outcome2, StartOutcome::Refreshed);
        assert_eq!(
            twice, once,
            "a second start must not accumulate placeholders"
        );

        let placeholders = twice.matches("4:55 PM - \n").count();
        assert_eq!(placeholders, 1);
    }

    #[test]
    fn test_start_entry_collapses_accumulated_placeholders() {
        // Files written by older revisions could pile up empty blocks
        let old = "8-07-26\n---\n4:50 PM - \n\n\n4:40 PM - \n\n\n2:10 PM - kept\n\n\n";
        let (out, outcome) = start_entry(old, &today());
        assert_eq!(outcome, StartOutcome::Refreshed);
        assert_eq!(out, "8-07-26\n---\n4:55 PM - \n\n\n2:10 PM - kept\n\n\n");
    }

    #[test]
    fn test_start_entry_keeps_time_of_fresh_block() {
        let old = "8-07-26\n---\n4:40 PM - \n\n\n";
        let (out, _) = start_entry(old, &today());
        assert!(out.contains("4:55 PM - "), "placeholder carries the current time");
        assert!(!out.contains("4:40 PM"), "stale placeholder removed");
    }

    #[test]
    fn test_is_empty_label() {
        let cases = vec![
            ("4:55 PM - ", true),
            ("4:55 PM -", true),
            ("12:00 AM -   ", true),
            ("4:55 PM - writing", false),
            ("8-07-26", false),
            ("", false),
        ];
        for (line, want) in cases {
            assert_eq!(is_empty_label(line), want, "line {:?}", line);
        }
    }
}
