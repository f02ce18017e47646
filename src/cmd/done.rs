//! The `done` command: move the topmost `now` task into `done` with a
//! completion stamp, then point the current-task display at whatever is
//! next. With an explicit task, just record it as completed.

use std::path::Path;

use chrono::Local;
use clap::Args;

use crate::clock;
use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::external::{Collaborators, Desktop};
use crate::note::{Document, HeaderRule};
use crate::output::{print_hint, quoted, style_section};

#[derive(Args)]
pub struct DoneArgs {
    /// Completed task text (omit to complete the topmost `now` task)
    task: Vec<String>,
}

pub fn run(args: DoneArgs, config: &Config) -> Result<()> {
    let path = config::daily_note_path(config, Local::now());
    let rule = config::header_rule(config);
    let stamp = clock::completion_stamp(Local::now(), config::date_style(config));
    let quiet = config::is_quiet(config);
    let collab = Desktop::new(&config.collaborators);
    execute(args, &path, rule, &stamp, quiet, &collab)
}

fn execute(
    args: DoneArgs,
    path: &Path,
    rule: HeaderRule,
    stamp: &str,
    quiet: bool,
    collab: &impl Collaborators,
) -> Result<()> {
    let task = args.task.join(" ").trim().to_string();
    let mut doc = Document::load(path)?;

    if task.is_empty() {
        complete_topmost(&mut doc, rule, stamp, quiet, collab)
    } else {
        append_done(&mut doc, rule, &format!("{} - {}", task, stamp))?;
        doc.write()?;
        println!(
            "Task {} added to {} section of daily note.",
            quoted(&task),
            style_section("done")
        );
        Ok(())
    }
}

/// Relocate the topmost `now` entry: blank its line (keeping later
/// indices valid), append it stamped under `done`, and hand the display
/// the next task up, or an empty string to clear it.
fn complete_topmost(
    doc: &mut Document,
    rule: HeaderRule,
    stamp: &str,
    quiet: bool,
    collab: &impl Collaborators,
) -> Result<()> {
    let span = doc.locate("now", rule)?;
    let entries = doc.entries_until(&span, "later");

    let Some((text, index)) = entries.first() else {
        return Err(Error::NoEntries {
            name: span.name.clone(),
        });
    };

    doc.blank_out(*index);
    append_done(doc, rule, &format!("{} - {}", text, stamp))?;
    doc.write()?;

    let next = entries.get(1).map(|(t, _)| t.as_str()).unwrap_or("");
    collab.notify_current_task(next);

    println!(
        "Moved {} from {} to {}.",
        quoted(text),
        style_section("now"),
        style_section("done")
    );
    if next.is_empty() && !quiet {
        print_hint("now section is empty");
    }
    Ok(())
}

/// Insert a stamped line at the end of the `done` section (before the
/// next heading-with-separator, or at end of file).
fn append_done(doc: &mut Document, rule: HeaderRule, line: &str) -> Result<()> {
    let span = doc.locate("done", rule)?;
    let at = doc.next_heading_boundary(span.start);
    doc.insert(at, line);
    Ok(())
}
