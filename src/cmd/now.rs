//! The `now` command: push a task onto the top of the `now` section and
//! put it on the current-task display, optionally starting a countdown.
//! Without a task, re-reads the topmost entry and refreshes the display.

use std::path::Path;

use chrono::Local;
use clap::Args;

use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::external::{Collaborators, Desktop};
use crate::note::{Document, HeaderRule, Stop};
use crate::output::{quoted, style_section};

#[derive(Args)]
pub struct NowArgs {
    /// Task text (omit to re-display the current topmost task)
    task: Vec<String>,

    /// Start a countdown for this many minutes after adding
    #[arg(short = 'm', long, value_name = "N")]
    minutes: Option<u32>,
}

pub fn run(args: NowArgs, config: &Config) -> Result<()> {
    let path = config::daily_note_path(config, Local::now());
    let rule = config::header_rule(config);
    let collab = Desktop::new(&config.collaborators);
    execute(args, &path, rule, &collab)
}

fn execute(args: NowArgs, path: &Path, rule: HeaderRule, collab: &impl Collaborators) -> Result<()> {
    let task = args.task.join(" ").trim().to_string();

    if task.is_empty() {
        return redisplay(path, rule, collab);
    }

    let mut doc = Document::load(path)?;
    let span = doc.locate("now", rule)?;
    doc.insert(span.start, &task);
    doc.write()?;

    collab.notify_current_task(&task);

    println!(
        "Task {} added to {} section of daily note.",
        quoted(&task),
        style_section("now")
    );

    if let Some(minutes) = args.minutes {
        if collab.is_timer_running() {
            collab.stop_countdown();
        }
        collab.start_countdown(minutes);
        println!("Timer set for {} minutes.", minutes);
    }

    Ok(())
}

/// Read the topmost task (scanning past blank placeholders, stopping at
/// the `later` heading) and push it to the display. An empty section is
/// not an error here: it clears the display.
fn redisplay(path: &Path, rule: HeaderRule, collab: &impl Collaborators) -> Result<()> {
    let doc = Document::load(path)?;
    let span = doc.locate("now", rule)?;

    match doc.first_entry(&span, Stop::Heading("later")) {
        Ok((text, _)) => {
            collab.notify_current_task(&text);
            println!("Current task: {}.", quoted(&text));
        }
        Err(Error::NoEntries { .. }) => {
            collab.notify_current_task("");
            println!("No tasks in {} section.", style_section("now"));
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
