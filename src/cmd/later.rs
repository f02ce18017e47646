//! The `later` command: file a task into the `later` section, at the top
//! by default or at the bottom on request.
//!
//! The launcher hands the whole input over as one quoted argument, so the
//! bottom switch also arrives as a literal trailing `-b` word inside the
//! task text. Both spellings are honored.

use std::path::Path;

use chrono::Local;
use clap::Args;

use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::input;
use crate::note::{Document, HeaderRule};
use crate::output::{quoted, style_section};

#[derive(Args)]
pub struct LaterArgs {
    /// Task text; a trailing literal `-b` word also selects the bottom
    task: Vec<String>,

    /// Append at the bottom of the section instead of the top
    #[arg(short = 'b', long)]
    bottom: bool,
}

pub fn run(args: LaterArgs, config: &Config) -> Result<()> {
    let path = config::daily_note_path(config, Local::now());
    let rule = config::header_rule(config);
    execute(args, &path, rule)
}

fn execute(args: LaterArgs, path: &Path, rule: HeaderRule) -> Result<()> {
    let mut text = args.task.join(" ").trim().to_string();
    if text.is_empty() {
        text = input::read_stdin();
    }

    let (task, token_bottom) = split_bottom_token(&text);
    let bottom = args.bottom || token_bottom;

    if task.is_empty() {
        return Err(Error::Usage("no task provided".to_string()));
    }

    let mut doc = Document::load(path)?;
    let span = doc.locate("later", rule)?;

    if bottom {
        // Before the next heading-with-separator, scanning from two lines
        // past the section heading, or at end of file
        let at = doc.next_heading_boundary(span.heading + 2);
        doc.insert_spaced(at, &task);
    } else {
        doc.insert_spaced(span.start, &task);
    }
    doc.write()?;

    println!(
        "Added task {} to {} of {} section in daily note.",
        quoted(&task),
        if bottom { "bottom" } else { "top" },
        style_section("later")
    );

    Ok(())
}

/// Split a trailing literal `-b` word off the task text. Only when the
/// token is present is the text re-joined from words (collapsing runs of
/// spaces); otherwise it is passed through untouched.
fn split_bottom_token(text: &str) -> (String, bool) {
    let words: Vec<&str> = text.split_whitespace().collect();
    match words.last() {
        Some(&"-b") => (words[..words.len() - 1].join(" "), true),
        _ => (text.to_string(), false),
    }
}
