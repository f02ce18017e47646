//! The `thought` command: append a timestamped entry under today's date
//! heading of the thought log. The log file is created on first use.

use std::fs;
use std::path::Path;

use chrono::Local;
use clap::Args;

use crate::clock::{self, Today};
use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::input;
use crate::journal;

#[derive(Args)]
pub struct ThoughtArgs {
    /// Journal entry text (reads from stdin if piped and omitted)
    entry: Vec<String>,
}

pub fn run(args: ThoughtArgs, config: &Config) -> Result<()> {
    let path = config::thought_log_path(config);
    let today = clock::today(Local::now(), config::date_style(config));
    execute(args, &path, &today)
}

fn execute(args: ThoughtArgs, path: &Path, today: &Today) -> Result<()> {
    let mut entry = args.entry.join(" ").trim().to_string();
    if entry.is_empty() {
        entry = input::read_stdin();
    }
    if entry.is_empty() {
        return Err(Error::Usage("no journal entry provided".to_string()));
    }

    let content = read_log(path)?;
    let updated = journal::append_entry(&content, today, &entry);
    fs::write(path, updated).map_err(|e| Error::io(format!("writing {}", path.display()), e))?;

    println!("Logged thought at {}.", today.time);
    Ok(())
}

/// The thought log is created on demand: a missing file reads as empty.
pub(super) fn read_log(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(Error::io(format!("reading {}", path.display()), e)),
    }
}
