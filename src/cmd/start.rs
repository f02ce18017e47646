//! The `start` command: put an empty timestamp placeholder at the top of
//! today's thought-log section, then hand off to the entry macro so the
//! user can type straight into it. If a placeholder was already pending,
//! it is refreshed in place and the editor is raised instead.

use std::path::Path;

use chrono::Local;
use clap::Args;

use crate::clock::{self, Today};
use crate::cmd::thought::read_log;
use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::external::{Collaborators, Desktop};
use crate::journal::{self, StartOutcome};

#[derive(Args)]
pub struct StartArgs {}

pub fn run(_args: StartArgs, config: &Config) -> Result<()> {
    let path = config::thought_log_path(config);
    let today = clock::today(Local::now(), config::date_style(config));
    let collab = Desktop::new(&config.collaborators);
    execute(&path, &today, &config.collaborators.entry_macro, &collab)
}

fn execute(
    path: &Path,
    today: &Today,
    entry_macro: &str,
    collab: &impl Collaborators,
) -> Result<()> {
    let content = read_log(path)?;
    let (updated, outcome) = journal::start_entry(&content, today);
    std::fs::write(path, updated)
        .map_err(|e| Error::io(format!("writing {}", path.display()), e))?;

    match outcome {
        StartOutcome::Created => {
            collab.trigger_macro(entry_macro);
            println!("Thought log ready at {}.", today.time);
        }
        StartOutcome::Refreshed => {
            collab.raise_editor(path);
            println!("Placeholder refreshed to {}.", today.time);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;

    fn today() -> Today {
        Today {
            labels: ["08-07-26".to_string(), "8-07-26".to_string()],
            emit: "8-07-26".to_string(),
            time: "4:55 PM".to_string(),
        }
    }

    /// Records macro and editor hand-offs.
    #[derive(Default)]
    struct HandOffs {
        macros: RefCell<Vec<String>>,
        raised: RefCell<usize>,
    }

    impl Collaborators for HandOffs {
        fn notify_current_task(&self, _text: &str) {}
        fn start_countdown(&self, _minutes: u32) {}
        fn stop_countdown(&self) {}
        fn is_timer_running(&self) -> bool {
            false
        }
        fn trigger_macro(&self, name: &str) {
            self.macros.borrow_mut().push(name.to_string());
        }
        fn raise_editor(&self, _path: &Path) {
            *self.raised.borrow_mut() += 1;
        }
    }

    #[test]
    fn test_fresh_start_triggers_macro() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thought log.txt");

        let handoffs = HandOffs::default();
        execute(&path, &today(), "Thought log entry", &handoffs).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "8-07-26\n---\n4:55 PM - \n\n\n"
        );
        assert_eq!(*handoffs.macros.borrow(), vec!["Thought log entry"]);
        assert_eq!(*handoffs.raised.borrow(), 0);
    }

    #[test]
    fn test_repeat_start_raises_editor_instead() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thought log.txt");

        let first = HandOffs::default();
        execute(&path, &today(), "Thought log entry", &first).unwrap();
        let after_first = fs::read_to_string(&path).unwrap();

        let second = HandOffs::default();
        execute(&path, &today(), "Thought log entry", &second).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            after_first,
            "a second start leaves exactly one placeholder"
        );
        assert!(second.macros.borrow().is_empty(), "macro fires only once");
        assert_eq!(*second.raised.borrow(), 1);
    }

    #[test]
    fn test_start_over_completed_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thought log.txt");
        fs::write(&path, "8-07-26\n---\n2:10 PM - earlier\n\n\n").unwrap();

        let handoffs = HandOffs::default();
        execute(&path, &today(), "Thought log entry", &handoffs).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "8-07-26\n---\n4:55 PM - \n\n\n2:10 PM - earlier\n\n\n"
        );
        assert_eq!(*handoffs.macros.borrow(), vec!["Thought log entry"]);
    }
}
