//! External collaborator applications: the current-task menu-bar display,
//! the countdown timer, the macro engine, and the editor.
//!
//! Every call here is fire-and-forget. A collaborator that is missing,
//! crashes, or rejects its input must never fail the invocation: the
//! note mutation has already been written by the time these run.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::CollaboratorsConfig;

/// Capability interface for the external applications. Commands take this
/// as a parameter so tests can substitute [`Silent`].
pub trait Collaborators {
    /// Show `text` as the current task; an empty string clears the display.
    fn notify_current_task(&self, text: &str);

    /// Start a countdown for the given number of minutes.
    fn start_countdown(&self, minutes: u32);

    /// Stop a running countdown.
    fn stop_countdown(&self);

    /// Whether a countdown is currently running.
    fn is_timer_running(&self) -> bool;

    /// Invoke a named automation in the macro engine.
    fn trigger_macro(&self, name: &str);

    /// Bring the editor window to front on the given file.
    fn raise_editor(&self, path: &Path);
}

// ============================================================================
// Desktop implementation
// ============================================================================

/// Process-spawning implementation used by the real commands.
pub struct Desktop<'a> {
    config: &'a CollaboratorsConfig,
}

impl<'a> Desktop<'a> {
    pub fn new(config: &'a CollaboratorsConfig) -> Self {
        Desktop { config }
    }
}

impl Collaborators for Desktop<'_> {
    fn notify_current_task(&self, text: &str) {
        let url = format!("{}{}", self.config.task_url, url_encode(text));
        let _ = Command::new("open")
            .args(["--background", &url])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
    }

    fn start_countdown(&self, minutes: u32) {
        let (hours, minutes) = (minutes / 60, minutes % 60);
        let timer_command = format!("{{Timer#0:H{:02}M{:02}S00 ModeTimer Start}}", hours, minutes);
        let _ = Command::new(&self.config.timer_app)
            .arg(timer_command)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
    }

    fn stop_countdown(&self) {
        let _ = Command::new("pkill")
            .args(["-f", &self.config.timer_match])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }

    fn is_timer_running(&self) -> bool {
        Command::new("pgrep")
            .args(["-f", &self.config.timer_match])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn trigger_macro(&self, name: &str) {
        let script = format!(
            "tell application \"Keyboard Maestro Engine\" to do script \"{}\"",
            name
        );
        let _ = Command::new("/usr/bin/osascript")
            .args(["-e", &script])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
    }

    fn raise_editor(&self, path: &Path) {
        let _ = Command::new("open")
            .arg("-a")
            .arg(&self.config.editor_app)
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
    }
}

/// Percent-encode a task for the display URL. Unreserved characters pass
/// through; everything else (spaces, punctuation, UTF-8 bytes) is escaped.
fn url_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

// ============================================================================
// Test double
// ============================================================================

/// No-op collaborators for tests.
pub struct Silent;

impl Collaborators for Silent {
    fn notify_current_task(&self, _text: &str) {}
    fn start_countdown(&self, _minutes: u32) {}
    fn stop_countdown(&self) {}
    fn is_timer_running(&self) -> bool {
        false
    }
    fn trigger_macro(&self, _name: &str) {}
    fn raise_editor(&self, _path: &Path) {}
}

// ============================================================================
// Tests
// ============================================================================
