//! Stdin input utilities.

use std::io::{self, IsTerminal, Read};

/// Read task or entry text from stdin if piped (not a terminal).
///
/// Returns an empty string when stdin is a terminal, so callers can fall
/// back to their usage error. Leading and trailing whitespace is removed.
pub fn read_stdin() -> String {
    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        if io::stdin().read_to_string(&mut buffer).is_ok() {
            return buffer.trim().to_string();
        }
    }
    String::new()
}
