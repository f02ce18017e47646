//! Output formatting utilities with TTY auto-detection and semantic styling.

use std::io::IsTerminal;

use clap::ValueEnum;
use colored::{ColoredString, Colorize};

/// Output format for commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-optimized: colors, relative context
    #[default]
    Pretty,
    /// Script-optimized: no colors, bare values
    Plain,
    /// Machine-readable JSON
    Json,
    /// Machine-readable YAML
    Yaml,
}

impl OutputFormat {
    /// Resolve the output format, applying TTY auto-detection.
    ///
    /// If format is Pretty but stdout is not a TTY, returns Plain.
    pub fn resolve(self) -> Self {
        match self {
            OutputFormat::Pretty if !std::io::stdout().is_terminal() => OutputFormat::Plain,
            other => other,
        }
    }
}

// ============================================================================
// Semantic Styling - Centralized color/style decisions
// ============================================================================

/// Section names in messages - bold to stand out from the task text.
pub fn style_section(name: &str) -> ColoredString {
    name.bold()
}

/// Task text in messages - left unstyled except quotes around it.
pub fn quoted(text: &str) -> String {
    format!("'{}'", text)
}

/// Print a hint line (suppressed in quiet mode by the caller).
pub fn print_hint(hint: &str) {
    println!("{}", format!("hint: {}", hint).dimmed());
}
