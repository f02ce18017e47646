//! Section-aware editing of daily note files.
//!
//! A daily note is an unstructured, human-edited text file carved into
//! sections by heading lines (`now`, `later`, `done`) that may be followed
//! by a `---` separator line. Everything here works on a whole-file line
//! buffer: read the file once, mutate in memory, write the file once.
//! Nothing is cached between invocations; structure is re-derived from raw
//! lines every run.
//!
//! The read-modify-write window is not protected by a lock. Two
//! invocations racing on the same file both read the original content and
//! the last write wins. Accepted for a single-user, low-frequency tool.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Separator line expected under a section heading.
pub const SEPARATOR: &str = "---";

/// Recognized task section headings, in canonical written order.
pub const SECTION_NAMES: &[&str] = &["now", "later", "done"];

/// Check if a trimmed line is a recognized section heading.
fn is_known_heading(line: &str) -> bool {
    let trimmed = line.trim();
    SECTION_NAMES.iter().any(|s| trimmed.eq_ignore_ascii_case(s))
}

// ============================================================================
// Header conventions
// ============================================================================

/// How the content start of a section relates to its heading line.
///
/// The note scripts accumulated two conventions over their revisions and
/// both are kept selectable rather than silently unified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HeaderRule {
    /// The line after the heading must be the `---` separator; content
    /// starts after it. Fails with `MalformedSection` otherwise.
    #[default]
    Verified,
    /// Content starts two lines after the heading, no questions asked.
    Fixed,
}

// ============================================================================
// Located section
// ============================================================================

/// Line range of a located section: content is `start..end`.
///
/// `end` is the index of the next recognized heading, or the document
/// length. Valid only until the next insertion above `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub name: String,
    pub heading: usize,
    pub start: usize,
    pub end: usize,
}

/// Stop boundary for entry reads within a section.
#[derive(Debug, Clone, Copy)]
pub enum Stop<'a> {
    /// Stop at the first blank line.
    Blank,
    /// Stop at a specific terminator heading (case-insensitive).
    Heading(&'a str),
}

// ============================================================================
// Document
// ============================================================================

/// Whole-file line buffer for one daily note.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    lines: Vec<String>,
    had_final_newline: bool,
}

impl Document {
    /// Load the note at `path`. The file must already exist; these tools
    /// never create the daily note themselves.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileMissing {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
        let mut doc = Self::from_content(&content);
        doc.path = path.to_path_buf();
        Ok(doc)
    }

    /// Build a document from raw content. Tolerates a missing final
    /// newline; `render` reproduces whatever the source had.
    pub fn from_content(content: &str) -> Self {
        Document {
            path: PathBuf::new(),
            lines: content.lines().map(str::to_string).collect(),
            had_final_newline: content.ends_with('\n'),
        }
    }

    /// Write the full buffer back to the file it was loaded from.
    pub fn write(&self) -> Result<()> {
        fs::write(&self.path, self.render())
            .map_err(|e| Error::io(format!("writing {}", self.path.display()), e))
    }

    /// Render the buffer back into file content.
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        if self.had_final_newline {
            out.push('\n');
        }
        out
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> &str {
        &self.lines[index]
    }

    // ========================================================================
    // Section locator
    // ========================================================================

    /// Locate a section by heading name.
    ///
    /// The first line whose trimmed text case-insensitively equals `name`
    /// wins; duplicate headings further down are ignored. Content runs to
    /// the next recognized heading or end of file, which may yield an
    /// empty range for a section at the very end.
    pub fn locate(&self, name: &str, rule: HeaderRule) -> Result<Span> {
        let heading = self
            .lines
            .iter()
            .position(|l| l.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::SectionNotFound {
                name: name.to_string(),
            })?;

        let start = match rule {
            HeaderRule::Verified => match self.lines.get(heading + 1) {
                Some(next) if next.trim() == SEPARATOR => heading + 2,
                _ => {
                    return Err(Error::MalformedSection {
                        name: name.to_string(),
                    });
                }
            },
            HeaderRule::Fixed => heading + 2,
        };
        let start = start.min(self.len());

        let end = (start..self.len())
            .find(|&i| is_known_heading(self.line(i)))
            .unwrap_or(self.len());

        Ok(Span {
            name: name.to_string(),
            heading,
            start,
            end,
        })
    }

    /// Index of the next heading-with-separator at or after `from`: the
    /// first non-blank line immediately followed by a `---` line. Returns
    /// the document length when no further heading exists, so the result
    /// is always a valid insertion point.
    pub fn next_heading_boundary(&self, from: usize) -> usize {
        for i in from..self.len().saturating_sub(1) {
            if !self.line(i).trim().is_empty() && self.line(i + 1).trim() == SEPARATOR {
                return i;
            }
        }
        self.len()
    }

    // ========================================================================
    // Entry mutators
    // ========================================================================

    /// Insert a single entry line at `at`, shifting later lines down.
    pub fn insert(&mut self, at: usize, text: &str) {
        self.lines.insert(at.min(self.lines.len()), text.to_string());
    }

    /// Insert an entry line followed by a blank spacer line.
    pub fn insert_spaced(&mut self, at: usize, text: &str) {
        let at = at.min(self.lines.len());
        self.lines.insert(at, String::new());
        self.lines.insert(at, text.to_string());
    }

    /// Replace the line at `index` with an empty placeholder. The slot is
    /// kept so indices read earlier in the same invocation stay valid.
    pub fn blank_out(&mut self, index: usize) {
        self.lines[index] = String::new();
    }

    /// First non-blank entry in the section, scanning from content start.
    ///
    /// Stops at the given boundary; reaching it (or end of file) before
    /// any entry fails with `NoEntries`.
    pub fn first_entry(&self, span: &Span, stop: Stop) -> Result<(String, usize)> {
        for i in span.start..self.len() {
            let trimmed = self.line(i).trim();
            match stop {
                Stop::Blank if trimmed.is_empty() => break,
                Stop::Heading(term) if trimmed.eq_ignore_ascii_case(term) => break,
                _ => {}
            }
            if !trimmed.is_empty() {
                return Ok((trimmed.to_string(), i));
            }
        }
        Err(Error::NoEntries {
            name: span.name.clone(),
        })
    }

    /// Every non-blank entry with its line index, up to the terminator
    /// heading (or the span end). Blank placeholder lines are skipped.
    pub fn entries_until(&self, span: &Span, terminator: &str) -> Vec<(String, usize)> {
        let mut entries = Vec::new();
        for i in span.start..span.end {
            let trimmed = self.line(i).trim();
            if trimmed.eq_ignore_ascii_case(terminator) {
                break;
            }
            if !trimmed.is_empty() {
                entries.push((trimmed.to_string(), i));
            }
        }
        entries
    }
}

// ============================================================================
// Tests
// ============================================================================
