//! Error kinds for note and journal operations.
//!
//! All kinds are detected during the read/parse phase, before any write is
//! attempted; a failing invocation never leaves a partially mutated file.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The daily note for today has not been created yet.
    #[error("daily note for today does not exist at {}", path.display())]
    FileMissing { path: PathBuf },

    /// No heading line matches the requested section name.
    #[error("could not find '{name}' section in daily note")]
    SectionNotFound { name: String },

    /// Heading found but the required '---' separator line is absent.
    #[error("'{name}' section heading is not followed by a '---' separator")]
    MalformedSection { name: String },

    /// Section located but it holds no task lines.
    #[error("no tasks in '{name}' section")]
    NoEntries { name: String },

    /// Invocation problem: missing or unusable input text.
    #[error("{0}")]
    Usage(String),

    /// Structured output could not be rendered.
    #[error("{0}")]
    Output(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error with a short human context ("reading /path", ...).
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
