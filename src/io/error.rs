//! Canonical error type for trajectory and structure input.
//!
//! Parser, filesystem, and consistency failures are folded into a single `Error` enum so
//! the bridge scanner and the CLI can report them with uniform wording.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading trajectory data.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper around operating-system level I/O failures.
    #[error(
        "I/O error for {path_desc}: {source}",
        path_desc = PathDisplay(path)
    )]
    Io {
        /// Path to the file involved in the failed operation, if any.
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// An input line could not be parsed into the expected record.
    #[error(
        "failed to parse {format} {path_desc}: {details} (line {line_number})",
        path_desc = PathDisplay(path)
    )]
    Parse {
        /// Name of the textual format (e.g., `"PDB"`).
        format: &'static str,
        path: Option<PathBuf>,
        /// One-based line number where parsing failed.
        line_number: usize,
        details: String,
    },

    /// Logical inconsistencies such as frames with differing atom counts.
    #[error(
        "inconsistent data in {format} {path_desc}: {details}",
        path_desc = PathDisplay(path)
    )]
    InconsistentData {
        format: &'static str,
        path: Option<PathBuf>,
        details: String,
    },
}

impl Error {
    pub fn from_io(source: std::io::Error, path: Option<PathBuf>) -> Self {
        Self::Io { path, source }
    }

    pub fn parse(
        format: &'static str,
        path: Option<PathBuf>,
        line_number: usize,
        details: impl Into<String>,
    ) -> Self {
        Self::Parse {
            format,
            path,
            line_number,
            details: details.into(),
        }
    }

    pub fn inconsistent_data(
        format: &'static str,
        path: Option<PathBuf>,
        details: impl Into<String>,
    ) -> Self {
        Self::InconsistentData {
            format,
            path,
            details: details.into(),
        }
    }

    /// Attaches a file path to errors produced while reading an anonymous stream.
    pub fn with_path(self, new_path: impl Into<PathBuf>) -> Self {
        let new_path = Some(new_path.into());
        match self {
            Self::Io { source, .. } => Self::Io {
                path: new_path,
                source,
            },
            Self::Parse {
                format,
                line_number,
                details,
                ..
            } => Self::Parse {
                format,
                path: new_path,
                line_number,
                details,
            },
            Self::InconsistentData {
                format, details, ..
            } => Self::InconsistentData {
                format,
                path: new_path,
                details,
            },
        }
    }
}

struct PathDisplay<'a>(&'a Option<PathBuf>);

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "file '{}'", p.display()),
            None => write!(f, "stream source"),
        }
    }
}
