use std::fmt;
use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The stream ended before the requested number of frames was read.
    #[error("unexpected end of input at line {line} while reading frame {frame}")]
    Truncated { frame: usize, line: usize },
    #[error("malformed record on line {line}: {kind}")]
    Malformed { line: usize, kind: MalformedKind },
}

impl ConvertError {
    /// The 1-based line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConvertError::Io(_) => None,
            ConvertError::Truncated { line, .. } | ConvertError::Malformed { line, .. } => {
                Some(*line)
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedKind {
    #[error("{record} line must have {expected} fields, found {found}")]
    TokenCount {
        record: Record,
        expected: usize,
        found: usize,
    },
    #[error("frame header must be a non-negative atom count (value: '{value}')")]
    InvalidHeader { value: String },
    #[error("invalid number (value: '{value}')")]
    InvalidNumber { value: String },
}

/// A line of a frame with a fixed number of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Box,
    Atom,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Record::Box => "box",
            Record::Atom => "atom",
        };
        f.write_str(name)
    }
}
