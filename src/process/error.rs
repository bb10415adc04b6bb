use std::{io, num::ParseFloatError, path::PathBuf};
use thiserror::Error;
use zip::result::ZipError;

/// Broad category of a load failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open archive")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid zip archive")]
    Archive {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    #[error("entry {entry:?} not found in archive")]
    EntryNotFound { path: PathBuf, entry: String },

    #[error("failed reading entry")]
    Read {
        #[source]
        source: csv::Error,
    },

    #[error("line {line}: expected at least {} fields, found {found}", crate::process::record::TIV_2012_COLUMN + 1)]
    MissingFields { line: u64, found: usize },

    #[error("line {line}: invalid number {value:?} in column {column}")]
    InvalidNumber {
        line: u64,
        column: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::Open { .. }
            | LoadError::Archive { .. }
            | LoadError::EntryNotFound { .. }
            | LoadError::Read { .. } => ErrorKind::Io,
            LoadError::MissingFields { .. } | LoadError::InvalidNumber { .. } => ErrorKind::Parse,
        }
    }
}
