//! Error type for the `thornc` driver binary.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong running a `thornc` subcommand.
#[derive(Error, Debug)]
pub enum DrvError {
    #[error("failed to read {path}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8: {source}")]
    NotUtf8 {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("lexing {path} reported {count} diagnostic(s)")]
    LexFailed { path: PathBuf, count: usize },

    #[error("parsing {path} reported {count} diagnostic(s)")]
    ParseFailed { path: PathBuf, count: usize },
}

pub type Result<T> = std::result::Result<T, DrvError>;
