//! Error types for misuse of the utility types themselves (not source-level
//! diagnostics, which flow through [`crate::diagnostic::Handler`]).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpanError {
    #[error("invalid span: begin {begin} > end {end}")]
    Inverted { begin: usize, end: usize },
}

pub type SpanResult<T> = std::result::Result<T, SpanError>;
