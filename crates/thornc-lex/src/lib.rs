//! Unicode lexer for the thornc compiler front end.
//!
//! Converts a zero-terminated UTF-32 code-point buffer into a stream of
//! [`Token`]s, one at a time, via [`Lexer::next_token`]. Whitespace other
//! than newlines is skipped silently; newlines and comments are emitted as
//! real tokens so the parser controls when they matter.
//!
//! This crate never transcodes UTF-8; the caller hands it a code-point
//! buffer terminated by a `0` sentinel (see [`cursor::EOF_CODEPOINT`]).

pub mod cursor;
pub mod lexer;
pub mod token;
pub mod unicode;

#[cfg(test)]
mod edge_cases;

pub use lexer::Lexer;
pub use token::{Delimiter, FloatValue, IntValue, Keyword, Operator, Token, TokenKind};
