//! Foundation types shared by `thornc-lex` and `thornc-par`: source spans,
//! symbol interning, and the diagnostics accumulator.
//!
//! Nothing in this crate is specific to the language grammar; it exists so
//! the lexer and parser crates agree on how positions, identifiers, and
//! errors are represented.

pub mod diagnostic;
pub mod error;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, Handler, Phase};
pub use span::Span;
pub use symbol::Symbol;
