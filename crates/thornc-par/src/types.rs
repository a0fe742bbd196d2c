//! Type-expression entry point.
//!
//! A type expression is just an ordinary expression parsed with the type
//! filter turned on (`tf = true`): the ladder in `expr.rs` already knows,
//! at each level, which productions are value-only and rejects them when
//! `tf` is set. This module exists so call sites that want "parse a type"
//! don't need to know that detail — they call [`Parser::parse_type_expr`].

use crate::ast::Expr;
use crate::Parser;

impl<'p> Parser<'p> {
    /// Parse a type expression: after `:` in a variable declaration, after
    /// `->` in a return type, inside `!(…)` template arguments, and in
    /// function-type argument lists.
    pub(crate) fn parse_type_expr(&mut self, nl: bool) -> Expr {
        self.parse_expr(nl, true)
    }
}
