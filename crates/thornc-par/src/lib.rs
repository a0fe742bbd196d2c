//! Recursive-descent, precedence-climbing parser for the thornc compiler
//! front end.
//!
//! Consumes tokens one at a time from a [`Lexer`], buffering exactly one
//! token of lookahead in `current`. Newline sensitivity is not a mode
//! saved and restored around brackets: it is an explicit `nl` parameter
//! threaded through every parsing function. Opening a bracket always
//! advances with `nl = true`, forcing newline-insensitivity inside
//! regardless of how the bracket itself was reached; closing it advances
//! with whatever `nl` the enclosing call was given, so control returns to
//! the ambient mode no matter how deeply brackets are nested.

mod expr;
mod items;
mod stmt;
mod types;

#[cfg(test)]
mod edge_cases;

pub mod ast;

use thornc_lex::{Delimiter, Keyword, Lexer, Operator, Token, TokenKind};
use thornc_util::{Diagnostic, Handler, Phase, Span, Symbol};

pub use ast::Ast;

/// Parse a complete source buffer into a statement list plus whatever
/// diagnostics the lexer and parser accumulated. Never panics: a
/// syntactically broken input still yields a best-effort AST with
/// [`ast::Stmt::Invalid`]/[`ast::Expr::Invalid`] nodes standing in for the
/// parts that could not be recovered.
pub fn parse(buf: &[u32]) -> (Ast, Vec<Diagnostic>) {
    let mut handler = Handler::new();
    let statements = {
        let lexer = Lexer::new(buf, &mut handler);
        let mut parser = Parser::new(lexer);
        parser.parse_program()
    };
    (statements, handler.into_diagnostics())
}

/// A one-token-lookahead parser over a [`Lexer`].
pub struct Parser<'p> {
    lexer: Lexer<'p>,
    current: Token,
}

impl<'p> Parser<'p> {
    pub fn new(mut lexer: Lexer<'p>) -> Self {
        let current = Self::pull_from(&mut lexer, false);
        Self { lexer, current }
    }

    /// `parse(source) -> statement[]`.
    pub fn parse_program(&mut self) -> Ast {
        self.parse_program_impl()
    }

    fn pull_from(lexer: &mut Lexer<'p>, skip_nl: bool) -> Token {
        loop {
            let tok = lexer.next_token();
            match tok.kind {
                TokenKind::Comment => continue,
                TokenKind::Newline if skip_nl => continue,
                _ => return tok,
            }
        }
    }

    fn pull(&mut self, skip_nl: bool) -> Token {
        Self::pull_from(&mut self.lexer, skip_nl)
    }

    /// Fetch the next meaningful token, honoring `skip_nl` for whether a
    /// run of `NEWLINE`s is transparent, and return the token that was
    /// current before this call.
    fn advance(&mut self, skip_nl: bool) -> Token {
        let next = self.pull(skip_nl);
        std::mem::replace(&mut self.current, next)
    }

    fn skip_newlines(&mut self) {
        while matches!(self.current.kind, TokenKind::Newline) {
            self.advance(false);
        }
    }

    fn is_eof(&self) -> bool {
        self.current.is_eof()
    }

    fn is_delim(&self, d: Delimiter) -> bool {
        matches!(&self.current.kind, TokenKind::Delimiter(k) if *k == d)
    }

    fn is_keyword(&self, k: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == k)
    }

    fn is_operator(&self, o: Operator) -> bool {
        matches!(&self.current.kind, TokenKind::Operator(op) if *op == o)
    }

    fn eat_delim(&mut self, d: Delimiter, nl: bool) -> Option<Span> {
        if self.is_delim(d) {
            let span = self.current.span;
            self.advance(nl);
            Some(span)
        } else {
            None
        }
    }

    fn eat_keyword(&mut self, k: Keyword, nl: bool) -> Option<Span> {
        if self.is_keyword(k) {
            let span = self.current.span;
            self.advance(nl);
            Some(span)
        } else {
            None
        }
    }

    fn eat_operator(&mut self, o: Operator, nl: bool) -> Option<Span> {
        if self.is_operator(o) {
            let span = self.current.span;
            self.advance(nl);
            Some(span)
        } else {
            None
        }
    }

    /// Consume `d` if present; otherwise report and leave the cursor in
    /// place. Always returns a usable span so callers can merge it into
    /// an enclosing node unconditionally.
    fn expect_delim(&mut self, d: Delimiter, nl: bool) -> Span {
        if let Some(span) = self.eat_delim(d, nl) {
            span
        } else {
            let span = self.current.span;
            self.error(format!("expected {d:?}, found {:?}", self.current.kind), span);
            span
        }
    }

    fn expect_keyword(&mut self, k: Keyword, nl: bool) -> Span {
        if let Some(span) = self.eat_keyword(k, nl) {
            span
        } else {
            let span = self.current.span;
            self.error(format!("expected {k:?}, found {:?}", self.current.kind), span);
            span
        }
    }

    fn expect_identifier(&mut self, nl: bool) -> (Symbol, Span) {
        if let TokenKind::Identifier(sym) = &self.current.kind {
            let sym = *sym;
            let span = self.current.span;
            self.advance(nl);
            (sym, span)
        } else {
            let span = self.current.span;
            self.error(format!("expected an identifier, found {:?}", self.current.kind), span);
            (Symbol::intern("<error>"), span)
        }
    }

    fn error(&mut self, message: impl Into<String>, span: Span) {
        self.lexer.handler_mut().error(Phase::Parser, message, span);
    }
}
