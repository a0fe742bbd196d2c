//! Statement dispatch, blocks, and the control-flow constructs that are
//! not expressions: if/elif/else, while, do-while, for, for-each, break,
//! continue, return, and plain expression statements.

use thornc_lex::{Delimiter, Keyword, TokenKind};

use crate::ast::{For, ForEach, IfBranch, Return, Stmt, While};
use crate::Parser;

impl<'p> Parser<'p> {
    /// `parse(source) -> statement[]`: the top-level loop.
    pub(crate) fn parse_program_impl(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        loop {
            self.skip_newlines();
            if self.is_eof() {
                break;
            }
            statements.push(self.parse_statement());
        }
        statements
    }

    pub(crate) fn parse_statement(&mut self) -> Stmt {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Import) => self.parse_import(),
            TokenKind::Keyword(Keyword::Include) => self.parse_include(),
            TokenKind::Keyword(Keyword::Def) => self.parse_function(false, false),
            TokenKind::Keyword(Keyword::Class) => self.parse_class_or_struct(false, false),
            TokenKind::Keyword(Keyword::Struct) => self.parse_class_or_struct(false, true),
            TokenKind::Keyword(Keyword::Enum) => self.parse_enum(false),
            TokenKind::Keyword(Keyword::Alias) => self.parse_alias(false),
            TokenKind::Keyword(Keyword::Incase) | TokenKind::Keyword(Keyword::Static) => {
                self.parse_specified_statement()
            }
            TokenKind::Keyword(Keyword::If) => self.parse_if(),
            TokenKind::Keyword(Keyword::For) => self.parse_for(),
            TokenKind::Keyword(Keyword::While) => self.parse_while(),
            TokenKind::Keyword(Keyword::Do) => self.parse_do_while(),
            TokenKind::Keyword(Keyword::Break) => self.parse_break(),
            TokenKind::Keyword(Keyword::Continue) => self.parse_continue(),
            TokenKind::Keyword(Keyword::Return) => self.parse_return(),
            TokenKind::Keyword(Keyword::Elif) | TokenKind::Keyword(Keyword::Else) => {
                let span = self.current.span;
                self.error(format!("stray {:?} with no preceding 'if'", self.current.kind), span);
                self.advance(false);
                Stmt::Invalid(span)
            }
            TokenKind::Keyword(Keyword::As) => {
                let span = self.current.span;
                self.error("'as' is only valid in an import statement", span);
                self.advance(false);
                Stmt::Invalid(span)
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// `incase`/`static` precede `def`, `class`, `struct`, `alias`,
    /// `wild`, `ref`, or a bare variable declaration; absorb however many
    /// of the two specifiers appear (in any order) and re-dispatch.
    fn parse_specified_statement(&mut self) -> Stmt {
        let mut is_incase = false;
        let mut is_static = false;
        loop {
            if self.eat_keyword(Keyword::Incase, false).is_some() {
                is_incase = true;
                continue;
            }
            if self.eat_keyword(Keyword::Static, false).is_some() {
                is_static = true;
                continue;
            }
            break;
        }
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Def) => self.parse_function(is_incase, is_static),
            TokenKind::Keyword(Keyword::Class) => self.parse_class_or_struct(is_incase, false),
            TokenKind::Keyword(Keyword::Struct) => self.parse_class_or_struct(is_incase, true),
            TokenKind::Keyword(Keyword::Alias) => self.parse_alias(is_incase),
            _ => {
                let mut is_wild = false;
                let mut is_ref = false;
                loop {
                    if self.eat_keyword(Keyword::Wild, false).is_some() {
                        is_wild = true;
                        continue;
                    }
                    if self.eat_keyword(Keyword::Ref, false).is_some() {
                        is_ref = true;
                        continue;
                    }
                    break;
                }
                let (name, name_span) = self.expect_identifier(false);
                let expr = self.parse_var_decl_tail(name, name_span, is_static, is_wild, is_ref, false);
                self.terminate(Stmt::Expression(expr))
            }
        }
    }

    /// A `{ … }` block: newline-insensitive only around the braces
    /// themselves, statement-mode (newline-sensitive) inside.
    pub(crate) fn parse_block(&mut self, nl: bool) -> Vec<Stmt> {
        self.expect_delim(Delimiter::CurlyOpen, true);
        let mut statements = Vec::new();
        loop {
            self.skip_newlines();
            if self.is_delim(Delimiter::CurlyClose) {
                break;
            }
            if self.is_eof() {
                let span = self.current.span;
                self.error("unexpected end of input inside a block", span);
                return statements;
            }
            statements.push(self.parse_statement());
        }
        self.expect_delim(Delimiter::CurlyClose, nl);
        statements
    }

    /// `if C { … } (elif C { … })* (else { … })?`.
    fn parse_if(&mut self) -> Stmt {
        let start = self.current.span;
        self.advance(false);
        let mut conditions = vec![self.parse_expr(false, false)];
        let mut bodies = vec![self.parse_block(false)];
        while self.eat_keyword(Keyword::Elif, false).is_some() {
            conditions.push(self.parse_expr(false, false));
            bodies.push(self.parse_block(false));
        }
        let else_body = if self.eat_keyword(Keyword::Else, false).is_some() {
            Some(self.parse_block(false))
        } else {
            None
        };
        let end = else_body
            .as_ref()
            .and_then(|b| b.last())
            .or_else(|| bodies.last().and_then(|b| b.last()))
            .map(|s| s.span())
            .unwrap_or(start);
        Stmt::IfBranch(IfBranch {
            conditions,
            bodies,
            else_body,
            span: start.merge(end),
        })
    }

    fn parse_while(&mut self) -> Stmt {
        let start = self.current.span;
        self.advance(false);
        let condition = Box::new(self.parse_expr(false, false));
        let body = self.parse_block(false);
        let end = body.last().map(|s| s.span()).unwrap_or(start);
        Stmt::While(While {
            condition,
            body,
            span: start.merge(end),
        })
    }

    /// `do { body } while C`, terminated like an expression statement
    /// since the trailing condition, not a brace, ends the construct.
    fn parse_do_while(&mut self) -> Stmt {
        let start = self.current.span;
        self.advance(false);
        let body = self.parse_block(false);
        self.expect_keyword(Keyword::While, false);
        let condition = Box::new(self.parse_expr(false, false));
        let span = start.merge(condition.span());
        self.terminate(Stmt::DoWhile(crate::ast::DoWhile { body, condition, span }))
    }

    /// Classical `for E1, E2, E3 { }` vs. for-each `for E1 [, …] in
    /// iteratee { }`, disambiguated after reading 1-3 comma-separated
    /// expressions and checking for a trailing `in`.
    fn parse_for(&mut self) -> Stmt {
        let start = self.current.span;
        self.advance(false);
        let mut exprs = vec![self.parse_expr(false, false)];
        while self.eat_delim(Delimiter::Comma, false).is_some() {
            exprs.push(self.parse_expr(false, false));
        }
        if self.eat_keyword(Keyword::In, false).is_some() {
            let iteratee = Box::new(self.parse_expr(false, false));
            let body = self.parse_block(false);
            let end = body.last().map(|s| s.span()).unwrap_or(start);
            return Stmt::ForEach(ForEach {
                iterators: exprs,
                iteratee,
                body,
                span: start.merge(end),
            });
        }
        if exprs.len() == 3 {
            let mut it = exprs.into_iter();
            let init = Box::new(it.next().expect("length checked above"));
            let condition = Box::new(it.next().expect("length checked above"));
            let step = Box::new(it.next().expect("length checked above"));
            let body = self.parse_block(false);
            let end = body.last().map(|s| s.span()).unwrap_or(start);
            return Stmt::For(For {
                init,
                condition,
                step,
                body,
                span: start.merge(end),
            });
        }
        let span = exprs.last().map(|e| e.span()).unwrap_or(start);
        self.error(
            format!(
                "a classical for-loop needs exactly three comma-separated expressions, or a for-each loop needs 'in'; found {} expression(s)",
                exprs.len()
            ),
            span,
        );
        let body = if self.is_delim(Delimiter::CurlyOpen) {
            self.parse_block(false)
        } else {
            Vec::new()
        };
        let end = body.last().map(|s| s.span()).unwrap_or(span);
        Stmt::Invalid(start.merge(end))
    }

    fn parse_break(&mut self) -> Stmt {
        let span = self.current.span;
        self.advance(false);
        self.terminate(Stmt::Break(span))
    }

    fn parse_continue(&mut self) -> Stmt {
        let span = self.current.span;
        self.advance(false);
        self.terminate(Stmt::Continue(span))
    }

    fn parse_return(&mut self) -> Stmt {
        let start = self.current.span;
        self.advance(false);
        let value = if self.is_statement_end() {
            None
        } else {
            Some(Box::new(self.parse_expr(false, false)))
        };
        let span = value.as_ref().map(|v| start.merge(v.span())).unwrap_or(start);
        self.terminate(Stmt::Return(Return { value, span }))
    }

    fn parse_expression_statement(&mut self) -> Stmt {
        let expr = self.parse_expr(false, false);
        self.terminate(Stmt::Expression(expr))
    }

    fn is_statement_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof)
            || self.is_delim(Delimiter::Semicolon)
            || self.is_delim(Delimiter::CurlyClose)
    }

    /// Every statement not terminated by a block requires a trailing
    /// newline, `;`, or (without consuming it) a `}`. A missing
    /// terminator is reported and one token is skipped to guarantee
    /// forward progress.
    pub(crate) fn terminate(&mut self, stmt: Stmt) -> Stmt {
        match &self.current.kind {
            TokenKind::Newline | TokenKind::Delimiter(Delimiter::Semicolon) => {
                self.advance(false);
            }
            TokenKind::Delimiter(Delimiter::CurlyClose) | TokenKind::Eof => {}
            _ => {
                let span = self.current.span;
                self.error(
                    format!("expected a statement terminator, found {:?}", self.current.kind),
                    span,
                );
                self.advance(false);
            }
        }
        stmt
    }
}
