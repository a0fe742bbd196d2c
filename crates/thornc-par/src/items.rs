//! Top-level item productions: imports, includes, functions, classes,
//! structs, enums, and aliases.

use thornc_lex::{Delimiter, Keyword};

use crate::ast::{Alias, ClassLike, Enum, Function, Import, Include, ScopeExpr, Stmt, TemplatizeExpr};
use crate::Parser;

impl<'p> Parser<'p> {
    /// `import [.] name(.name)* [as alias]`.
    pub(crate) fn parse_import(&mut self) -> Stmt {
        let start = self.current.span;
        self.advance(false);
        let relative = self.eat_delim(Delimiter::Dot, false).is_some();
        let (first, mut last_span) = self.expect_identifier(false);
        let mut path = vec![first];
        while self.eat_delim(Delimiter::Dot, false).is_some() {
            let (name, span) = self.expect_identifier(false);
            path.push(name);
            last_span = span;
        }
        let alias = if self.eat_keyword(Keyword::As, false).is_some() {
            let (name, span) = self.expect_identifier(false);
            last_span = span;
            Some(name)
        } else {
            None
        };
        let span = start.merge(last_span);
        self.terminate(Stmt::Import(Import {
            relative,
            path,
            alias,
            span,
        }))
    }

    /// `include [.] name(.name)*`.
    pub(crate) fn parse_include(&mut self) -> Stmt {
        let start = self.current.span;
        self.advance(false);
        let relative = self.eat_delim(Delimiter::Dot, false).is_some();
        let (first, mut last_span) = self.expect_identifier(false);
        let mut path = vec![first];
        while self.eat_delim(Delimiter::Dot, false).is_some() {
            let (name, span) = self.expect_identifier(false);
            path.push(name);
            last_span = span;
        }
        let span = start.merge(last_span);
        self.terminate(Stmt::Include(Include { relative, path, span }))
    }

    /// `[incase] [static] def head(params, …) [-> [ref] type] { body }`.
    /// `head` allows a scoped or templated method name (`Foo.bar`,
    /// `Foo!T.bar`), so it is parsed through the same scope/templatize
    /// postfix chain a general expression would use, but stops short of
    /// call/index postfixes so the parameter list that follows is not
    /// mistaken for a call.
    pub(crate) fn parse_function(&mut self, is_incase: bool, is_static: bool) -> Stmt {
        let start = self.current.span;
        self.advance(false);
        let head = Box::new(self.parse_function_head(false));
        let (params, variadic) = self.parse_param_list(false);
        let (is_return_ref, return_type) = self.parse_optional_return_type(false);
        let body = self.parse_block(false);
        let end = body.last().map(|s| s.span()).unwrap_or(start);
        Stmt::Function(Function {
            is_incase,
            is_static,
            head,
            params,
            variadic,
            is_return_ref,
            return_type,
            body,
            span: start.merge(end),
        })
    }

    fn parse_function_head(&mut self, nl: bool) -> crate::ast::Expr {
        use crate::ast::Expr;

        let (name, span) = self.expect_identifier(nl);
        let mut expr = Expr::Identifier(name, span);
        loop {
            match &self.current.kind {
                thornc_lex::TokenKind::Delimiter(Delimiter::Dot) => {
                    let start = expr.span();
                    let mut names = Vec::new();
                    let mut last_span = start;
                    while self.eat_delim(Delimiter::Dot, nl).is_some() {
                        let (name, span) = self.expect_identifier(nl);
                        names.push(name);
                        last_span = span;
                    }
                    expr = Expr::Scope(ScopeExpr {
                        value: Box::new(expr),
                        names,
                        span: start.merge(last_span),
                    });
                }
                thornc_lex::TokenKind::Delimiter(Delimiter::Bang) => {
                    let start = expr.span();
                    self.advance(true);
                    let (type_args, end) = if self.is_delim(Delimiter::ParenOpen) {
                        self.advance(true);
                        let mut args = Vec::new();
                        if !self.is_delim(Delimiter::ParenClose) {
                            loop {
                                args.push(self.parse_type_expr(true));
                                if self.eat_delim(Delimiter::Comma, true).is_none() {
                                    break;
                                }
                                if self.is_delim(Delimiter::ParenClose) {
                                    break;
                                }
                            }
                        }
                        let close = self.expect_delim(Delimiter::ParenClose, nl);
                        (args, close)
                    } else {
                        let (name, span) = self.expect_identifier(nl);
                        (vec![Expr::Identifier(name, span)], span)
                    };
                    expr = Expr::Templatize(TemplatizeExpr {
                        value: Box::new(expr),
                        type_args,
                        span: start.merge(end),
                    });
                }
                _ => break,
            }
        }
        expr
    }

    /// `[incase] (class|struct) Name [!T | !(T, …)] [(BaseType)] { body }`.
    pub(crate) fn parse_class_or_struct(&mut self, is_incase: bool, is_struct: bool) -> Stmt {
        let start = self.current.span;
        self.advance(false);
        let (name, _) = self.expect_identifier(false);
        let template_args = if self.eat_delim(Delimiter::Bang, false).is_some() {
            if self.eat_delim(Delimiter::ParenOpen, true).is_some() {
                let mut args = Vec::new();
                if !self.is_delim(Delimiter::ParenClose) {
                    loop {
                        let (arg, _) = self.expect_identifier(true);
                        args.push(arg);
                        if self.eat_delim(Delimiter::Comma, true).is_none() {
                            break;
                        }
                        if self.is_delim(Delimiter::ParenClose) {
                            break;
                        }
                    }
                }
                self.expect_delim(Delimiter::ParenClose, false);
                args
            } else {
                let (arg, _) = self.expect_identifier(false);
                vec![arg]
            }
        } else {
            Vec::new()
        };
        let base = if self.eat_delim(Delimiter::ParenOpen, true).is_some() {
            let ty = self.parse_type_expr(true);
            self.expect_delim(Delimiter::ParenClose, false);
            Some(Box::new(ty))
        } else {
            None
        };
        let body = self.parse_block(false);
        let end = body.last().map(|s| s.span()).unwrap_or(start);
        let node = ClassLike {
            is_incase,
            name,
            template_args,
            base,
            body,
            span: start.merge(end),
        };
        if is_struct {
            Stmt::Struct(node)
        } else {
            Stmt::Class(node)
        }
    }

    /// `enum Name { member (, member)* }`.
    pub(crate) fn parse_enum(&mut self, is_incase: bool) -> Stmt {
        let start = self.current.span;
        self.advance(false);
        let (name, _) = self.expect_identifier(false);
        self.expect_delim(Delimiter::CurlyOpen, true);
        let mut members = Vec::new();
        if !self.is_delim(Delimiter::CurlyClose) {
            loop {
                let (member, _) = self.expect_identifier(true);
                members.push(member);
                if self.eat_delim(Delimiter::Comma, true).is_none() {
                    break;
                }
                if self.is_delim(Delimiter::CurlyClose) {
                    break;
                }
            }
        }
        let close = self.expect_delim(Delimiter::CurlyClose, false);
        Stmt::Enum(Enum {
            is_incase,
            name,
            members,
            span: start.merge(close),
        })
    }

    /// `[incase] alias Name expression`, terminated like an expression
    /// statement.
    pub(crate) fn parse_alias(&mut self, is_incase: bool) -> Stmt {
        let start = self.current.span;
        self.advance(false);
        let (name, _) = self.expect_identifier(false);
        let value = Box::new(self.parse_expr(false, false));
        let span = start.merge(value.span());
        self.terminate(Stmt::Alias(Alias { is_incase, name, value, span }))
    }
}
