//! Expression parsing: the 17-level precedence ladder plus the atom-level
//! productions (literals, aggregates, lambdas, function types, variable
//! declarations) that sit at its top.
//!
//! Every level takes `nl` (skip newlines while fetching tokens at this
//! level) and `tf` (type-filter mode: reject value-only productions)
//! explicitly, rather than reading them off `self` — that keeps a nested
//! call like a templatize argument list free to override `tf` locally
//! without saving and restoring anything.

use thornc_lex::{Delimiter, Keyword, Operator, TokenKind};

use crate::ast::{
    BinaryExpr, CallExpr, ComparisonExpr, Expr, FunctionTypeExpr, IndexExpr, LambdaExpr, Literal,
    ScopeExpr, TemplatizeExpr, TernaryExpr, UnaryExpr, VariableDeclarationExpr,
};
use crate::Parser;

impl<'p> Parser<'p> {
    pub(crate) fn parse_expr(&mut self, nl: bool, tf: bool) -> Expr {
        self.parse_level1(nl, tf)
    }

    /// Level 1: `= += -= *= /= %= ^= .= &= |= ~= <<= >>=`, right-associative.
    pub(crate) fn parse_level1(&mut self, nl: bool, tf: bool) -> Expr {
        let left = self.parse_level2(nl, tf);
        if tf {
            return left;
        }
        let op = match &self.current.kind {
            TokenKind::Operator(op) if op.is_assignment() => Some(*op),
            _ => None,
        };
        if let Some(op) = op {
            self.advance(nl);
            let right = self.parse_level1(nl, false);
            let span = left.span().merge(right.span());
            Expr::Binary(BinaryExpr {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            })
        } else {
            left
        }
    }

    /// Level 2: `value if condition else otherwise`.
    pub(crate) fn parse_level2(&mut self, nl: bool, tf: bool) -> Expr {
        let value = self.parse_level3(nl, tf);
        if tf || !self.is_keyword(Keyword::If) {
            return value;
        }
        self.advance(nl);
        let condition = self.parse_level3(nl, false);
        self.expect_keyword(Keyword::Else, nl);
        let otherwise = self.parse_level2(nl, false);
        let span = value.span().merge(otherwise.span());
        Expr::Ternary(TernaryExpr {
            value: Box::new(value),
            condition: Box::new(condition),
            otherwise: Box::new(otherwise),
            span,
        })
    }

    /// Level 3: `or`.
    pub(crate) fn parse_level3(&mut self, nl: bool, tf: bool) -> Expr {
        let mut left = self.parse_level4(nl, tf);
        while self.is_operator(Operator::LogicalOr) {
            self.advance(nl);
            let right = self.parse_level4(nl, tf);
            left = Self::binary(Operator::LogicalOr, left, right);
        }
        left
    }

    /// Level 4: `xor`.
    pub(crate) fn parse_level4(&mut self, nl: bool, tf: bool) -> Expr {
        let mut left = self.parse_level5(nl, tf);
        while self.is_operator(Operator::LogicalXor) {
            self.advance(nl);
            let right = self.parse_level5(nl, tf);
            left = Self::binary(Operator::LogicalXor, left, right);
        }
        left
    }

    /// Level 5: `and`.
    pub(crate) fn parse_level5(&mut self, nl: bool, tf: bool) -> Expr {
        let mut left = self.parse_level6(nl, tf);
        while self.is_operator(Operator::LogicalAnd) {
            self.advance(nl);
            let right = self.parse_level6(nl, tf);
            left = Self::binary(Operator::LogicalAnd, left, right);
        }
        left
    }

    /// Level 6: prefix `not`, entry point for a loose-precedence logical
    /// negation (`not a and b` negates the whole conjunction). Rejected
    /// under the type filter.
    pub(crate) fn parse_level6(&mut self, nl: bool, tf: bool) -> Expr {
        if !tf && self.is_operator(Operator::LogicalNot) {
            let start = self.current.span;
            self.advance(nl);
            let operand = self.parse_level6(nl, tf);
            let span = start.merge(operand.span());
            return Expr::Unary(UnaryExpr {
                op: Operator::LogicalNot,
                prefix: true,
                operand: Box::new(operand),
                span,
            });
        }
        self.parse_level7(nl, tf)
    }

    /// Level 7: the n-ary comparison chain `== != < > <= >=`.
    pub(crate) fn parse_level7(&mut self, nl: bool, tf: bool) -> Expr {
        let first = self.parse_level8(nl, tf);
        let mut ops = Vec::new();
        let mut operands = vec![first];
        loop {
            let op = match &self.current.kind {
                TokenKind::Operator(
                    op @ (Operator::Eq | Operator::Ne | Operator::Lt | Operator::Gt | Operator::Le | Operator::Ge),
                ) => *op,
                _ => break,
            };
            self.advance(nl);
            ops.push(op);
            operands.push(self.parse_level8(nl, tf));
        }
        if ops.is_empty() {
            operands.pop().expect("at least one operand was parsed")
        } else {
            let span = operands[0].span().merge(operands[operands.len() - 1].span());
            Expr::Comparison(ComparisonExpr { ops, operands, span })
        }
    }

    /// Level 8: `|`.
    pub(crate) fn parse_level8(&mut self, nl: bool, tf: bool) -> Expr {
        let mut left = self.parse_level9(nl, tf);
        while self.is_operator(Operator::BitOr) {
            self.advance(nl);
            let right = self.parse_level9(nl, tf);
            left = Self::binary(Operator::BitOr, left, right);
        }
        left
    }

    /// Level 9: `^` (bitwise xor; `~` also lexes to this operator, see
    /// `thornc_lex::token`).
    pub(crate) fn parse_level9(&mut self, nl: bool, tf: bool) -> Expr {
        let mut left = self.parse_level10(nl, tf);
        while self.is_operator(Operator::BitXor) {
            self.advance(nl);
            let right = self.parse_level10(nl, tf);
            left = Self::binary(Operator::BitXor, left, right);
        }
        left
    }

    /// Level 10: `&`.
    pub(crate) fn parse_level10(&mut self, nl: bool, tf: bool) -> Expr {
        let mut left = self.parse_level11(nl, tf);
        while self.is_operator(Operator::BitAnd) {
            self.advance(nl);
            let right = self.parse_level11(nl, tf);
            left = Self::binary(Operator::BitAnd, left, right);
        }
        left
    }

    /// Level 11: `<< >>`.
    pub(crate) fn parse_level11(&mut self, nl: bool, tf: bool) -> Expr {
        let mut left = self.parse_level12(nl, tf);
        loop {
            let op = match &self.current.kind {
                TokenKind::Operator(op @ (Operator::Shl | Operator::Shr)) => *op,
                _ => break,
            };
            self.advance(nl);
            let right = self.parse_level12(nl, tf);
            left = Self::binary(op, left, right);
        }
        left
    }

    /// Level 12: `+ -`.
    pub(crate) fn parse_level12(&mut self, nl: bool, tf: bool) -> Expr {
        let mut left = self.parse_level13(nl, tf);
        loop {
            let op = match &self.current.kind {
                TokenKind::Operator(op @ (Operator::Add | Operator::Sub)) => *op,
                _ => break,
            };
            self.advance(nl);
            let right = self.parse_level13(nl, tf);
            left = Self::binary(op, left, right);
        }
        left
    }

    /// Level 13: `* / %`.
    pub(crate) fn parse_level13(&mut self, nl: bool, tf: bool) -> Expr {
        let mut left = self.parse_level14(nl, tf);
        loop {
            let op = match &self.current.kind {
                TokenKind::Operator(op @ (Operator::Mul | Operator::Div | Operator::Mod)) => *op,
                _ => break,
            };
            self.advance(nl);
            let right = self.parse_level14(nl, tf);
            left = Self::binary(op, left, right);
        }
        left
    }

    /// Level 14: `**`, right-associative.
    pub(crate) fn parse_level14(&mut self, nl: bool, tf: bool) -> Expr {
        let left = self.parse_level15(nl, tf);
        if self.is_operator(Operator::Pow) {
            self.advance(nl);
            let right = self.parse_level14(nl, tf);
            Self::binary(Operator::Pow, left, right)
        } else {
            left
        }
    }

    /// Level 15: prefix `+ - ++ -- not ~`. `not` composes here too (so
    /// `-not x` parses) but is still rejected under the type filter.
    pub(crate) fn parse_level15(&mut self, nl: bool, tf: bool) -> Expr {
        let op = match &self.current.kind {
            TokenKind::Operator(
                op @ (Operator::Add | Operator::Sub | Operator::Inc | Operator::Dec | Operator::BitNot),
            ) => Some(*op),
            TokenKind::Operator(Operator::LogicalNot) if !tf => Some(Operator::LogicalNot),
            _ => None,
        };
        if let Some(op) = op {
            let start = self.current.span;
            self.advance(nl);
            let operand = self.parse_level15(nl, tf);
            let span = start.merge(operand.span());
            Expr::Unary(UnaryExpr {
                op,
                prefix: true,
                operand: Box::new(operand),
                span,
            })
        } else {
            self.parse_level16(nl, tf)
        }
    }

    /// Level 16: postfix call, index, post `++ --`, scope `.name(.name)*`,
    /// templatize `!ident` / `!(t, …)`.
    pub(crate) fn parse_level16(&mut self, nl: bool, tf: bool) -> Expr {
        let mut expr = self.parse_level17(nl, tf);
        loop {
            match &self.current.kind {
                TokenKind::Delimiter(Delimiter::ParenOpen) => {
                    let start = expr.span();
                    self.advance(true);
                    let mut args = Vec::new();
                    if !self.is_delim(Delimiter::ParenClose) {
                        loop {
                            args.push(self.parse_expr(true, false));
                            if self.eat_delim(Delimiter::Comma, true).is_none() {
                                break;
                            }
                            if self.is_delim(Delimiter::ParenClose) {
                                break;
                            }
                        }
                    }
                    let close = self.expect_delim(Delimiter::ParenClose, nl);
                    expr = Expr::Call(CallExpr {
                        callee: Box::new(expr),
                        args,
                        span: start.merge(close),
                    });
                }
                TokenKind::Delimiter(Delimiter::SquareOpen) => {
                    let start = expr.span();
                    self.advance(true);
                    let mut args = Vec::new();
                    if !self.is_delim(Delimiter::SquareClose) {
                        loop {
                            args.push(self.parse_expr(true, tf));
                            if self.eat_delim(Delimiter::Comma, true).is_none() {
                                break;
                            }
                            if self.is_delim(Delimiter::SquareClose) {
                                break;
                            }
                        }
                    }
                    let close = self.expect_delim(Delimiter::SquareClose, nl);
                    expr = Expr::Index(IndexExpr {
                        indexee: Box::new(expr),
                        args,
                        span: start.merge(close),
                    });
                }
                TokenKind::Delimiter(Delimiter::Dot) => {
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
                TokenKind::Delimiter(Delimiter::Bang) => {
                    let start = expr.span();
                    self.advance(true);
                    let (type_args, end) = self.parse_templatize_args(nl);
                    expr = Expr::Templatize(TemplatizeExpr {
                        value: Box::new(expr),
                        type_args,
                        span: start.merge(end),
                    });
                }
                TokenKind::Operator(op @ (Operator::Inc | Operator::Dec)) => {
                    let op = *op;
                    let op_span = self.current.span;
                    self.advance(nl);
                    let span = expr.span().merge(op_span);
                    expr = Expr::Unary(UnaryExpr {
                        op,
                        prefix: false,
                        operand: Box::new(expr),
                        span,
                    });
                }
                _ => break,
            }
        }
        expr
    }

    /// The `(t, …)` or bare `ident` tail of a `!`-templatize postfix,
    /// called with `!` already consumed. Template arguments always pass
    /// through the type filter regardless of the ambient mode, independent
    /// of `tf`.
    fn parse_templatize_args(&mut self, nl: bool) -> (Vec<Expr>, thornc_util::Span) {
        if self.is_delim(Delimiter::ParenOpen) {
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
        }
    }

    /// Level 17: atoms — identifiers, literals, parenthesized/tuple
    /// groups, array and dict literals, lambdas, function types, and
    /// variable declarations.
    pub(crate) fn parse_level17(&mut self, nl: bool, tf: bool) -> Expr {
        if !tf {
            let mut is_static = false;
            let mut is_wild = false;
            let mut is_ref = false;
            loop {
                if self.eat_keyword(Keyword::Static, nl).is_some() {
                    is_static = true;
                    continue;
                }
                if self.eat_keyword(Keyword::Wild, nl).is_some() {
                    is_wild = true;
                    continue;
                }
                if self.eat_keyword(Keyword::Ref, nl).is_some() {
                    is_ref = true;
                    continue;
                }
                break;
            }
            if is_static || is_wild || is_ref {
                let (name, name_span) = self.expect_identifier(nl);
                return self.parse_var_decl_tail(name, name_span, is_static, is_wild, is_ref, nl);
            }
        }

        if let TokenKind::Identifier(sym) = &self.current.kind {
            let sym = *sym;
            let span = self.current.span;
            self.advance(nl);
            if !tf && self.is_delim(Delimiter::Colon) {
                return self.parse_var_decl_tail(sym, span, false, false, false, nl);
            }
            return Expr::Identifier(sym, span);
        }

        match &self.current.kind {
            TokenKind::Char(cp) => {
                let cp = *cp;
                let span = self.current.span;
                self.advance(nl);
                self.literal_or_invalid(tf, Literal::Char(cp), span)
            }
            TokenKind::Str(s) => {
                let s = s.clone();
                let span = self.current.span;
                self.advance(nl);
                self.literal_or_invalid(tf, Literal::Str(s), span)
            }
            TokenKind::Buffer(b) => {
                let b = b.clone();
                let span = self.current.span;
                self.advance(nl);
                self.literal_or_invalid(tf, Literal::Buffer(b), span)
            }
            TokenKind::Int(v) => {
                let v = *v;
                let span = self.current.span;
                self.advance(nl);
                Expr::Literal(Literal::Int(v), span)
            }
            TokenKind::Float(v) => {
                let v = *v;
                let span = self.current.span;
                self.advance(nl);
                self.literal_or_invalid(tf, Literal::Float(v), span)
            }
            TokenKind::Delimiter(Delimiter::ParenOpen) => self.parse_paren_or_tuple(nl, tf),
            TokenKind::Delimiter(Delimiter::SquareOpen) => self.parse_array_literal(nl, tf),
            TokenKind::Delimiter(Delimiter::CurlyOpen) => self.parse_dict_literal(nl, tf),
            TokenKind::Keyword(Keyword::Def) => self.parse_def_atom(nl, tf),
            _ => {
                let span = self.current.span;
                self.error(format!("expected an expression, found {:?}", self.current.kind), span);
                self.advance(nl);
                Expr::Invalid(span)
            }
        }
    }

    fn literal_or_invalid(&mut self, tf: bool, literal: Literal, span: thornc_util::Span) -> Expr {
        if tf {
            self.error("this literal form is not allowed in a type position", span);
            Expr::Invalid(span)
        } else {
            Expr::Literal(literal, span)
        }
    }

    fn parse_paren_or_tuple(&mut self, nl: bool, tf: bool) -> Expr {
        let start = self.current.span;
        self.advance(true);
        if let Some(close) = self.eat_delim(Delimiter::ParenClose, nl) {
            return Expr::Tuple(Vec::new(), start.merge(close));
        }
        let mut exprs = vec![self.parse_expr(true, tf)];
        let mut trailing_comma = false;
        while self.eat_delim(Delimiter::Comma, true).is_some() {
            if self.is_delim(Delimiter::ParenClose) {
                trailing_comma = true;
                break;
            }
            exprs.push(self.parse_expr(true, tf));
        }
        let close = self.expect_delim(Delimiter::ParenClose, nl);
        if exprs.len() == 1 && !trailing_comma {
            exprs.pop().expect("exactly one expression was parsed")
        } else {
            Expr::Tuple(exprs, start.merge(close))
        }
    }

    fn parse_array_literal(&mut self, nl: bool, tf: bool) -> Expr {
        let start = self.current.span;
        self.advance(true);
        let mut elems = Vec::new();
        if !self.is_delim(Delimiter::SquareClose) {
            loop {
                elems.push(self.parse_expr(true, false));
                if self.eat_delim(Delimiter::Comma, true).is_none() {
                    break;
                }
                if self.is_delim(Delimiter::SquareClose) {
                    break;
                }
            }
        }
        let close = self.expect_delim(Delimiter::SquareClose, nl);
        let span = start.merge(close);
        if tf {
            self.error("array literals are not allowed in a type position", span);
            Expr::Invalid(span)
        } else {
            Expr::Array(elems, span)
        }
    }

    fn parse_dict_literal(&mut self, nl: bool, tf: bool) -> Expr {
        let start = self.current.span;
        self.advance(true);
        let mut keys = Vec::new();
        let mut values = Vec::new();
        if !self.is_delim(Delimiter::CurlyClose) {
            loop {
                keys.push(self.parse_expr(true, false));
                self.expect_delim(Delimiter::Colon, true);
                values.push(self.parse_expr(true, false));
                if self.eat_delim(Delimiter::Comma, true).is_none() {
                    break;
                }
                if self.is_delim(Delimiter::CurlyClose) {
                    break;
                }
            }
        }
        let close = self.expect_delim(Delimiter::CurlyClose, nl);
        let span = start.merge(close);
        if tf {
            self.error("dict literals are not allowed in a type position", span);
            Expr::Invalid(span)
        } else {
            Expr::Dict(keys, values, span)
        }
    }

    /// `def` has already been matched; decide lambda vs. function type by
    /// whether `!` comes next.
    fn parse_def_atom(&mut self, nl: bool, tf: bool) -> Expr {
        let start = self.current.span;
        self.advance(nl);
        if self.is_delim(Delimiter::Bang) {
            self.parse_function_type(start, nl)
        } else {
            let lambda = self.parse_lambda_tail(start, nl);
            if tf {
                let span = lambda.span();
                self.error("a lambda is not allowed in a type position", span);
                Expr::Invalid(span)
            } else {
                lambda
            }
        }
    }

    fn parse_function_type(&mut self, start: thornc_util::Span, nl: bool) -> Expr {
        self.advance(true); // consume '!'
        self.expect_delim(Delimiter::ParenOpen, true);
        let mut arg_ref_flags = Vec::new();
        let mut arg_types = Vec::new();
        if !self.is_delim(Delimiter::ParenClose) {
            loop {
                let is_ref = self.eat_keyword(Keyword::Ref, true).is_some();
                arg_ref_flags.push(is_ref);
                arg_types.push(self.parse_type_expr(true));
                if self.eat_delim(Delimiter::Comma, true).is_none() {
                    break;
                }
                if self.is_delim(Delimiter::ParenClose) {
                    break;
                }
            }
        }
        self.expect_delim(Delimiter::ParenClose, nl);
        let (is_return_ref, return_type) = self.parse_optional_return_type(nl);
        let end = return_type.as_ref().map(|t| t.span()).unwrap_or(start);
        Expr::FunctionType(FunctionTypeExpr {
            arg_ref_flags,
            arg_types,
            is_return_ref,
            return_type,
            span: start.merge(end),
        })
    }

    fn parse_lambda_tail(&mut self, start: thornc_util::Span, nl: bool) -> Expr {
        let (params, variadic) = self.parse_param_list(nl);
        let (is_return_ref, return_type) = self.parse_optional_return_type(nl);
        let body = self.parse_block(nl);
        let end = body.last().map(|s| s.span()).unwrap_or(start);
        Expr::Lambda(LambdaExpr {
            params,
            variadic,
            is_return_ref,
            return_type,
            body,
            span: start.merge(end),
        })
    }

    /// Shared by function items and lambdas: `(params [, …])`.
    pub(crate) fn parse_param_list(&mut self, nl: bool) -> (Vec<Expr>, bool) {
        self.expect_delim(Delimiter::ParenOpen, true);
        let mut params = Vec::new();
        let mut variadic = false;
        if !self.is_delim(Delimiter::ParenClose) {
            loop {
                if self.eat_delim(Delimiter::Ellipsis, true).is_some() {
                    variadic = true;
                    break;
                }
                params.push(self.parse_expr(true, false));
                if self.eat_delim(Delimiter::Comma, true).is_none() {
                    break;
                }
                if self.is_delim(Delimiter::ParenClose) {
                    break;
                }
            }
        }
        self.expect_delim(Delimiter::ParenClose, nl);
        (params, variadic)
    }

    /// Shared by function items, lambdas, and function types: `-> [ref]
    /// type`.
    pub(crate) fn parse_optional_return_type(&mut self, nl: bool) -> (bool, Option<Box<Expr>>) {
        if self.eat_delim(Delimiter::Arrow, nl).is_some() {
            let is_ref = self.eat_keyword(Keyword::Ref, nl).is_some();
            let ty = self.parse_type_expr(nl);
            (is_ref, Some(Box::new(ty)))
        } else {
            (false, None)
        }
    }

    pub(crate) fn parse_var_decl_tail(
        &mut self,
        name: thornc_util::Symbol,
        name_span: thornc_util::Span,
        is_static: bool,
        is_wild: bool,
        is_ref: bool,
        nl: bool,
    ) -> Expr {
        let colon_span = self.expect_delim(Delimiter::Colon, nl);
        let ty = if self.is_operator(Operator::Assign) {
            None
        } else {
            Some(Box::new(self.parse_type_expr(nl)))
        };
        let initializer = if self.eat_operator(Operator::Assign, nl).is_some() {
            Some(Box::new(self.parse_expr(nl, false)))
        } else {
            None
        };
        let mut span = name_span.merge(colon_span);
        if let Some(t) = &ty {
            span = span.merge(t.span());
        }
        if let Some(i) = &initializer {
            span = span.merge(i.span());
        }
        Expr::VariableDeclaration(VariableDeclarationExpr {
            is_static,
            is_wild,
            is_ref,
            name,
            ty,
            initializer,
            span,
        })
    }

    fn binary(op: Operator, left: Expr, right: Expr) -> Expr {
        let span = left.span().merge(right.span());
        Expr::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
        })
    }
}
