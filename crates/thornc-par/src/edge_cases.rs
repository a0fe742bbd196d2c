//! End-to-end parser scenarios, one per testable property.

#[cfg(test)]
mod tests {
    use thornc_lex::{IntValue, Operator};
    use thornc_util::Symbol;

    use crate::ast::{Expr, Literal, Stmt};
    use crate::parse;

    fn buf(s: &str) -> Vec<u32> {
        s.chars().map(|c| c as u32).chain(std::iter::once(0)).collect()
    }

    fn parse_one(src: &str) -> (Stmt, usize) {
        let (mut stmts, diags) = parse(&buf(src));
        assert_eq!(stmts.len(), 1, "expected exactly one statement from {src:?}, got {stmts:?}");
        (stmts.remove(0), diags.len())
    }

    /// E1: `import a.b.c as d\n` yields one IMPORT node, 0 diagnostics.
    #[test]
    fn e1_import_with_alias() {
        let (stmt, diag_count) = parse_one("import a.b.c as d\n");
        assert_eq!(diag_count, 0);
        match stmt {
            Stmt::Import(node) => {
                assert!(!node.relative);
                assert_eq!(node.path, vec![Symbol::intern("a"), Symbol::intern("b"), Symbol::intern("c")]);
                assert_eq!(node.alias, Some(Symbol::intern("d")));
            }
            other => panic!("expected Import, got {other:?}"),
        }
    }

    /// E2: one argument `x: int`, return type `int`, body `return x + 1`.
    #[test]
    fn e2_function_definition() {
        let (stmt, diag_count) = parse_one("def f(x: int) -> int { return x + 1 }");
        assert_eq!(diag_count, 0);
        match stmt {
            Stmt::Function(func) => {
                assert_eq!(func.params.len(), 1);
                match &func.params[0] {
                    Expr::VariableDeclaration(decl) => {
                        assert_eq!(decl.name, Symbol::intern("x"));
                        assert!(matches!(decl.ty.as_deref(), Some(Expr::Identifier(sym, _)) if *sym == Symbol::intern("int")));
                    }
                    other => panic!("expected a variable declaration parameter, got {other:?}"),
                }
                assert!(matches!(func.return_type.as_deref(), Some(Expr::Identifier(sym, _)) if *sym == Symbol::intern("int")));
                assert_eq!(func.body.len(), 1);
                match &func.body[0] {
                    Stmt::Return(ret) => match ret.value.as_deref() {
                        Some(Expr::Binary(bin)) => {
                            assert_eq!(bin.op, Operator::Add);
                            assert!(matches!(bin.left.as_ref(), Expr::Identifier(sym, _) if *sym == Symbol::intern("x")));
                            assert!(matches!(bin.right.as_ref(), Expr::Literal(Literal::Int(IntValue::Int(1)), _)));
                        }
                        other => panic!("expected a binary return value, got {other:?}"),
                    },
                    other => panic!("expected a return statement, got {other:?}"),
                }
            }
            other => panic!("expected Function, got {other:?}"),
        }
    }

    /// E3: `class Box!T(Base) { x: T }`.
    #[test]
    fn e3_templated_class_with_base() {
        let (stmt, diag_count) = parse_one("class Box!T(Base) { x: T }");
        assert_eq!(diag_count, 0);
        match stmt {
            Stmt::Class(class) => {
                assert_eq!(class.name, Symbol::intern("Box"));
                assert_eq!(class.template_args, vec![Symbol::intern("T")]);
                assert!(matches!(class.base.as_deref(), Some(Expr::Identifier(sym, _)) if *sym == Symbol::intern("Base")));
                assert_eq!(class.body.len(), 1);
                match &class.body[0] {
                    Stmt::Expression(Expr::VariableDeclaration(decl)) => {
                        assert_eq!(decl.name, Symbol::intern("x"));
                        assert!(matches!(decl.ty.as_deref(), Some(Expr::Identifier(sym, _)) if *sym == Symbol::intern("T")));
                    }
                    other => panic!("expected a variable declaration body, got {other:?}"),
                }
            }
            other => panic!("expected Class, got {other:?}"),
        }
    }

    /// E6: `a < b <= c` is one COMPARISON node.
    #[test]
    fn e6_comparison_chain() {
        let (stmt, diag_count) = parse_one("a < b <= c");
        assert_eq!(diag_count, 0);
        match stmt {
            Stmt::Expression(Expr::Comparison(cmp)) => {
                assert_eq!(cmp.ops, vec![Operator::Lt, Operator::Le]);
                assert_eq!(cmp.operands.len(), 3);
            }
            other => panic!("expected a comparison expression statement, got {other:?}"),
        }
    }

    /// Invariant 6: `a + b * c` is `BINARY(+, a, BINARY(*, b, c))`.
    #[test]
    fn invariant_precedence_ladder() {
        let (stmt, _) = parse_one("a + b * c");
        match stmt {
            Stmt::Expression(Expr::Binary(outer)) => {
                assert_eq!(outer.op, Operator::Add);
                assert!(matches!(outer.left.as_ref(), Expr::Identifier(_, _)));
                match outer.right.as_ref() {
                    Expr::Binary(inner) => assert_eq!(inner.op, Operator::Mul),
                    other => panic!("expected a nested multiplication, got {other:?}"),
                }
            }
            other => panic!("expected a binary expression statement, got {other:?}"),
        }
    }

    /// Invariant 7: `a < b < c` chains into one node with two operators.
    #[test]
    fn invariant_comparison_chain_arity() {
        let (stmt, _) = parse_one("a < b < c");
        match stmt {
            Stmt::Expression(Expr::Comparison(cmp)) => {
                assert_eq!(cmp.ops.len(), 2);
                assert_eq!(cmp.operands.len(), 3);
            }
            other => panic!("expected a comparison expression statement, got {other:?}"),
        }
    }

    /// Invariant 8: `**` is right-associative.
    #[test]
    fn invariant_power_is_right_associative() {
        let (stmt, _) = parse_one("a ** b ** c");
        match stmt {
            Stmt::Expression(Expr::Binary(outer)) => {
                assert_eq!(outer.op, Operator::Pow);
                assert!(matches!(outer.left.as_ref(), Expr::Identifier(_, _)));
                match outer.right.as_ref() {
                    Expr::Binary(inner) => assert_eq!(inner.op, Operator::Pow),
                    other => panic!("expected a nested power on the right, got {other:?}"),
                }
            }
            other => panic!("expected a binary expression statement, got {other:?}"),
        }
    }

    /// Invariant 9: `(x)` collapses to `x`; `(x,)` and `(x, y)` become tuples.
    #[test]
    fn invariant_paren_collapse_vs_tuple() {
        let (stmt, _) = parse_one("(x)");
        assert!(matches!(stmt, Stmt::Expression(Expr::Identifier(_, _))));

        let (stmt, _) = parse_one("(x,)");
        match stmt {
            Stmt::Expression(Expr::Tuple(elems, _)) => assert_eq!(elems.len(), 1),
            other => panic!("expected a one-element tuple, got {other:?}"),
        }

        let (stmt, _) = parse_one("(x, y)");
        match stmt {
            Stmt::Expression(Expr::Tuple(elems, _)) => assert_eq!(elems.len(), 2),
            other => panic!("expected a two-element tuple, got {other:?}"),
        }
    }

    /// Invariant 10: the type filter rejects a string literal in a type
    /// position, with a diagnostic pointing into the source buffer.
    #[test]
    fn invariant_type_filter_rejects_string_literal() {
        let src = "x: \"not a type\"\n";
        let (stmts, diags) = parse(&buf(src));
        assert_eq!(stmts.len(), 1);
        assert!(!diags.is_empty());
        for d in &diags {
            assert!(d.span.begin < src.chars().count());
        }
        match &stmts[0] {
            Stmt::Expression(Expr::VariableDeclaration(decl)) => {
                assert!(matches!(decl.ty.as_deref(), Some(Expr::Invalid(_))));
            }
            other => panic!("expected a variable declaration, got {other:?}"),
        }
    }

    /// Invariant 11: `for a, b, c {}` is classical, `for x in xs {}` is a
    /// for-each, `for a, b {}` (wrong arity, no `in`) is an error.
    #[test]
    fn invariant_for_loop_disambiguation() {
        let (stmt, diag_count) = parse_one("for a, b, c { }");
        assert_eq!(diag_count, 0);
        assert!(matches!(stmt, Stmt::For(_)));

        let (stmt, diag_count) = parse_one("for x in xs { }");
        assert_eq!(diag_count, 0);
        assert!(matches!(stmt, Stmt::ForEach(_)));

        let (_, diags) = parse(&buf("for a, b { }"));
        assert!(!diags.is_empty());
    }

    /// Invariant 12: diagnostics are empty iff the input is well-formed;
    /// a malformed input produces at least one diagnostic with a pointer
    /// inside the source buffer.
    #[test]
    fn invariant_diagnostics_empty_iff_well_formed() {
        let (_, diags) = parse(&buf("def f(x: int) -> int { return x + 1 }\n"));
        assert!(diags.is_empty());

        let src = "def f(x: int -> int { return x }\n";
        let (_, diags) = parse(&buf(src));
        assert!(!diags.is_empty());
        for d in &diags {
            assert!(d.span.begin <= src.chars().count());
        }
    }
}
