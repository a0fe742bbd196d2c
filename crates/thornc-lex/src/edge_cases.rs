//! End-to-end lexer scenarios, one per testable property in the spec.

#[cfg(test)]
mod tests {
    use thornc_util::diagnostic::Handler;

    use crate::token::{Delimiter, FloatValue, IntValue, TokenKind};
    use crate::Lexer;

    fn lex_all(src: &str) -> (Vec<TokenKind>, Handler) {
        let buf: Vec<u32> = src.chars().map(|c| c as u32).chain(std::iter::once(0)).collect();
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(&buf, &mut handler);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            let eof = tok.is_eof();
            out.push(tok.kind);
            if eof {
                break;
            }
        }
        (out, handler)
    }

    /// E4: `0xFFuL` is a single `ULONG(255)` token.
    #[test]
    fn e4_hex_ulong_suffix() {
        let (kinds, handler) = lex_all("0xFFuL");
        assert_eq!(kinds, vec![TokenKind::Int(IntValue::ULong(255)), TokenKind::Eof]);
        assert!(!handler.has_errors());
    }

    /// E5: `1.5e2f` is a single `FLOAT(150.0)` token.
    #[test]
    fn e5_float_suffix() {
        let (kinds, handler) = lex_all("1.5e2f");
        match kinds.as_slice() {
            [TokenKind::Float(FloatValue::Float(f)), TokenKind::Eof] => {
                assert_eq!(*f, 150.0);
            }
            other => panic!("unexpected tokens: {other:?}"),
        }
        assert!(!handler.has_errors());
    }

    /// E7: a triple-quoted string with a raw embedded newline lexes as one
    /// `STRING` token preserving both lines, with zero diagnostics.
    #[test]
    fn e7_triple_quoted_raw_newline() {
        let (kinds, handler) = lex_all("\"\"\"line1\nline2\"\"\"");
        let expected: Vec<u32> = "line1\nline2".chars().map(|c| c as u32).collect();
        assert_eq!(kinds, vec![TokenKind::Str(expected), TokenKind::Eof]);
        assert!(!handler.has_errors());
    }

    /// `]` lexes as a distinct square-bracket-close delimiter, not the
    /// curly-bracket-close code.
    #[test]
    fn square_close_is_not_curly_close() {
        let (kinds, _) = lex_all("[a]{b}");
        assert!(matches!(kinds[0], TokenKind::Delimiter(Delimiter::SquareOpen)));
        assert!(matches!(kinds[2], TokenKind::Delimiter(Delimiter::SquareClose)));
        assert!(matches!(kinds[3], TokenKind::Delimiter(Delimiter::CurlyOpen)));
        assert!(matches!(kinds[5], TokenKind::Delimiter(Delimiter::CurlyClose)));
    }

    /// `++` and `--` lex to distinct operator tokens (`Inc`/`Dec`), not one
    /// shared "increment-or-decrement" code.
    #[test]
    fn post_increment_and_decrement_are_distinct() {
        use crate::token::Operator;
        let (kinds, _) = lex_all("a++ b--");
        assert!(kinds.contains(&TokenKind::Operator(Operator::Inc)));
        assert!(kinds.contains(&TokenKind::Operator(Operator::Dec)));
    }

    /// Invariant 1: every token's `begin` is non-decreasing across the
    /// stream, and lexing always terminates (this loop itself not hanging
    /// is the termination half of the property).
    #[test]
    fn spans_are_non_decreasing() {
        let src = "def f(x: int) -> int { return x + 1 }";
        let buf: Vec<u32> = src.chars().map(|c| c as u32).chain(std::iter::once(0)).collect();
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(&buf, &mut handler);
        let mut last = 0usize;
        loop {
            let tok = lexer.next_token();
            assert!(tok.span.begin >= last);
            last = tok.span.begin;
            if tok.is_eof() {
                break;
            }
        }
    }

    /// Invariant 4 (suffix table exhaustiveness spot check): every listed
    /// suffix on `42` produces the listed typed token.
    #[test]
    fn suffix_table_is_exhaustive_on_42() {
        let cases: &[(&str, TokenKind)] = &[
            ("42", TokenKind::Int(IntValue::Int(42))),
            ("42b", TokenKind::Int(IntValue::Byte(42))),
            ("42sb", TokenKind::Int(IntValue::SByte(42))),
            ("42s", TokenKind::Int(IntValue::Short(42))),
            ("42ss", TokenKind::Int(IntValue::Short(42))),
            ("42sl", TokenKind::Int(IntValue::Long(42))),
            ("42l", TokenKind::Int(IntValue::Long(42))),
            ("42ub", TokenKind::Int(IntValue::Byte(42))),
            ("42us", TokenKind::Int(IntValue::UShort(42))),
            ("42ul", TokenKind::Int(IntValue::ULong(42))),
            ("42u", TokenKind::Int(IntValue::UInt(42))),
        ];
        for (src, expected) in cases {
            let (kinds, handler) = lex_all(src);
            assert_eq!(&kinds[0], expected, "suffix case {src}");
            assert!(!handler.has_errors(), "suffix case {src} reported an error");
        }
    }

    /// Invariant 5: single-quoted strings reject raw newlines.
    #[test]
    fn single_quoted_string_rejects_newline() {
        let (_, handler) = lex_all("\"a\nb\"");
        assert!(handler.has_errors());
    }
}
