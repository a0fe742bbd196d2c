//! Integer and floating-point literal lexing.
//!
//! The integer path accumulates a 64-bit value while scanning digits valid
//! in the literal's base; if it overflows, or if a `.`/`e`/`E`/`p`/`P`
//! follows the integer part, the whole literal is re-lexed from just past
//! the base prefix as a float. Exponents (`eNNN` decimal, `pNNN` binary)
//! are applied with `f64::powi`, which already saturates to `±∞`/`0` on
//! extreme exponents, giving the overflow-saturation behaviour for free.

use thornc_util::Span;

use crate::token::{FloatValue, IntValue, Token, TokenKind};
use crate::unicode::{digit_value, is_identifier_continue};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_number(&mut self, start: usize) -> Token {
        let base = self.consume_base_prefix();
        let mantissa_start = self.cursor.checkpoint();

        let (mut value, mut overflowed) = (0u64, false);
        while digit_value(self.cursor.peek()) < base as u8 {
            let digit = digit_value(self.cursor.bump()) as u64;
            match value.checked_mul(base as u64).and_then(|v| v.checked_add(digit)) {
                Some(v) => value = v,
                None => overflowed = true,
            }
        }

        let next = self.cursor.peek();
        let wants_float = next == '.' as u32
            || next == 'e' as u32
            || next == 'E' as u32
            || next == 'p' as u32
            || next == 'P' as u32;

        if overflowed || wants_float {
            self.cursor.rewind(mantissa_start);
            return self.lex_float(start, base);
        }

        let suffix = self.consume_suffix();
        let span = Span::new(start, self.cursor.pos());
        match classify_int_suffix(&suffix, value) {
            Some(kind) => Token::new(TokenKind::Int(kind), span),
            None => {
                self.error(format!("unknown integer suffix '{suffix}'"), span);
                Token::new(TokenKind::Int(IntValue::Int(value as i32)), span)
            }
        }
    }

    /// Consumes an optional `0b`/`0o`/`0x` prefix, returning the base to
    /// lex digits in (10 if no prefix is present).
    fn consume_base_prefix(&mut self) -> u32 {
        if self.cursor.peek() != '0' as u32 {
            return 10;
        }
        let base = match self.cursor.peek_at(1) as u8 as char {
            'b' | 'B' => 2,
            'o' | 'O' => 8,
            'x' | 'X' => 16,
            _ => return 10,
        };
        self.cursor.bump();
        self.cursor.bump();
        base
    }

    fn lex_float(&mut self, start: usize, base: u32) -> Token {
        let mut mantissa = 0f64;
        while digit_value(self.cursor.peek()) < base as u8 {
            let digit = digit_value(self.cursor.bump()) as f64;
            mantissa = mantissa * base as f64 + digit;
        }

        if self.cursor.peek() == '.' as u32 {
            self.cursor.bump();
            let mut scale = 1f64 / base as f64;
            while digit_value(self.cursor.peek()) < base as u8 {
                let digit = digit_value(self.cursor.bump()) as f64;
                mantissa += digit * scale;
                scale /= base as f64;
            }
        }

        let marker = self.cursor.peek() as u8 as char;
        if marker == 'e' || marker == 'E' || marker == 'p' || marker == 'P' {
            self.cursor.bump();
            let exponent = self.consume_exponent(start);
            let radix = if marker == 'p' || marker == 'P' { 2f64 } else { 10f64 };
            mantissa *= radix.powi(exponent);
        }

        let suffix = self.consume_suffix();
        let span = Span::new(start, self.cursor.pos());
        match classify_float_suffix(&suffix, mantissa) {
            Some(kind) => Token::new(TokenKind::Float(kind), span),
            None => {
                self.error(format!("unknown floating-point suffix '{suffix}'"), span);
                Token::new(TokenKind::Float(FloatValue::Double(mantissa)), span)
            }
        }
    }

    /// Consumes a signed decimal exponent, returning it clamped to
    /// `i32`'s range. `f64::powi` already saturates extreme exponents to
    /// `±∞`/`0`, which is the behaviour §4.1 calls for.
    fn consume_exponent(&mut self, start: usize) -> i32 {
        let negative = if self.cursor.eat('-' as u32) {
            true
        } else {
            self.cursor.eat('+' as u32);
            false
        };

        let digits_start = self.cursor.pos();
        let mut magnitude: i64 = 0;
        while digit_value(self.cursor.peek()) < 10 {
            let digit = digit_value(self.cursor.bump()) as i64;
            magnitude = magnitude.saturating_mul(10).saturating_add(digit);
        }

        if self.cursor.pos() == digits_start {
            self.error("no digits in exponent", Span::new(start, self.cursor.pos()));
        }

        let magnitude = if negative { -magnitude } else { magnitude };
        magnitude.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Consumes the maximal run of ASCII letters following a numeric
    /// literal's digits, lower-cased for table lookup.
    fn consume_suffix(&mut self) -> String {
        let start = self.cursor.pos();
        while is_identifier_continue(self.cursor.peek()) {
            self.cursor.bump();
        }
        self.text(start, self.cursor.pos()).to_ascii_lowercase()
    }
}

/// §4.1's suffix table, integer column. `None` means the suffix is not in
/// the table.
fn classify_int_suffix(suffix: &str, value: u64) -> Option<IntValue> {
    Some(match suffix {
        "" => IntValue::Int(value as i32),
        "b" | "ub" => IntValue::Byte(value as u8),
        "sb" => IntValue::SByte(value as i8),
        "s" | "ss" => IntValue::Short(value as i16),
        "sl" | "l" => IntValue::Long(value as i64),
        "us" => IntValue::UShort(value as u16),
        "ul" => IntValue::ULong(value),
        "u" => IntValue::UInt(value as u32),
        _ => return None,
    })
}

/// §4.1's suffix table, float column. `None` means the suffix is not in
/// the table.
fn classify_float_suffix(suffix: &str, value: f64) -> Option<FloatValue> {
    Some(match suffix {
        "" | "d" => FloatValue::Double(value),
        "f" => FloatValue::Float(value as f32),
        "if" => FloatValue::IFloat(value as f32),
        "id" => FloatValue::IDouble(value),
        "i" => FloatValue::IDouble(value),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use thornc_util::diagnostic::Handler;

    fn lex(src: &str) -> TokenKind {
        let buf: Vec<u32> = src.chars().map(|c| c as u32).chain(std::iter::once(0)).collect();
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(&buf, &mut handler);
        lexer.next_token().kind
    }

    #[test]
    fn plain_decimal_is_int32() {
        assert_eq!(lex("42"), TokenKind::Int(IntValue::Int(42)));
    }

    #[test]
    fn base_prefixes() {
        assert_eq!(lex("0xFF"), TokenKind::Int(IntValue::Int(255)));
        assert_eq!(lex("0b1010"), TokenKind::Int(IntValue::Int(10)));
        assert_eq!(lex("0o17"), TokenKind::Int(IntValue::Int(15)));
    }

    #[test]
    fn e4_ulong_suffix() {
        assert_eq!(lex("0xFFuL"), TokenKind::Int(IntValue::ULong(255)));
    }

    #[test]
    fn exhaustive_integer_suffixes() {
        assert_eq!(lex("42b"), TokenKind::Int(IntValue::Byte(42)));
        assert_eq!(lex("42sb"), TokenKind::Int(IntValue::SByte(42)));
        assert_eq!(lex("42s"), TokenKind::Int(IntValue::Short(42)));
        assert_eq!(lex("42ss"), TokenKind::Int(IntValue::Short(42)));
        assert_eq!(lex("42sl"), TokenKind::Int(IntValue::Long(42)));
        assert_eq!(lex("42l"), TokenKind::Int(IntValue::Long(42)));
        assert_eq!(lex("42ub"), TokenKind::Int(IntValue::Byte(42)));
        assert_eq!(lex("42us"), TokenKind::Int(IntValue::UShort(42)));
        assert_eq!(lex("42ul"), TokenKind::Int(IntValue::ULong(42)));
        assert_eq!(lex("42u"), TokenKind::Int(IntValue::UInt(42)));
    }

    #[test]
    fn suffixes_are_case_insensitive() {
        assert_eq!(lex("42UL"), TokenKind::Int(IntValue::ULong(42)));
        assert_eq!(lex("42SB"), TokenKind::Int(IntValue::SByte(42)));
    }

    #[test]
    fn e5_float_with_suffix() {
        match lex("1.5e2f") {
            TokenKind::Float(FloatValue::Float(f)) => assert_eq!(f, 150.0),
            other => panic!("expected Float(150.0), got {other:?}"),
        }
    }

    #[test]
    fn plain_float_is_double() {
        match lex("3.14") {
            TokenKind::Float(FloatValue::Double(f)) => assert!((f - 3.14).abs() < 1e-9),
            other => panic!("expected Double, got {other:?}"),
        }
    }

    #[test]
    fn p_exponent_is_base_2() {
        match lex("1p3") {
            TokenKind::Float(FloatValue::Double(f)) => assert_eq!(f, 8.0),
            other => panic!("expected Double(8.0), got {other:?}"),
        }
    }

    #[test]
    fn imaginary_suffixes() {
        assert!(matches!(lex("1if"), TokenKind::Float(FloatValue::IFloat(_))));
        assert!(matches!(lex("1id"), TokenKind::Float(FloatValue::IDouble(_))));
        assert!(matches!(lex("1i"), TokenKind::Float(FloatValue::IDouble(_))));
        assert!(matches!(lex("1.0i"), TokenKind::Float(FloatValue::IDouble(_))));
    }

    #[test]
    fn overflowing_integer_reparses_as_float() {
        match lex("99999999999999999999") {
            TokenKind::Float(FloatValue::Double(_)) => {}
            other => panic!("expected overflow to reparse as float, got {other:?}"),
        }
    }

    #[test]
    fn negative_exponent_underflows_to_zero() {
        match lex("1e-99999") {
            TokenKind::Float(FloatValue::Double(f)) => assert_eq!(f, 0.0),
            other => panic!("expected Double(0.0), got {other:?}"),
        }
    }

    #[test]
    fn positive_exponent_overflows_to_infinity() {
        match lex("1e99999") {
            TokenKind::Float(FloatValue::Double(f)) => assert!(f.is_infinite() && f > 0.0),
            other => panic!("expected +inf, got {other:?}"),
        }
    }

    #[test]
    fn unknown_suffix_reports_diagnostic() {
        let buf: Vec<u32> = "42qq".chars().map(|c| c as u32).chain(std::iter::once(0)).collect();
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(&buf, &mut handler);
        lexer.next_token();
        assert!(handler.has_errors());
    }
}
