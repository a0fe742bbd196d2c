//! Character, string, and byte-buffer literal lexing, plus the shared
//! escape decoder.
//!
//! Triple-quoted strings (`"""…"""`) allow raw newlines and literal single
//! `"`; single-quoted strings reject raw newlines. Byte contexts (`b'…'`,
//! `b"…"`) reject `\u`/`\U` escapes and any code point above 255, since a
//! byte buffer's elements are single bytes.

use thornc_util::Span;

use crate::token::{IntValue, Token, TokenKind};
use crate::unicode::digit_value;
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_char_literal(&mut self, start: usize) -> Token {
        self.lex_char_literal_inner(start, false)
    }

    pub(crate) fn lex_string_literal(&mut self, start: usize) -> Token {
        self.lex_string_literal_inner(start, false)
    }

    pub(crate) fn lex_char_literal_inner(&mut self, start: usize, is_byte: bool) -> Token {
        self.cursor.bump(); // opening '

        if self.cursor.at_end() || self.cursor.peek() == '\n' as u32 || self.cursor.peek() == '\'' as u32 {
            let span = Span::new(start, self.cursor.pos());
            self.error("empty or unterminated character literal", span);
            return self.char_or_byte_token(0, is_byte, span);
        }

        let cp = if self.cursor.eat('\\' as u32) {
            self.decode_escape(is_byte, start).unwrap_or(0)
        } else {
            self.checked_byte(self.cursor.bump(), is_byte, start)
        };

        if !self.cursor.eat('\'' as u32) {
            self.error("unterminated character literal", Span::new(start, self.cursor.pos()));
        }

        let span = Span::new(start, self.cursor.pos());
        self.char_or_byte_token(cp, is_byte, span)
    }

    pub(crate) fn lex_string_literal_inner(&mut self, start: usize, is_byte: bool) -> Token {
        self.cursor.bump(); // opening "

        let triple = self.cursor.peek() == '"' as u32 && self.cursor.peek_at(1) == '"' as u32;
        if triple {
            self.cursor.bump();
            self.cursor.bump();
        }

        let mut content: Vec<u32> = Vec::new();
        loop {
            if self.cursor.at_end() {
                self.error("unterminated string literal", Span::new(start, self.cursor.pos()));
                break;
            }

            let cp = self.cursor.peek();

            if triple {
                if cp == '"' as u32 && self.cursor.peek_at(1) == '"' as u32 && self.cursor.peek_at(2) == '"' as u32 {
                    self.cursor.bump();
                    self.cursor.bump();
                    self.cursor.bump();
                    break;
                }
            } else if cp == '"' as u32 {
                self.cursor.bump();
                break;
            } else if cp == '\n' as u32 {
                self.error("unterminated string literal (raw newline)", Span::new(start, self.cursor.pos()));
                break;
            }

            if cp == '\\' as u32 {
                self.cursor.bump();
                if let Some(decoded) = self.decode_escape(is_byte, start) {
                    content.push(decoded);
                }
            } else {
                let decoded = self.checked_byte(self.cursor.bump(), is_byte, start);
                content.push(decoded);
            }
        }

        let span = Span::new(start, self.cursor.pos());
        if is_byte {
            let bytes = content.iter().map(|&cp| cp as u8).collect();
            Token::new(TokenKind::Buffer(bytes), span)
        } else {
            Token::new(TokenKind::Str(content), span)
        }
    }

    /// Decodes one escape, cursor positioned just past the backslash.
    /// Returns `None` on malformed input (already reported).
    fn decode_escape(&mut self, is_byte: bool, lit_start: usize) -> Option<u32> {
        if self.cursor.at_end() {
            self.error("unterminated escape sequence", Span::new(lit_start, self.cursor.pos()));
            return None;
        }

        let c = self.cursor.bump();
        match char::from_u32(c) {
            Some('0') => Some(0),
            Some('n') => Some('\n' as u32),
            Some('r') => Some('\r' as u32),
            Some('t') => Some('\t' as u32),
            Some('v') => Some(0x0b),
            Some('b') => Some(0x08),
            Some('a') => Some(0x07),
            Some('f') => Some(0x0c),
            Some('\\') => Some('\\' as u32),
            Some('\'') => Some('\'' as u32),
            Some('"') => Some('"' as u32),
            Some('x') => self.decode_hex_escape(2, lit_start),
            Some('u') => {
                if is_byte {
                    self.error("\\u escape is not allowed in a byte literal", Span::new(lit_start, self.cursor.pos()));
                    return None;
                }
                self.decode_hex_escape(4, lit_start)
            }
            Some('U') => {
                if is_byte {
                    self.error("\\U escape is not allowed in a byte literal", Span::new(lit_start, self.cursor.pos()));
                    return None;
                }
                self.decode_hex_escape(8, lit_start)
            }
            _ => {
                self.error(format!("unknown escape sequence '\\{}'", self.text(self.cursor.pos() - 1, self.cursor.pos())), Span::new(lit_start, self.cursor.pos()));
                None
            }
        }
    }

    fn decode_hex_escape(&mut self, digits: usize, lit_start: usize) -> Option<u32> {
        let mut value = 0u32;
        for _ in 0..digits {
            let d = digit_value(self.cursor.peek());
            if d >= 16 {
                self.error(
                    format!("expected {digits} hex digits in escape"),
                    Span::new(lit_start, self.cursor.pos()),
                );
                return None;
            }
            value = value * 16 + d as u32;
            self.cursor.bump();
        }
        Some(value)
    }

    fn checked_byte(&mut self, cp: u32, is_byte: bool, lit_start: usize) -> u32 {
        if is_byte && cp > 0xff {
            self.error("code point above 255 is not allowed in a byte literal", Span::new(lit_start, self.cursor.pos()));
            0
        } else {
            cp
        }
    }

    fn char_or_byte_token(&self, cp: u32, is_byte: bool, span: Span) -> Token {
        if is_byte {
            Token::new(TokenKind::Int(IntValue::Byte(cp as u8)), span)
        } else {
            Token::new(TokenKind::Char(cp), span)
        }
    }
}

#[cfg(test)]
mod tests {
    use thornc_util::diagnostic::Handler;

    use crate::token::{IntValue, TokenKind};
    use crate::Lexer;

    fn lex(src: &str) -> (TokenKind, bool) {
        let buf: Vec<u32> = src.chars().map(|c| c as u32).chain(std::iter::once(0)).collect();
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(&buf, &mut handler);
        let tok = lexer.next_token();
        (tok.kind, handler.has_errors())
    }

    #[test]
    fn simple_char() {
        let (kind, err) = lex("'a'");
        assert_eq!(kind, TokenKind::Char('a' as u32));
        assert!(!err);
    }

    #[test]
    fn char_escape() {
        let (kind, err) = lex("'\\n'");
        assert_eq!(kind, TokenKind::Char('\n' as u32));
        assert!(!err);
    }

    #[test]
    fn char_hex_escape() {
        let (kind, _) = lex("'\\x41'");
        assert_eq!(kind, TokenKind::Char('A' as u32));
    }

    #[test]
    fn char_unicode_escape() {
        let (kind, _) = lex("'\\u00e9'");
        assert_eq!(kind, TokenKind::Char('é' as u32));
    }

    #[test]
    fn simple_string() {
        let (kind, err) = lex("\"hello\"");
        let expected: Vec<u32> = "hello".chars().map(|c| c as u32).collect();
        assert_eq!(kind, TokenKind::Str(expected));
        assert!(!err);
    }

    #[test]
    fn string_rejects_raw_newline() {
        let (_, err) = lex("\"abc\ndef\"");
        assert!(err);
    }

    #[test]
    fn e7_triple_quoted_preserves_newlines() {
        let (kind, err) = lex("\"\"\"line1\nline2\"\"\"");
        let expected: Vec<u32> = "line1\nline2".chars().map(|c| c as u32).collect();
        assert_eq!(kind, TokenKind::Str(expected));
        assert!(!err);
    }

    #[test]
    fn triple_quoted_allows_embedded_single_quote() {
        let (kind, err) = lex("\"\"\"he said \"hi\" to me\"\"\"");
        let expected: Vec<u32> = "he said \"hi\" to me".chars().map(|c| c as u32).collect();
        assert_eq!(kind, TokenKind::Str(expected));
        assert!(!err);
    }

    #[test]
    fn byte_char_literal() {
        let (kind, err) = lex("b'A'");
        assert_eq!(kind, TokenKind::Int(IntValue::Byte(65)));
        assert!(!err);
    }

    #[test]
    fn byte_buffer_literal() {
        let (kind, err) = lex("b\"AB\"");
        assert_eq!(kind, TokenKind::Buffer(vec![65, 66]));
        assert!(!err);
    }

    #[test]
    fn byte_literal_rejects_unicode_escape() {
        let (_, err) = lex("b'\\u00e9'");
        assert!(err);
    }

    #[test]
    fn byte_literal_rejects_high_code_point() {
        let (_, err) = lex("b'日'");
        assert!(err);
    }

    #[test]
    fn unterminated_string_reports_and_returns_accumulated_content() {
        let (kind, err) = lex("\"abc");
        let expected: Vec<u32> = "abc".chars().map(|c| c as u32).collect();
        assert_eq!(kind, TokenKind::Str(expected));
        assert!(err);
    }
}
