//! Identifiers, keywords, word-operators, and the `b'...'`/`b"..."` byte
//! literal prefixes that share their first code point with an identifier.

use thornc_util::{Span, Symbol};

use crate::token::{Keyword, Operator, Token, TokenKind};
use crate::unicode::is_identifier_continue;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// `b` or `B` immediately followed by a quote: a byte-char or
    /// byte-buffer literal rather than an identifier starting with `b`.
    /// The classification order runs this check before general word
    /// lexing, so `bar` still lexes as a plain identifier.
    pub(crate) fn lex_byte_literal(&mut self, start: usize) -> Token {
        self.cursor.bump(); // the 'b'/'B' prefix
        if self.cursor.peek() == '\'' as u32 {
            self.lex_char_literal_inner(start, true)
        } else {
            self.lex_string_literal_inner(start, true)
        }
    }

    pub(crate) fn lex_word(&mut self, start: usize) -> Token {
        while is_identifier_continue(self.cursor.peek()) {
            self.cursor.bump();
        }
        let text = self.text(start, self.cursor.pos());
        let span = Span::new(start, self.cursor.pos());

        if let Some(kw) = Keyword::from_word(&text) {
            return Token::new(TokenKind::Keyword(kw), span);
        }
        if let Some(op) = Operator::from_word(&text) {
            return Token::new(TokenKind::Operator(op), span);
        }
        Token::new(TokenKind::Identifier(Symbol::intern(&text)), span)
    }
}
