//! Line comments: `#` through (but not including) the next newline.

use thornc_util::Span;

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Consume a `#`-comment and emit it as a [`TokenKind::Comment`] token.
    /// The parser, not the lexer, decides whether comments are discarded.
    pub(crate) fn lex_comment(&mut self, start: usize) -> Token {
        while !self.cursor.at_end() && self.cursor.peek() != '\n' as u32 {
            self.cursor.bump();
        }
        Token::new(TokenKind::Comment, Span::new(start, self.cursor.pos()))
    }
}
