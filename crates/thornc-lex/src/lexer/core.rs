//! The `Lexer` struct and top-level dispatch.

use thornc_util::diagnostic::{Handler, Phase};
use thornc_util::Span;

use crate::cursor::Cursor;
use crate::token::{Delimiter, Token, TokenKind};
use crate::unicode::{is_ascii_digit, is_identifier_start, is_inline_whitespace, is_newline};

/// Pull-based lexer over a zero-terminated code-point buffer.
///
/// `next_token` is the only entry point callers need: it skips
/// non-newline whitespace, then classifies and consumes exactly one
/// lexeme. Newlines and comments are not skipped here — they are
/// significant to the parser and come back as real tokens ([`TokenKind::Newline`],
/// [`TokenKind::Comment`]); it is the parser's job to decide, per its own
/// newline-sensitivity mode, whether to discard them.
///
/// # Examples
///
/// ```
/// use thornc_lex::lexer::Lexer;
/// use thornc_util::diagnostic::Handler;
///
/// let buf: Vec<u32> = "x = 1".chars().map(|c| c as u32).chain(std::iter::once(0)).collect();
/// let mut handler = Handler::new();
/// let mut lexer = Lexer::new(&buf, &mut handler);
/// assert!(matches!(lexer.next_token().kind, thornc_lex::token::TokenKind::Identifier(_)));
/// ```
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a mut Handler,
}

impl<'a> Lexer<'a> {
    pub fn new(buf: &'a [u32], handler: &'a mut Handler) -> Self {
        Self {
            cursor: Cursor::new(buf),
            handler,
        }
    }

    /// Access the diagnostic sink the lexer itself reports into. Exposed
    /// so a caller layered on top (the parser) can append its own
    /// diagnostics to the same sink without threading a second `&mut
    /// Handler` through every call.
    pub fn handler_mut(&mut self) -> &mut Handler {
        self.handler
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_inline_whitespace();

        let start = self.cursor.pos();

        if self.cursor.at_end() {
            return Token::new(TokenKind::Eof, Span::point(start));
        }

        let cp = self.cursor.peek();

        if is_newline(cp) {
            self.cursor.bump();
            return Token::new(TokenKind::Newline, Span::new(start, self.cursor.pos()));
        }

        if cp == '#' as u32 {
            return self.lex_comment(start);
        }

        if (cp == 'b' as u32 || cp == 'B' as u32) && self.is_quote(self.cursor.peek_at(1)) {
            return self.lex_byte_literal(start);
        }

        if is_identifier_start(cp) {
            return self.lex_word(start);
        }

        if is_ascii_digit(cp) {
            return self.lex_number(start);
        }

        if cp == '\'' as u32 {
            return self.lex_char_literal(start);
        }

        if cp == '"' as u32 {
            return self.lex_string_literal(start);
        }

        self.lex_operator(start)
    }

    fn is_quote(&self, cp: u32) -> bool {
        cp == '\'' as u32 || cp == '"' as u32
    }

    fn skip_inline_whitespace(&mut self) {
        while is_inline_whitespace(self.cursor.peek()) {
            self.cursor.bump();
        }
    }

    /// Record a diagnostic. The cursor is never rewound by this call; every
    /// caller is responsible for having advanced at least one code point
    /// before or after reporting, per the lexer's never-stall contract.
    pub(crate) fn error(&mut self, message: impl Into<String>, span: Span) {
        self.handler.error(Phase::Lexer, message, span);
    }

    pub(crate) fn text(&self, begin: usize, end: usize) -> String {
        self.cursor
            .slice(begin, end)
            .iter()
            .map(|&cp| char::from_u32(cp).unwrap_or('\u{fffd}'))
            .collect()
    }

    /// Builds an `Invalid` token spanning `begin` to the cursor's current
    /// position. Callers report their own diagnostic and advance the cursor
    /// past the offending code point(s) before calling this.
    pub(crate) fn invalid(&mut self, begin: usize) -> Token {
        Token::new(TokenKind::Invalid, Span::new(begin, self.cursor.pos()))
    }

    pub(crate) fn delimiter(&mut self, kind: Delimiter, begin: usize) -> Token {
        Token::new(TokenKind::Delimiter(kind), Span::new(begin, self.cursor.pos()))
    }
}
