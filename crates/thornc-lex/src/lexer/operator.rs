//! Symbolic operator and delimiter lexing.
//!
//! Every branch here follows a longest-match policy with at most one code
//! point of lookahead: try the longest spelling first, fall back a
//! character at a time. `^`/`^=` and `~`/`~=` both spell bitwise xor's
//! compound-assign form (`^=` and `~=` both lex to `BitXorAssign`) — see
//! the note on [`crate::token::Operator`] — but bare `~` lexes as the
//! prefix bitwise-not used by the unary precedence level, not as xor.

use thornc_util::Span;

use crate::token::{Delimiter, Operator, Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_operator(&mut self, start: usize) -> Token {
        let cp = self.cursor.bump();
        let c = cp as u8 as char;

        macro_rules! op {
            ($variant:ident) => {
                self.operator(Operator::$variant, start)
            };
        }
        macro_rules! delim {
            ($variant:ident) => {
                self.delimiter(Delimiter::$variant, start)
            };
        }

        match c {
            '+' => {
                if self.cursor.eat('+' as u32) {
                    op!(Inc)
                } else if self.cursor.eat('=' as u32) {
                    op!(AddAssign)
                } else {
                    op!(Add)
                }
            }
            '-' => {
                if self.cursor.eat('-' as u32) {
                    op!(Dec)
                } else if self.cursor.eat('=' as u32) {
                    op!(SubAssign)
                } else if self.cursor.eat('>' as u32) {
                    delim!(Arrow)
                } else {
                    op!(Sub)
                }
            }
            '*' => {
                if self.cursor.eat('*' as u32) {
                    if self.cursor.eat('=' as u32) {
                        op!(PowAssign)
                    } else {
                        op!(Pow)
                    }
                } else if self.cursor.eat('=' as u32) {
                    op!(MulAssign)
                } else {
                    op!(Mul)
                }
            }
            '/' => {
                if self.cursor.eat('=' as u32) {
                    op!(DivAssign)
                } else {
                    op!(Div)
                }
            }
            '%' => {
                if self.cursor.eat('=' as u32) {
                    op!(ModAssign)
                } else {
                    op!(Mod)
                }
            }
            '=' => {
                if self.cursor.eat('=' as u32) {
                    op!(Eq)
                } else {
                    op!(Assign)
                }
            }
            '!' => {
                if self.cursor.eat('=' as u32) {
                    op!(Ne)
                } else {
                    delim!(Bang)
                }
            }
            '<' => {
                if self.cursor.eat('<' as u32) {
                    if self.cursor.eat('=' as u32) {
                        op!(ShlAssign)
                    } else {
                        op!(Shl)
                    }
                } else if self.cursor.eat('=' as u32) {
                    op!(Le)
                } else {
                    op!(Lt)
                }
            }
            '>' => {
                if self.cursor.eat('>' as u32) {
                    if self.cursor.eat('=' as u32) {
                        op!(ShrAssign)
                    } else {
                        op!(Shr)
                    }
                } else if self.cursor.eat('=' as u32) {
                    op!(Ge)
                } else {
                    op!(Gt)
                }
            }
            '&' => {
                if self.cursor.eat('=' as u32) {
                    op!(BitAndAssign)
                } else {
                    op!(BitAnd)
                }
            }
            '|' => {
                if self.cursor.eat('=' as u32) {
                    op!(BitOrAssign)
                } else {
                    op!(BitOr)
                }
            }
            '^' => {
                if self.cursor.eat('=' as u32) {
                    op!(BitXorAssign)
                } else {
                    op!(BitXor)
                }
            }
            '~' => {
                if self.cursor.eat('=' as u32) {
                    op!(BitXorAssign)
                } else {
                    op!(BitNot)
                }
            }
            '@' => op!(At),
            '.' => {
                if self.cursor.peek() == '.' as u32 && self.cursor.peek_at(1) == '.' as u32 {
                    self.cursor.bump();
                    self.cursor.bump();
                    delim!(Ellipsis)
                } else if self.cursor.eat('=' as u32) {
                    op!(DotAssign)
                } else {
                    delim!(Dot)
                }
            }
            ',' => delim!(Comma),
            ':' => delim!(Colon),
            ';' => delim!(Semicolon),
            '(' => delim!(ParenOpen),
            ')' => delim!(ParenClose),
            '{' => delim!(CurlyOpen),
            '}' => delim!(CurlyClose),
            '[' => delim!(SquareOpen),
            ']' => delim!(SquareClose),
            _ => {
                self.error(format!("unknown symbol {cp:#x}"), Span::new(start, self.cursor.pos()));
                self.invalid(start)
            }
        }
    }

    fn operator(&mut self, op: Operator, start: usize) -> Token {
        Token::new(TokenKind::Operator(op), Span::new(start, self.cursor.pos()))
    }
}
