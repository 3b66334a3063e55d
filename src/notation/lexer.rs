//! Lexer for the score notation.
//!
//! Converts source text into a stream of [`Token`]s. The lexer never fails:
//! characters it cannot classify become [`TokenKind::Unknown`] tokens and are
//! left for the grammar to recover from.

use super::token::{Token, TokenKind, CODE_DELIMITER, STRING_DELIMITER};

pub struct Lexer<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
        }
    }

    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            self.skip_comment();
            self.skip_whitespace();

            if self.is_at_end() {
                let end = self.source.len();
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    span: end..end,
                });
                break;
            }

            let ch = self.peek();
            let token = match ch {
                '\n' => self.single_char(TokenKind::Newline),
                '[' => self.single_char(TokenKind::LBracket),
                ']' => self.single_char(TokenKind::RBracket),
                '=' => self.single_char(TokenKind::Eq),
                c if c == STRING_DELIMITER => {
                    self.lex_delimited(STRING_DELIMITER, TokenKind::String)
                }
                c if c == CODE_DELIMITER => self.lex_delimited(CODE_DELIMITER, TokenKind::Code),
                '0'..='9' => self.lex_number(),
                c if c.is_alphabetic() || c == '_' => self.lex_name(),
                _ => self.single_char(TokenKind::Unknown),
            };

            tokens.push(token);
        }

        tokens
    }

    fn peek(&self) -> char {
        self.chars[self.pos].1
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).map(|&(_, c)| c)
    }

    /// Byte offset of the current character, or the source length at the end.
    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map_or(self.source.len(), |&(i, _)| i)
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.pos].1;
        self.pos += 1;
        ch
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && matches!(self.peek(), ' ' | '\t' | '\r') {
            self.advance();
        }
    }

    fn skip_comment(&mut self) {
        if !self.is_at_end() && self.peek() == '/' && self.peek_next() == Some('/') {
            while !self.is_at_end() && self.peek() != '\n' {
                self.advance();
            }
        }
    }

    fn single_char(&mut self, kind: TokenKind) -> Token {
        let start = self.offset();
        self.advance();
        Token {
            kind,
            span: start..self.offset(),
        }
    }

    /// Lex a literal enclosed in `delimiter` on a single line. The span keeps
    /// both delimiters; the content is taken verbatim.
    fn lex_delimited(&mut self, delimiter: char, kind: TokenKind) -> Token {
        let start = self.offset();
        self.advance(); // opening delimiter
        while !self.is_at_end() && self.peek() != delimiter && self.peek() != '\n' {
            self.advance();
        }
        if self.is_at_end() || self.peek() == '\n' {
            // Unterminated: swallow the rest of the line as one unknown token.
            return Token {
                kind: TokenKind::Unknown,
                span: start..self.offset(),
            };
        }
        self.advance(); // closing delimiter
        Token {
            kind,
            span: start..self.offset(),
        }
    }

    fn lex_number(&mut self) -> Token {
        let start = self.offset();
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            self.advance();
        }
        if !self.is_at_end()
            && self.peek() == '.'
            && self.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.advance();
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        Token {
            kind: TokenKind::Number,
            span: start..self.offset(),
        }
    }

    fn lex_name(&mut self) -> Token {
        let start = self.offset();
        while !self.is_at_end() && is_name_char(self.peek()) {
            self.advance();
        }
        Token {
            kind: TokenKind::Name,
            span: start..self.offset(),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-')
}
