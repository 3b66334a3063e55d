//! Token types for the notation lexer.

use std::ops::Range;

/// Opening and closing delimiter of quoted strings (`"Title"`).
pub const STRING_DELIMITER: char = '"';

/// Opening and closing delimiter of track codes (`|E U A |`).
pub const CODE_DELIMITER: char = '|';

/// A token produced by the lexer. `span` is a byte range into the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Name,
    Number,
    String,
    Code,

    // Delimiters
    LBracket,
    RBracket,
    Eq,

    // Special
    Newline,
    /// Anything the lexer could not classify, including unterminated
    /// literals. Runs to the end of the offending line at most.
    Unknown,
    Eof,
}
