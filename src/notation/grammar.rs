//! Grammar for the score notation.
//!
//! Parses a token stream into a [`SyntaxTree`]. Parsing never fails: input
//! that does not fit a statement is wrapped in an [`NodeKind::Error`] node
//! running to the end of the line, and parsing resumes on the next line.
//!
//! ```text
//! Program       := (Statement | Newline)*
//! Statement     := MetadataValue | SectionHeader | SectionData
//! MetadataValue := Name '=' String
//! SectionHeader := '[' String Number ']'
//! SectionData   := Name Code
//! ```

use super::token::{Token, TokenKind};
use super::tree::{NodeKind, SyntaxNode, SyntaxTree};

pub struct Grammar {
    tokens: Vec<Token>,
    pos: usize,
}

impl Grammar {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse(&mut self) -> SyntaxTree {
        let end = self.tokens.last().map_or(0, |t| t.span.end);
        let mut statements = Vec::new();

        loop {
            self.skip_newlines();
            if self.is_at_end() {
                break;
            }
            statements.push(self.parse_statement());
        }

        SyntaxTree::new(SyntaxNode::branch(NodeKind::Program, statements, 0..end))
    }

    fn parse_statement(&mut self) -> SyntaxNode {
        match self.peek().kind {
            TokenKind::Name => match self.peek_next_kind() {
                Some(TokenKind::Eq) => self.parse_metadata(),
                Some(TokenKind::Code) => self.parse_section_data(),
                _ => self.recover(),
            },
            TokenKind::LBracket => self.parse_section_header(),
            _ => self.recover(),
        }
    }

    fn parse_metadata(&mut self) -> SyntaxNode {
        let start = self.peek().span.start;
        let mut children = vec![self.leaf()]; // Name
        self.advance(); // '='
        if self.check(TokenKind::String) {
            children.push(self.leaf());
        }
        SyntaxNode::branch(NodeKind::MetadataValue, children, start..start)
    }

    fn parse_section_header(&mut self) -> SyntaxNode {
        let open = self.advance().span.clone(); // '['
        let mut children = Vec::new();

        if self.check(TokenKind::String) {
            children.push(self.leaf());
        }
        if self.check(TokenKind::Number) {
            children.push(self.leaf());
        }

        // Anything else before the closing bracket is kept as an error child.
        let junk_start = self.peek().span.start;
        let mut junk_end = None;
        while !self.is_at_end()
            && !self.check(TokenKind::RBracket)
            && !self.check(TokenKind::Newline)
        {
            junk_end = Some(self.advance().span.end);
        }
        if let Some(end) = junk_end {
            children.push(SyntaxNode::leaf(NodeKind::Error, junk_start..end));
        }

        let close = if self.check(TokenKind::RBracket) {
            self.advance().span.end
        } else {
            children.last().map_or(open.end, |c| c.span().end)
        };

        // The header spans its brackets, not just its children.
        SyntaxNode::new(NodeKind::SectionHeader, open.start..close, children)
    }

    fn parse_section_data(&mut self) -> SyntaxNode {
        let start = self.peek().span.start;
        let name = self.leaf();
        let code = self.leaf();
        SyntaxNode::branch(NodeKind::SectionData, vec![name, code], start..start)
    }

    /// Wrap everything up to the end of the line in an error node.
    fn recover(&mut self) -> SyntaxNode {
        let start = self.peek().span.start;
        let mut end = start;
        while !self.is_at_end() && !self.check(TokenKind::Newline) {
            end = self.advance().span.end;
        }
        SyntaxNode::leaf(NodeKind::Error, start..end)
    }

    /// Consume the current token as a leaf node of the matching kind.
    fn leaf(&mut self) -> SyntaxNode {
        let token = self.advance();
        let kind = match token.kind {
            TokenKind::Name => NodeKind::Name,
            TokenKind::Number => NodeKind::Number,
            TokenKind::String => NodeKind::String,
            TokenKind::Code => NodeKind::Code,
            _ => NodeKind::Error,
        };
        SyntaxNode::leaf(kind, token.span.clone())
    }

    // --- Utility methods ---

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_next_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos + 1).map(|t| t.kind)
    }

    fn advance(&mut self) -> &Token {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len() || self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.pos += 1;
        }
    }
}
