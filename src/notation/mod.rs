//! Notation compiler: source text → tokens → syntax tree → [`Score`].
//!
//! ```text
//! title = "Gending"
//! composer = "Anon"
//!
//! ["Buka" 96]
//! r1  |E U A . |
//! kkr |o e n ḱ |
//! ```
//!
//! Parsing is total: malformed input degrades to a partial score and is
//! never reported as an error.

pub mod grammar;
pub mod lexer;
pub mod token;
pub mod tree;
pub mod walk;

pub use tree::{NodeKind, SyntaxNode, SyntaxTree};

use crate::score::Score;

use grammar::Grammar;
use lexer::Lexer;

/// Parse notation source into a syntax tree.
pub fn parse_tree(source: &str) -> SyntaxTree {
    let tokens = Lexer::new(source).tokenize();
    Grammar::new(tokens).parse()
}

/// Parse notation source into a [`Score`].
pub fn parse(source: &str) -> Score {
    let tree = parse_tree(source);
    walk::walk(&tree, source)
}
