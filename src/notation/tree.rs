//! Concrete syntax tree produced by the grammar.
//!
//! Nodes carry a kind, a byte span into the source and their children.
//! Punctuation (`=`, `[`, `]`) is matched by the grammar but not kept as
//! nodes, so a node's children are exactly its meaningful parts.

use std::ops::Range;

/// The kind of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    /// `name = "value"`
    MetadataValue,
    /// `["title" tempo]`
    SectionHeader,
    /// `label |code|`
    SectionData,
    Name,
    Number,
    String,
    Code,
    /// Input the grammar could not make sense of.
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    kind: NodeKind,
    span: Range<usize>,
    children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, span: Range<usize>, children: Vec<SyntaxNode>) -> Self {
        Self {
            kind,
            span,
            children,
        }
    }

    pub fn leaf(kind: NodeKind, span: Range<usize>) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    /// Build an interior node spanning from its first to its last child.
    /// `fallback` is used when there are no children.
    pub fn branch(kind: NodeKind, children: Vec<SyntaxNode>, fallback: Range<usize>) -> Self {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.span.start..last.span.end,
            _ => fallback,
        };
        Self {
            kind,
            span,
            children,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    /// First direct child of the given kind.
    pub fn child(&self, kind: NodeKind) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// The source text this node covers.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.clone()).unwrap_or("")
    }
}

/// A parsed document. The root is always a [`NodeKind::Program`].
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    root: SyntaxNode,
}

impl SyntaxTree {
    pub fn new(root: SyntaxNode) -> Self {
        Self { root }
    }

    pub fn top_node(&self) -> &SyntaxNode {
        &self.root
    }

    /// Whether any error node was produced while parsing.
    pub fn has_errors(&self) -> bool {
        fn walk(node: &SyntaxNode) -> bool {
            node.kind == NodeKind::Error || node.children.iter().any(walk)
        }
        walk(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_span_covers_children() {
        let node = SyntaxNode::branch(
            NodeKind::SectionData,
            vec![
                SyntaxNode::leaf(NodeKind::Name, 2..4),
                SyntaxNode::leaf(NodeKind::Code, 5..9),
            ],
            0..0,
        );
        assert_eq!(node.span(), 2..9);
    }

    #[test]
    fn empty_branch_uses_fallback() {
        let node = SyntaxNode::branch(NodeKind::Program, vec![], 0..12);
        assert_eq!(node.span(), 0..12);
    }

    #[test]
    fn child_lookup_by_kind() {
        let node = SyntaxNode::branch(
            NodeKind::SectionHeader,
            vec![
                SyntaxNode::leaf(NodeKind::String, 1..4),
                SyntaxNode::leaf(NodeKind::Number, 5..8),
            ],
            0..0,
        );
        assert_eq!(node.child(NodeKind::Number).map(|n| n.span()), Some(5..8));
        assert!(node.child(NodeKind::Code).is_none());
    }

    #[test]
    fn text_out_of_range_is_empty() {
        let node = SyntaxNode::leaf(NodeKind::Name, 10..20);
        assert_eq!(node.text("short"), "");
    }

    #[test]
    fn has_errors_finds_nested_error() {
        let tree = SyntaxTree::new(SyntaxNode::branch(
            NodeKind::Program,
            vec![SyntaxNode::branch(
                NodeKind::SectionHeader,
                vec![SyntaxNode::leaf(NodeKind::Error, 0..1)],
                0..1,
            )],
            0..1,
        ));
        assert!(tree.has_errors());
    }
}
