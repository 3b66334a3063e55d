//! Tree walker: turns a [`SyntaxTree`] into a [`Score`].
//!
//! Only the node kinds the score needs are interpreted; everything else,
//! error nodes included, is skipped.

use tracing::trace;

use crate::score::{Score, Section, Track};

use super::tree::{NodeKind, SyntaxNode, SyntaxTree};

struct Walker<'s> {
    source: &'s str,
    score: Score,
}

/// Walk a parsed tree into a score.
pub fn walk(tree: &SyntaxTree, source: &str) -> Score {
    let mut walker = Walker {
        source,
        score: Score::default(),
    };
    walker.visit(tree.top_node());
    walker.score
}

impl<'s> Walker<'s> {
    fn visit(&mut self, node: &SyntaxNode) {
        match node.kind() {
            NodeKind::MetadataValue => self.metadata(node),
            NodeKind::SectionHeader => self.section_header(node),
            NodeKind::SectionData => self.section_data(node),
            NodeKind::Error => trace!(span = ?node.span(), "skipping unparsed input"),
            _ => {}
        }

        for child in node.children() {
            self.visit(child);
        }
    }

    fn metadata(&mut self, node: &SyntaxNode) {
        let (Some(name), Some(value)) = (node.child(NodeKind::Name), node.child(NodeKind::String))
        else {
            return;
        };
        let name = name.text(self.source).to_lowercase();
        let value = unwrap_delimited(value.text(self.source)).to_string();
        match name.as_str() {
            "title" => self.score.title = value,
            "composer" => self.score.composer = value,
            other => trace!(name = other, "ignoring unknown metadata"),
        }
    }

    fn section_header(&mut self, node: &SyntaxNode) {
        let title = node
            .child(NodeKind::String)
            .map(|n| unwrap_delimited(n.text(self.source)).to_string())
            .unwrap_or_default();
        let tempo = node
            .child(NodeKind::Number)
            .map(|n| parse_tempo(n.text(self.source)))
            .unwrap_or(0);

        let id = self.score.sections.len();
        self.score.sections.push(Section {
            id,
            title,
            tempo,
            tracks: Vec::new(),
        });
    }

    fn section_data(&mut self, node: &SyntaxNode) {
        let (Some(label), Some(code)) = (node.child(NodeKind::Name), node.child(NodeKind::Code))
        else {
            return;
        };
        let Some(section) = self.score.sections.last_mut() else {
            trace!(span = ?node.span(), "dropping track before any section");
            return;
        };
        section.tracks.push(Track::new(
            label.text(self.source),
            unwrap_delimited(code.text(self.source)),
        ));
    }
}

/// Drop exactly the first and last character of a delimited literal.
fn unwrap_delimited(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Integer tempo from a number literal: the leading digits, or 0 when they
/// do not fit.
fn parse_tempo(text: &str) -> u32 {
    let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
