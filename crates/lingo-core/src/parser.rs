//! Go source parsing with Tree-sitter.

use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

use crate::types::Position;

/// Errors produced while parsing a source file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The Go grammar could not be loaded into the parser.
    #[error("failed to load the Go grammar: {0}")]
    Language(String),

    /// The parser gave up without producing a tree.
    #[error("parser produced no syntax tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        /// Line of the first error (1-indexed).
        line: usize,
        /// Column of the first error (1-indexed).
        column: usize,
        /// What went wrong.
        message: String,
    },
}

/// Parses Go source text into syntax trees.
///
/// Holds a Tree-sitter parser and is reused for every file of a run.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// Creates a parser configured for Go.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Language`] if the grammar is incompatible with
    /// the linked Tree-sitter runtime.
    pub fn new() -> Result<Self, ParseError> {
        let language: Language = tree_sitter_go::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ParseError::Language(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parses `source` into a syntax tree.
    ///
    /// A tree that contains error or missing nodes is rejected, so rules only
    /// ever see syntactically valid files.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Syntax`] pointing at the first error node.
    pub fn parse(&mut self, source: &str) -> Result<Tree, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;

        if let Some(node) = first_syntax_error(tree.root_node()) {
            let position = Position::of(&node);
            let message = if node.is_missing() {
                format!("missing `{}`", node.kind())
            } else {
                "unexpected input".to_string()
            };
            return Err(ParseError::Syntax {
                line: position.line,
                column: position.column,
                message,
            });
        }

        Ok(tree)
    }
}

/// Finds the first error or missing node in document order.
fn first_syntax_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }

    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }

        // Only descend into subtrees that contain the error.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}
