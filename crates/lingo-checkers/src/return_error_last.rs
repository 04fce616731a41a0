//! Checker requiring `error` to be the last value a function returns.
//!
//! # Rationale
//!
//! Go code conventionally returns an `error` last, so callers can rely on
//! `v, err := f()` and tooling can spot ignored errors.
//!
//! # Detected Patterns
//!
//! - Functions and methods declaring two or more results where any result
//!   other than the last has the type `error`
//!
//! A result list is counted per declaration, so `(a, b int, err error)` has
//! two entries. Qualified (`pkg.error`) and pointer types are not `error`.
//!
//! # Good Patterns
//!
//! ```go
//! func Create() (int, error) {}
//! func (s *Store) Load(id string) (item Item, err error) {}
//! ```

use lingo_core::{
    node_text, Example, NodeKind, PluginConfig, Position, Report, Rule, RuleBox, Subscriptions,
    Violation,
};
use tree_sitter::Node;

/// Checker identifier for return-error-last.
pub const NAME: &str = "return_error_last";

/// Requires `error` to be the last result of a function.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnErrorLast;

impl ReturnErrorLast {
    /// Creates the checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Registry constructor. The checker takes no settings.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn from_config(_config: &PluginConfig) -> Result<RuleBox, String> {
        Ok(Box::new(Self::new()))
    }
}

impl Rule for ReturnErrorLast {
    fn name(&self) -> &'static str {
        NAME
    }

    fn title(&self) -> &'static str {
        "Return Error Last"
    }

    fn description(&self) -> &'static str {
        "When a function returns error it must be its last return value."
    }

    fn examples(&self) -> Vec<Example> {
        vec![Example {
            good: "func Create() (int, error) {}",
            bad: "func Create() (error, int) {}",
        }]
    }

    fn register(&self, subscriptions: &mut Subscriptions<'_>) {
        subscriptions.on(NodeKind::FunctionDeclaration);
        subscriptions.on(NodeKind::MethodDeclaration);
    }

    fn check(&self, node: &Node<'_>, source: &str, report: &mut Report) {
        let Some(results) = node.child_by_field_name("result") else {
            return;
        };
        // A single unparenthesized result is a bare type, not a list.
        if NodeKind::of(&results) != NodeKind::ParameterList {
            return;
        }

        let mut cursor = results.walk();
        let entries: Vec<Node<'_>> = results
            .named_children(&mut cursor)
            .filter(|n| NodeKind::of(n) == NodeKind::ParameterDeclaration)
            .collect();

        let Some((_last, leading)) = entries.split_last() else {
            return;
        };
        if !leading.iter().any(|entry| is_error_type(entry, source)) {
            return;
        }

        let name = node
            .child_by_field_name("name")
            .map_or("", |n| node_text(&n, source));
        report.push(Violation::new(
            NAME,
            Position::of(node),
            format!("func '{name}' should return error as the last value"),
        ));
    }
}

fn is_error_type(entry: &Node<'_>, source: &str) -> bool {
    entry.child_by_field_name("type").is_some_and(|ty| {
        NodeKind::of(&ty) == NodeKind::TypeIdentifier && node_text(&ty, source) == "error"
    })
}
