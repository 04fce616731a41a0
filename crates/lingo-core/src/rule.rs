//! The rule plugin contract.

use tree_sitter::Node;

use crate::types::Report;
use crate::walker::Subscriptions;

/// A good/bad pair of code snippets illustrating a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    /// Code that follows the rule.
    pub good: &'static str,
    /// Code that breaks the rule.
    pub bad: &'static str,
}

/// A rule plugin that inspects Go syntax nodes.
///
/// A rule is built once per run from its configuration, subscribes to the
/// node kinds it cares about in [`Rule::register`], and is then handed every
/// matching node of every checked file.
///
/// # Example
///
/// ```ignore
/// use lingo_core::{NodeKind, Position, Report, Rule, Subscriptions, Violation};
///
/// pub struct NoGoStatements;
///
/// impl Rule for NoGoStatements {
///     fn name(&self) -> &'static str { "no_go_statements" }
///     fn title(&self) -> &'static str { "No Go Statements" }
///
///     fn register(&self, subscriptions: &mut Subscriptions<'_>) {
///         subscriptions.on(NodeKind::GoStatement);
///     }
///
///     fn check(&self, node: &tree_sitter::Node<'_>, _source: &str, report: &mut Report) {
///         report.push(Violation::new(self.name(), Position::of(node), "goroutine started"));
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the identifier this rule is registered under.
    fn name(&self) -> &'static str;

    /// Returns a short human-readable title.
    fn title(&self) -> &'static str;

    /// Returns a one-sentence description of what this rule enforces.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns snippets showing code that follows and breaks the rule.
    fn examples(&self) -> Vec<Example> {
        Vec::new()
    }

    /// Subscribes the rule to the node kinds it inspects.
    ///
    /// Called exactly once, while the syntax walker is being built.
    fn register(&self, subscriptions: &mut Subscriptions<'_>);

    /// Inspects a node the rule subscribed to and appends any violations.
    ///
    /// # Arguments
    ///
    /// * `node` - A node whose kind the rule subscribed to
    /// * `source` - The full text of the file being checked
    /// * `report` - The report of the file being checked
    fn check(&self, node: &Node<'_>, source: &str, report: &mut Report);
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
