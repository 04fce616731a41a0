//! Syntax walker that dispatches tree nodes to subscribed rules.

use std::collections::HashMap;

use tracing::debug;
use tree_sitter::Node;

use crate::node::NodeKind;
use crate::rule::{Rule, RuleBox};
use crate::types::Report;

type SubscriptionTable = HashMap<NodeKind, Vec<usize>>;

/// Handle passed to [`Rule::register`] for subscribing to node kinds.
///
/// Each handle is bound to the rule being registered.
pub struct Subscriptions<'a> {
    table: &'a mut SubscriptionTable,
    rule: usize,
}

impl Subscriptions<'_> {
    /// Subscribes the rule being registered to `kind`.
    ///
    /// Subscribing twice to the same kind has no further effect.
    pub fn on(&mut self, kind: NodeKind) {
        let subscribers = self.table.entry(kind).or_default();
        if !subscribers.contains(&self.rule) {
            subscribers.push(self.rule);
        }
    }
}

/// Builder for a [`SyntaxWalker`].
///
/// Rules are dispatched in the order they are added here.
#[derive(Default)]
pub struct SyntaxWalkerBuilder {
    rules: Vec<RuleBox>,
    table: SubscriptionTable,
}

impl SyntaxWalkerBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule and runs its registration hook.
    #[must_use]
    pub fn rule<R: Rule + 'static>(self, rule: R) -> Self {
        self.rule_box(Box::new(rule))
    }

    /// Adds a boxed rule and runs its registration hook.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        let index = self.rules.len();
        rule.register(&mut Subscriptions {
            table: &mut self.table,
            rule: index,
        });
        debug!("Registered rule: {}", rule.name());
        self.rules.push(rule);
        self
    }

    /// Freezes the subscription table.
    #[must_use]
    pub fn build(self) -> SyntaxWalker {
        SyntaxWalker {
            rules: self.rules,
            table: self.table,
        }
    }
}

/// Traverses syntax trees and hands each node to the rules subscribed to its
/// kind.
///
/// The subscription table is fixed when the walker is built. Checking a file
/// touches no state besides the report passed in, so one walker serves every
/// file of a run.
pub struct SyntaxWalker {
    rules: Vec<RuleBox>,
    table: SubscriptionTable,
}

impl SyntaxWalker {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> SyntaxWalkerBuilder {
        SyntaxWalkerBuilder::new()
    }

    /// Returns the registered rules in registration order.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    /// Returns the rules subscribed to `kind`, in registration order.
    #[cfg(test)]
    pub(crate) fn subscribers(&self, kind: NodeKind) -> impl Iterator<Item = &dyn Rule> + '_ {
        self.table
            .get(&kind)
            .into_iter()
            .flatten()
            .map(|&i| self.rules[i].as_ref())
    }

    /// Walks the tree rooted at `root` in pre-order and dispatches every
    /// named node to its subscribers.
    ///
    /// # Arguments
    ///
    /// * `root` - Root of the parsed tree (usually the `source_file` node)
    /// * `source` - The text the tree was parsed from
    /// * `report` - Receives the violations of this file
    pub fn check(&self, root: Node<'_>, source: &str, report: &mut Report) {
        if self.table.is_empty() {
            return;
        }

        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            if node.is_named() {
                self.dispatch(&node, source, report);
            }

            if cursor.goto_first_child() {
                continue;
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }

    fn dispatch(&self, node: &Node<'_>, source: &str, report: &mut Report) {
        let Some(subscribers) = self.table.get(&NodeKind::of(node)) else {
            return;
        };
        for &index in subscribers {
            self.rules[index].check(node, source, report);
        }
    }
}
