//! # lingo-core
//!
//! Core framework for linting Go sources with Tree-sitter syntax trees.
//!
//! This crate provides the building blocks shared by every lingo checker:
//!
//! - [`Rule`] trait for checker plugins and [`RuleRegistry`] to look them up
//! - [`Matcher`] trait for file selection and [`Feeder`] for concurrent
//!   discovery
//! - [`SyntaxWalker`] for dispatching tree nodes to subscribed rules
//! - [`Analyzer`] for orchestrating a run
//! - [`Report`] and [`LintResult`] for collecting findings
//!
//! ## Example
//!
//! ```ignore
//! use lingo_core::{matcher::ExtensionMatcher, Analyzer};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./pkg")
//!     .matcher(ExtensionMatcher::new([".go"]))
//!     .rule(MyRule::new())
//!     .build();
//!
//! let result = analyzer.analyze()?;
//! println!("{} violations", result.total_violations());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod feeder;
mod node;
mod parser;
mod registry;
mod rule;
mod types;
mod walker;

/// Built-in file matchers.
pub mod matcher;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, MatcherSpec, PluginConfig};
pub use feeder::{Feed, FeedError, Feeder};
pub use matcher::{Matcher, MatcherBox};
pub use node::{node_text, NodeKind};
pub use parser::{GoParser, ParseError};
pub use registry::{MatcherRegistry, Registry, RegistryError, RuleRegistry};
pub use rule::{Example, Rule, RuleBox};
pub use types::{FileReport, LintResult, ParseFailure, Position, Report, Violation};
pub use walker::{Subscriptions, SyntaxWalker, SyntaxWalkerBuilder};
