//! # lingo-checkers
//!
//! Built-in checkers for lingo.
//!
//! ## Available Checkers
//!
//! | Name | Title | Description |
//! |------|-------|-------------|
//! | `return_error_last` | Return Error Last | When a function returns error it must be its last return value |
//!
//! ## Usage
//!
//! ```ignore
//! use lingo_core::{matcher, AnalyzerBuilder, Config};
//!
//! let checkers = lingo_checkers::registry()?;
//! let config = Config::recommended(checkers.ids());
//! let analyzer = AnalyzerBuilder::from_config(&config, &checkers, &matcher::registry()?)?
//!     .root("./pkg")
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod return_error_last;

pub use return_error_last::ReturnErrorLast;

use lingo_core::{RegistryError, RuleRegistry};
use tracing::debug;

/// Re-export core types for convenience.
pub use lingo_core::{Rule, Violation};

/// Registers every built-in checker.
///
/// # Errors
///
/// Returns an error if a built-in identifier is already taken.
pub fn register_builtin(registry: &mut RuleRegistry) -> Result<(), RegistryError> {
    registry.register(return_error_last::NAME, ReturnErrorLast::from_config)?;
    debug!("Registered {} built-in checkers", registry.len());
    Ok(())
}

/// Creates a registry holding the built-in checkers.
///
/// # Errors
///
/// Returns an error if the built-in identifiers collide.
pub fn registry() -> Result<RuleRegistry, RegistryError> {
    let mut registry = RuleRegistry::new("checker");
    register_builtin(&mut registry)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::PluginConfig;

    #[test]
    fn test_builtin_ids() {
        let registry = registry().expect("builtin checkers");
        assert_eq!(
            registry.ids().collect::<Vec<_>>(),
            vec!["return_error_last"]
        );
    }

    #[test]
    fn test_registering_twice_fails() {
        let mut registry = registry().expect("builtin checkers");
        let err = register_builtin(&mut registry).expect_err("already registered");
        assert!(matches!(err, RegistryError::DuplicateIdentifier { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_built_checker_reports_its_name() {
        let registry = registry().expect("builtin checkers");
        let rule = registry
            .get("return_error_last", &PluginConfig::new())
            .expect("registered");
        assert_eq!(rule.name(), "return_error_last");
    }
}
