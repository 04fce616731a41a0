//! Identifier-to-constructor registries for rules and matchers.
//!
//! Registries are plain values filled during bootstrap and read-only
//! afterwards. Callers build one, register every constructor they know
//! about, then pass it to whatever resolves the configured identifiers.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::config::PluginConfig;
use crate::matcher::Matcher;
use crate::rule::Rule;

/// Errors from registering or resolving identifiers.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An identifier was registered twice.
    #[error("{kind} `{id}` is already registered")]
    DuplicateIdentifier {
        /// What the registry holds ("checker" or "matcher").
        kind: &'static str,
        /// The identifier.
        id: String,
    },

    /// No constructor is registered under the identifier.
    #[error("unknown {kind}: {id}")]
    UnknownIdentifier {
        /// What the registry holds ("checker" or "matcher").
        kind: &'static str,
        /// The identifier.
        id: String,
    },

    /// The constructor rejected its settings.
    #[error("invalid config for {kind} `{id}`: {message}")]
    InvalidConfig {
        /// What the registry holds ("checker" or "matcher").
        kind: &'static str,
        /// The identifier.
        id: String,
        /// What was wrong with the settings.
        message: String,
    },
}

/// Maps identifiers to constructors of `T`.
///
/// A constructor builds an instance from its settings, or explains why it
/// cannot.
pub struct Registry<T: ?Sized> {
    kind: &'static str,
    constructors: BTreeMap<String, fn(&PluginConfig) -> Result<Box<T>, String>>,
}

/// Registry of rule constructors.
pub type RuleRegistry = Registry<dyn Rule>;

/// Registry of matcher constructors.
pub type MatcherRegistry = Registry<dyn Matcher>;

impl<T: ?Sized> Registry<T> {
    /// Creates an empty registry. `kind` names its entries in errors.
    #[must_use]
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            constructors: BTreeMap::new(),
        }
    }

    /// Registers a constructor under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateIdentifier`] if `id` is taken. The
    /// existing constructor is kept.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        constructor: fn(&PluginConfig) -> Result<Box<T>, String>,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        if self.constructors.contains_key(&id) {
            return Err(RegistryError::DuplicateIdentifier {
                kind: self.kind,
                id,
            });
        }
        self.constructors.insert(id, constructor);
        Ok(())
    }

    /// Builds the instance registered under `id` from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownIdentifier`] if nothing is registered
    /// under `id`, or [`RegistryError::InvalidConfig`] if the constructor
    /// rejects `config`.
    pub fn get(&self, id: &str, config: &PluginConfig) -> Result<Box<T>, RegistryError> {
        let constructor =
            self.constructors
                .get(id)
                .ok_or_else(|| RegistryError::UnknownIdentifier {
                    kind: self.kind,
                    id: id.to_string(),
                })?;

        constructor(config).map_err(|message| RegistryError::InvalidConfig {
            kind: self.kind,
            id: id.to_string(),
            message,
        })
    }

    /// Returns true if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.constructors.contains_key(id)
    }

    /// Returns the registered identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.constructors.keys().map(String::as_str)
    }

    /// Number of registered constructors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}
