//! Value-system error types.

use thiserror::Error;

/// Errors from parsing or constructing values.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The compact string is not a valid rendering for the type.
    #[error("cannot parse {input:?} as {type_name}")]
    Parse {
        /// Name of the type being parsed.
        type_name: &'static str,
        /// The rejected input.
        input: String,
    },
    /// The type is abstract and has no values of its own.
    #[error("type {type_name} is abstract and has no compact form")]
    Abstract {
        /// Name of the abstract type.
        type_name: &'static str,
    },
}

/// Errors from building a registry (value types, part types, aspects).
///
/// Registries are built once at startup, so every variant here is fatal
/// for the host that triggered it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two entries share a name.
    #[error("duplicate registration for {name:?}")]
    Duplicate {
        /// The contested name.
        name: String,
    },
    /// The registry does not contain exactly one wildcard type.
    #[error("expected exactly one wildcard type, found {found}")]
    WildcardCount {
        /// Number of wildcard types registered.
        found: usize,
    },
    /// A type names a parent that was not registered before it.
    #[error("type {name:?} declares unregistered parent {parent:?}")]
    UnknownParent {
        /// The child type.
        name: String,
        /// The missing parent.
        parent: String,
    },
    /// An entry's declared property defaults do not form a valid set.
    #[error("{name:?} declares invalid property defaults")]
    InvalidDefaults {
        /// The offending entry.
        name: String,
        /// What was wrong with the declarations.
        #[source]
        source: PropertyError,
    },
    /// A process-wide registry was installed twice.
    #[error("{registry} registry is already installed")]
    AlreadyInstalled {
        /// Which registry.
        registry: &'static str,
    },
}

/// Errors from reading or updating a property set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The key was never declared.
    #[error("unknown property {key:?}")]
    Unknown {
        /// The requested key.
        key: String,
    },
    /// The key was declared twice.
    #[error("property {key:?} declared twice")]
    Duplicate {
        /// The contested key.
        key: String,
    },
    /// The value's type does not correspond to the declared type.
    #[error("property {key:?} expects {expected}, got {found}")]
    TypeMismatch {
        /// The property key.
        key: String,
        /// Declared type name.
        expected: &'static str,
        /// Type name of the rejected value.
        found: &'static str,
    },
}
