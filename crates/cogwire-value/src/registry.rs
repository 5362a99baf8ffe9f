//! Process-wide value type registry.

use indexmap::IndexMap;
use std::sync::OnceLock;

use crate::error::RegistryError;
use crate::value_type::{ValueType, ANY, BLOCK, BOOLEAN, DOUBLE, FLUID, INTEGER, OBJECT, STRING};

/// Built-in types in registration order. Parents precede children.
static BUILTIN: [&ValueType; 8] = [
    &ANY, &BOOLEAN, &INTEGER, &DOUBLE, &STRING, &OBJECT, &BLOCK, &FLUID,
];

static VALUE_TYPES: OnceLock<ValueTypeRegistry> = OnceLock::new();

/// The process-wide registry of built-in value types.
///
/// Initialised on first access and immutable afterwards.
pub fn value_types() -> &'static ValueTypeRegistry {
    VALUE_TYPES.get_or_init(ValueTypeRegistry::builtin)
}

/// Name-indexed set of value types.
///
/// Iteration follows registration order. Always contains exactly one
/// wildcard type.
#[derive(Debug)]
pub struct ValueTypeRegistry {
    types: IndexMap<&'static str, &'static ValueType>,
    wildcard: &'static ValueType,
}

impl ValueTypeRegistry {
    /// Build a registry, validating its structural invariants.
    ///
    /// Rejects duplicate names, a wildcard count other than one, and any
    /// type whose parent was not registered before it.
    pub fn from_types<I>(types: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = &'static ValueType>,
    {
        let mut map: IndexMap<&'static str, &'static ValueType> = IndexMap::new();
        let mut wildcards = Vec::new();
        for ty in types {
            if map.contains_key(ty.name()) {
                return Err(RegistryError::Duplicate {
                    name: ty.name().to_string(),
                });
            }
            if let Some(parent) = ty.parent() {
                if !map.contains_key(parent.name()) {
                    return Err(RegistryError::UnknownParent {
                        name: ty.name().to_string(),
                        parent: parent.name().to_string(),
                    });
                }
            }
            if ty.is_wildcard() {
                wildcards.push(ty);
            }
            map.insert(ty.name(), ty);
        }
        match wildcards.as_slice() {
            [wildcard] => Ok(Self {
                types: map,
                wildcard: *wildcard,
            }),
            other => Err(RegistryError::WildcardCount { found: other.len() }),
        }
    }

    fn builtin() -> Self {
        Self {
            types: BUILTIN.iter().map(|ty| (ty.name(), *ty)).collect(),
            wildcard: &ANY,
        }
    }

    /// Look up a type by name.
    pub fn get(&self, name: &str) -> Option<&'static ValueType> {
        self.types.get(name).copied()
    }

    /// The single wildcard type.
    pub fn wildcard(&self) -> &'static ValueType {
        self.wildcard
    }

    /// Types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static ValueType> + '_ {
        self.types.values().copied()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty. Never true for a valid registry.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
