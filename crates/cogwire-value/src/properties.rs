//! Typed property sets for aspect configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::PropertyError;
use crate::value::Value;
use crate::value_type::{ValueKind, ValueType};

/// A named set of typed, mutable configuration values.
///
/// Each key is declared once with a type and a default. Afterwards the
/// value may be replaced, but only by a value whose type corresponds to
/// the declared type, so every present key always resolves to a
/// well-typed value. Deserialization re-checks this.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PropertyEntry>", into = "Vec<PropertyEntry>")]
pub struct AspectProperties {
    entries: IndexMap<String, (ValueKind, Value)>,
}

/// Persisted form of one property.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyEntry {
    /// Property key.
    pub key: String,
    /// Declared type.
    pub kind: ValueKind,
    /// Current value.
    pub value: Value,
}

impl AspectProperties {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a key with its type and initial value.
    pub fn declare(
        &mut self,
        key: impl Into<String>,
        ty: &'static ValueType,
        default: Value,
    ) -> Result<(), PropertyError> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(PropertyError::Duplicate { key });
        }
        check(&key, ty, &default)?;
        self.entries.insert(key, (ty.kind(), default));
        Ok(())
    }

    /// Current value of a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(|(_, v)| v)
    }

    /// Integer value of a key, if declared as an integer.
    pub fn get_integer(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(Value::as_integer)
    }

    /// Declared type of a key.
    pub fn declared_type(&self, key: &str) -> Option<&'static ValueType> {
        self.entries.get(key).map(|(kind, _)| ValueType::of(*kind))
    }

    /// Override the value of a declared key.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), PropertyError> {
        let Some((kind, slot)) = self.entries.get_mut(key) else {
            return Err(PropertyError::Unknown {
                key: key.to_string(),
            });
        };
        check(key, ValueType::of(*kind), &value)?;
        *slot = value;
        Ok(())
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(key, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, (_, v))| (k.as_str(), v))
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check(key: &str, ty: &'static ValueType, value: &Value) -> Result<(), PropertyError> {
    let found = value.value_type();
    if ty.corresponds_to(found) {
        Ok(())
    } else {
        Err(PropertyError::TypeMismatch {
            key: key.to_string(),
            expected: ty.name(),
            found: found.name(),
        })
    }
}

impl TryFrom<Vec<PropertyEntry>> for AspectProperties {
    type Error = PropertyError;

    fn try_from(raw: Vec<PropertyEntry>) -> Result<Self, Self::Error> {
        let mut props = Self::new();
        for entry in raw {
            props.declare(entry.key, ValueType::of(entry.kind), entry.value)?;
        }
        Ok(props)
    }
}

impl From<AspectProperties> for Vec<PropertyEntry> {
    fn from(props: AspectProperties) -> Self {
        props
            .entries
            .into_iter()
            .map(|(key, (kind, value))| PropertyEntry { key, kind, value })
            .collect()
    }
}
