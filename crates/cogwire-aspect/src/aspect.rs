//! The [`Aspect`], [`ReadAspect`] and [`WriteAspect`] traits.

use cogwire_core::PartTarget;
use cogwire_value::{AspectProperties, PropertyError, Value, ValueType};
use cogwire_world::World;

use crate::error::AspectError;

/// Declaration of one configurable property.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDecl {
    /// Property key.
    pub key: &'static str,
    /// Declared type.
    pub ty: &'static ValueType,
    /// Value a fresh property set starts with.
    pub default: Value,
}

/// Build a property set from declarations.
///
/// Fails on a repeated key or a default whose type does not correspond
/// to its declared type.
pub fn default_properties(decls: &[PropertyDecl]) -> Result<AspectProperties, PropertyError> {
    let mut props = AspectProperties::new();
    for decl in decls {
        props.declare(decl.key, decl.ty, decl.default.clone())?;
    }
    Ok(props)
}

/// What every aspect has: an id, a value type, and its properties.
///
/// # Object safety
///
/// This trait and its two refinements are object-safe; registries store
/// aspects as `Arc<dyn ReadAspect>` and `Arc<dyn WriteAspect>`.
pub trait Aspect: Send + Sync + 'static {
    /// Unique registry id, e.g. `"fluid.amount"`.
    fn id(&self) -> &'static str;

    /// Output type for reads, accepted type for writes.
    fn value_type(&self) -> &'static ValueType;

    /// Property declarations. Empty by default.
    fn properties(&self) -> &[PropertyDecl] {
        &[]
    }

    /// A property set covering every declared key at its default.
    ///
    /// Registration validates the declarations, so for a registered
    /// aspect this never loses a key.
    fn create_default_properties(&self) -> AspectProperties {
        default_properties(self.properties()).unwrap_or_default()
    }
}

/// Produces a value from world state at the part's target.
///
/// # Examples
///
/// ```
/// use cogwire_aspect::{Aspect, ReadAspect};
/// use cogwire_core::PartTarget;
/// use cogwire_value::{AspectProperties, Value, ValueType, BOOLEAN};
/// use cogwire_world::World;
///
/// struct IsLoaded;
///
/// impl Aspect for IsLoaded {
///     fn id(&self) -> &'static str { "block.loaded" }
///     fn value_type(&self) -> &'static ValueType { &BOOLEAN }
/// }
///
/// impl ReadAspect for IsLoaded {
///     fn read(&self, world: &dyn World, target: &PartTarget, _: &AspectProperties) -> Value {
///         Value::Boolean(world.is_loaded(&target.target().position))
///     }
/// }
///
/// assert!(IsLoaded.create_default_properties().is_empty());
/// ```
pub trait ReadAspect: Aspect {
    /// Read the value. Falls back to the output type's default when the
    /// target lacks the state the aspect reads.
    fn read(&self, world: &dyn World, target: &PartTarget, properties: &AspectProperties) -> Value;
}

/// Applies a value to world state at the part's target.
pub trait WriteAspect: Aspect {
    /// Apply a value already known to match the accepted type.
    fn apply(
        &self,
        world: &mut dyn World,
        target: &PartTarget,
        properties: &AspectProperties,
        value: &Value,
    ) -> Result<(), AspectError>;

    /// Check the value's type against the accepted type, then apply it.
    ///
    /// A mismatch leaves the world untouched.
    fn write(
        &self,
        world: &mut dyn World,
        target: &PartTarget,
        properties: &AspectProperties,
        value: &Value,
    ) -> Result<(), AspectError> {
        let found = value.value_type();
        if !self.value_type().corresponds_to(found) {
            return Err(AspectError::TypeMismatch {
                aspect: self.id(),
                expected: self.value_type().name(),
                found: found.name(),
            });
        }
        self.apply(world, target, properties, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogwire_value::INTEGER;

    #[test]
    fn defaults_cover_every_declaration() {
        let decls = [
            PropertyDecl {
                key: "a",
                ty: &INTEGER,
                default: Value::Integer(3),
            },
            PropertyDecl {
                key: "b",
                ty: &INTEGER,
                default: Value::Integer(0),
            },
        ];
        let props = default_properties(&decls).unwrap();
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(props.get_integer("a"), Some(3));
    }

    #[test]
    fn bad_declarations_rejected() {
        let repeated = [
            PropertyDecl {
                key: "a",
                ty: &INTEGER,
                default: Value::Integer(0),
            },
            PropertyDecl {
                key: "a",
                ty: &INTEGER,
                default: Value::Integer(1),
            },
        ];
        assert!(matches!(
            default_properties(&repeated),
            Err(PropertyError::Duplicate { .. })
        ));

        let mistyped = [PropertyDecl {
            key: "a",
            ty: &INTEGER,
            default: Value::Boolean(true),
        }];
        assert!(matches!(
            default_properties(&mistyped),
            Err(PropertyError::TypeMismatch { .. })
        ));
    }
}
