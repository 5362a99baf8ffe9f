//! Aspect registration and lookup.
//!
//! The process-wide registry is written once, either implicitly with the
//! built-in aspects on first access through [`aspects`], or explicitly
//! through [`install_aspects`] before that first access.

use std::sync::{Arc, OnceLock};

use cogwire_core::PartTarget;
use cogwire_value::{AspectProperties, RegistryError, Value};
use cogwire_world::World;
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::aspect::{default_properties, Aspect, ReadAspect, WriteAspect};
use crate::error::AspectError;
use crate::fluid::{FluidAmount, FluidBlock, FluidCapacity, FluidTankCount};
use crate::signal::{SignalBoolean, SignalInteger, SignalLevel};

static ASPECTS: OnceLock<AspectRegistry> = OnceLock::new();

/// The process-wide aspect registry.
///
/// Holds the built-in aspects unless [`install_aspects`] ran first.
pub fn aspects() -> &'static AspectRegistry {
    ASPECTS.get_or_init(AspectRegistry::builtin)
}

/// Install a custom process-wide registry.
///
/// Fails if a registry is already in place, including the built-in one
/// set up by an earlier call to [`aspects`].
pub fn install_aspects(registry: AspectRegistry) -> Result<(), RegistryError> {
    let len = registry.len();
    ASPECTS
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled { registry: "aspect" })?;
    debug!(aspects = len, "aspect registry installed");
    Ok(())
}

/// Collects aspects before validation.
#[derive(Default)]
#[must_use]
pub struct AspectRegistryBuilder {
    reads: Vec<Arc<dyn ReadAspect>>,
    writes: Vec<Arc<dyn WriteAspect>>,
}

impl AspectRegistryBuilder {
    /// Queue a read aspect.
    pub fn read(mut self, aspect: impl ReadAspect) -> Self {
        self.reads.push(Arc::new(aspect));
        self
    }

    /// Queue a write aspect.
    pub fn write(mut self, aspect: impl WriteAspect) -> Self {
        self.writes.push(Arc::new(aspect));
        self
    }

    /// Queue every built-in aspect.
    pub fn builtins(self) -> Self {
        self.read(FluidBlock)
            .read(FluidAmount)
            .read(FluidCapacity)
            .read(FluidTankCount)
            .read(SignalLevel)
            .write(SignalInteger)
            .write(SignalBoolean)
    }

    /// Validate ids and property declarations.
    ///
    /// Ids are unique across reads and writes.
    pub fn build(self) -> Result<AspectRegistry, RegistryError> {
        let mut seen: IndexSet<&'static str> = IndexSet::new();
        let all = self
            .reads
            .iter()
            .map(|a| a.as_ref() as &dyn Aspect)
            .chain(self.writes.iter().map(|a| a.as_ref() as &dyn Aspect));
        for aspect in all {
            if !seen.insert(aspect.id()) {
                return Err(RegistryError::Duplicate {
                    name: aspect.id().to_string(),
                });
            }
            default_properties(aspect.properties()).map_err(|source| {
                RegistryError::InvalidDefaults {
                    name: aspect.id().to_string(),
                    source,
                }
            })?;
        }
        Ok(AspectRegistry::from_parts(self.reads, self.writes))
    }
}

/// Immutable table of read and write aspects by id.
pub struct AspectRegistry {
    reads: IndexMap<&'static str, Arc<dyn ReadAspect>>,
    writes: IndexMap<&'static str, Arc<dyn WriteAspect>>,
}

impl AspectRegistry {
    /// Start building a registry.
    pub fn builder() -> AspectRegistryBuilder {
        AspectRegistryBuilder::default()
    }

    fn from_parts(reads: Vec<Arc<dyn ReadAspect>>, writes: Vec<Arc<dyn WriteAspect>>) -> Self {
        Self {
            reads: reads.into_iter().map(|a| (a.id(), a)).collect(),
            writes: writes.into_iter().map(|a| (a.id(), a)).collect(),
        }
    }

    fn builtin() -> Self {
        let builder = AspectRegistryBuilder::default().builtins();
        Self::from_parts(builder.reads, builder.writes)
    }

    /// The read aspect registered under `id`.
    pub fn read_aspect(&self, id: &str) -> Option<&Arc<dyn ReadAspect>> {
        self.reads.get(id)
    }

    /// The write aspect registered under `id`.
    pub fn write_aspect(&self, id: &str) -> Option<&Arc<dyn WriteAspect>> {
        self.writes.get(id)
    }

    /// Evaluate the read aspect `id`.
    pub fn read(
        &self,
        id: &str,
        world: &dyn World,
        target: &PartTarget,
        properties: &AspectProperties,
    ) -> Result<Value, AspectError> {
        let aspect = self.read_aspect(id).ok_or_else(|| unknown(id))?;
        Ok(aspect.read(world, target, properties))
    }

    /// Evaluate the write aspect `id`.
    pub fn write(
        &self,
        id: &str,
        world: &mut dyn World,
        target: &PartTarget,
        properties: &AspectProperties,
        value: &Value,
    ) -> Result<(), AspectError> {
        let aspect = self.write_aspect(id).ok_or_else(|| unknown(id))?;
        aspect.write(world, target, properties, value)
    }

    /// Ids of read aspects in registration order.
    pub fn read_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.reads.keys().copied()
    }

    /// Ids of write aspects in registration order.
    pub fn write_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.writes.keys().copied()
    }

    /// Number of registered aspects, reads and writes together.
    pub fn len(&self) -> usize {
        self.reads.len() + self.writes.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn unknown(id: &str) -> AspectError {
    AspectError::UnknownAspect { id: id.to_string() }
}

impl std::fmt::Debug for AspectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AspectRegistry")
            .field("reads", &self.reads.keys().collect::<Vec<_>>())
            .field("writes", &self.writes.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect::PropertyDecl;
    use cogwire_value::{ValueType, INTEGER};

    struct Broken;

    impl Aspect for Broken {
        fn id(&self) -> &'static str {
            "broken"
        }

        fn value_type(&self) -> &'static ValueType {
            &INTEGER
        }

        fn properties(&self) -> &[PropertyDecl] {
            static BAD: [PropertyDecl; 1] = [PropertyDecl {
                key: "k",
                ty: &INTEGER,
                default: Value::Boolean(false),
            }];
            &BAD
        }
    }

    impl ReadAspect for Broken {
        fn read(&self, _: &dyn World, _: &PartTarget, _: &AspectProperties) -> Value {
            Value::Integer(0)
        }
    }

    #[test]
    fn builtins_pass_validation() {
        let built = AspectRegistry::builder().builtins().build().unwrap();
        let global = aspects();
        assert_eq!(built.len(), global.len());
        assert_eq!(
            built.read_ids().collect::<Vec<_>>(),
            global.read_ids().collect::<Vec<_>>()
        );
        assert_eq!(built.write_ids().count(), 2);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = AspectRegistry::builder()
            .read(SignalLevel)
            .read(SignalLevel)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Duplicate {
                name: "signal.level".into()
            }
        );
    }

    #[test]
    fn invalid_defaults_rejected() {
        let err = AspectRegistry::builder().read(Broken).build().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidDefaults { ref name, .. } if name == "broken"));
    }

    #[test]
    fn second_install_rejected() {
        let _ = aspects();
        let err = install_aspects(AspectRegistry::builder().build().unwrap()).unwrap_err();
        assert_eq!(err, RegistryError::AlreadyInstalled { registry: "aspect" });
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut world = cogwire_world::GridWorld::new();
        let target = PartTarget::from_center(cogwire_core::Locator::new(
            cogwire_core::Position::new(cogwire_core::DimensionId(0), 0, 0, 0),
            cogwire_core::Side::Up,
        ));
        let props = AspectProperties::new();
        assert!(matches!(
            aspects().read("nope", &world, &target, &props),
            Err(AspectError::UnknownAspect { .. })
        ));
        // A read id is not a write id.
        assert!(matches!(
            aspects().write("signal.level", &mut world, &target, &props, &Value::Integer(1)),
            Err(AspectError::UnknownAspect { .. })
        ));
    }
}
