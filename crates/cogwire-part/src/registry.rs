//! Part type registration.
//!
//! Part types are registered once at startup. [`PartRegistryBuilder::build`]
//! validates the set and assigns each type a sequential [`PartTypeId`] in
//! registration order, which the element ordering uses as its part
//! identity tier.

use std::sync::Arc;

use cogwire_core::PartTypeId;
use cogwire_value::RegistryError;
use indexmap::IndexMap;

use crate::part::Part;

/// Collects part types before validation.
#[derive(Default)]
#[must_use]
pub struct PartRegistryBuilder {
    parts: Vec<Arc<dyn Part>>,
}

impl PartRegistryBuilder {
    /// Queue a part type.
    pub fn register(self, part: impl Part) -> Self {
        self.register_arc(Arc::new(part))
    }

    /// Queue a shared part type.
    pub fn register_arc(mut self, part: Arc<dyn Part>) -> Self {
        self.parts.push(part);
        self
    }

    /// Validate names and assign ids.
    pub fn build(self) -> Result<PartRegistry, RegistryError> {
        let mut by_name = IndexMap::with_capacity(self.parts.len());
        for (i, part) in self.parts.iter().enumerate() {
            let name = part.name().to_string();
            if by_name.contains_key(&name) {
                return Err(RegistryError::Duplicate { name });
            }
            by_name.insert(name, PartTypeId(i as u32));
        }
        Ok(PartRegistry {
            parts: self.parts,
            by_name,
        })
    }
}

/// Immutable table of registered part types.
pub struct PartRegistry {
    parts: Vec<Arc<dyn Part>>,
    by_name: IndexMap<String, PartTypeId>,
}

impl PartRegistry {
    /// Start building a registry.
    pub fn builder() -> PartRegistryBuilder {
        PartRegistryBuilder::default()
    }

    /// The part registered under `id`.
    pub fn get(&self, id: PartTypeId) -> Option<&Arc<dyn Part>> {
        self.parts.get(id.0 as usize)
    }

    /// The id registered for `name`.
    pub fn id_of(&self, name: &str) -> Option<PartTypeId> {
        self.by_name.get(name).copied()
    }

    /// `(id, part)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (PartTypeId, &Arc<dyn Part>)> {
        self.parts
            .iter()
            .enumerate()
            .map(|(i, p)| (PartTypeId(i as u32), p))
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl std::fmt::Debug for PartRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartRegistry")
            .field("parts", &self.by_name)
            .finish()
    }
}
