//! The network's `PartId -> Locator` index.

use cogwire_core::{Locator, PartId};
use cogwire_part::PartIndex;
use indexmap::IndexMap;

/// Where every part in a network lives.
///
/// Mutated only through `&mut` on the owning network, during addition
/// and removal.
#[derive(Debug, Default)]
pub struct PartNetwork {
    parts: IndexMap<PartId, Locator>,
}

impl PartNetwork {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` at `locator`.
    ///
    /// On collision the index is left unchanged and the locator already
    /// holding the id is returned.
    pub fn register(&mut self, id: PartId, locator: Locator) -> Result<(), Locator> {
        match self.parts.get(&id) {
            Some(existing) => Err(*existing),
            None => {
                self.parts.insert(id, locator);
                Ok(())
            }
        }
    }

    /// Remove `id`, returning where it was registered.
    pub fn deregister(&mut self, id: PartId) -> Option<Locator> {
        self.parts.shift_remove(&id)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: PartId) -> bool {
        self.parts.contains_key(&id)
    }

    /// `(id, locator)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (PartId, Locator)> + '_ {
        self.parts.iter().map(|(id, loc)| (*id, *loc))
    }
}

impl PartIndex for PartNetwork {
    fn locate(&self, id: PartId) -> Option<Locator> {
        self.parts.get(&id).copied()
    }

    fn len(&self) -> usize {
        self.parts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogwire_core::{DimensionId, Position, Side};

    fn loc(x: i32) -> Locator {
        Locator::new(Position::new(DimensionId(0), x, 0, 0), Side::Up)
    }

    #[test]
    fn collision_reports_existing_and_keeps_index() {
        let mut index = PartNetwork::new();
        index.register(PartId(1), loc(0)).unwrap();
        assert_eq!(index.register(PartId(1), loc(5)), Err(loc(0)));
        assert_eq!(index.locate(PartId(1)), Some(loc(0)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn deregister_clears() {
        let mut index = PartNetwork::new();
        index.register(PartId(1), loc(0)).unwrap();
        assert_eq!(index.deregister(PartId(1)), Some(loc(0)));
        assert!(!index.contains(PartId(1)));
        assert!(index.is_empty());
        assert_eq!(index.deregister(PartId(1)), None);
    }
}
