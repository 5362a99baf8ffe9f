//! Persisted per-part state.

use cogwire_core::PartId;
use cogwire_value::{AspectProperties, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The state a part carries across ticks and save/load cycles.
///
/// Owned by the [`PartContainer`](crate::PartContainer) the part lives
/// in. Networks and parts only borrow it for the duration of a callback
/// and never cache it across ticks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartState {
    id: PartId,
    priority: i32,
    update_interval: u32,
    update: bool,
    values: IndexMap<String, Value>,
    aspect_properties: IndexMap<String, AspectProperties>,
    last_error: Option<String>,
}

impl PartState {
    /// Fresh state with a newly allocated id.
    ///
    /// Priority 0, update interval 1, update flag off.
    pub fn new() -> Self {
        Self::with_id(PartId::next())
    }

    /// Fresh state with an explicit id.
    pub fn with_id(id: PartId) -> Self {
        Self {
            id,
            priority: 0,
            update_interval: 1,
            update: false,
            values: IndexMap::new(),
            aspect_properties: IndexMap::new(),
            last_error: None,
        }
    }

    /// The part's unique id.
    pub fn id(&self) -> PartId {
        self.id
    }

    /// Update priority. Higher runs earlier.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Set the update priority.
    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    /// Ticks between consecutive updates. Always at least 1.
    pub fn update_interval(&self) -> u32 {
        self.update_interval
    }

    /// Set the update interval. Zero is treated as 1.
    pub fn set_update_interval(&mut self, interval: u32) {
        self.update_interval = interval.max(1);
    }

    /// Whether the part wants its update callback driven.
    pub fn is_update(&self) -> bool {
        self.update
    }

    /// Toggle the update flag.
    pub fn set_update(&mut self, update: bool) {
        self.update = update;
    }

    /// A named stored value.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Store a named value, returning the previous one.
    pub fn set_value(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    /// Properties configured for an aspect.
    pub fn aspect_properties(&self, aspect: &str) -> Option<&AspectProperties> {
        self.aspect_properties.get(aspect)
    }

    /// Mutable properties configured for an aspect.
    pub fn aspect_properties_mut(&mut self, aspect: &str) -> Option<&mut AspectProperties> {
        self.aspect_properties.get_mut(aspect)
    }

    /// Replace the properties of an aspect.
    pub fn set_aspect_properties(&mut self, aspect: impl Into<String>, props: AspectProperties) {
        self.aspect_properties.insert(aspect.into(), props);
    }

    /// The last failure reported by this part, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Record a failure.
    pub fn set_last_error(&mut self, error: impl Into<String>) {
        self.last_error = Some(error.into());
    }

    /// Clear a recorded failure.
    pub fn clear_last_error(&mut self) {
        self.last_error = None;
    }
}

impl Default for PartState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogwire_value::INTEGER;

    #[test]
    fn fresh_state_defaults() {
        let state = PartState::with_id(PartId(7));
        assert_eq!(state.id(), PartId(7));
        assert_eq!(state.priority(), 0);
        assert_eq!(state.update_interval(), 1);
        assert!(!state.is_update());
        assert!(state.last_error().is_none());
    }

    #[test]
    fn new_allocates_distinct_ids() {
        assert_ne!(PartState::new().id(), PartState::new().id());
    }

    #[test]
    fn zero_interval_clamped() {
        let mut state = PartState::new();
        state.set_update_interval(0);
        assert_eq!(state.update_interval(), 1);
        state.set_update_interval(20);
        assert_eq!(state.update_interval(), 20);
    }

    #[test]
    fn last_error_round_trip() {
        let mut state = PartState::new();
        state.set_last_error("tank missing");
        assert_eq!(state.last_error(), Some("tank missing"));
        state.clear_last_error();
        assert!(state.last_error().is_none());
    }

    #[test]
    fn serde_round_trip() {
        let mut state = PartState::with_id(PartId(42));
        state.set_priority(-3);
        state.set_update(true);
        state.set_update_interval(5);
        state.set_value("last_read", Value::Integer(12));
        let mut props = AspectProperties::new();
        props.declare("tank_id", &INTEGER, Value::Integer(1)).unwrap();
        state.set_aspect_properties("fluid.amount", props);

        let json = serde_json::to_string(&state).unwrap();
        let back: PartState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert_eq!(
            back.aspect_properties("fluid.amount")
                .and_then(|p| p.get_integer("tank_id")),
            Some(1)
        );
    }
}
