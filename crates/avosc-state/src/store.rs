//! Parameter store - the shared runtime state
//!
//! Two partitions with the same entry shape:
//! - built-in: fixed key set taken from the registry, created up front
//! - dynamic: grows as new names are observed, never shrinks
//!
//! Each partition sits behind its own `RwLock`. The listener task is the only
//! writer; consumers get cloned snapshots, so they never see a half-applied
//! update or a dynamic entry without its first value.

use std::collections::HashMap;

use avosc_core::{AvoscError, AvoscResult, ParameterValue};
use parking_lot::RwLock;

use crate::{Parameter, ParameterRegistry, DEFAULT_DYNAMIC_HISTORY};

/// Outcome of a dynamic update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DynamicUpdate {
    /// The entry was created by this update
    Created,
    /// The entry already existed
    Updated,
}

/// Consistent copy of both partitions
#[derive(Clone, Debug, Default)]
pub struct StoreSnapshot {
    /// Built-in parameters in registry order
    pub built_in: Vec<Parameter>,
    /// Dynamic parameters sorted by name
    pub dynamic: Vec<Parameter>,
}

/// Lock-protected parameter state
#[derive(Debug)]
pub struct ParameterStore {
    /// Registry order, for stable snapshots
    built_in_order: Vec<String>,
    built_in: RwLock<HashMap<String, Parameter>>,
    dynamic: RwLock<HashMap<String, Parameter>>,
    dynamic_history: usize,
}

impl ParameterStore {
    /// Pre-create one entry per registered built-in
    pub fn new(registry: &ParameterRegistry) -> Self {
        Self::with_dynamic_history(registry, DEFAULT_DYNAMIC_HISTORY)
    }

    pub fn with_dynamic_history(registry: &ParameterRegistry, dynamic_history: usize) -> Self {
        let built_in: HashMap<String, Parameter> = registry
            .iter()
            .map(|def| {
                let param = Parameter::new(
                    def.name.clone(),
                    def.canonical_address(),
                    def.parameter_type,
                    def.max_history,
                    true,
                );
                (def.name.clone(), param)
            })
            .collect();

        ParameterStore {
            built_in_order: registry.iter().map(|d| d.name.clone()).collect(),
            built_in: RwLock::new(built_in),
            dynamic: RwLock::new(HashMap::new()),
            dynamic_history: dynamic_history.max(1),
        }
    }

    /// History depth given to new dynamic parameters
    pub fn dynamic_history(&self) -> usize {
        self.dynamic_history
    }

    /// Append a value to a built-in parameter
    pub fn apply_built_in(
        &self,
        name: &str,
        address: &str,
        value: ParameterValue,
    ) -> AvoscResult<()> {
        let mut built_in = self.built_in.write();
        let param = built_in
            .get_mut(name)
            .ok_or_else(|| AvoscError::NotBuiltIn(name.to_string()))?;
        param.set_value(address, value)
    }

    /// Append a value to a dynamic parameter, creating it on first sight.
    ///
    /// A new entry takes its type from `value`. Creation and the first append
    /// happen under one write lock.
    pub fn apply_dynamic(
        &self,
        name: &str,
        address: &str,
        value: ParameterValue,
    ) -> AvoscResult<DynamicUpdate> {
        debug_assert!(
            !self.built_in_order.iter().any(|n| n == name),
            "built-in name routed to dynamic partition"
        );

        let mut dynamic = self.dynamic.write();
        match dynamic.get_mut(name) {
            Some(param) => {
                param.set_value(address, value)?;
                Ok(DynamicUpdate::Updated)
            }
            None => {
                let mut param = Parameter::new(
                    name,
                    address,
                    value.parameter_type(),
                    self.dynamic_history,
                    false,
                );
                param.set_value(address, value)?;
                dynamic.insert(name.to_string(), param);
                Ok(DynamicUpdate::Created)
            }
        }
    }

    /// Copy of a built-in parameter
    pub fn built_in(&self, name: &str) -> Option<Parameter> {
        self.built_in.read().get(name).cloned()
    }

    /// Copy of a dynamic parameter
    pub fn dynamic(&self, name: &str) -> Option<Parameter> {
        self.dynamic.read().get(name).cloned()
    }

    /// Latest value for a name, checking built-ins first
    pub fn latest(&self, name: &str) -> Option<ParameterValue> {
        if let Some(param) = self.built_in.read().get(name) {
            return param.latest_value().cloned();
        }
        self.dynamic
            .read()
            .get(name)
            .and_then(|p| p.latest_value().cloned())
    }

    pub fn contains_dynamic(&self, name: &str) -> bool {
        self.dynamic.read().contains_key(name)
    }

    pub fn dynamic_len(&self) -> usize {
        self.dynamic.read().len()
    }

    /// Sorted dynamic parameter names
    pub fn dynamic_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.dynamic.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Copy both partitions.
    ///
    /// Both read guards are held together (built-in first, then dynamic), so
    /// no update lands between the two copies.
    pub fn snapshot(&self) -> StoreSnapshot {
        let built_in_guard = self.built_in.read();
        let dynamic_guard = self.dynamic.read();

        let built_in = self
            .built_in_order
            .iter()
            .filter_map(|name| built_in_guard.get(name).cloned())
            .collect();
        let mut dynamic: Vec<Parameter> = dynamic_guard.values().cloned().collect();

        drop(dynamic_guard);
        drop(built_in_guard);

        dynamic.sort_by(|a, b| a.name().cmp(b.name()));
        StoreSnapshot { built_in, dynamic }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BuiltInDefinition;
    use avosc_core::ParameterType;
    use std::sync::Arc;
    use std::thread;

    fn registry() -> ParameterRegistry {
        ParameterRegistry::from_definitions(vec![
            BuiltInDefinition::new("Viseme", ParameterType::Int32, 5),
            BuiltInDefinition::new("AFK", ParameterType::Boolean, 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_built_ins_precreated_empty() {
        let store = ParameterStore::new(&registry());

        let viseme = store.built_in("Viseme").unwrap();
        assert!(viseme.is_built_in());
        assert!(viseme.latest_value().is_none());
        assert_eq!(viseme.address(), "/avatar/parameters/Viseme");
        assert_eq!(store.dynamic_len(), 0);
    }

    #[test]
    fn test_apply_built_in() {
        let store = ParameterStore::new(&registry());
        store
            .apply_built_in("Viseme", "/avatar/parameters/Viseme", 3i32.into())
            .unwrap();

        assert_eq!(store.latest("Viseme"), Some(ParameterValue::Int32(3)));
        assert!(!store.contains_dynamic("Viseme"));

        let err = store
            .apply_built_in("Viseme", "/avatar/parameters/Viseme", 0.5f32.into())
            .unwrap_err();
        assert!(matches!(err, AvoscError::TypeMismatch { .. }));
        assert_eq!(
            store.built_in("Viseme").unwrap().values(),
            vec![ParameterValue::Int32(3)]
        );
    }

    #[test]
    fn test_apply_built_in_unknown_name() {
        let store = ParameterStore::new(&registry());
        let err = store
            .apply_built_in("EarTwitch", "/avatar/parameters/EarTwitch", 1i32.into())
            .unwrap_err();
        assert!(matches!(err, AvoscError::NotBuiltIn(ref name) if name == "EarTwitch"));
        assert_eq!(err.drop_reason(), None);
        assert!(!store.contains_dynamic("EarTwitch"));
    }

    #[test]
    fn test_dynamic_created_once() {
        let store = ParameterStore::new(&registry());

        let first = store
            .apply_dynamic("EarTwitch", "/avatar/parameters/EarTwitch", 0.25f32.into())
            .unwrap();
        let second = store
            .apply_dynamic("EarTwitch", "/avatar/parameters/EarTwitch", 0.5f32.into())
            .unwrap();

        assert_eq!(first, DynamicUpdate::Created);
        assert_eq!(second, DynamicUpdate::Updated);
        assert_eq!(store.dynamic_len(), 1);

        let param = store.dynamic("EarTwitch").unwrap();
        assert!(!param.is_built_in());
        assert_eq!(param.max_history(), DEFAULT_DYNAMIC_HISTORY);
        assert_eq!(param.parameter_type(), ParameterType::Single);
        assert_eq!(param.values().len(), 2);
    }

    #[test]
    fn test_dynamic_history_bound() {
        let store = ParameterStore::new(&registry());
        for v in 1..=6i32 {
            store
                .apply_dynamic("Counter", "/avatar/parameters/Counter", v.into())
                .unwrap();
        }

        let values: Vec<i32> = store
            .dynamic("Counter")
            .unwrap()
            .values()
            .iter()
            .filter_map(ParameterValue::as_i32)
            .collect();
        assert_eq!(values, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_dynamic_type_is_fixed() {
        let store = ParameterStore::new(&registry());
        store
            .apply_dynamic("Mode", "/avatar/parameters/Mode", 1i32.into())
            .unwrap();

        let err = store
            .apply_dynamic("Mode", "/avatar/parameters/Mode", true.into())
            .unwrap_err();
        assert!(matches!(err, AvoscError::TypeMismatch { .. }));
        assert_eq!(
            store.dynamic("Mode").unwrap().parameter_type(),
            ParameterType::Int32
        );
    }

    #[test]
    fn test_snapshot_ordering() {
        let store = ParameterStore::new(&registry());
        store.apply_dynamic("Zeta", "/avatar/parameters/Zeta", 1i32.into()).unwrap();
        store.apply_dynamic("Alpha", "/avatar/parameters/Alpha", 1i32.into()).unwrap();

        let snapshot = store.snapshot();
        let built_in: Vec<&str> = snapshot.built_in.iter().map(|p| p.name()).collect();
        let dynamic: Vec<&str> = snapshot.dynamic.iter().map(|p| p.name()).collect();
        assert_eq!(built_in, vec!["Viseme", "AFK"]);
        assert_eq!(dynamic, vec!["Alpha", "Zeta"]);
        assert_eq!(store.dynamic_names(), vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_concurrent_readers_see_complete_entries() {
        let store = Arc::new(ParameterStore::new(&registry()));

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..200i32 {
                    let name = format!("P{}", i % 20);
                    store
                        .apply_dynamic(&name, &format!("/avatar/parameters/{}", name), i.into())
                        .unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..200 {
                        for param in store.snapshot().dynamic {
                            assert!(param.latest_value().is_some());
                            assert!(param.values().len() <= param.max_history());
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(store.dynamic_len(), 20);
    }

    #[test]
    fn test_snapshot_sees_both_partitions_at_one_instant() {
        let store = Arc::new(ParameterStore::new(&registry()));

        // Each round writes the built-in first, then the dynamic entry, so any
        // single instant has built-in >= dynamic.
        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..2000i32 {
                    store
                        .apply_built_in("Viseme", "/avatar/parameters/Viseme", i.into())
                        .unwrap();
                    store
                        .apply_dynamic("Shadow", "/avatar/parameters/Shadow", i.into())
                        .unwrap();
                }
            })
        };

        let reader = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..2000 {
                    let snapshot = store.snapshot();
                    let built_in = snapshot.built_in[0].latest_value().and_then(|v| v.as_i32());
                    let dynamic = snapshot
                        .dynamic
                        .first()
                        .and_then(|p| p.latest_value())
                        .and_then(|v| v.as_i32());
                    if let (Some(b), Some(d)) = (built_in, dynamic) {
                        assert!(b >= d, "built-in {} behind dynamic {}", b, d);
                    }
                    if dynamic.is_some() {
                        assert!(built_in.is_some());
                    }
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
    }
}
