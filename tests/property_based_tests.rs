mod common;

use common::*;
use proptest::prelude::*;
use rms_memstore::{StoreError, StoreEventKind};
use std::collections::{BTreeSet, HashMap};

proptest! {
    /// Property: list() reflects exactly the stores created and not since deleted,
    /// and every successful structural change notifies exactly once.
    #[test]
    fn registry_matches_model(ops in registry_ops_strategy()) {
        let (mut registry, listener) = recording_registry();
        let mut handles = HashMap::new();
        let mut model: BTreeSet<String> = BTreeSet::new();
        let mut expected_events = Vec::new();

        for op in ops {
            match op {
                RegistryOp::Open { name, create } => {
                    let existed = model.contains(&name);
                    match registry.open(&name, create) {
                        Ok(handle) => {
                            prop_assert!(existed || create);
                            prop_assert!(handle.is_open());
                            if !existed {
                                model.insert(name.clone());
                                expected_events.push((StoreEventKind::Created, name.clone()));
                            }
                            handles.insert(name, handle);
                        }
                        Err(err) => {
                            prop_assert!(!existed && !create);
                            prop_assert_eq!(err, StoreError::NotFound(name));
                        }
                    }
                }
                RegistryOp::Close { name } => {
                    if let Some(handle) = handles.get(&name) {
                        handle.close();
                    }
                }
                RegistryOp::Delete { name } => {
                    let was_open = handles.get(&name).map(|h| h.is_open()).unwrap_or(false);
                    match registry.delete(&name) {
                        Ok(()) => {
                            prop_assert!(model.remove(&name));
                            prop_assert!(!was_open);
                            handles.remove(&name);
                            expected_events.push((StoreEventKind::Deleted, name));
                        }
                        Err(StoreError::NotFound(missing)) => {
                            prop_assert!(!model.contains(&missing));
                        }
                        Err(StoreError::Conflict(busy)) => {
                            prop_assert!(was_open);
                            prop_assert!(model.contains(&busy));
                        }
                        Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                    }
                }
            }

            let listed: Option<BTreeSet<String>> =
                registry.list().map(|names| names.into_iter().collect());
            if model.is_empty() {
                prop_assert!(listed.is_none());
            } else {
                prop_assert_eq!(listed.as_ref(), Some(&model));
            }
        }

        prop_assert_eq!(listener.structural(), expected_events);
    }

    /// Property: capacity is the probe figure truncated to 32 bits
    #[test]
    fn capacity_truncates_sampled_free_memory(free in any::<u64>()) {
        let mut registry: rms_memstore::StoreRegistry = rms_memstore::StoreRegistry::with_probe(
            std::sync::Arc::new(rms_memstore::FixedMemoryProbe(free)),
        );
        let handle = registry.open("probe", true).unwrap();
        prop_assert_eq!(registry.available_capacity(&handle), free as i32);
    }
}
