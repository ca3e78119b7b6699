//! Proptest strategies for storage topology domain values.
//!
//! Generators produce well-formed snapshots (no device claimed twice) so
//! property tests can explore the transition space without tripping the
//! intra-snapshot consistency check.

use proptest::prelude::*;
use quartzdb_operator_types::{
    DeviceId, NamespaceStorage, NamespaceTopology, StorageEngineKind,
};

/// Generates a namespace name of 1-12 characters matching `[a-z][a-z0-9-]*`.
pub fn arb_namespace_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,11}"
}

/// Generates a topology in which every device is claimed exactly once.
///
/// Up to five namespaces; a namespace with no devices assigned to it becomes
/// memory-backed. Device identifiers are numbered sequentially, so no two
/// namespaces can collide.
pub fn arb_disjoint_topology() -> impl Strategy<Value = NamespaceTopology> {
    proptest::collection::btree_set(arb_namespace_name(), 0..5)
        .prop_flat_map(|names| {
            let count = names.len();
            (Just(names), proptest::collection::vec(0_usize..4, count))
        })
        .prop_map(|(names, device_counts)| {
            let mut next_device = 0_usize;
            names
                .into_iter()
                .zip(device_counts)
                .map(|(name, device_count)| {
                    let storage = if device_count == 0 {
                        NamespaceStorage::memory_backed()
                    } else {
                        NamespaceStorage::device_backed((0..device_count).map(|_| {
                            next_device += 1;
                            format!("/dev/nvme{next_device}")
                        }))
                    };
                    (name, storage)
                })
                .collect()
        })
}

/// Generates an `(old, new)` pair where `new` is `old` plus fresh devices.
///
/// Extends existing device-backed namespaces and introduces new namespaces,
/// never reusing, moving, or removing a device and never changing a kind —
/// the shape of transition that must always be accepted.
pub fn arb_monotone_extension() -> impl Strategy<Value = (NamespaceTopology, NamespaceTopology)> {
    arb_disjoint_topology()
        .prop_flat_map(|old| {
            let count = old.len();
            (
                Just(old),
                proptest::collection::vec(0_usize..3, count),
                proptest::collection::vec(1_usize..4, 0..3),
            )
        })
        .prop_map(|(old, growth, added)| {
            // Fresh devices start well above anything arb_disjoint_topology
            // assigned; added namespace names use `_`, which the name
            // strategy's alphabet excludes.
            let mut next_device = 1000_usize;
            let mut new = NamespaceTopology::new();
            for ((name, storage), extra) in old.iter().zip(growth) {
                let mut storage = storage.clone();
                if storage.kind == StorageEngineKind::Device {
                    for _ in 0..extra {
                        next_device += 1;
                        storage.devices.push(DeviceId::from(format!("/dev/nvme{next_device}")));
                    }
                }
                new.insert(name.clone(), storage);
            }
            for (index, device_count) in added.into_iter().enumerate() {
                let devices: Vec<String> = (0..device_count)
                    .map(|_| {
                        next_device += 1;
                        format!("/dev/nvme{next_device}")
                    })
                    .collect();
                new.insert(format!("added_{index}"), NamespaceStorage::device_backed(devices));
            }
            (old, new)
        })
}
