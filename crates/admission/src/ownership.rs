//! Device ownership index for one topology snapshot.
//!
//! An [`OwnershipIndex`] is a derived, request-scoped mapping from device to
//! the single namespace claiming it, built fresh from one
//! [`NamespaceTopology`] and discarded with the verdict. Construction walks
//! namespaces and devices in declaration order, so the index iterates devices
//! in claim order and duplicate detection always reports the same
//! (first claimant, second claimant) pair for the same snapshot.

use indexmap::IndexMap;
use quartzdb_operator_types::{DeviceId, NamespaceName, NamespaceTopology};

/// One device claimed under two namespaces within a single snapshot.
///
/// `first` and `second` follow claim order into the index; they are equal when
/// one namespace lists the same device twice. The caller decides which
/// violation this maps to — an inconsistent current configuration and a
/// double-claiming proposal are different verdicts built from the same
/// structural fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateClaim {
    /// The doubly-claimed device.
    pub device: DeviceId,
    /// First namespace to claim the device.
    pub first: NamespaceName,
    /// Second namespace to claim the device.
    pub second: NamespaceName,
}

/// Mapping from device to the namespace owning it in one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipIndex {
    claims: IndexMap<DeviceId, NamespaceName>,
}

impl OwnershipIndex {
    /// Builds the index from a topology, claiming devices namespace-by-
    /// namespace in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateClaim`] on the first device already claimed when a
    /// second claim for it is walked. Memory-backed namespaces declare no
    /// devices and never conflict.
    pub fn build(topology: &NamespaceTopology) -> Result<Self, DuplicateClaim> {
        let mut claims: IndexMap<DeviceId, NamespaceName> = IndexMap::new();
        for (namespace, storage) in topology.iter() {
            for device in &storage.devices {
                if let Some(first) = claims.get(device) {
                    return Err(DuplicateClaim {
                        device: device.clone(),
                        first: first.clone(),
                        second: namespace.clone(),
                    });
                }
                claims.insert(device.clone(), namespace.clone());
            }
        }
        Ok(Self { claims })
    }

    /// Returns the namespace owning a device, if the device exists in this
    /// snapshot.
    #[must_use]
    pub fn owner(&self, device: &DeviceId) -> Option<&NamespaceName> {
        self.claims.get(device)
    }

    /// Whether the device exists anywhere in this snapshot.
    #[must_use]
    pub fn contains(&self, device: &DeviceId) -> bool {
        self.claims.contains_key(device)
    }

    /// Iterates (device, owner) pairs in claim order.
    pub fn iter(&self) -> impl Iterator<Item = (&DeviceId, &NamespaceName)> {
        self.claims.iter()
    }

    /// Number of claimed devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether no namespace claims any device.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
