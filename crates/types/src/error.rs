//! Error taxonomy for admission validation using snafu.
//!
//! Two distinct enums cover the two failure surfaces:
//!
//! - [`TopologyError`] — the raw configuration is structurally unusable and no
//!   topology could be extracted from it. These indicate a gap upstream, in
//!   schema validation or defaulting.
//! - [`TransitionViolation`] — both snapshots parsed, but the proposed
//!   transition is unsafe. The display string of each variant is the complete
//!   diagnostic; the transport layer forwards it verbatim to the requester.
//!
//! All variants are terminal. Nothing in this module is retried: a given
//! snapshot pair always produces the same verdict.

use snafu::{Location, Snafu};

use crate::topology::{DeviceId, NamespaceName};

/// The raw configuration value could not be normalized into a topology.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum TopologyError {
    /// The top-level `namespaces` key is present but not an array.
    #[snafu(display("namespaces must be a list of namespace objects"))]
    NamespacesNotAList {
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// A namespace list entry is not an object.
    #[snafu(display("namespace at index {index} is not an object"))]
    NamespaceNotAnObject {
        /// Zero-based position in the `namespaces` list.
        index: usize,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// A namespace list entry has no usable `name` field.
    #[snafu(display("namespace at index {index} has no name"))]
    MissingNamespaceName {
        /// Zero-based position in the `namespaces` list.
        index: usize,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// Two namespace entries in one snapshot declare the same name.
    #[snafu(display("namespace {name} is declared more than once"))]
    DuplicateNamespaceName {
        /// The repeated namespace name.
        name: NamespaceName,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// A namespace has no `storage-engine` object.
    #[snafu(display("namespace {namespace} has no storage-engine configuration"))]
    MissingStorageEngine {
        /// The namespace missing its storage declaration.
        namespace: NamespaceName,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// A namespace declares a storage-engine type other than `device`/`memory`.
    #[snafu(display("namespace {namespace} has unknown storage-engine type {kind:?}"))]
    UnknownStorageEngineKind {
        /// The namespace carrying the unknown kind.
        namespace: NamespaceName,
        /// The unrecognized kind string.
        kind: String,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// A device-backed namespace declares no device list.
    #[snafu(display("namespace {namespace} is device-backed but declares no devices"))]
    MissingDeviceList {
        /// The namespace missing its device list.
        namespace: NamespaceName,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// A namespace's device list is not usable as an ordered list of device
    /// identifier strings.
    #[snafu(display("namespace {namespace} has a malformed device list: {reason}"))]
    MalformedDeviceList {
        /// The namespace carrying the malformed list.
        namespace: NamespaceName,
        /// What made the list unusable.
        reason: String,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },
}

/// The proposed transition between two storage topologies is unsafe.
///
/// Each variant names the devices and namespaces involved; the display string
/// is the diagnostic forwarded to the operator who requested the transition.
///
/// | Variant                                | Meaning                                         |
/// | -------------------------------------- | ----------------------------------------------- |
/// | `DuplicateDeviceWithinSnapshot`        | The *current* configuration is inconsistent     |
/// | `DeviceReferencedInMultipleNamespaces` | The proposal double-claims a device             |
/// | `DeviceReallocatedWithoutCleanup`      | A device moves namespaces without removal first |
/// | `DeviceRemovalUnsupported`             | A device vanishes; removal is not supported     |
/// | `StorageEngineKindImmutable`           | A namespace's persistence strategy would change |
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum TransitionViolation {
    /// A single snapshot claims one device under two namespaces. Raised while
    /// indexing the old snapshot, before any cross-snapshot comparison runs.
    #[snafu(display(
        "device {device} is referenced by multiple namespaces ({first}, {second}) \
         within a single configuration"
    ))]
    DuplicateDeviceWithinSnapshot {
        /// The doubly-claimed device.
        device: DeviceId,
        /// First namespace to claim the device, in declaration order.
        first: NamespaceName,
        /// Second namespace to claim the device.
        second: NamespaceName,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// The proposed configuration claims one device under two namespaces.
    ///
    /// The pair reflects claim order into the ownership index: `first` is the
    /// earlier claimant when namespaces and devices are walked in declaration
    /// order. The two names are equal when one namespace lists the same device
    /// twice.
    #[snafu(display(
        "device {device} is already being referenced in multiple namespaces ({first}, {second})"
    ))]
    DeviceReferencedInMultipleNamespaces {
        /// The doubly-claimed device.
        device: DeviceId,
        /// First namespace to claim the device, in declaration order.
        first: NamespaceName,
        /// Second namespace to claim the device.
        second: NamespaceName,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// A device owned by one namespace in the old configuration appears under
    /// a different namespace in the new one, with no intervening removal.
    #[snafu(display(
        "device {device} is being reallocated from namespace {old_owner} to namespace \
         {new_owner} without being cleaned-up first"
    ))]
    DeviceReallocatedWithoutCleanup {
        /// The migrating device.
        device: DeviceId,
        /// Namespace owning the device in the old configuration.
        old_owner: NamespaceName,
        /// Namespace claiming the device in the new configuration.
        new_owner: NamespaceName,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// A device present in the old configuration is absent from the new one
    /// entirely — not reassigned, simply gone.
    #[snafu(display(
        "device {device} is being removed from namespace {namespace}. \
         Operation not yet supported by the operator"
    ))]
    DeviceRemovalUnsupported {
        /// The vanishing device.
        device: DeviceId,
        /// The namespace that owned it.
        namespace: NamespaceName,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// A namespace present in both configurations would change how it
    /// persists data.
    #[snafu(display("{field} of storage-engine cannot be changed (namespace={namespace})"))]
    StorageEngineKindImmutable {
        /// The immutable storage-engine field, always `"type"`.
        field: &'static str,
        /// The namespace whose kind would change.
        namespace: NamespaceName,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Diagnostic string tests — the transport layer forwards these verbatim,
    // so the exact wording is part of the contract.
    // ========================================================================

    #[test]
    fn test_multiple_namespaces_diagnostic() {
        let violation = TransitionViolation::DeviceReferencedInMultipleNamespaces {
            device: "/dev/nvme1".into(),
            first: "namespace-0".into(),
            second: "new-namespace".into(),
            location: snafu::Location::new("test.rs", 1, 1),
        };
        assert_eq!(
            violation.to_string(),
            "device /dev/nvme1 is already being referenced in multiple namespaces \
             (namespace-0, new-namespace)"
        );
    }

    #[test]
    fn test_reallocation_diagnostic() {
        let violation = TransitionViolation::DeviceReallocatedWithoutCleanup {
            device: "/dev/nvme1".into(),
            old_owner: "namespace-0".into(),
            new_owner: "new-namespace-0".into(),
            location: snafu::Location::new("test.rs", 1, 1),
        };
        assert_eq!(
            violation.to_string(),
            "device /dev/nvme1 is being reallocated from namespace namespace-0 to \
             namespace new-namespace-0 without being cleaned-up first"
        );
    }

    #[test]
    fn test_removal_diagnostic() {
        let violation = TransitionViolation::DeviceRemovalUnsupported {
            device: "/dev/nvme1".into(),
            namespace: "namespace-0".into(),
            location: snafu::Location::new("test.rs", 1, 1),
        };
        assert_eq!(
            violation.to_string(),
            "device /dev/nvme1 is being removed from namespace namespace-0. \
             Operation not yet supported by the operator"
        );
    }

    #[test]
    fn test_kind_immutable_diagnostic() {
        let violation = TransitionViolation::StorageEngineKindImmutable {
            field: "type",
            namespace: "namespace-0".into(),
            location: snafu::Location::new("test.rs", 1, 1),
        };
        assert_eq!(
            violation.to_string(),
            "type of storage-engine cannot be changed (namespace=namespace-0)"
        );
    }

    #[test]
    fn test_duplicate_within_snapshot_diagnostic() {
        let violation = TransitionViolation::DuplicateDeviceWithinSnapshot {
            device: "/dev/nvme2".into(),
            first: "a".into(),
            second: "b".into(),
            location: snafu::Location::new("test.rs", 1, 1),
        };
        assert_eq!(
            violation.to_string(),
            "device /dev/nvme2 is referenced by multiple namespaces (a, b) within a \
             single configuration"
        );
    }

    #[test]
    fn test_topology_error_diagnostics() {
        let err = TopologyError::MissingNamespaceName { index: 2, location: snafu::Location::new("test.rs", 1, 1) };
        assert_eq!(err.to_string(), "namespace at index 2 has no name");

        let err = TopologyError::UnknownStorageEngineKind {
            namespace: "ns0".into(),
            kind: "pmem".into(),
            location: snafu::Location::new("test.rs", 1, 1),
        };
        assert_eq!(err.to_string(), "namespace ns0 has unknown storage-engine type \"pmem\"");
    }
}
