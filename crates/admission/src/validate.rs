//! Transition validation between two storage topology snapshots.
//!
//! [`validate_transition`] is the admission decision for a proposed change to
//! a cluster's storage topology: it builds a device ownership view of both
//! the current and the proposed configuration and checks a fixed set of
//! safety invariants between them. It is a pure function — no I/O, no shared
//! state — and may be called concurrently for independent clusters.
//!
//! The checks run as ordered passes over the device and namespace universe:
//!
//! 1. The current snapshot must be internally consistent (no device claimed
//!    twice).
//! 2. The proposal must not claim one device under two namespaces.
//! 3. No device may move between namespaces without an intervening removal.
//! 4. No device may vanish from the cluster (removal is unsupported).
//! 5. No existing namespace may change its storage-engine kind.
//!
//! The first violation found is the verdict. Namespaces and devices are
//! walked in declaration order, so repeated validation of the same snapshot
//! pair always reports the same violation.

use quartzdb_operator_types::error::{
    DeviceReallocatedWithoutCleanupSnafu, DeviceReferencedInMultipleNamespacesSnafu,
    DeviceRemovalUnsupportedSnafu, DuplicateDeviceWithinSnapshotSnafu,
    StorageEngineKindImmutableSnafu,
};
use quartzdb_operator_types::{NamespaceTopology, TopologyError, TransitionViolation};
use serde_json::Value;
use snafu::{Location, ResultExt, Snafu};
use tracing::debug;

use crate::extract::extract_topology;
use crate::ownership::OwnershipIndex;

/// Validates a proposed transition between two storage topologies.
///
/// `old` is the configuration currently in effect, `new` the configuration an
/// operator wants to move to. Acceptance means the end-state is safe to move
/// toward; how the transition executes is the reconciler's concern.
///
/// # Errors
///
/// Returns the first [`TransitionViolation`] found under the fixed traversal
/// order described at the module level.
pub fn validate_transition(
    old: &NamespaceTopology,
    new: &NamespaceTopology,
) -> Result<(), TransitionViolation> {
    debug!(
        old_namespaces = old.len(),
        new_namespaces = new.len(),
        "validating storage topology transition"
    );

    let old_index = OwnershipIndex::build(old).map_err(|dup| {
        DuplicateDeviceWithinSnapshotSnafu {
            device: dup.device,
            first: dup.first,
            second: dup.second,
        }
        .build()
    })?;

    // Check 1: cross-namespace reuse. Building the proposal's index walks the
    // full set of (namespace, device) claims, so a double claim surfaces here
    // with the (first claimant, second claimant) pair.
    let new_index = OwnershipIndex::build(new).map_err(|dup| {
        DeviceReferencedInMultipleNamespacesSnafu {
            device: dup.device,
            first: dup.first,
            second: dup.second,
        }
        .build()
    })?;

    // Check 2: unsafe reallocation. A device owned elsewhere in the current
    // configuration is moving namespaces without being cleaned up first.
    for (device, new_owner) in new_index.iter() {
        if let Some(old_owner) = old_index.owner(device) {
            if old_owner != new_owner {
                return DeviceReallocatedWithoutCleanupSnafu {
                    device: device.clone(),
                    old_owner: old_owner.clone(),
                    new_owner: new_owner.clone(),
                }
                .fail();
            }
        }
    }

    // Check 3: unsupported removal. A device present today is simply gone
    // from the proposal — not reassigned, not reused.
    for (device, namespace) in old_index.iter() {
        if !new_index.contains(device) {
            return DeviceRemovalUnsupportedSnafu {
                device: device.clone(),
                namespace: namespace.clone(),
            }
            .fail();
        }
    }

    // Check 4: storage-engine kind is immutable for namespaces surviving the
    // transition.
    for (namespace, storage) in new.iter() {
        if let Some(existing) = old.get(namespace) {
            if existing.kind != storage.kind {
                return StorageEngineKindImmutableSnafu {
                    field: "type",
                    namespace: namespace.clone(),
                }
                .fail();
            }
        }
    }

    debug!("storage topology transition accepted");
    Ok(())
}

/// Admission failure for a raw configuration update.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum AdmissionError {
    /// The configuration currently in effect could not be normalized.
    #[snafu(display("current configuration is unusable: {source}"))]
    CurrentConfig {
        /// Extraction failure.
        source: TopologyError,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// The proposed configuration could not be normalized.
    #[snafu(display("proposed configuration is unusable: {source}"))]
    ProposedConfig {
        /// Extraction failure.
        source: TopologyError,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// The transition violates a storage safety invariant. The display string
    /// is the violation's diagnostic, forwarded verbatim.
    #[snafu(display("{source}"))]
    Rejected {
        /// The violated invariant.
        source: TransitionViolation,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },
}

/// Validates a proposed update between two raw configuration values.
///
/// Convenience composition of [`extract_topology`] over both snapshots and
/// [`validate_transition`] — the exact sequence the admission transport runs
/// per update request.
///
/// # Errors
///
/// Returns [`AdmissionError`] if either snapshot cannot be normalized or the
/// transition between them is unsafe.
pub fn validate_storage_update(old: &Value, new: &Value) -> Result<(), AdmissionError> {
    let old_topology = extract_topology(old).context(CurrentConfigSnafu)?;
    let new_topology = extract_topology(new).context(ProposedConfigSnafu)?;
    validate_transition(&old_topology, &new_topology).context(RejectedSnafu)
}
