//! Topology extraction from loosely-typed configuration values.
//!
//! Cluster configurations arrive as free-form JSON shaped by upstream schema
//! defaulting. This module normalizes the storage-relevant slice of one
//! snapshot into a [`NamespaceTopology`], isolating the validator from any
//! dynamic-typing concerns. Only the `namespaces` key is inspected; every
//! other top-level key belongs to upstream schema validation and is ignored.
//!
//! Expected shape:
//!
//! ```json
//! {
//!   "namespaces": [
//!     {"name": "ns0", "storage-engine": {"type": "device", "devices": ["/dev/nvme1"]}},
//!     {"name": "cache", "storage-engine": {"type": "memory"}}
//!   ]
//! }
//! ```

use quartzdb_operator_types::error::{
    DuplicateNamespaceNameSnafu, MalformedDeviceListSnafu, MissingDeviceListSnafu,
    MissingNamespaceNameSnafu, MissingStorageEngineSnafu, NamespaceNotAnObjectSnafu,
    NamespacesNotAListSnafu, UnknownStorageEngineKindSnafu,
};
use quartzdb_operator_types::{
    DeviceId, NamespaceName, NamespaceStorage, NamespaceTopology, StorageEngineKind, TopologyError,
};
use serde_json::{Map, Value};
use snafu::{OptionExt, ensure};

/// Normalizes a raw configuration snapshot into a [`NamespaceTopology`].
///
/// A missing, null, or empty `namespaces` key yields an empty topology.
///
/// # Errors
///
/// Returns [`TopologyError`] when the shape is structurally unusable: a
/// non-array `namespaces` value, an entry without a string `name`, a repeated
/// namespace name, a missing or unknown storage engine, or a device list that
/// is absent, empty, or not a list of strings for a device-backed namespace.
pub fn extract_topology(config: &Value) -> Result<NamespaceTopology, TopologyError> {
    let entries = match config.get("namespaces") {
        None | Some(Value::Null) => return Ok(NamespaceTopology::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => return NamespacesNotAListSnafu.fail(),
    };

    let mut topology = NamespaceTopology::new();
    for (index, entry) in entries.iter().enumerate() {
        let object = entry.as_object().context(NamespaceNotAnObjectSnafu { index })?;
        let name: NamespaceName = object
            .get("name")
            .and_then(Value::as_str)
            .context(MissingNamespaceNameSnafu { index })?
            .into();
        ensure!(!topology.contains(&name), DuplicateNamespaceNameSnafu { name: name.clone() });

        let storage = extract_storage(&name, object)?;
        topology.insert(name, storage);
    }
    Ok(topology)
}

/// Normalizes one namespace entry's `storage-engine` object.
fn extract_storage(
    name: &NamespaceName,
    object: &Map<String, Value>,
) -> Result<NamespaceStorage, TopologyError> {
    let engine = object
        .get("storage-engine")
        .and_then(Value::as_object)
        .context(MissingStorageEngineSnafu { namespace: name.clone() })?;
    let kind_str = engine
        .get("type")
        .and_then(Value::as_str)
        .context(MissingStorageEngineSnafu { namespace: name.clone() })?;
    let kind: StorageEngineKind = kind_str.parse().map_err(|_| {
        UnknownStorageEngineKindSnafu { namespace: name.clone(), kind: kind_str.to_string() }
            .build()
    })?;

    match kind {
        StorageEngineKind::Device => {
            let devices = extract_devices(name, engine.get("devices"))?;
            ensure!(!devices.is_empty(), MissingDeviceListSnafu { namespace: name.clone() });
            Ok(NamespaceStorage { kind, devices })
        },
        StorageEngineKind::Memory => {
            // A memory-backed namespace may omit `devices` or declare an
            // empty list, but never actual devices.
            match engine.get("devices") {
                None | Some(Value::Null) => {},
                Some(Value::Array(devices)) if devices.is_empty() => {},
                Some(_) => {
                    return MalformedDeviceListSnafu {
                        namespace: name.clone(),
                        reason: "memory-backed namespace cannot declare devices",
                    }
                    .fail();
                },
            }
            Ok(NamespaceStorage::memory_backed())
        },
    }
}

/// Normalizes a `devices` value into an ordered list of device identifiers.
fn extract_devices(
    name: &NamespaceName,
    devices: Option<&Value>,
) -> Result<Vec<DeviceId>, TopologyError> {
    let list = match devices {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(list)) => list,
        Some(_) => {
            return MalformedDeviceListSnafu {
                namespace: name.clone(),
                reason: "devices must be a list of device identifier strings",
            }
            .fail();
        },
    };
    list.iter()
        .enumerate()
        .map(|(index, device)| {
            device.as_str().map(DeviceId::from).context(MalformedDeviceListSnafu {
                namespace: name.clone(),
                reason: format!("element at index {index} is not a string"),
            })
        })
        .collect()
}
