//! Configuration and topology fixtures.
//!
//! Builders for the two input shapes admission tests work with: raw
//! configuration JSON as the transport would deliver it, and already-
//! normalized [`NamespaceTopology`] values. Namespaces with an empty device
//! slice become memory-backed, so one `(name, devices)` pair list describes
//! any snapshot.

use quartzdb_operator_types::{NamespaceStorage, NamespaceTopology};
use serde_json::{Value, json};

/// Returns a minimal raw configuration with no namespaces.
///
/// Carries the unrelated top-level keys a real configuration would (TLS,
/// replication), which extraction must ignore.
#[must_use]
pub fn base_config() -> Value {
    json!({
        "namespaces": [],
        "tls-name": "test-tls",
        "replication-factor": 2,
        "tls-authenticate-client": "test-auth-tls",
    })
}

/// Appends a device-backed namespace to a raw configuration, or extends the
/// device list of an existing namespace with that name.
///
/// # Panics
///
/// Panics if `config` does not carry a `namespaces` array (use
/// [`base_config`] as the starting point).
pub fn add_device_namespace(config: &mut Value, namespace: &str, devices: &[&str]) {
    let entries = namespaces_mut(config);
    if let Some(entry) = entries
        .iter_mut()
        .find(|entry| entry.get("name").and_then(Value::as_str) == Some(namespace))
    {
        let list = entry["storage-engine"]["devices"]
            .as_array_mut()
            .expect("existing namespace fixture has a device list");
        list.extend(devices.iter().map(|device| json!(device)));
        return;
    }
    entries.push(json!({
        "name": namespace,
        "storage-engine": {
            "type": "device",
            "devices": devices,
        },
    }));
}

/// Appends a memory-backed namespace to a raw configuration.
///
/// # Panics
///
/// Panics if `config` does not carry a `namespaces` array.
pub fn add_memory_namespace(config: &mut Value, namespace: &str) {
    namespaces_mut(config).push(json!({
        "name": namespace,
        "storage-engine": { "type": "memory" },
    }));
}

fn namespaces_mut(config: &mut Value) -> &mut Vec<Value> {
    config["namespaces"].as_array_mut().expect("config fixture has a namespaces array")
}

/// Builds a raw configuration from `(namespace, devices)` pairs, in order.
///
/// An empty device slice declares a memory-backed namespace.
#[must_use]
pub fn config_from(entries: &[(&str, &[&str])]) -> Value {
    let mut config = base_config();
    for (namespace, devices) in entries {
        if devices.is_empty() {
            add_memory_namespace(&mut config, namespace);
        } else {
            add_device_namespace(&mut config, namespace, devices);
        }
    }
    config
}

/// Builds a normalized topology from `(namespace, devices)` pairs, in order.
///
/// An empty device slice declares a memory-backed namespace.
#[must_use]
pub fn topology(entries: &[(&str, &[&str])]) -> NamespaceTopology {
    entries
        .iter()
        .map(|(namespace, devices)| {
            let storage = if devices.is_empty() {
                NamespaceStorage::memory_backed()
            } else {
                NamespaceStorage::device_backed(devices.iter().copied())
            };
            (*namespace, storage)
        })
        .collect()
}
