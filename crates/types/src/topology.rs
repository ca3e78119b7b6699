//! Storage topology model for a cluster configuration snapshot.
//!
//! A snapshot enumerates named namespaces, each persisting data either in
//! memory or on a set of block devices. [`NamespaceTopology`] is the
//! normalized form consumed by admission validation: a mapping from namespace
//! name to its storage declaration, preserving declaration order so that
//! repeated validation of the same snapshot pair walks namespaces and devices
//! in the same order every time.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `String` for type-safe identifiers.
///
/// Each generated type provides:
/// - Standard derives: Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord
/// - Serde with `#[serde(transparent)]` for wire format compatibility
/// - `From<String>` / `From<&str>` conversions
/// - `Display` printing the raw identifier (diagnostics embed these verbatim)
macro_rules! define_name {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from a raw string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_name!(
    /// Name of a logical namespace, unique within one configuration snapshot.
    NamespaceName
);

define_name!(
    /// Identifier of a persistent block device (e.g. `/dev/nvme1`).
    ///
    /// Device identifiers are globally comparable across namespaces and across
    /// the old/new snapshots of a transition: the same string always refers to
    /// the same physical device.
    DeviceId
);

/// Persistence strategy of a namespace. Immutable once the namespace exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageEngineKind {
    /// Data persists on a set of block devices.
    Device,
    /// Data lives in memory only.
    Memory,
}

impl StorageEngineKind {
    /// Returns the configuration wire string for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Device => "device",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for StorageEngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StorageEngineKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "device" => Ok(Self::Device),
            "memory" => Ok(Self::Memory),
            other => Err(UnknownKind { kind: other.to_string() }),
        }
    }
}

/// Parse error for [`StorageEngineKind`] wire strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind {
    /// The unrecognized kind string.
    pub kind: String,
}

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown storage-engine type {:?}", self.kind)
    }
}

impl std::error::Error for UnknownKind {}

/// Storage declaration of a single namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceStorage {
    /// How the namespace persists data.
    pub kind: StorageEngineKind,
    /// Devices backing the namespace, in declaration order. Empty only for
    /// memory-backed namespaces.
    pub devices: Vec<DeviceId>,
}

impl NamespaceStorage {
    /// Declares a device-backed namespace over the given devices.
    pub fn device_backed<I, D>(devices: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<DeviceId>,
    {
        Self {
            kind: StorageEngineKind::Device,
            devices: devices.into_iter().map(Into::into).collect(),
        }
    }

    /// Declares a memory-backed (deviceless) namespace.
    #[must_use]
    pub const fn memory_backed() -> Self {
        Self { kind: StorageEngineKind::Memory, devices: Vec::new() }
    }
}

/// Normalized storage topology of one configuration snapshot.
///
/// Namespaces iterate in declaration order (first seen in the raw
/// configuration), which is what makes first-violation reporting
/// deterministic across repeated validation of the same snapshot pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceTopology {
    namespaces: IndexMap<NamespaceName, NamespaceStorage>,
}

impl NamespaceTopology {
    /// Creates an empty topology.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a namespace declaration, replacing any previous declaration under
    /// the same name. Insertion order of first declaration is preserved.
    pub fn insert(&mut self, name: impl Into<NamespaceName>, storage: NamespaceStorage) {
        self.namespaces.insert(name.into(), storage);
    }

    /// Looks up a namespace's storage declaration.
    #[must_use]
    pub fn get(&self, name: &NamespaceName) -> Option<&NamespaceStorage> {
        self.namespaces.get(name)
    }

    /// Whether a namespace is declared in this snapshot.
    #[must_use]
    pub fn contains(&self, name: &NamespaceName) -> bool {
        self.namespaces.contains_key(name)
    }

    /// Iterates namespaces in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&NamespaceName, &NamespaceStorage)> {
        self.namespaces.iter()
    }

    /// Number of declared namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Whether the snapshot declares no namespaces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

impl<N> FromIterator<(N, NamespaceStorage)> for NamespaceTopology
where
    N: Into<NamespaceName>,
{
    fn from_iter<T: IntoIterator<Item = (N, NamespaceStorage)>>(iter: T) -> Self {
        Self {
            namespaces: iter.into_iter().map(|(name, storage)| (name.into(), storage)).collect(),
        }
    }
}
