//! Domain types and error taxonomy for QuartzDB operator admission validation.
//!
//! This crate provides the foundational types shared by the admission layer:
//! - Identifier newtypes ([`NamespaceName`], [`DeviceId`])
//! - The normalized storage topology model ([`NamespaceTopology`])
//! - Error types using snafu ([`TopologyError`], [`TransitionViolation`])

#![deny(unsafe_code)]

pub mod error;
pub mod topology;

// Re-export commonly used types at crate root
pub use error::{TopologyError, TransitionViolation};
pub use topology::{
    DeviceId, NamespaceName, NamespaceStorage, NamespaceTopology, StorageEngineKind,
};
