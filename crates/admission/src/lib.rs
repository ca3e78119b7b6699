//! Admission validation for QuartzDB storage topology transitions.
//!
//! This crate decides whether a proposed change to a cluster's per-namespace
//! storage topology is safe to apply, before the reconciler is allowed to act
//! on it. Three components compose leaf-to-root:
//!
//! - [`extract::extract_topology`] — normalizes a loosely-typed configuration
//!   snapshot into a [`NamespaceTopology`](quartzdb_operator_types::NamespaceTopology).
//! - [`ownership::OwnershipIndex`] — maps every device in one snapshot to the
//!   single namespace claiming it.
//! - [`validate::validate_transition`] — checks the safety invariants between
//!   the current and the proposed topology and returns the verdict.
//!
//! The whole crate is pure computation: no I/O, no shared state, safe to call
//! concurrently for independent clusters. The transport layer that carries
//! configuration objects over the wire lives elsewhere.

#![deny(unsafe_code)]

pub mod extract;
pub mod ownership;
pub mod validate;

pub use extract::extract_topology;
pub use ownership::{DuplicateClaim, OwnershipIndex};
pub use validate::{AdmissionError, validate_storage_update, validate_transition};
