//! Shared test utilities for QuartzDB operator crates.
//!
//! This crate provides common test helpers to reduce boilerplate across test
//! modules:
//!
//! - [`base_config`] / [`config_from`] - raw configuration JSON fixtures
//! - [`topology`] - normalized topology fixtures from `(name, devices)` pairs
//! - [`strategies`] - proptest generators for well-formed topologies

#![deny(unsafe_code)]
// Test utilities are allowed to use expect for simplicity
#![allow(clippy::expect_used)]

mod fixtures;
pub use fixtures::{
    add_device_namespace, add_memory_namespace, base_config, config_from, topology,
};

pub mod strategies;
