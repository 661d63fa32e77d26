//! Engine configuration.
//!
//! This module provides the [`EngineConfig`] type, loaded from a YAML
//! file, covering the server bind address, the transient-failure retry
//! policy, and the bootstrap seed applied to an empty store.

mod loader;
mod types;

pub use types::{
    AdminSeed, DeductionSeed, EngineConfig, RetryConfig, SeedConfig, ServerConfig,
};
