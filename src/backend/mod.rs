//! Gateway abstraction over the resource engine.
//!
//! The [`Backend`] trait defines the four raw calls the client issues,
//! allowing for different implementations (real ralsh subprocess, fakes
//! for testing). Each call is a single synchronous round trip returning
//! the engine's UTF-8 payload, or [`Error::Engine`](crate::Error::Engine)
//! carrying the engine's nonzero status code verbatim.

pub mod ralsh;

use crate::error::Result;
use std::collections::HashMap;

/// Backend trait for raw engine calls.
///
/// Argument validation happens in the client before any of these are
/// invoked; implementations pass inputs through untouched. The desired
/// attribute set crosses this boundary as a structured map; lowering it
/// to the engine's `key=value` transport form is an implementation
/// detail of the concrete backend.
pub trait Backend: Send + Sync {
    /// Check if the engine is available.
    fn is_available(&self) -> bool;

    /// List every provider the engine knows about.
    fn providers(&self) -> Result<String>;

    /// List all resources of the given type.
    fn resources(&self, resource_type: &str) -> Result<String>;

    /// Fetch one named resource of the given type.
    fn resource(&self, resource_type: &str, resource_name: &str) -> Result<String>;

    /// Apply the desired attribute values to one named resource.
    ///
    /// This is the only call with side effects outside this process.
    fn apply(
        &self,
        resource_type: &str,
        resource_name: &str,
        desired: &HashMap<String, String>,
    ) -> Result<String>;
}

/// Get the default backend (real ralsh subprocess).
pub fn default_backend() -> Result<ralsh::RalshBackend> {
    ralsh::RalshBackend::new()
}
