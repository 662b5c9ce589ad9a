//! # ralkit
//!
//! Typed Rust client for a libral-style resource abstraction layer (RAL).
//!
//! A RAL engine exposes "providers" (pluggable implementations that know
//! how to inspect and mutate one category of system resource: files,
//! hosts, packages, ...) and the "resources" those providers manage.
//! This crate covers the client side of that contract:
//! - Discovering providers and their attribute schemas
//! - Querying resources of a type, or one resource by name
//! - Applying attribute changes and reporting what actually changed
//! - Translating raw engine payloads and status codes into typed values
//!   and typed failures
//!
//! The engine itself is an external collaborator. The default backend
//! drives its `ralsh` command-line front end; any other transport can be
//! plugged in through the [`backend::Backend`] trait.
//!
//! ## Example
//!
//! ```no_run
//! use ralkit::Client;
//! use std::collections::HashMap;
//!
//! // Create a client
//! let client = Client::new().expect("ralsh not available");
//!
//! // Discover providers
//! for provider in client.list_providers().expect("listing failed") {
//!     println!("{} ({}, suitable: {})", provider.name, provider.source, provider.suitable);
//! }
//!
//! // Query all host entries
//! let hosts = client.list_resources("host").expect("query failed");
//! for host in &hosts {
//!     println!("{} -> {:?}", host.name, host.attribute_str("ip"));
//! }
//!
//! // Mutate one resource and report what changed
//! let mut desired = HashMap::new();
//! desired.insert("ip".to_string(), "192.168.0.1".to_string());
//! let updated = client.apply_resource("host", "localhost", &desired).expect("apply failed");
//! for change in &updated.changes {
//!     println!("{}: '{}' -> '{}'", change.attribute, change.before, change.after);
//! }
//! ```
//!
//! ## Concurrency
//!
//! Every operation is one blocking synchronous round trip; the client
//! holds no shared mutable state and caches nothing between calls. If
//! the underlying engine is not reentrant, serialize calls in the
//! embedding application.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod decode;
pub mod error;
pub mod types;

pub use error::{Error, ErrorCategory, Result};
pub use types::{Attribute, Change, Kind, Provider, Ral, Resource};

use backend::{Backend, ralsh::RalshBackend};
use std::collections::HashMap;

/// High-level client for RAL operations.
///
/// The client composes a gateway backend with payload decoding and
/// per-call argument validation, returning domain values or a typed
/// failure. It is constructed once by the embedding application and
/// passed wherever engine access is needed; there is no ambient global
/// engine handle.
pub struct Client {
    backend: Box<dyn Backend>,
}

impl Client {
    /// Create a new Client with the default ralsh backend.
    ///
    /// Returns an error if no ralsh executable can be found.
    pub fn new() -> Result<Self> {
        let backend = RalshBackend::new()?;
        Ok(Self {
            backend: Box::new(backend),
        })
    }

    /// Create a client with a custom backend (useful for testing).
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Check if the engine is available.
    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    /// List every provider the engine knows about, in the engine's
    /// listing order.
    ///
    /// The order is deterministic within one call but not guaranteed
    /// stable across engine versions.
    pub fn list_providers(&self) -> Result<Vec<Provider>> {
        let payload = self.backend.providers()?;
        decode::providers(&payload)
    }

    /// List all resources of the given type.
    ///
    /// An unknown type is reported by the engine, not rejected here; a
    /// successful engine reply with zero resources is an empty list, not
    /// a failure.
    pub fn list_resources(&self, resource_type: &str) -> Result<Vec<Resource>> {
        require_type(resource_type)?;
        let payload = self.backend.resources(resource_type)?;
        decode::resources(resource_type, &payload)
    }

    /// Fetch exactly one resource by type and name.
    ///
    /// "Not found" and "ambiguous name" both surface as engine-level
    /// status codes; the client does not distinguish them further.
    pub fn get_resource(&self, resource_type: &str, resource_name: &str) -> Result<Resource> {
        require_type(resource_type)?;
        let payload = self.backend.resource(resource_type, resource_name)?;
        decode::resource(&payload)
    }

    /// Apply the desired attribute values to one named resource.
    ///
    /// Returns the resulting resource with its change list populated:
    /// one [`Change`] per attribute the engine reports as altered, which
    /// is not necessarily one per attribute requested. Attribute values
    /// are not pre-validated against the provider schema; the engine is
    /// trusted to reject bad values through its status channel.
    pub fn apply_resource(
        &self,
        resource_type: &str,
        resource_name: &str,
        desired: &HashMap<String, String>,
    ) -> Result<Resource> {
        require_type(resource_type)?;
        if desired.is_empty() {
            return Err(Error::InvalidArgument {
                message: "no attributes to apply".to_string(),
            });
        }

        let payload = self
            .backend
            .apply(resource_type, resource_name, desired)?;
        decode::resource(&payload)
    }
}

fn require_type(resource_type: &str) -> Result<()> {
    if resource_type.is_empty() {
        return Err(Error::InvalidArgument {
            message: "resource type must not be empty".to_string(),
        });
    }
    Ok(())
}
