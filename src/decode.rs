//! Decoding of raw engine payloads into domain values.
//!
//! A payload either decodes completely or the call fails as a whole;
//! elements are never silently dropped or fabricated. A missing
//! top-level container key is a contract violation, not "zero results".
//!
//! Resource elements are decoded in two passes because attribute keys
//! are provider-defined and unknown in advance: first the fixed fields
//! (`name`, `ral`), then the same element again as a generic map that
//! becomes the attribute set once the `ral` metadata key is removed.

use crate::error::{Error, Result};
use crate::types::{Change, Provider, Ral, Resource};
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use std::collections::HashSet;

#[derive(Deserialize)]
struct ProvidersEnvelope {
    providers: Vec<Provider>,
}

#[derive(Deserialize)]
struct ResourcesEnvelope {
    resources: Vec<Box<RawValue>>,
}

#[derive(Deserialize)]
struct ResourceEnvelope {
    resource: Box<RawValue>,
    #[serde(default)]
    changes: Vec<Change>,
}

/// Fixed fields of a resource element. The `ral` key is optional on the
/// wire; a missing tag decodes to the empty default.
#[derive(Deserialize)]
struct ResourceHeader {
    name: String,
    #[serde(default)]
    ral: Ral,
}

/// Decode a providers listing payload.
pub fn providers(payload: &str) -> Result<Vec<Provider>> {
    let envelope: ProvidersEnvelope = serde_json::from_str(payload)?;
    Ok(envelope.providers)
}

/// Decode a resources listing payload for the given resource type.
///
/// Fails with [`Error::MultipleMatches`] if two elements share a name.
pub fn resources(resource_type: &str, payload: &str) -> Result<Vec<Resource>> {
    let envelope: ResourcesEnvelope = serde_json::from_str(payload)?;

    let mut seen = HashSet::new();
    let mut decoded = Vec::with_capacity(envelope.resources.len());
    for raw in envelope.resources {
        let resource = resource_from_raw(raw, Vec::new())?;
        if !seen.insert(resource.name.clone()) {
            return Err(Error::MultipleMatches {
                resource_type: resource_type.to_string(),
                name: resource.name,
            });
        }
        decoded.push(resource);
    }

    Ok(decoded)
}

/// Decode a single-resource or mutation-result payload.
///
/// An absent `changes` key decodes to an empty change list.
pub fn resource(payload: &str) -> Result<Resource> {
    let envelope: ResourceEnvelope = serde_json::from_str(payload)?;
    resource_from_raw(envelope.resource, envelope.changes)
}

fn resource_from_raw(raw: Box<RawValue>, changes: Vec<Change>) -> Result<Resource> {
    let header: ResourceHeader = serde_json::from_str(raw.get())?;
    let mut attributes: Map<String, Value> = serde_json::from_str(raw.get())?;
    attributes.remove("ral");

    Ok(Resource {
        name: header.name,
        origin: header.ral,
        attributes,
        raw,
        changes,
    })
}
