//! Core types for the resource abstraction layer.
//!
//! Everything here is a plain value object: created fresh per call,
//! owned by the caller, never mutated after construction.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::{Map, Value};

/// Read/write capability of a provider attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// Attribute can only be read
    #[serde(rename = "r")]
    Read,
    /// Attribute can only be written
    #[serde(rename = "w")]
    Write,
    /// Attribute can be read and written
    #[serde(rename = "rw")]
    ReadWrite,
}

impl Kind {
    /// Get the wire code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            Kind::Read => "r",
            Kind::Write => "w",
            Kind::ReadWrite => "rw",
        }
    }

    /// Parse a kind from its wire code.
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "r" => Some(Kind::Read),
            "w" => Some(Kind::Write),
            "rw" => Some(Kind::ReadWrite),
            _ => None,
        }
    }

    /// Whether the attribute can be read.
    pub fn is_readable(&self) -> bool {
        matches!(self, Kind::Read | Kind::ReadWrite)
    }

    /// Whether the attribute can be written.
    pub fn is_writable(&self) -> bool {
        matches!(self, Kind::Write | Kind::ReadWrite)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema entry describing one attribute a provider can manage.
///
/// This is capability metadata, not a value: the type expression is
/// descriptive (e.g. `enum[present, absent]`) and is not enforced by
/// the client when applying changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name
    pub name: String,
    /// Human-readable description
    #[serde(rename = "desc")]
    pub description: String,
    /// Type expression, e.g. `string` or `enum[md5, mtime, none]`
    #[serde(rename = "type")]
    pub data_type: String,
    /// Read/write capability
    pub kind: Kind,
}

/// A pluggable implementation managing one resource category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Qualified name, `<type>::<implementation>` (e.g. `file::posix`)
    pub name: String,
    /// Resource category this provider manages (e.g. `file`)
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Origin of the provider (e.g. `builtin`, `external`)
    pub source: String,
    /// Human-readable description
    #[serde(rename = "desc")]
    pub description: String,
    /// Whether the provider can run on the current host
    pub suitable: bool,
    /// Schema of the attributes this provider manages, in engine order
    pub attributes: Vec<Attribute>,
}

impl Provider {
    /// Implementation half of the qualified `<type>::<implementation>` name.
    pub fn implementation(&self) -> Option<&str> {
        self.name.split_once("::").map(|(_, imp)| imp)
    }

    /// Look up an attribute's schema entry by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Origin tag identifying which type/provider pair produced a resource.
///
/// This is metadata about the resource, not an attribute of it; decoding
/// strips it out of the attribute map and attaches it here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ral {
    /// Resource category (e.g. `host`)
    #[serde(rename = "type", default)]
    pub resource_type: String,
    /// Qualified provider name (e.g. `host::aug`)
    #[serde(default)]
    pub provider: String,
}

/// One attribute delta reported by a mutation.
///
/// Only meaningful as a member of a [`Resource`]'s change list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Name of the attribute that changed
    #[serde(rename = "attr")]
    pub attribute: String,
    /// Value before the mutation
    #[serde(rename = "was")]
    pub before: String,
    /// Value after the mutation
    #[serde(rename = "is")]
    pub after: String,
}

/// One concrete resource instance as reported by the engine.
///
/// Attribute sets are provider-defined and heterogeneous per resource
/// type, so values stay dynamically typed; the schema lives in the
/// matching [`Provider`]'s attribute list.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    /// Resource name, unique within its resource type
    pub name: String,
    /// Which type/provider produced this resource
    #[serde(rename = "ral")]
    pub origin: Ral,
    /// Current attribute values, engine metadata removed
    pub attributes: Map<String, Value>,
    /// Verbatim engine payload for this one resource
    pub raw: Box<RawValue>,
    /// Attribute deltas; populated only when this resource is the result
    /// of a mutation
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<Change>,
}

impl Resource {
    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Look up an attribute value by name, as a string.
    ///
    /// Returns `None` if the attribute is absent or not a JSON string.
    pub fn attribute_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    /// Whether a mutation reported any changes for this resource.
    pub fn changed(&self) -> bool {
        !self.changes.is_empty()
    }
}
