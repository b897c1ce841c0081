//! Entries and attribute values held by the simulated directory

use ads_path::AdsPath;
use ads_types::Capability;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Attribute value as stored by the simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimValue {
    String(String),
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Bytes(Vec<u8>),
    Identifier(Uuid),
    /// Returned as an object reference exposing the large-integer capability
    LargeInteger { high: i32, low: i32 },
    /// Returned as an object reference exposing nothing but itself
    Opaque,
}

impl From<&str> for SimValue {
    fn from(value: &str) -> Self {
        SimValue::String(value.to_string())
    }
}

impl From<bool> for SimValue {
    fn from(value: bool) -> Self {
        SimValue::Bool(value)
    }
}

impl From<i32> for SimValue {
    fn from(value: i32) -> Self {
        SimValue::Int32(value)
    }
}

impl From<i64> for SimValue {
    fn from(value: i64) -> Self {
        SimValue::Int64(value)
    }
}

/// Shape in which an attribute is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    /// One-dimensional array of self-describing values
    #[default]
    Array,
    /// First value only, not wrapped in an array
    Scalar,
    /// Array reporting the given number of dimensions
    Dimensions(u32),
    /// Array whose elements carry no type tag
    Untagged,
}

/// A stored attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimAttribute {
    pub values: Vec<SimValue>,
    pub shape: Shape,
}

impl SimAttribute {
    pub fn new(values: Vec<SimValue>) -> Self {
        Self {
            values,
            shape: Shape::Array,
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }
}

/// A directory entry
#[derive(Debug, Clone)]
pub struct SimObject {
    pub(crate) path: String,
    pub(crate) name: String,
    pub(crate) class: String,
    pub(crate) guid: String,
    pub(crate) parent: String,
    pub(crate) capabilities: Vec<Capability>,
    pub(crate) attributes: BTreeMap<String, SimAttribute>,
}

impl SimObject {
    /// Creates an entry at `path` with schema class `class`
    ///
    /// The path is normalized the same way the client normalizes paths, so
    /// lookups succeed regardless of scheme casing.
    pub fn new(path: &str, class: &str) -> Self {
        Self {
            path: normalize(path),
            name: String::new(),
            class: class.to_string(),
            guid: Uuid::new_v4().braced().to_string(),
            parent: String::new(),
            capabilities: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the relative name
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Places the entry under the container at `parent`
    pub fn under(mut self, parent: &str) -> Self {
        self.parent = normalize(parent);
        self
    }

    /// Sets the identifier text reported by the provider, verbatim
    pub fn guid_text(mut self, text: &str) -> Self {
        self.guid = text.to_string();
        self
    }

    /// Exposes an additional capability
    pub fn capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Stores an attribute as an array of values
    pub fn attr(self, name: &str, values: Vec<SimValue>) -> Self {
        self.attr_with(name, SimAttribute::new(values))
    }

    /// Stores an attribute with an explicit shape
    pub fn attr_with(mut self, name: &str, attribute: SimAttribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn supports(&self, capability: Capability) -> bool {
        matches!(capability, Capability::Unknown | Capability::Object)
            || self.capabilities.contains(&capability)
    }

    pub(crate) fn matches_filter(&self, filter: &[String]) -> bool {
        filter.is_empty() || filter.iter().any(|class| class.eq_ignore_ascii_case(&self.class))
    }
}

/// Canonical form of a path, used as the lookup key
pub fn normalize(path: &str) -> String {
    AdsPath::parse(path)
        .map(|parsed| parsed.to_string())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_normalized() {
        let obj = SimObject::new("ldap://dc01/CN=x", "user").under("ldap://dc01/DC=y");
        assert_eq!(obj.path(), "LDAP://dc01/CN=x");
        assert_eq!(obj.parent, "LDAP://dc01/DC=y");
    }

    #[test]
    fn test_object_capability_is_implicit() {
        let obj = SimObject::new("LDAP://dc01/CN=x", "group").capability(Capability::Group);
        assert!(obj.supports(Capability::Object));
        assert!(obj.supports(Capability::Group));
        assert!(!obj.supports(Capability::Container));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let obj = SimObject::new("LDAP://dc01/CN=x", "user");
        assert!(obj.matches_filter(&[]));
        assert!(obj.matches_filter(&["User".to_string()]));
        assert!(!obj.matches_filter(&["group".to_string()]));
    }
}
