//! Attribute value model
//!
//! Providers return attribute values as self-describing scalars, usually
//! wrapped in a one-dimensional array.

use crate::remote::RemoteRef;
use std::fmt;
use uuid::Uuid;

/// A self-describing attribute value
pub enum AttrValue {
    String(String),
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Bytes(Vec<u8>),
    Identifier(Uuid),
    /// A reference to a remote entity, owned by this value
    ObjectRef(RemoteRef),
}

impl AttrValue {
    /// Short name of the value's kind, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::String(_) => "string",
            AttrValue::Bool(_) => "bool",
            AttrValue::Int32(_) => "int32",
            AttrValue::Int64(_) => "int64",
            AttrValue::Bytes(_) => "bytes",
            AttrValue::Identifier(_) => "identifier",
            AttrValue::ObjectRef(_) => "object",
        }
    }

    /// Returns true for the remote reference kind
    pub fn is_object_ref(&self) -> bool {
        matches!(self, AttrValue::ObjectRef(_))
    }
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::String(v) => f.debug_tuple("String").field(v).finish(),
            AttrValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            AttrValue::Int32(v) => f.debug_tuple("Int32").field(v).finish(),
            AttrValue::Int64(v) => f.debug_tuple("Int64").field(v).finish(),
            AttrValue::Bytes(v) => f.debug_tuple("Bytes").field(&hex::encode(v)).finish(),
            AttrValue::Identifier(v) => f.debug_tuple("Identifier").field(v).finish(),
            AttrValue::ObjectRef(_) => f.write_str("ObjectRef(..)"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int32(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int64(value)
    }
}

impl From<Vec<u8>> for AttrValue {
    fn from(value: Vec<u8>) -> Self {
        AttrValue::Bytes(value)
    }
}

impl From<Uuid> for AttrValue {
    fn from(value: Uuid) -> Self {
        AttrValue::Identifier(value)
    }
}

/// An array of attribute values as reported by a provider
///
/// Besides the elements, the provider reports the number of dimensions and
/// whether each element carries its own type tag.
#[derive(Debug)]
pub struct AttributeArray {
    dimensions: u32,
    self_describing: bool,
    elements: Vec<AttrValue>,
}

impl AttributeArray {
    /// A one-dimensional array of self-describing values
    pub fn new(elements: Vec<AttrValue>) -> Self {
        Self {
            dimensions: 1,
            self_describing: true,
            elements,
        }
    }

    /// Sets the reported number of dimensions
    pub fn with_dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Marks the elements as untagged
    pub fn untagged(mut self) -> Self {
        self.self_describing = false;
        self
    }

    /// Reported number of dimensions
    pub fn dimensions(&self) -> u32 {
        self.dimensions
    }

    /// Returns true if every element carries its own type tag
    pub fn is_self_describing(&self) -> bool {
        self.self_describing
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Consumes the array, yielding its elements
    pub fn into_elements(self) -> Vec<AttrValue> {
        self.elements
    }
}

/// Raw result of fetching one attribute
#[derive(Debug)]
pub enum AttributeData {
    Scalar(AttrValue),
    Array(AttributeArray),
}

impl From<AttributeArray> for AttributeData {
    fn from(array: AttributeArray) -> Self {
        AttributeData::Array(array)
    }
}

impl From<AttrValue> for AttributeData {
    fn from(value: AttrValue) -> Self {
        AttributeData::Scalar(value)
    }
}
