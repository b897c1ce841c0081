//! Capability tags
//!
//! A remote directory entity exposes one or more capabilities. Narrowing a
//! handle (object to container, object to group, ...) is always an explicit
//! query for one of these tags and yields a new, independently owned
//! reference.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A capability a remote directory entity may expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Generic reference; every remote entity has it
    Unknown,
    /// Identity accessors and the attribute store
    Object,
    /// Child enumeration and lookup
    Container,
    /// Group membership management
    Group,
    /// User account properties
    User,
    /// Computer account properties
    Computer,
    /// Enumeration of a group's members
    Members,
    /// Binding paths within one namespace
    OpenDsObject,
    /// A 64-bit integer split into two 32-bit halves
    LargeInteger,
    /// Conversion of object names between formats
    NameTranslate,
}

impl Capability {
    /// All capability tags, in declaration order
    pub const ALL: [Capability; 10] = [
        Capability::Unknown,
        Capability::Object,
        Capability::Container,
        Capability::Group,
        Capability::User,
        Capability::Computer,
        Capability::Members,
        Capability::OpenDsObject,
        Capability::LargeInteger,
        Capability::NameTranslate,
    ];

    /// Returns the interface identifier providers associate with this capability
    pub const fn interface_id(self) -> Uuid {
        let bytes = match self {
            Capability::Unknown => [
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x46,
            ],
            Capability::Object => [
                0xFD, 0x82, 0x56, 0xD0, 0xFD, 0x15, 0x11, 0xCE, 0xAB, 0xC4, 0x02, 0x60, 0x8C,
                0x9E, 0x75, 0x53,
            ],
            Capability::Container => [
                0x00, 0x16, 0x77, 0xD0, 0xFD, 0x16, 0x11, 0xCE, 0xAB, 0xC4, 0x02, 0x60, 0x8C,
                0x9E, 0x75, 0x53,
            ],
            Capability::Group => [
                0x27, 0x63, 0x6B, 0x00, 0x41, 0x0F, 0x11, 0xCF, 0xB1, 0xFF, 0x02, 0x60, 0x8C,
                0x9E, 0x75, 0x53,
            ],
            Capability::User => [
                0x3E, 0x37, 0xE3, 0x20, 0x17, 0xE2, 0x11, 0xCF, 0xAB, 0xC4, 0x02, 0x60, 0x8C,
                0x9E, 0x75, 0x53,
            ],
            Capability::Computer => [
                0xEF, 0xE3, 0xCC, 0x70, 0x1D, 0x9F, 0x11, 0xCF, 0xB1, 0xF3, 0x02, 0x60, 0x8C,
                0x9E, 0x75, 0x53,
            ],
            Capability::Members => [
                0x45, 0x1A, 0x00, 0x30, 0x72, 0xEC, 0x11, 0xCF, 0xB0, 0x3B, 0x00, 0xAA, 0x00,
                0x6E, 0x09, 0x75,
            ],
            Capability::OpenDsObject => [
                0xDD, 0xF2, 0x89, 0x1E, 0x0F, 0x9C, 0x11, 0xD0, 0x8A, 0xD4, 0x00, 0xC0, 0x4F,
                0xD8, 0xD5, 0x03,
            ],
            Capability::LargeInteger => [
                0x90, 0x68, 0x27, 0x0B, 0x09, 0x39, 0x11, 0xD1, 0x8B, 0xE1, 0x00, 0xC0, 0x4F,
                0xD8, 0xD5, 0x03,
            ],
            Capability::NameTranslate => [
                0xB1, 0xB2, 0x72, 0xA3, 0x36, 0x25, 0x11, 0xD1, 0xA3, 0xA4, 0x00, 0xC0, 0x4F,
                0xB9, 0x50, 0xDC,
            ],
        };
        Uuid::from_bytes(bytes)
    }

    /// Looks up the capability for an interface identifier
    pub fn from_interface_id(id: Uuid) -> Option<Self> {
        Self::ALL.into_iter().find(|cap| cap.interface_id() == id)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Unknown => write!(f, "Unknown"),
            Capability::Object => write!(f, "Object"),
            Capability::Container => write!(f, "Container"),
            Capability::Group => write!(f, "Group"),
            Capability::User => write!(f, "User"),
            Capability::Computer => write!(f, "Computer"),
            Capability::Members => write!(f, "Members"),
            Capability::OpenDsObject => write!(f, "OpenDsObject"),
            Capability::LargeInteger => write!(f, "LargeInteger"),
            Capability::NameTranslate => write!(f, "NameTranslate"),
        }
    }
}
