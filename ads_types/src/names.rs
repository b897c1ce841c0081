//! Name translation formats
//!
//! Numeric codes follow the provider's name-type and init-type tables, so a
//! value read from a settings file or a provider reply maps back unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a name translator locates the directory that answers its queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameInitType {
    /// A named domain
    Domain,
    /// A named server
    Server,
    /// The global catalog; no name required
    Gc,
}

impl NameInitType {
    /// Returns the provider code for this init type
    pub const fn code(self) -> u32 {
        match self {
            NameInitType::Domain => 1,
            NameInitType::Server => 2,
            NameInitType::Gc => 3,
        }
    }

    /// Looks up an init type by provider code
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(NameInitType::Domain),
            2 => Some(NameInitType::Server),
            3 => Some(NameInitType::Gc),
            _ => None,
        }
    }

    /// Returns true if init needs a domain or server name
    pub const fn requires_name(self) -> bool {
        !matches!(self, NameInitType::Gc)
    }
}

/// A name format a translator accepts or produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameFormat {
    /// Distinguished name, `CN=Alice,CN=Users,DC=example,DC=com`
    Rfc1779,
    /// Canonical name, `example.com/Users/Alice`
    Canonical,
    /// Down-level logon name, `EXAMPLE\alice`
    Nt4,
    /// Display name
    Display,
    /// Simple name within a domain
    DomainSimple,
    /// Simple name within an enterprise
    EnterpriseSimple,
    /// Braced object identifier
    Guid,
    /// Let the translator guess the input format
    Unknown,
    /// `alice@example.com`
    UserPrincipalName,
    /// Canonical name with the last separator as a newline
    CanonicalEx,
    /// Service principal name
    ServicePrincipalName,
    /// Security identifier or one from its history
    SidOrSidHistory,
}

impl NameFormat {
    /// All formats, in code order
    pub const ALL: [NameFormat; 12] = [
        NameFormat::Rfc1779,
        NameFormat::Canonical,
        NameFormat::Nt4,
        NameFormat::Display,
        NameFormat::DomainSimple,
        NameFormat::EnterpriseSimple,
        NameFormat::Guid,
        NameFormat::Unknown,
        NameFormat::UserPrincipalName,
        NameFormat::CanonicalEx,
        NameFormat::ServicePrincipalName,
        NameFormat::SidOrSidHistory,
    ];

    /// Returns the provider code for this format
    pub const fn code(self) -> u32 {
        match self {
            NameFormat::Rfc1779 => 1,
            NameFormat::Canonical => 2,
            NameFormat::Nt4 => 3,
            NameFormat::Display => 4,
            NameFormat::DomainSimple => 5,
            NameFormat::EnterpriseSimple => 6,
            NameFormat::Guid => 7,
            NameFormat::Unknown => 8,
            NameFormat::UserPrincipalName => 9,
            NameFormat::CanonicalEx => 10,
            NameFormat::ServicePrincipalName => 11,
            NameFormat::SidOrSidHistory => 12,
        }
    }

    /// Looks up a format by provider code
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.code() == code)
    }
}

impl fmt::Display for NameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NameFormat::Rfc1779 => "RFC 1779",
            NameFormat::Canonical => "canonical",
            NameFormat::Nt4 => "NT4",
            NameFormat::Display => "display",
            NameFormat::DomainSimple => "domain simple",
            NameFormat::EnterpriseSimple => "enterprise simple",
            NameFormat::Guid => "GUID",
            NameFormat::Unknown => "unknown",
            NameFormat::UserPrincipalName => "user principal name",
            NameFormat::CanonicalEx => "extended canonical",
            NameFormat::ServicePrincipalName => "service principal name",
            NameFormat::SidOrSidHistory => "SID or SID history",
        };
        f.write_str(name)
    }
}
