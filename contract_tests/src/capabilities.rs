//! Capability identifier contract tests
//!
//! Providers answer capability queries by interface identifier. These are
//! fixed by the provider ecosystem and must never change. The same holds for
//! the numeric name translation codes.

use ads_types::{Capability, NameFormat, NameInitType};

// ===== Canonical Interface Identifiers =====
pub const INTERFACE_IDS: [(Capability, &str); 10] = [
    (Capability::Unknown, "00000000-0000-0000-c000-000000000046"),
    (Capability::Object, "fd8256d0-fd15-11ce-abc4-02608c9e7553"),
    (Capability::Container, "001677d0-fd16-11ce-abc4-02608c9e7553"),
    (Capability::Group, "27636b00-410f-11cf-b1ff-02608c9e7553"),
    (Capability::User, "3e37e320-17e2-11cf-abc4-02608c9e7553"),
    (Capability::Computer, "efe3cc70-1d9f-11cf-b1f3-02608c9e7553"),
    (Capability::Members, "451a0030-72ec-11cf-b03b-00aa006e0975"),
    (Capability::OpenDsObject, "ddf2891e-0f9c-11d0-8ad4-00c04fd8d503"),
    (Capability::LargeInteger, "9068270b-0939-11d1-8be1-00c04fd8d503"),
    (Capability::NameTranslate, "b1b272a3-3625-11d1-a3a4-00c04fb950dc"),
];

// ===== Name Translation Codes =====
pub const NAME_FORMAT_CODES: [(NameFormat, u32); 12] = [
    (NameFormat::Rfc1779, 1),
    (NameFormat::Canonical, 2),
    (NameFormat::Nt4, 3),
    (NameFormat::Display, 4),
    (NameFormat::DomainSimple, 5),
    (NameFormat::EnterpriseSimple, 6),
    (NameFormat::Guid, 7),
    (NameFormat::Unknown, 8),
    (NameFormat::UserPrincipalName, 9),
    (NameFormat::CanonicalEx, 10),
    (NameFormat::ServicePrincipalName, 11),
    (NameFormat::SidOrSidHistory, 12),
];

pub const NAME_INIT_CODES: [(NameInitType, u32); 3] = [
    (NameInitType::Domain, 1),
    (NameInitType::Server, 2),
    (NameInitType::Gc, 3),
];
