//! Name translation over the simulated entries
//!
//! Only `LDAP` entries have names in the translated formats. The NT4 and
//! user principal forms need a `sAMAccountName` attribute and, for NT4, the
//! directory's NetBIOS domain name.

use crate::model::{SimObject, SimValue};
use ads_types::{decode_guid, NameFormat};
use provider_api::{ProviderError, ProviderResult};

/// Formats the simulation can read and write
const SUPPORTED: [NameFormat; 6] = [
    NameFormat::Rfc1779,
    NameFormat::Canonical,
    NameFormat::Nt4,
    NameFormat::Guid,
    NameFormat::UserPrincipalName,
    NameFormat::Display,
];

/// Per-reference translator state
#[derive(Debug, Default)]
pub(crate) struct Translation {
    pub(crate) initialized: bool,
    /// Path of the entry named by the last successful set
    pub(crate) current: Option<String>,
}

pub(crate) fn not_found() -> ProviderError {
    ProviderError::from_code(
        0x8007_2116,
        "Name translation: Could not find the name or insufficient right to see name.",
    )
}

pub(crate) fn no_mapping() -> ProviderError {
    ProviderError::from_code(
        0x8007_2118,
        "Name translation: Input name found, but not the associated output format.",
    )
}

pub(crate) fn no_such_domain() -> ProviderError {
    ProviderError::from_code(
        0x8007_054B,
        "The specified domain either does not exist or could not be contacted.",
    )
}

pub(crate) fn accepts_input(format: NameFormat) -> bool {
    format == NameFormat::Unknown || SUPPORTED.contains(&format)
}

pub(crate) fn produces(format: NameFormat) -> bool {
    SUPPORTED.contains(&format)
}

fn distinguished_name(obj: &SimObject) -> Option<&str> {
    let rest = obj.path.strip_prefix("LDAP://")?;
    let dn = match rest.split_once('/') {
        Some((host, dn)) if !host.contains('=') => dn,
        _ => rest,
    };
    dn.contains('=').then_some(dn)
}

fn split_dn(dn: &str) -> (Vec<&str>, Vec<&str>) {
    let mut domain = Vec::new();
    let mut rest = Vec::new();
    for rdn in dn.split(',') {
        let Some((key, value)) = rdn.split_once('=') else {
            continue;
        };
        if key.trim().eq_ignore_ascii_case("DC") {
            domain.push(value.trim());
        } else {
            rest.push(value.trim());
        }
    }
    (domain, rest)
}

/// DNS domain of a distinguished name, `example.com`
pub(crate) fn dns_domain(dn: &str) -> String {
    split_dn(dn).0.join(".")
}

/// Canonical form of a distinguished name, `example.com/Users/Alice`
pub(crate) fn canonical_name(dn: &str) -> String {
    let (domain, mut rest) = split_dn(dn);
    rest.reverse();
    format!("{}/{}", domain.join("."), rest.join("/"))
}

fn first_string<'a>(obj: &'a SimObject, name: &str) -> Option<&'a str> {
    match obj.attributes.get(name)?.values.first()? {
        SimValue::String(s) => Some(s),
        _ => None,
    }
}

/// Name of `obj` written in `format`, if it has one
pub(crate) fn name_of(obj: &SimObject, format: NameFormat, netbios: Option<&str>) -> Option<String> {
    let dn = distinguished_name(obj)?;
    match format {
        NameFormat::Rfc1779 => Some(dn.to_string()),
        NameFormat::Canonical => Some(canonical_name(dn)),
        NameFormat::Nt4 => {
            let account = first_string(obj, "sAMAccountName")?;
            Some(format!("{}\\{}", netbios?, account))
        }
        NameFormat::UserPrincipalName => {
            let account = first_string(obj, "sAMAccountName")?;
            Some(format!("{}@{}", account, dns_domain(dn)))
        }
        NameFormat::Display => first_string(obj, "fullName").map(str::to_string),
        NameFormat::Guid => decode_guid(&obj.guid)
            .ok()
            .map(|id| id.braced().to_string().to_uppercase()),
        _ => None,
    }
}

/// Path of the entry whose `format` name is `name`
///
/// [`NameFormat::Unknown`] tries every supported format in turn.
pub(crate) fn find(
    objects: &[SimObject],
    name: &str,
    format: NameFormat,
    netbios: Option<&str>,
) -> ProviderResult<String> {
    let formats: &[NameFormat] = if format == NameFormat::Unknown {
        &SUPPORTED
    } else {
        std::slice::from_ref(&format)
    };
    formats
        .iter()
        .find_map(|format| {
            objects.iter().find(|obj| {
                name_of(obj, *format, netbios).is_some_and(|n| n.eq_ignore_ascii_case(name))
            })
        })
        .map(|obj| obj.path.clone())
        .ok_or_else(not_found)
}

/// Returns true if `name` is the NetBIOS or DNS name of a simulated domain
pub(crate) fn domain_known(objects: &[SimObject], name: &str, netbios: Option<&str>) -> bool {
    if netbios.is_some_and(|n| n.eq_ignore_ascii_case(name)) {
        return true;
    }
    objects
        .iter()
        .filter(|obj| obj.class.eq_ignore_ascii_case("domainDNS"))
        .filter_map(distinguished_name)
        .any(|dn| dns_domain(dn).eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> SimObject {
        SimObject::new("LDAP://dc01/CN=Alice,CN=Users,DC=example,DC=com", "user")
            .guid_text("{67452301-AB89-EFCD-0123-456789ABCDEF}")
            .attr("sAMAccountName", vec!["alice".into()])
            .attr("fullName", vec!["Alice Liddell".into()])
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(
            canonical_name("CN=Alice,CN=Users,DC=example,DC=com"),
            "example.com/Users/Alice"
        );
        assert_eq!(canonical_name("DC=example,DC=com"), "example.com/");
    }

    #[test]
    fn test_names_of_an_entry() {
        let obj = alice();
        let name = |format| name_of(&obj, format, Some("EXAMPLE"));
        assert_eq!(
            name(NameFormat::Rfc1779).as_deref(),
            Some("CN=Alice,CN=Users,DC=example,DC=com")
        );
        assert_eq!(name(NameFormat::Nt4).as_deref(), Some("EXAMPLE\\alice"));
        assert_eq!(
            name(NameFormat::UserPrincipalName).as_deref(),
            Some("alice@example.com")
        );
        assert_eq!(
            name(NameFormat::Guid).as_deref(),
            Some("{67452301-AB89-EFCD-0123-456789ABCDEF}")
        );
        assert_eq!(name(NameFormat::SidOrSidHistory), None);
    }

    #[test]
    fn test_nt4_needs_netbios_domain() {
        assert_eq!(name_of(&alice(), NameFormat::Nt4, None), None);
    }

    #[test]
    fn test_non_ldap_entries_have_no_names() {
        let obj = SimObject::new("WinNT://EXAMPLE/ws01", "Computer");
        assert_eq!(name_of(&obj, NameFormat::Rfc1779, Some("EXAMPLE")), None);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let objects = vec![alice()];
        let path = find(&objects, "example\\ALICE", NameFormat::Nt4, Some("EXAMPLE")).unwrap();
        assert_eq!(path, "LDAP://dc01/CN=Alice,CN=Users,DC=example,DC=com");
    }

    #[test]
    fn test_find_unknown_format_tries_each() {
        let objects = vec![alice()];
        assert!(find(&objects, "example.com/Users/Alice", NameFormat::Unknown, None).is_ok());
        let err = find(&objects, "nobody", NameFormat::Unknown, None).unwrap_err();
        assert_eq!(err.code(), 0x8007_2116);
    }

    #[test]
    fn test_domain_known() {
        let objects = vec![SimObject::new("LDAP://dc01/DC=example,DC=com", "domainDNS")];
        assert!(domain_known(&objects, "EXAMPLE", Some("EXAMPLE")));
        assert!(domain_known(&objects, "example.com", None));
        assert!(!domain_known(&objects, "other.org", Some("EXAMPLE")));
    }
}
