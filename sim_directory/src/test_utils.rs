//! Test utilities
//!
//! A small example domain shared by the client's unit and integration tests.

use crate::fault_injection::FaultPlan;
use crate::model::{SimObject, SimValue};
use crate::{SimDirectory, SimDirectoryBuilder};
use ads_types::Capability;
use std::sync::Arc;

pub const DOMAIN: &str = "LDAP://dc01/DC=example,DC=com";
pub const SERVERLESS_DOMAIN: &str = "LDAP://DC=example,DC=com";
pub const USERS: &str = "LDAP://dc01/CN=Users,DC=example,DC=com";
pub const ALICE: &str = "LDAP://dc01/CN=Alice,CN=Users,DC=example,DC=com";
pub const BOB: &str = "LDAP://dc01/CN=Bob,CN=Users,DC=example,DC=com";
pub const ADMINS: &str = "LDAP://dc01/CN=Admins,CN=Users,DC=example,DC=com";
pub const WS01: &str = "LDAP://dc01/CN=WS01,DC=example,DC=com";
pub const WINNT_WS01: &str = "WinNT://EXAMPLE/ws01";

/// Bare hex identifier text reported for Alice
pub const ALICE_GUID_HEX: &str = "0123456789ABCDEF0123456789ABCDEF";
/// The same identifier in braced form
pub const ALICE_GUID_BRACED: &str = "{67452301-AB89-EFCD-0123-456789ABCDEF}";

/// Down-level name of the example domain
pub const NETBIOS_DOMAIN: &str = "EXAMPLE";

pub const ADMIN_USER: &str = "EXAMPLE\\admin";
pub const ADMIN_PASSWORD: &str = "s3cret";

/// Builder preloaded with the example domain
///
/// Providers: `LDAP`, `WinNT`, `GC`. Only the admin credentials are accepted
/// besides the current security context.
pub fn example_builder() -> SimDirectoryBuilder {
    SimDirectory::builder()
        .provider("LDAP")
        .provider("WinNT")
        .provider("GC")
        .netbios_domain(NETBIOS_DOMAIN)
        .credentials(ADMIN_USER, ADMIN_PASSWORD)
        .object(
            SimObject::new(DOMAIN, "domainDNS")
                .named("DC=example")
                .capability(Capability::Container),
        )
        .object(
            SimObject::new(SERVERLESS_DOMAIN, "domainDNS")
                .named("DC=example")
                .capability(Capability::Container),
        )
        .object(
            SimObject::new(USERS, "container")
                .named("CN=Users")
                .under(DOMAIN)
                .capability(Capability::Container),
        )
        .object(
            SimObject::new(ALICE, "user")
                .named("CN=Alice")
                .under(USERS)
                .guid_text(ALICE_GUID_HEX)
                .capability(Capability::User)
                .attr("sAMAccountName", vec!["alice".into()])
                .attr("mail", vec!["alice@example.com".into()])
                .attr("fullName", vec!["Alice Liddell".into()])
                .attr("accountDisabled", vec![false.into()])
                .attr("logonCount", vec![17.into()])
                .attr("misc", vec!["seven".into(), 7.into()])
                .attr(
                    "pwdLastSet",
                    vec![SimValue::LargeInteger {
                        high: 0x01D9_A1B2,
                        low: -1,
                    }],
                )
                .attr("objectGUID", vec![SimValue::Bytes(vec![0x11; 16])]),
        )
        .object(
            SimObject::new(BOB, "user")
                .named("CN=Bob")
                .under(USERS)
                .guid_text(ALICE_GUID_BRACED)
                .capability(Capability::User)
                .attr("sAMAccountName", vec!["bob".into()])
                .attr("fullName", vec!["Bob Builder".into()])
                .attr("accountDisabled", vec![true.into()]),
        )
        .object(
            SimObject::new(ADMINS, "group")
                .named("CN=Admins")
                .under(USERS)
                .capability(Capability::Group)
                .attr("description", vec!["Domain administrators".into()])
                .attr("member", vec![ALICE.into()]),
        )
        .object(
            SimObject::new(WS01, "computer")
                .named("CN=WS01")
                .under(DOMAIN)
                .capability(Capability::Computer)
                .attr("computerId", vec!["S-1-5-21-1004".into()])
                .attr("site", vec!["Default-First-Site-Name".into()])
                .attr("operatingSystem", vec!["Windows Server 2022".into()]),
        )
        .object(
            SimObject::new(WINNT_WS01, "Computer")
                .named("ws01")
                .capability(Capability::Computer)
                .attr("operatingSystem", vec!["Windows NT".into()]),
        )
}

/// The example domain without faults
pub fn example_directory() -> Arc<SimDirectory> {
    example_builder().build()
}

/// The example domain with a fault plan
pub fn example_directory_with_faults(faults: FaultPlan) -> Arc<SimDirectory> {
    example_builder().faults(faults).build()
}
