//! Directory path contract tests
//!
//! These tests define how path strings split into scheme, host and path.

// ===== Canonical Scheme Names =====
pub const SCHEMES: [(&str, &str); 4] = [
    ("ldap", "LDAP"),
    ("winnt", "WinNT"),
    ("iis", "IIS"),
    ("gc", "GC"),
];
