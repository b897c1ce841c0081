//! # Directory Paths
//!
//! This crate parses and formats the URL-like strings used to address
//! directory objects.
//!
//! ## Philosophy
//!
//! - **Paths locate, they never authenticate**: user info and fragments are rejected
//! - **Schemes are case-sensitive downstream**: known provider names are corrected here
//! - **Host and path are opaque**: only the provider interprets them

pub mod path;

pub use path::{
    canonical_scheme, is_dn_scheme, AdsPath, PathError, DN_SCHEMES, GC, IIS, KNOWN_SCHEMES, LDAP,
    WINNT,
};
