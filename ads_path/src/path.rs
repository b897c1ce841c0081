//! Directory path parsing
//!
//! Paths look like URLs: `scheme://host/path`, `scheme://dn` for serverless
//! binding, or a bare `scheme:` for the root of a namespace. Host and path are
//! opaque here; their interpretation belongs to the provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Scheme of the LDAP namespace provider
pub const LDAP: &str = "LDAP";
/// Scheme of the WinNT namespace provider
pub const WINNT: &str = "WinNT";
/// Scheme of the IIS namespace provider
pub const IIS: &str = "IIS";
/// Scheme of the global catalog namespace provider
pub const GC: &str = "GC";

/// Provider schemes whose casing is corrected during parsing
pub const KNOWN_SCHEMES: [&str; 4] = [LDAP, WINNT, IIS, GC];

/// Schemes whose paths are distinguished names, allowing serverless binding
pub const DN_SCHEMES: [&str; 2] = [LDAP, GC];

/// Errors that can occur while parsing a path
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Nothing to parse
    #[error("Empty path")]
    EmptyPath,

    /// The scheme or the separator after it is malformed
    #[error("Malformed path: {0}")]
    Malformed(String),

    /// `user:pass@` appeared in the authority
    #[error("The path contains a username or password, which is not permitted in directory paths")]
    UserInfoNotPermitted,

    /// A `#fragment` suffix appeared
    #[error("The path contains a fragment, which is not permitted in directory paths")]
    FragmentNotPermitted,
}

/// Location of a directory object
///
/// Constructed by [`AdsPath::parse`] and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdsPath {
    scheme: String,
    host: String,
    path: String,
}

impl AdsPath {
    /// Builds a path from already separated parts
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            path: path.into(),
        }
    }

    /// Parses a raw path string
    ///
    /// # Examples
    ///
    /// ```
    /// use ads_path::AdsPath;
    ///
    /// let path = AdsPath::parse("winnt://server/path").unwrap();
    /// assert_eq!(path.scheme(), "WinNT");
    /// assert_eq!(path.host(), "server");
    /// assert_eq!(path.path(), "path");
    ///
    /// let serverless = AdsPath::parse("ldap://dc=example,dc=com").unwrap();
    /// assert_eq!(serverless.host(), "");
    /// assert_eq!(serverless.path(), "dc=example,dc=com");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::EmptyPath);
        }

        if raw.contains('#') {
            return Err(PathError::FragmentNotPermitted);
        }

        let (scheme, rest) = split_scheme(raw)?;
        let scheme = normalize_scheme(scheme);

        if rest.is_empty() {
            // Root of the namespace
            return Ok(Self::new(scheme, "", ""));
        }

        let Some(rest) = rest.strip_prefix("//") else {
            if scheme.is_empty() {
                return Ok(Self::new("", "", rest));
            }
            return Err(PathError::Malformed(format!(
                "expected \"//\" after \"{}:\"",
                scheme
            )));
        };

        let (authority, rest) = rest.split_once('/').unwrap_or((rest, ""));

        if rest.is_empty() && is_dn_scheme(&scheme) && authority.contains('=') {
            // Serverless binding: the authority is a distinguished name
            return Ok(Self::new(scheme, "", authority));
        }

        if authority.contains('@') {
            return Err(PathError::UserInfoNotPermitted);
        }

        Ok(Self::new(scheme, authority, rest))
    }

    /// Provider scheme, possibly empty
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Computer or domain, possibly with `:port`; empty for serverless binding
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Address of the object within the namespace
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns true if the path names the root of a namespace
    pub fn is_namespace_root(&self) -> bool {
        self.host.is_empty() && self.path.is_empty()
    }

    /// Returns true if the path carries no host but does carry a path
    pub fn is_serverless(&self) -> bool {
        self.host.is_empty() && !self.path.is_empty()
    }
}

impl AdsPath {
    /// Returns true if the path would be read back as a serverless DN
    fn reads_as_serverless(&self) -> bool {
        is_dn_scheme(&self.scheme) && self.path.contains('=') && !self.path.contains('/')
    }
}

impl fmt::Display for AdsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.scheme.is_empty() {
            write!(f, "{}:", self.scheme)?;
            if !self.is_namespace_root() {
                f.write_str("//")?;
            }
            // An empty authority keeps a hostless path from being read as a host
            if self.is_serverless() && !self.reads_as_serverless() {
                f.write_str("/")?;
            }
        }
        if !self.host.is_empty() {
            f.write_str(&self.host)?;
            if !self.path.is_empty() {
                f.write_str("/")?;
            }
        }
        f.write_str(&self.path)
    }
}

impl FromStr for AdsPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Returns the canonical casing of a known provider scheme
pub fn canonical_scheme(scheme: &str) -> Option<&'static str> {
    KNOWN_SCHEMES
        .into_iter()
        .find(|known| known.eq_ignore_ascii_case(scheme))
}

/// Returns true if the scheme names a provider addressed by distinguished names
pub fn is_dn_scheme(scheme: &str) -> bool {
    DN_SCHEMES.iter().any(|dn| dn.eq_ignore_ascii_case(scheme))
}

fn normalize_scheme(scheme: &str) -> String {
    canonical_scheme(scheme).unwrap_or(scheme).to_string()
}

/// Splits `scheme:` off the front of a raw path
///
/// A scheme starts with a letter and continues with letters, digits, `+`,
/// `-` or `.`. Input without valid scheme syntax is all path.
fn split_scheme(raw: &str) -> Result<(&str, &str), PathError> {
    for (i, c) in raw.bytes().enumerate() {
        match c {
            b'a'..=b'z' | b'A'..=b'Z' => {}
            b'0'..=b'9' | b'+' | b'-' | b'.' => {
                if i == 0 {
                    return Ok(("", raw));
                }
            }
            b':' => {
                if i == 0 {
                    return Err(PathError::Malformed("missing scheme".to_string()));
                }
                return Ok((&raw[..i], &raw[i + 1..]));
            }
            _ => return Ok(("", raw)),
        }
    }
    Ok(("", raw))
}
