//! Bind flags and credentials
//!
//! Credentials and connection options never travel inside a directory path;
//! they are supplied alongside it on every bind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Authentication and connection options for a bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindFlags(u32);

impl BindFlags {
    /// No options
    pub const NONE: BindFlags = BindFlags(0);
    /// Request secure authentication
    pub const SECURE_AUTHENTICATION: BindFlags = BindFlags(0x1);
    /// Encrypt the channel
    pub const USE_ENCRYPTION: BindFlags = BindFlags(0x2);
    /// Same bit as [`Self::USE_ENCRYPTION`]
    pub const USE_SSL: BindFlags = BindFlags(0x2);
    /// A read-only server is acceptable
    pub const READONLY_SERVER: BindFlags = BindFlags(0x4);
    /// Ask the user for credentials
    pub const PROMPT_CREDENTIALS: BindFlags = BindFlags(0x8);
    /// Anonymous bind
    pub const NO_AUTHENTICATION: BindFlags = BindFlags(0x10);
    /// Skip the object-class lookup on bind
    pub const FAST_BIND: BindFlags = BindFlags(0x20);
    /// Sign traffic
    pub const USE_SIGNING: BindFlags = BindFlags(0x40);
    /// Seal traffic
    pub const USE_SEALING: BindFlags = BindFlags(0x80);
    /// Allow delegation of credentials
    pub const USE_DELEGATION: BindFlags = BindFlags(0x100);
    /// The path names a specific server
    pub const SERVER_BIND: BindFlags = BindFlags(0x200);
    /// Do not follow referrals
    pub const NO_REFERRAL_CHASING: BindFlags = BindFlags(0x400);
    /// Reserved by providers
    pub const AUTH_RESERVED: BindFlags = BindFlags(0x8000_0000);

    /// Creates flags from raw bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every bit of `other` is set
    pub const fn contains(self, other: BindFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns these flags with the bits of `other` set
    pub const fn with(self, other: BindFlags) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns these flags with the bits of `other` cleared
    pub const fn without(self, other: BindFlags) -> Self {
        Self(self.0 & !other.0)
    }

    /// Default flags for a new client: an encrypted, authenticated connection
    /// that accepts a read-only server
    pub const fn client_default() -> Self {
        Self(Self::SECURE_AUTHENTICATION.0 | Self::USE_ENCRYPTION.0 | Self::READONLY_SERVER.0)
    }
}

impl BitOr for BindFlags {
    type Output = BindFlags;

    fn bitor(self, rhs: BindFlags) -> BindFlags {
        self.with(rhs)
    }
}

impl BitOrAssign for BindFlags {
    fn bitor_assign(&mut self, rhs: BindFlags) {
        *self = self.with(rhs);
    }
}

impl fmt::Display for BindFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// User and password for a bind
///
/// Empty credentials mean "use the caller's existing security context".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    /// Credentials of the current security context
    pub fn current() -> Self {
        Self::default()
    }

    /// Explicit user and password
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Returns the user name, possibly empty
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the password, possibly empty
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns true if neither a user nor a password was supplied
    pub fn is_current_context(&self) -> bool {
        self.user.is_empty() && self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_default_flags() {
        let flags = BindFlags::client_default();
        assert!(flags.contains(BindFlags::SECURE_AUTHENTICATION));
        assert!(flags.contains(BindFlags::USE_ENCRYPTION));
        assert!(flags.contains(BindFlags::READONLY_SERVER));
        assert!(!flags.contains(BindFlags::FAST_BIND));
        assert_eq!(flags.bits(), 0x7);
    }

    #[test]
    fn test_flag_composition() {
        let mut flags = BindFlags::NONE | BindFlags::USE_SEALING;
        flags |= BindFlags::SERVER_BIND;
        assert_eq!(flags.bits(), 0x280);
        assert_eq!(flags.without(BindFlags::USE_SEALING), BindFlags::SERVER_BIND);
    }

    #[test]
    fn test_ssl_aliases_encryption() {
        assert_eq!(BindFlags::USE_SSL, BindFlags::USE_ENCRYPTION);
    }

    #[test]
    fn test_flags_serialize_as_number() {
        let json = serde_json::to_string(&BindFlags::from_bits(0x205)).unwrap();
        assert_eq!(json, "517");
        let back: BindFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bits(), 0x205);
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("EXAMPLE\\alice", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_current_context() {
        assert!(Credentials::current().is_current_context());
        assert!(!Credentials::new("bob", "").is_current_context());
    }
}
