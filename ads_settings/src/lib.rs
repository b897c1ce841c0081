//! # Client Settings
//!
//! This crate holds the persisted defaults of a directory client.
//!
//! ## Philosophy
//!
//! - **Versioned**: Files carry a format version and unknown versions are refused
//! - **No secrets at rest**: A default user may be stored, never a password
//! - **Plain data**: Settings are applied by the caller, not read ambiently

pub mod persistence;

use ads_types::{BindFlags, Credentials};
use serde::{Deserialize, Serialize};

pub use persistence::{deserialize_settings, serialize_settings, SettingsError, SettingsResult};

/// Defaults used when opening a namespace registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Version of the settings format
    pub version: u32,
    /// Host for namespace discovery; empty for the local machine
    #[serde(default)]
    pub server: String,
    /// Default bind flags
    #[serde(default = "BindFlags::client_default")]
    pub flags: BindFlags,
    /// Default user name for explicit binds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ClientSettings {
    /// Current version of the settings format
    pub const CURRENT_VERSION: u32 = 1;

    /// Local discovery with the default flags and no default user
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            server: String::new(),
            flags: BindFlags::client_default(),
            user: None,
        }
    }

    /// Sets the discovery host
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Sets the default bind flags
    pub fn with_flags(mut self, flags: BindFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the default user name
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn flags(&self) -> BindFlags {
        self.flags
    }

    /// Credentials for the default user with `password`
    ///
    /// Without a default user this is the current security context and the
    /// password is ignored.
    pub fn credentials(&self, password: &str) -> Credentials {
        match &self.user {
            Some(user) => Credentials::new(user.clone(), password),
            None => Credentials::current(),
        }
    }

    /// Parses settings from JSON text
    pub fn from_json(text: &str) -> SettingsResult<Self> {
        deserialize_settings(text.as_bytes())
    }

    /// Renders settings as pretty-printed JSON
    pub fn to_json(&self) -> SettingsResult<String> {
        let bytes = serialize_settings(self)?;
        String::from_utf8(bytes).map_err(|e| SettingsError::SerializationFailed(e.to_string()))
    }

    /// Reads settings from a file
    pub fn load(path: impl AsRef<std::path::Path>) -> SettingsResult<Self> {
        persistence::load(path.as_ref())
    }

    /// Writes settings to a file, replacing it atomically
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> SettingsResult<()> {
        persistence::save(self, path.as_ref())
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ClientSettings::default();
        assert_eq!(settings.version, ClientSettings::CURRENT_VERSION);
        assert_eq!(settings.server(), "");
        assert_eq!(settings.flags(), BindFlags::client_default());
        assert_eq!(settings.user, None);
    }

    #[test]
    fn test_credentials_without_user() {
        let settings = ClientSettings::new();
        assert!(settings.credentials("ignored").is_current_context());
    }

    #[test]
    fn test_credentials_with_user() {
        let settings = ClientSettings::new().with_user("EXAMPLE\\svc");
        let creds = settings.credentials("pw");
        assert_eq!(creds.user(), "EXAMPLE\\svc");
        assert_eq!(creds.password(), "pw");
    }

    #[test]
    fn test_json_round_trip() {
        let settings = ClientSettings::new()
            .with_server("dc01.example.com")
            .with_flags(BindFlags::SECURE_AUTHENTICATION | BindFlags::SERVER_BIND)
            .with_user("alice");
        let json = settings.to_json().unwrap();
        assert_eq!(ClientSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = ClientSettings::from_json(r#"{"version": 1}"#).unwrap();
        assert_eq!(settings, ClientSettings::new());
    }

    #[test]
    fn test_password_is_never_serialized() {
        let settings = ClientSettings::new().with_user("alice");
        let json = settings.to_json().unwrap();
        assert!(!json.contains("password"));
    }
}
