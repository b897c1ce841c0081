//! Settings persistence
//!
//! Settings are stored as pretty-printed JSON. Saving writes a temporary file
//! next to the target and renames it over the target, so a crash never
//! leaves a half-written file behind.

use crate::ClientSettings;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Result type for persistence operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors that can occur during persistence operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Failed to serialize settings
    #[error("Failed to serialize settings: {0}")]
    SerializationFailed(String),

    /// Failed to deserialize settings
    #[error("Failed to deserialize settings: {0}")]
    DeserializationFailed(String),

    /// Unsupported settings version
    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),

    /// Reading or writing the file failed
    #[error("Settings file {path}: {message}")]
    Io { path: String, message: String },
}

impl SettingsError {
    fn io(path: &Path, err: std::io::Error) -> Self {
        SettingsError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Serializes settings to JSON bytes
pub fn serialize_settings(settings: &ClientSettings) -> SettingsResult<Vec<u8>> {
    serde_json::to_vec_pretty(settings)
        .map_err(|e| SettingsError::SerializationFailed(e.to_string()))
}

/// Deserializes settings from JSON bytes
pub fn deserialize_settings(bytes: &[u8]) -> SettingsResult<ClientSettings> {
    let settings: ClientSettings = serde_json::from_slice(bytes)
        .map_err(|e| SettingsError::DeserializationFailed(e.to_string()))?;

    if settings.version != ClientSettings::CURRENT_VERSION {
        return Err(SettingsError::UnsupportedVersion(settings.version));
    }

    Ok(settings)
}

pub(crate) fn load(path: &Path) -> SettingsResult<ClientSettings> {
    let bytes = fs::read(path).map_err(|e| SettingsError::io(path, e))?;
    deserialize_settings(&bytes)
}

pub(crate) fn save(settings: &ClientSettings, path: &Path) -> SettingsResult<()> {
    let bytes = serialize_settings(settings)?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| SettingsError::io(path, e))?;
    file.write_all(&bytes)
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| SettingsError::io(path, e))?;
    file.persist(path)
        .map_err(|e| SettingsError::io(path, e.error))?;
    Ok(())
}
