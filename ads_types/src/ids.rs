//! Identifiers for installed providers

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Class identifier of an installed namespace provider
///
/// Providers report it as GUID text during discovery; it is kept for
/// diagnostics and listing, never for routing (routing is by scheme name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderId(Uuid);

impl ProviderId {
    /// Creates a provider ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.braced())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ProviderId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn test_provider_id_display_is_braced() {
        let id = ProviderId::from_uuid(Uuid::nil());
        assert_eq!(
            format!("{}", id),
            "{00000000-0000-0000-0000-000000000000}"
        );
    }
}
