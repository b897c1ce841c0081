//! Deterministic fault injection for the simulated directory
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: Faults fire at named providers, paths and indices
//! - **Composable**: A plan holds any number of faults of each kind
//! - **Test-focused**: Not intended for production use
//!
//! ## Example
//!
//! ```
//! use sim_directory::fault_injection::{BindFault, DiscoveryFault, EnumerationFault, FaultPlan};
//! use provider_api::ProviderError;
//!
//! let plan = FaultPlan::new()
//!     .with_discovery_fault(DiscoveryFault::Binder { provider: "IIS".to_string() })
//!     .with_bind_fault(BindFault {
//!         path: "LDAP://dc01/CN=Locked,DC=example,DC=com".to_string(),
//!         error: ProviderError::AccessDenied,
//!     })
//!     .with_enumeration_fault(EnumerationFault::NonObjectAt {
//!         container: "LDAP://dc01/DC=example,DC=com".to_string(),
//!         index: 1,
//!     });
//! assert_eq!(plan.discovery_faults().len(), 1);
//! ```

use provider_api::ProviderError;

/// Path of the namespace directory, for enumeration faults during discovery
pub const NAMESPACES: &str = "ADs:";

/// A fault hit while the client discovers installed providers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryFault {
    /// Reading the provider's name fails
    Name { provider: String },

    /// The provider reports identifier text that is not a GUID
    Guid { provider: String },

    /// The provider does not expose the binder capability
    Binder { provider: String },
}

impl DiscoveryFault {
    /// Provider scheme the fault applies to
    pub fn provider(&self) -> &str {
        match self {
            DiscoveryFault::Name { provider }
            | DiscoveryFault::Guid { provider }
            | DiscoveryFault::Binder { provider } => provider,
        }
    }
}

/// Binding `path` fails with `error`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindFault {
    pub path: String,
    pub error: ProviderError,
}

/// A fault hit while enumerating a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumerationFault {
    /// The element at `index` is a string instead of an object reference
    NonObjectAt { container: String, index: usize },

    /// Fetching the element at `index` fails with `error`
    ErrorAt {
        container: String,
        index: usize,
        error: ProviderError,
    },
}

impl EnumerationFault {
    /// Path of the container the fault applies to
    pub fn container(&self) -> &str {
        match self {
            EnumerationFault::NonObjectAt { container, .. }
            | EnumerationFault::ErrorAt { container, .. } => container,
        }
    }

    /// Position at which the fault fires
    pub fn index(&self) -> usize {
        match self {
            EnumerationFault::NonObjectAt { index, .. }
            | EnumerationFault::ErrorAt { index, .. } => *index,
        }
    }
}

/// A plan describing all faults to inject
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    discovery_faults: Vec<DiscoveryFault>,
    bind_faults: Vec<BindFault>,
    enumeration_faults: Vec<EnumerationFault>,
}

impl FaultPlan {
    /// Creates a new empty fault plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a discovery fault to the plan
    pub fn with_discovery_fault(mut self, fault: DiscoveryFault) -> Self {
        self.discovery_faults.push(fault);
        self
    }

    /// Adds a bind fault to the plan
    pub fn with_bind_fault(mut self, fault: BindFault) -> Self {
        self.bind_faults.push(fault);
        self
    }

    /// Adds an enumeration fault to the plan
    pub fn with_enumeration_fault(mut self, fault: EnumerationFault) -> Self {
        self.enumeration_faults.push(fault);
        self
    }

    pub fn discovery_faults(&self) -> &[DiscoveryFault] {
        &self.discovery_faults
    }

    pub fn bind_faults(&self) -> &[BindFault] {
        &self.bind_faults
    }

    pub fn enumeration_faults(&self) -> &[EnumerationFault] {
        &self.enumeration_faults
    }

    /// Returns true if `provider` has a discovery fault matching `pred`
    pub(crate) fn discovery_hits(
        &self,
        provider: &str,
        pred: impl Fn(&DiscoveryFault) -> bool,
    ) -> bool {
        self.discovery_faults
            .iter()
            .any(|fault| fault.provider() == provider && pred(fault))
    }

    pub(crate) fn bind_error(&self, path: &str) -> Option<ProviderError> {
        self.bind_faults
            .iter()
            .find(|fault| fault.path == path)
            .map(|fault| fault.error.clone())
    }

    pub(crate) fn enumeration_fault(&self, container: &str, index: usize) -> Option<&EnumerationFault> {
        self.enumeration_faults
            .iter()
            .find(|fault| fault.container() == container && fault.index() == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plan() {
        let plan = FaultPlan::new();
        assert!(plan.discovery_faults().is_empty());
        assert!(plan.bind_faults().is_empty());
        assert!(plan.enumeration_faults().is_empty());
    }

    #[test]
    fn test_discovery_hits_match_provider() {
        let plan = FaultPlan::new().with_discovery_fault(DiscoveryFault::Name {
            provider: "WinNT".to_string(),
        });
        assert!(plan.discovery_hits("WinNT", |f| matches!(f, DiscoveryFault::Name { .. })));
        assert!(!plan.discovery_hits("LDAP", |f| matches!(f, DiscoveryFault::Name { .. })));
        assert!(!plan.discovery_hits("WinNT", |f| matches!(f, DiscoveryFault::Guid { .. })));
    }

    #[test]
    fn test_bind_error_lookup() {
        let plan = FaultPlan::new().with_bind_fault(BindFault {
            path: "LDAP://x/CN=y".to_string(),
            error: ProviderError::AccessDenied,
        });
        assert_eq!(plan.bind_error("LDAP://x/CN=y"), Some(ProviderError::AccessDenied));
        assert_eq!(plan.bind_error("LDAP://x/CN=z"), None);
    }

    #[test]
    fn test_enumeration_fault_lookup() {
        let plan = FaultPlan::new().with_enumeration_fault(EnumerationFault::NonObjectAt {
            container: NAMESPACES.to_string(),
            index: 2,
        });
        assert!(plan.enumeration_fault(NAMESPACES, 2).is_some());
        assert!(plan.enumeration_fault(NAMESPACES, 1).is_none());
    }
}
