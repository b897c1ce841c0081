//! Namespace registry
//!
//! On construction the registry enumerates the installed namespace providers
//! and records, per provider, its name and a binder. Paths are then routed to
//! a binder by exact, case-sensitive scheme match.
//!
//! A provider that fails discovery does not fail construction. Its entry
//! keeps the error, which surfaces only when that namespace is resolved. An
//! enumeration that breaks off part way keeps the providers seen before it.

use crate::container::Container;
use crate::error::{DirectoryError, Result};
use crate::handle::{DirectoryHandle, FromInterface};
use crate::iter::ChildIterator;
use crate::object::{wrap, Object};
use crate::{Computer, Group, User};
use ads_path::AdsPath;
use ads_settings::ClientSettings;
use ads_types::{BindFlags, Capability, Credentials, ProviderId};
use provider_api::{Interface, ObjectBinder, RemoteRef, Session, SessionLease};
use std::fmt;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, warn};

/// One discovered namespace provider
struct NamespaceEntry {
    name: String,
    provider_id: Option<ProviderId>,
    binder: Option<Box<dyn ObjectBinder>>,
    error: Option<DirectoryError>,
}

impl NamespaceEntry {
    fn discover(child: &Object) -> Self {
        let mut entry = Self {
            name: String::new(),
            provider_id: None,
            binder: None,
            error: None,
        };
        if let Err(err) = entry.fill(child) {
            entry.error = Some(err);
        }
        entry
    }

    fn fill(&mut self, child: &Object) -> Result<()> {
        self.name = child.name()?.trim_end_matches(':').to_string();
        self.provider_id = Some(ProviderId::from_uuid(child.guid()?));
        let binder = child
            .query_interface(Capability::OpenDsObject)?
            .into_binder()?;
        self.binder = Some(binder);
        Ok(())
    }

    fn info(&self) -> NamespaceInfo {
        NamespaceInfo {
            name: self.name.clone(),
            provider_id: self.provider_id,
            error: self.error.clone(),
        }
    }
}

/// Public description of a discovered namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceInfo {
    /// Scheme name, without the trailing `:`
    pub name: String,
    /// Provider identifier, if discovery got that far
    pub provider_id: Option<ProviderId>,
    /// Discovery failure, if any
    pub error: Option<DirectoryError>,
}

struct Table {
    // Entries are released before the lease.
    entries: Vec<NamespaceEntry>,
    lease: SessionLease,
}

/// Routes directory paths to namespace providers
///
/// Thread-safe: resolution takes a shared lock on the entry table; only
/// [`NamespaceRegistry::close`] takes it exclusively.
pub struct NamespaceRegistry {
    server: String,
    table: RwLock<Option<Table>>,
    flags: RwLock<BindFlags>,
}

impl NamespaceRegistry {
    /// Discovers the namespace providers on `server`
    ///
    /// An empty server means the local machine.
    pub fn open(session: &Session, server: &str) -> Result<Self> {
        let lease = session.lease();
        let root = lease.host().namespaces(server)?;
        let root: Container = wrap(root, lease.clone())?;
        let children = root.children()?;

        let entries = discover_all(&children);
        children.close();
        root.close();

        info!(server, namespaces = entries.len(), "namespace registry opened");

        Ok(Self {
            server: server.to_string(),
            table: RwLock::new(Some(Table { entries, lease })),
            flags: RwLock::new(BindFlags::client_default()),
        })
    }

    /// Opens a registry as described by `settings`
    pub fn with_settings(session: &Session, settings: &ClientSettings) -> Result<Self> {
        let registry = Self::open(session, settings.server())?;
        registry.set_flags(settings.flags());
        Ok(registry)
    }

    /// Server the registry was opened against
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Default flags used by the `open_*` operations
    pub fn flags(&self) -> BindFlags {
        *self.flags.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the default flags used by the `open_*` operations
    pub fn set_flags(&self, flags: BindFlags) {
        *self.flags.write().unwrap_or_else(PoisonError::into_inner) = flags;
    }

    /// Lists the discovered namespaces in discovery order
    pub fn namespaces(&self) -> Result<Vec<NamespaceInfo>> {
        let guard = self.table.read().unwrap_or_else(PoisonError::into_inner);
        let table = guard.as_ref().ok_or(DirectoryError::Closed)?;
        Ok(table.entries.iter().map(NamespaceEntry::info).collect())
    }

    /// Binds `path` and returns a generic object handle
    pub fn resolve(
        &self,
        path: &str,
        credentials: &Credentials,
        flags: BindFlags,
    ) -> Result<Object> {
        self.resolve_as(path, credentials, flags)
    }

    /// Binds `path` and narrows it to the handle type `H`
    pub fn resolve_as<H: FromInterface>(
        &self,
        path: &str,
        credentials: &Credentials,
        flags: BindFlags,
    ) -> Result<H> {
        let (remote, lease) = self.bind(path, credentials, flags)?;
        wrap(remote, lease)
    }

    /// Binds `path` and returns the raw provider interface for `capability`
    ///
    /// The intermediate generic reference is released before returning.
    pub fn resolve_interface(
        &self,
        path: &str,
        credentials: &Credentials,
        flags: BindFlags,
        capability: Capability,
    ) -> Result<Interface> {
        let (remote, _lease) = self.bind(path, credentials, flags)?;
        Ok(remote.query(capability)?)
    }

    pub fn resolve_container(
        &self,
        path: &str,
        credentials: &Credentials,
        flags: BindFlags,
    ) -> Result<Container> {
        self.resolve_as(path, credentials, flags)
    }

    pub fn resolve_group(
        &self,
        path: &str,
        credentials: &Credentials,
        flags: BindFlags,
    ) -> Result<Group> {
        self.resolve_as(path, credentials, flags)
    }

    pub fn resolve_user(
        &self,
        path: &str,
        credentials: &Credentials,
        flags: BindFlags,
    ) -> Result<User> {
        self.resolve_as(path, credentials, flags)
    }

    pub fn resolve_computer(
        &self,
        path: &str,
        credentials: &Credentials,
        flags: BindFlags,
    ) -> Result<Computer> {
        self.resolve_as(path, credentials, flags)
    }

    /// Binds `path` with the current security context and the default flags
    pub fn open_object(&self, path: &str) -> Result<Object> {
        self.resolve_as(path, &Credentials::current(), self.flags())
    }

    pub fn open_container(&self, path: &str) -> Result<Container> {
        self.resolve_as(path, &Credentials::current(), self.flags())
    }

    pub fn open_group(&self, path: &str) -> Result<Group> {
        self.resolve_as(path, &Credentials::current(), self.flags())
    }

    pub fn open_user(&self, path: &str) -> Result<User> {
        self.resolve_as(path, &Credentials::current(), self.flags())
    }

    pub fn open_computer(&self, path: &str) -> Result<Computer> {
        self.resolve_as(path, &Credentials::current(), self.flags())
    }

    /// Releases every binder and marks the registry closed
    ///
    /// Handles already resolved stay usable. Later calls do nothing.
    pub fn close(&self) {
        let table = self
            .table
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if table.is_some() {
            drop(table);
            debug!(server = %self.server, "namespace registry closed");
        }
    }

    /// Returns true once the registry has been closed
    pub fn is_closed(&self) -> bool {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn bind(
        &self,
        path: &str,
        credentials: &Credentials,
        flags: BindFlags,
    ) -> Result<(RemoteRef, SessionLease)> {
        let guard = self.table.read().unwrap_or_else(PoisonError::into_inner);
        let table = guard.as_ref().ok_or(DirectoryError::Closed)?;

        let parsed = AdsPath::parse(path)?;
        let entry = table
            .entries
            .iter()
            .find(|entry| entry.name == parsed.scheme())
            .ok_or_else(|| DirectoryError::InvalidNamespace(parsed.scheme().to_string()))?;

        let binder = match (&entry.error, &entry.binder) {
            (Some(err), _) => return Err(err.clone()),
            (None, Some(binder)) => binder,
            (None, None) => return Err(DirectoryError::InvalidNamespace(entry.name.clone())),
        };

        debug!(scheme = parsed.scheme(), host = parsed.host(), %flags, "resolving path");
        let remote = binder.open_ds_object(path, credentials, flags)?;
        Ok((remote, table.lease.clone()))
    }
}

impl fmt::Debug for NamespaceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceRegistry")
            .field("server", &self.server)
            .field("flags", &self.flags())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Records one entry per child of the namespace directory
///
/// A failure reading one child is kept on that child's entry. A failure
/// advancing the enumeration ends discovery; entries found so far are kept.
fn discover_all(children: &ChildIterator) -> Vec<NamespaceEntry> {
    let mut entries = Vec::new();
    loop {
        let child = match children.next() {
            Ok(Some(child)) => child,
            Ok(None) => break,
            Err(err) => {
                warn!(index = entries.len(), error = %err, "namespace enumeration stopped");
                break;
            }
        };
        let entry = NamespaceEntry::discover(&child);
        if let Some(err) = &entry.error {
            warn!(index = entries.len(), name = %entry.name, error = %err, "namespace discovery failed");
        }
        entries.push(entry);
        child.close();
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use provider_api::ProviderError;
    use sim_directory::fault_injection::{DiscoveryFault, EnumerationFault, FaultPlan, NAMESPACES};
    use sim_directory::test_utils::*;

    fn registry() -> (Session, NamespaceRegistry) {
        let session = Session::new(example_directory()).unwrap();
        let registry = NamespaceRegistry::open(&session, "").unwrap();
        (session, registry)
    }

    #[test]
    fn test_open_discovers_every_provider() {
        let (_session, registry) = registry();
        let names: Vec<String> = registry
            .namespaces()
            .unwrap()
            .into_iter()
            .map(|info| info.name)
            .collect();
        assert_eq!(names, vec!["LDAP", "WinNT", "GC"]);
    }

    #[test]
    fn test_default_flags() {
        let (_session, registry) = registry();
        assert_eq!(registry.flags(), BindFlags::client_default());
        registry.set_flags(BindFlags::FAST_BIND);
        assert_eq!(registry.flags(), BindFlags::FAST_BIND);
    }

    #[test]
    fn test_unknown_scheme() {
        let (_session, registry) = registry();
        let err = registry
            .resolve("FOO://host/x", &Credentials::current(), BindFlags::NONE)
            .unwrap_err();
        assert_eq!(err, DirectoryError::InvalidNamespace("FOO".to_string()));
    }

    #[test]
    fn test_closed_wins_over_parse_errors() {
        let (_session, registry) = registry();
        registry.close();
        registry.close();
        assert!(registry.is_closed());
        for path in ["", "FOO://x", DOMAIN] {
            assert!(matches!(
                registry.open_object(path),
                Err(DirectoryError::Closed)
            ));
        }
        assert!(matches!(registry.namespaces(), Err(DirectoryError::Closed)));
    }

    #[test]
    fn test_discovery_failure_is_cached_per_entry() {
        let plan = FaultPlan::new().with_discovery_fault(DiscoveryFault::Binder {
            provider: "WinNT".to_string(),
        });
        let session = Session::new(example_directory_with_faults(plan)).unwrap();
        let registry = NamespaceRegistry::open(&session, "").unwrap();

        let infos = registry.namespaces().unwrap();
        assert!(infos[0].error.is_none());
        assert_eq!(
            infos[1].error,
            Some(DirectoryError::Provider(ProviderError::NoInterface))
        );

        assert!(registry.open_object(DOMAIN).is_ok());
        assert_eq!(
            registry.open_object(WINNT_WS01).unwrap_err(),
            DirectoryError::Provider(ProviderError::NoInterface)
        );
    }

    #[test]
    fn test_broken_enumeration_keeps_earlier_entries() {
        let plan = FaultPlan::new().with_enumeration_fault(EnumerationFault::NonObjectAt {
            container: NAMESPACES.to_string(),
            index: 1,
        });
        let session = Session::new(example_directory_with_faults(plan)).unwrap();
        let registry = NamespaceRegistry::open(&session, "").unwrap();

        let names: Vec<String> = registry
            .namespaces()
            .unwrap()
            .into_iter()
            .map(|info| info.name)
            .collect();
        assert_eq!(names, vec!["LDAP"]);
        assert!(registry.open_object(DOMAIN).is_ok());
        assert_eq!(
            registry.open_object(WINNT_WS01).unwrap_err(),
            DirectoryError::InvalidNamespace("WinNT".to_string())
        );
    }

    #[test]
    fn test_resolve_interface_releases_generic_reference() {
        let sim = example_directory();
        let session = Session::new(sim.clone()).unwrap();
        let registry = NamespaceRegistry::open(&session, "").unwrap();
        let baseline = sim.live_references();

        let iface = registry
            .resolve_interface(
                ALICE,
                &Credentials::current(),
                BindFlags::NONE,
                Capability::User,
            )
            .unwrap();
        assert_eq!(iface.capability(), Capability::User);
        assert_eq!(sim.live_references(), baseline + 1);
        drop(iface);
        assert_eq!(sim.live_references(), baseline);
    }

    #[test]
    fn test_bind_uses_default_flags() {
        let sim = example_directory();
        let session = Session::new(sim.clone()).unwrap();
        let registry = NamespaceRegistry::open(&session, "").unwrap();
        registry.open_user(ALICE).unwrap();
        assert_eq!(
            sim.binds(),
            vec![(ALICE.to_string(), BindFlags::client_default())]
        );
    }

    #[test]
    fn test_with_settings_applies_flags() {
        let session = Session::new(example_directory()).unwrap();
        let settings = ClientSettings::new().with_flags(BindFlags::SERVER_BIND);
        let registry = NamespaceRegistry::with_settings(&session, &settings).unwrap();
        assert_eq!(registry.server(), "");
        assert_eq!(registry.flags(), BindFlags::SERVER_BIND);
    }

    #[test]
    fn test_unknown_server_fails_construction() {
        let session = Session::new(example_directory()).unwrap();
        let err = NamespaceRegistry::open(&session, "far-away").unwrap_err();
        assert_eq!(err.provider_error().map(ProviderError::code), Some(0x8007_06BA));
    }
}
