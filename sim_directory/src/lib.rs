//! # Simulated Directory
//!
//! This crate provides an in-memory provider host for testing the directory
//! client without a directory server.
//!
//! ## Purpose
//!
//! - Runs under `cargo test`
//! - Deterministic (faults fire at named providers, paths and indices)
//! - Inspectable (live references, prefetches, binds and committed values)
//!
//! ## Philosophy
//!
//! This is not a mock that replays canned answers. Every reference it hands
//! out is a counted object with its own capability set, so leaks and
//! double releases show up as wrong counts.

pub mod fault_injection;
pub mod model;
mod remote;
pub mod test_utils;
mod translate;

use ads_types::BindFlags;
use fault_injection::FaultPlan;
use model::{normalize, SimAttribute, SimObject};
use provider_api::{ProviderError, ProviderHost, ProviderResult, RemoteRef};
use remote::{SimRef, Target};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// An installed namespace provider
#[derive(Debug, Clone)]
pub(crate) struct SimProvider {
    pub(crate) scheme: String,
    pub(crate) id: Uuid,
}

pub(crate) struct Shared {
    pub(crate) servers: Vec<String>,
    pub(crate) netbios_domain: Option<String>,
    pub(crate) providers: Vec<SimProvider>,
    pub(crate) objects: Mutex<Vec<SimObject>>,
    pub(crate) credentials: Vec<(String, String)>,
    pub(crate) faults: FaultPlan,
    pub(crate) live: AtomicUsize,
    pub(crate) initialized: AtomicUsize,
    pub(crate) uninitialized: AtomicUsize,
    pub(crate) prefetches: Mutex<Vec<(String, Vec<String>)>>,
    pub(crate) binds: Mutex<Vec<(String, BindFlags)>>,
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory provider host
pub struct SimDirectory {
    shared: Arc<Shared>,
}

impl SimDirectory {
    /// Starts building a simulated directory
    pub fn builder() -> SimDirectoryBuilder {
        SimDirectoryBuilder::default()
    }

    /// Number of provider references currently alive
    pub fn live_references(&self) -> usize {
        self.shared.live.load(Ordering::SeqCst)
    }

    /// Number of times the host was initialized
    pub fn initialize_count(&self) -> usize {
        self.shared.initialized.load(Ordering::SeqCst)
    }

    /// Number of times the host was uninitialized
    pub fn uninitialize_count(&self) -> usize {
        self.shared.uninitialized.load(Ordering::SeqCst)
    }

    /// Prefetch requests received, as `(entry path, attribute names)`
    pub fn prefetches(&self) -> Vec<(String, Vec<String>)> {
        lock(&self.shared.prefetches).clone()
    }

    /// Bind requests received, as `(normalized path, flags)`
    pub fn binds(&self) -> Vec<(String, BindFlags)> {
        lock(&self.shared.binds).clone()
    }

    /// Committed value of an attribute
    pub fn attribute(&self, path: &str, name: &str) -> Option<SimAttribute> {
        let key = normalize(path);
        lock(&self.shared.objects)
            .iter()
            .find(|obj| obj.path == key)
            .and_then(|obj| obj.attributes.get(name).cloned())
    }

    /// Adds an entry after construction
    pub fn insert(&self, object: SimObject) {
        let mut objects = lock(&self.shared.objects);
        objects.retain(|existing| existing.path != object.path);
        objects.push(object);
    }
}

impl ProviderHost for SimDirectory {
    fn initialize(&self) -> ProviderResult<()> {
        self.shared.initialized.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn uninitialize(&self) {
        self.shared.uninitialized.fetch_add(1, Ordering::SeqCst);
    }

    fn namespaces(&self, server: &str) -> ProviderResult<RemoteRef> {
        self.reach(server)?;
        Ok(SimRef::boxed(&self.shared, Target::Namespaces))
    }

    fn name_translator(&self, server: &str) -> ProviderResult<RemoteRef> {
        self.reach(server)?;
        Ok(SimRef::boxed(&self.shared, Target::Translator))
    }
}

impl SimDirectory {
    fn reach(&self, server: &str) -> ProviderResult<()> {
        if !server.is_empty() && !self.shared.servers.iter().any(|s| s == server) {
            return Err(ProviderError::from_code(
                0x8007_06BA,
                "The RPC server is unavailable.",
            ));
        }
        Ok(())
    }
}

/// Builder for [`SimDirectory`]
#[derive(Default)]
pub struct SimDirectoryBuilder {
    servers: Vec<String>,
    netbios_domain: Option<String>,
    providers: Vec<SimProvider>,
    objects: Vec<SimObject>,
    credentials: Vec<(String, String)>,
    faults: FaultPlan,
}

impl SimDirectoryBuilder {
    /// Installs a provider for `scheme` with a random identifier
    pub fn provider(self, scheme: &str) -> Self {
        self.provider_with_id(scheme, Uuid::new_v4())
    }

    /// Installs a provider for `scheme` with the given identifier
    pub fn provider_with_id(mut self, scheme: &str, id: Uuid) -> Self {
        self.providers.push(SimProvider {
            scheme: scheme.to_string(),
            id,
        });
        self
    }

    /// Accepts namespace discovery against a named remote server
    pub fn server(mut self, name: &str) -> Self {
        self.servers.push(name.to_string());
        self
    }

    /// Sets the down-level domain name used by NT4 name translation
    pub fn netbios_domain(mut self, name: &str) -> Self {
        self.netbios_domain = Some(name.to_string());
        self
    }

    /// Adds a directory entry
    pub fn object(mut self, object: SimObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Accepts an explicit user/password pair
    ///
    /// Without any registered pair, every credential is accepted.
    pub fn credentials(mut self, user: &str, password: &str) -> Self {
        self.credentials
            .push((user.to_string(), password.to_string()));
        self
    }

    /// Installs a fault plan
    pub fn faults(mut self, faults: FaultPlan) -> Self {
        self.faults = faults;
        self
    }

    pub fn build(self) -> Arc<SimDirectory> {
        Arc::new(SimDirectory {
            shared: Arc::new(Shared {
                servers: self.servers,
                netbios_domain: self.netbios_domain,
                providers: self.providers,
                objects: Mutex::new(self.objects),
                credentials: self.credentials,
                faults: self.faults,
                live: AtomicUsize::new(0),
                initialized: AtomicUsize::new(0),
                uninitialized: AtomicUsize::new(0),
                prefetches: Mutex::new(Vec::new()),
                binds: Mutex::new(Vec::new()),
            }),
        })
    }
}
