//! Provider runtime session
//!
//! A provider host usually needs process-level setup before any reference can
//! be acquired and teardown after the last one is gone. [`Session`] makes that
//! lifetime a value: creating it initializes the host, and the host is
//! uninitialized exactly once, when the session and every [`SessionLease`]
//! derived from it have been dropped.

use crate::{ProviderError, ProviderResult, RemoteRef};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Entry point into a set of namespace providers
pub trait ProviderHost: Send + Sync {
    /// Called once when a session is created
    fn initialize(&self) -> ProviderResult<()> {
        Ok(())
    }

    /// Called once when the last session reference is gone
    fn uninitialize(&self) {}

    /// Binds the directory of installed namespace providers on `server`
    ///
    /// An empty server means the local machine. The returned entity exposes
    /// the container capability; each child describes one provider.
    fn namespaces(&self, server: &str) -> ProviderResult<RemoteRef>;

    /// Creates a name translator served by `server`
    ///
    /// The returned entity exposes the name-translate capability. Hosts
    /// without translation support keep the default, which reports the
    /// not-implemented code.
    fn name_translator(&self, server: &str) -> ProviderResult<RemoteRef> {
        let _ = server;
        Err(ProviderError::from_code(0x8000_4001, "Not implemented"))
    }
}

struct SessionInner {
    host: Arc<dyn ProviderHost>,
    leases: AtomicUsize,
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        debug!("provider session ended");
        self.host.uninitialize();
    }
}

/// An initialized provider host
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Initializes `host` and wraps it in a session
    pub fn new(host: Arc<dyn ProviderHost>) -> ProviderResult<Self> {
        host.initialize()?;
        debug!("provider session started");
        Ok(Self {
            inner: Arc::new(SessionInner {
                host,
                leases: AtomicUsize::new(0),
            }),
        })
    }

    /// Returns the provider host
    pub fn host(&self) -> &dyn ProviderHost {
        self.inner.host.as_ref()
    }

    /// Takes a counted lease that keeps the host initialized
    pub fn lease(&self) -> SessionLease {
        SessionLease::acquire(Arc::clone(&self.inner))
    }

    /// Number of leases currently held
    pub fn active_leases(&self) -> usize {
        self.inner.leases.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("active_leases", &self.active_leases())
            .finish()
    }
}

/// Keeps a session's host initialized while held
pub struct SessionLease {
    inner: Arc<SessionInner>,
}

impl SessionLease {
    fn acquire(inner: Arc<SessionInner>) -> Self {
        let held = inner.leases.fetch_add(1, Ordering::SeqCst) + 1;
        trace!(held, "session lease acquired");
        Self { inner }
    }

    /// Returns the provider host
    pub fn host(&self) -> &dyn ProviderHost {
        self.inner.host.as_ref()
    }

    /// Returns a session sharing this lease's host
    pub fn session(&self) -> Session {
        Session {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Clone for SessionLease {
    fn clone(&self) -> Self {
        Self::acquire(Arc::clone(&self.inner))
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        let held = self.inner.leases.fetch_sub(1, Ordering::SeqCst) - 1;
        trace!(held, "session lease released");
    }
}

impl fmt::Debug for SessionLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionLease").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingHost {
        inits: AtomicUsize,
        uninits: AtomicUsize,
        refuse: bool,
    }

    impl ProviderHost for CountingHost {
        fn initialize(&self) -> ProviderResult<()> {
            if self.refuse {
                return Err(ProviderError::AccessDenied);
            }
            self.inits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn uninitialize(&self) {
            self.uninits.fetch_add(1, Ordering::SeqCst);
        }

        fn namespaces(&self, _server: &str) -> ProviderResult<RemoteRef> {
            Err(ProviderError::InvalidNamespace)
        }
    }

    #[test]
    fn test_session_initializes_once() {
        let host = Arc::new(CountingHost::default());
        let session = Session::new(host.clone()).unwrap();
        let _copy = session.clone();
        assert_eq!(host.inits.load(Ordering::SeqCst), 1);
        assert_eq!(host.uninits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_uninitialize_after_last_lease() {
        let host = Arc::new(CountingHost::default());
        let session = Session::new(host.clone()).unwrap();
        let lease = session.lease();
        let second = lease.clone();
        assert_eq!(session.active_leases(), 2);

        drop(session);
        drop(lease);
        assert_eq!(host.uninits.load(Ordering::SeqCst), 0);

        drop(second);
        assert_eq!(host.uninits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lease_count_tracks_drops() {
        let host = Arc::new(CountingHost::default());
        let session = Session::new(host).unwrap();
        {
            let _a = session.lease();
            let _b = session.lease();
            assert_eq!(session.active_leases(), 2);
        }
        assert_eq!(session.active_leases(), 0);
    }

    #[test]
    fn test_name_translator_defaults_to_not_implemented() {
        let host = CountingHost::default();
        let err = host.name_translator("").err().unwrap();
        assert_eq!(err.code(), 0x8000_4001);
    }

    #[test]
    fn test_failed_initialize() {
        let host = Arc::new(CountingHost {
            refuse: true,
            ..Default::default()
        });
        assert_eq!(
            Session::new(host.clone()).unwrap_err(),
            ProviderError::AccessDenied
        );
        assert_eq!(host.uninits.load(Ordering::SeqCst), 0);
    }
}
