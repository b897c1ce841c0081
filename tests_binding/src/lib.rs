//! Binding Test Utilities
//!
//! This crate provides shared utilities for the cross-crate binding tests.
//!
//! ## Test Philosophy
//!
//! - **No leaked references**: Every test can check that the provider sees zero live references at the end
//! - **Deterministic failures**: All faults are reproducible via FaultPlan
//! - **Closed means closed**: Nothing is usable after close, and close never fails

use ads_client::NamespaceRegistry;
use provider_api::Session;
use sim_directory::fault_injection::FaultPlan;
use sim_directory::test_utils::{example_directory, example_directory_with_faults};
use sim_directory::SimDirectory;
use std::sync::Arc;

/// A simulated directory with a session and an open local registry
pub struct Fixture {
    pub sim: Arc<SimDirectory>,
    pub session: Session,
    pub registry: NamespaceRegistry,
}

impl Fixture {
    /// Closes the registry and drops the session
    ///
    /// Returns the directory so callers can inspect what is left alive.
    pub fn finish(self) -> Arc<SimDirectory> {
        self.registry.close();
        drop(self.session);
        self.sim
    }
}

/// Bootstrap helper for tests
///
/// Opens the example domain through a fresh session and local registry.
pub fn test_bootstrap() -> Fixture {
    bootstrap_with(example_directory())
}

/// Like [`test_bootstrap`], with faults injected
pub fn test_bootstrap_with_faults(faults: FaultPlan) -> Fixture {
    bootstrap_with(example_directory_with_faults(faults))
}

fn bootstrap_with(sim: Arc<SimDirectory>) -> Fixture {
    let session = Session::new(sim.clone()).expect("session");
    let registry = NamespaceRegistry::open(&session, "").expect("registry");
    Fixture {
        sim,
        session,
        registry,
    }
}
