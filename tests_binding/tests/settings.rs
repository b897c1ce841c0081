//! Client Settings Integration Tests
//!
//! These tests validate that persisted settings drive registry behavior.

use ads_client::{DirectoryHandle, NamespaceRegistry};
use ads_settings::ClientSettings;
use ads_types::BindFlags;
use provider_api::Session;
use sim_directory::test_utils::*;

#[test]
fn test_saved_settings_drive_binding() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("client.json");
    let flags = BindFlags::SECURE_AUTHENTICATION | BindFlags::USE_SIGNING;
    ClientSettings::new()
        .with_flags(flags)
        .with_user(ADMIN_USER)
        .save(&path)
        .unwrap();

    let settings = ClientSettings::load(&path).unwrap();
    let sim = example_directory();
    let session = Session::new(sim.clone()).unwrap();
    let registry = NamespaceRegistry::with_settings(&session, &settings).unwrap();

    let alice = registry
        .resolve_user(ALICE, &settings.credentials(ADMIN_PASSWORD), registry.flags())
        .unwrap();
    assert_eq!(alice.name().unwrap(), "CN=Alice");
    assert!(registry
        .resolve_user(ALICE, &settings.credentials("nope"), registry.flags())
        .is_err());
    assert_eq!(sim.binds()[0], (ALICE.to_string(), flags));
}

#[test]
fn test_remote_server_from_settings() {
    let sim = example_builder().server("dc01.example.com").build();
    let session = Session::new(sim).unwrap();
    let settings = ClientSettings::new().with_server("dc01.example.com");
    let registry = NamespaceRegistry::with_settings(&session, &settings).unwrap();
    assert_eq!(registry.server(), "dc01.example.com");
    assert_eq!(registry.namespaces().unwrap().len(), 3);
}
