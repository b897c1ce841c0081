//! Handle Lifecycle Integration Tests
//!
//! These tests validate the ownership model:
//! - Close is one-way and idempotent on every closable type
//! - Narrowing acquires an independent handle
//! - Every provider reference is released on close or drop
//! - The provider host is torn down only after the last handle is gone

use ads_client::{DirectoryError, DirectoryHandle};
use sim_directory::test_utils::*;
use tests_binding::test_bootstrap;

#[test]
fn test_double_close_everywhere() {
    let fx = test_bootstrap();
    let domain = fx.registry.open_container(DOMAIN).unwrap();
    let children = domain.children().unwrap();
    let group = fx.registry.open_group(ADMINS).unwrap();
    let members = group.members().unwrap();
    let user = fx.registry.open_user(ALICE).unwrap();

    for _ in 0..2 {
        children.close();
        members.close();
        domain.close();
        group.close();
        user.close();
        fx.registry.close();
    }

    assert!(children.is_closed());
    assert!(members.is_closed());
    assert!(domain.is_closed());
    assert!(DirectoryHandle::is_closed(&group));
    assert!(DirectoryHandle::is_closed(&user));
    assert!(fx.registry.is_closed());
}

#[test]
fn test_closed_handles_report_closed() {
    let fx = test_bootstrap();
    let user = fx.registry.open_user(ALICE).unwrap();
    user.close();
    assert_eq!(user.name(), Err(DirectoryError::Closed));
    assert_eq!(user.full_name(), Err(DirectoryError::Closed));
    assert_eq!(user.attr_strings("mail"), Err(DirectoryError::Closed));
    assert_eq!(user.pull(&["mail"]), Err(DirectoryError::Closed));
    assert!(matches!(user.narrow::<ads_client::Object>(), Err(DirectoryError::Closed)));

    let domain = fx.registry.open_container(DOMAIN).unwrap();
    let children = domain.children().unwrap();
    children.close();
    assert!(matches!(children.next(), Err(DirectoryError::Closed)));
    domain.close();
    assert!(matches!(domain.children(), Err(DirectoryError::Closed)));
}

#[test]
fn test_empty_pull_on_closed_handle_is_still_closed() {
    let fx = test_bootstrap();
    let user = fx.registry.open_user(ALICE).unwrap();
    user.close();
    let none: [&str; 0] = [];
    assert_eq!(user.pull(&none), Err(DirectoryError::Closed));
}

#[test]
fn test_narrowed_handle_is_independent() {
    let fx = test_bootstrap();
    let object = fx.registry.open_object(ADMINS).unwrap();
    let group = object.to_group().unwrap();
    object.close();
    assert_eq!(group.description().unwrap(), "Domain administrators");
}

#[test]
fn test_handles_outlive_the_registry() {
    let fx = test_bootstrap();
    let user = fx.registry.open_user(ALICE).unwrap();
    fx.registry.close();
    assert_eq!(user.full_name().unwrap(), "Alice Liddell");
}

#[test]
fn test_all_references_released() {
    let fx = test_bootstrap();
    {
        let domain = fx.registry.open_container(DOMAIN).unwrap();
        let children = domain.children().unwrap();
        let first = children.next().unwrap().unwrap();
        let _ = first.to_container();
        let user = fx.registry.open_user(ALICE).unwrap();
        let _ = user.attr_int64s("pwdLastSet").unwrap();
        let _ = user.attr_ints("pwdLastSet").unwrap();
    }
    let sim = fx.finish();
    assert_eq!(sim.live_references(), 0);
}

#[test]
fn test_uninitialize_after_last_handle() {
    let fx = test_bootstrap();
    let user = fx.registry.open_user(ALICE).unwrap();
    let sim = fx.finish();

    assert_eq!(sim.initialize_count(), 1);
    assert_eq!(sim.uninitialize_count(), 0);

    drop(user);
    assert_eq!(sim.uninitialize_count(), 1);
    assert_eq!(sim.live_references(), 0);
}

#[test]
fn test_close_releases_lease() {
    let fx = test_bootstrap();
    let before = fx.session.active_leases();
    let user = fx.registry.open_user(ALICE).unwrap();
    assert_eq!(fx.session.active_leases(), before + 1);
    user.close();
    assert_eq!(fx.session.active_leases(), before);
}

#[test]
fn test_narrow_between_typed_handles() {
    let fx = test_bootstrap();
    let user = fx.registry.open_user(ALICE).unwrap();
    let object: ads_client::Object = user.narrow().unwrap();
    user.close();
    let again = object.to_user().unwrap();
    assert_eq!(again.full_name().unwrap(), "Alice Liddell");

    let computer = fx.registry.open_computer(WS01).unwrap();
    let generic: ads_client::Object = computer.narrow().unwrap();
    assert_eq!(generic.class().unwrap(), "computer");
    assert!(matches!(
        generic.to_group(),
        Err(DirectoryError::Provider(provider_api::ProviderError::NoInterface))
    ));
}

#[test]
fn test_every_handle_reports_state_in_debug() {
    let fx = test_bootstrap();
    let user = fx.registry.open_user(ALICE).unwrap();
    let group = fx.registry.open_group(ADMINS).unwrap();
    let members = group.members().unwrap();
    let computer = fx.registry.open_computer(WS01).unwrap();

    assert_eq!(format!("{:?}", user), "User { closed: false }");
    assert_eq!(format!("{:?}", computer), "Computer { closed: false }");
    assert_eq!(format!("{:?}", members), "Members { closed: false }");
    group.close();
    assert_eq!(format!("{:?}", group), "Group { closed: true }");
}
