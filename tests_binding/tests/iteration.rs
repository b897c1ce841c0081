//! Child Iteration Integration Tests
//!
//! These tests validate lazy enumeration of container children:
//! - Exhaustion is sticky
//! - Non-object elements and provider errors surface as errors
//! - Class filters restrict enumeration
//! - Group members enumerate like children

use ads_client::{DirectoryError, DirectoryHandle};
use provider_api::ProviderError;
use sim_directory::fault_injection::{EnumerationFault, FaultPlan};
use sim_directory::test_utils::*;
use tests_binding::{test_bootstrap, test_bootstrap_with_faults};

#[test]
fn test_children_in_order() {
    let fx = test_bootstrap();
    let users = fx.registry.open_container(USERS).unwrap();
    let names: Vec<String> = users
        .children()
        .unwrap()
        .iter()
        .map(|child| child.unwrap().name().unwrap())
        .collect();
    assert_eq!(names, vec!["CN=Alice", "CN=Bob", "CN=Admins"]);
}

#[test]
fn test_exhaustion_repeats_end() {
    let fx = test_bootstrap();
    let domain = fx.registry.open_container(DOMAIN).unwrap();
    let children = domain.children().unwrap();
    let mut count = 0;
    while children.next().unwrap().is_some() {
        count += 1;
    }
    assert_eq!(count, 2);
    for _ in 0..3 {
        assert!(children.next().unwrap().is_none());
    }
}

#[test]
fn test_each_children_call_starts_over() {
    let fx = test_bootstrap();
    let domain = fx.registry.open_container(DOMAIN).unwrap();
    let first = domain.children().unwrap();
    while first.next().unwrap().is_some() {}
    let second = domain.children().unwrap();
    assert!(second.next().unwrap().is_some());
}

#[test]
fn test_yielded_handles_outlive_the_iterator() {
    let fx = test_bootstrap();
    let users = fx.registry.open_container(USERS).unwrap();
    let children = users.children().unwrap();
    let alice = children.next().unwrap().unwrap();
    children.close();
    users.close();
    assert_eq!(alice.class().unwrap(), "user");
}

#[test]
fn test_non_object_element() {
    let fx = test_bootstrap_with_faults(FaultPlan::new().with_enumeration_fault(
        EnumerationFault::NonObjectAt {
            container: USERS.to_string(),
            index: 1,
        },
    ));
    let users = fx.registry.open_container(USERS).unwrap();
    let children = users.children().unwrap();
    assert!(children.next().unwrap().is_some());
    assert!(matches!(
        children.next(),
        Err(DirectoryError::NonDispatchVariant)
    ));
    assert_eq!(children.next().unwrap().unwrap().name().unwrap(), "CN=Admins");
}

#[test]
fn test_enumeration_error() {
    let fx = test_bootstrap_with_faults(FaultPlan::new().with_enumeration_fault(
        EnumerationFault::ErrorAt {
            container: DOMAIN.to_string(),
            index: 0,
            error: ProviderError::AccessDenied,
        },
    ));
    let domain = fx.registry.open_container(DOMAIN).unwrap();
    let children = domain.children().unwrap();
    assert!(matches!(
        children.next(),
        Err(DirectoryError::Provider(ProviderError::AccessDenied))
    ));
}

#[test]
fn test_class_filter() {
    let fx = test_bootstrap();
    let users = fx.registry.open_container(USERS).unwrap();
    assert!(users.filter().unwrap().is_empty());

    users.set_filter(&["group"]).unwrap();
    assert_eq!(users.filter().unwrap(), vec!["group".to_string()]);

    let children: Vec<_> = users.children().unwrap().iter().collect();
    assert_eq!(children.len(), 1);
    let admins = children.into_iter().next().unwrap().unwrap();
    assert_eq!(admins.to_group().unwrap().description().unwrap(), "Domain administrators");
}

#[test]
fn test_child_by_name() {
    let fx = test_bootstrap();
    let domain = fx.registry.open_container(DOMAIN).unwrap();
    let users = domain.container("container", "CN=Users").unwrap();
    let bob = users.object("user", "CN=Bob").unwrap();
    assert_eq!(bob.path().unwrap(), BOB);
    assert!(users.object("group", "CN=Bob").is_err());
}

#[test]
fn test_group_members() {
    let fx = test_bootstrap();
    let admins = fx.registry.open_group(ADMINS).unwrap();

    let members = admins.members().unwrap();
    let paths: Vec<String> = members
        .iter()
        .unwrap()
        .iter()
        .map(|m| m.unwrap().path().unwrap())
        .collect();
    assert_eq!(paths, vec![ALICE.to_string()]);

    admins.add(BOB).unwrap();
    assert!(matches!(
        admins.add(BOB),
        Err(DirectoryError::Provider(ProviderError::ObjectExists))
    ));

    members.set_filter(&["user"]).unwrap();
    assert_eq!(members.filter().unwrap(), vec!["user".to_string()]);
    assert_eq!(members.iter().unwrap().iter().count(), 2);

    admins.remove(ALICE).unwrap();
    assert!(admins.remove(ALICE).is_err());
    let remaining: Vec<String> = members
        .iter()
        .unwrap()
        .iter()
        .map(|m| m.unwrap().name().unwrap())
        .collect();
    assert_eq!(remaining, vec!["CN=Bob"]);
}
