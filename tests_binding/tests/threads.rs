//! Concurrency Integration Tests
//!
//! These tests validate sharing across threads:
//! - A registry resolves concurrently from many threads
//! - A handle closed while other threads read reports either a value or Closed
//! - No reference survives once every thread is done

use ads_client::{DirectoryError, DirectoryHandle};
use sim_directory::test_utils::*;
use std::sync::Arc;
use std::thread;
use tests_binding::test_bootstrap;

#[test]
fn test_concurrent_resolution() {
    let fx = test_bootstrap();
    let registry = Arc::new(fx.registry);

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..25 {
                    let alice = registry.open_user(ALICE).unwrap();
                    assert_eq!(alice.full_name().unwrap(), "Alice Liddell");
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    registry.close();
    drop(registry);
    drop(fx.session);
    assert_eq!(fx.sim.live_references(), 0);
    assert_eq!(fx.sim.uninitialize_count(), 1);
}

#[test]
fn test_close_races_with_reads() {
    let fx = test_bootstrap();
    let user = Arc::new(fx.registry.open_user(ALICE).unwrap());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let user = Arc::clone(&user);
            thread::spawn(move || {
                for _ in 0..50 {
                    match user.attr_strings("mail") {
                        Ok(mail) => assert_eq!(mail, vec!["alice@example.com".to_string()]),
                        Err(err) => assert_eq!(err, DirectoryError::Closed),
                    }
                }
            })
        })
        .collect();

    user.close();
    for reader in readers {
        reader.join().unwrap();
    }
    assert!(user.is_closed());
}

#[test]
fn test_registry_close_races_with_resolution() {
    let fx = test_bootstrap();
    let registry = Arc::new(fx.registry);

    let resolvers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..50 {
                    match registry.open_object(DOMAIN) {
                        Ok(domain) => assert_eq!(domain.class().unwrap(), "domainDNS"),
                        Err(err) => assert_eq!(err, DirectoryError::Closed),
                    }
                }
            })
        })
        .collect();

    registry.close();
    for resolver in resolvers {
        resolver.join().unwrap();
    }
    assert!(registry.is_closed());
}

#[test]
fn test_shared_iterator() {
    let fx = test_bootstrap();
    let users = fx.registry.open_container(USERS).unwrap();
    let children = Arc::new(users.children().unwrap());

    let takers: Vec<_> = (0..3)
        .map(|_| {
            let children = Arc::clone(&children);
            thread::spawn(move || {
                let mut taken = 0;
                while children.next().unwrap().is_some() {
                    taken += 1;
                }
                taken
            })
        })
        .collect();

    let total: usize = takers.into_iter().map(|t| t.join().unwrap()).sum();
    assert_eq!(total, 3);
}
