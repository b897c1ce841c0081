//! One-shot binding
//!
//! Each call opens a local registry, binds one path and closes the registry
//! before returning. Convenient for a single lookup; a long-lived
//! [`NamespaceRegistry`] avoids repeating discovery.

use crate::error::Result;
use crate::handle::FromInterface;
use crate::registry::NamespaceRegistry;
use crate::{Computer, Container, Object};
use ads_types::{BindFlags, Credentials};
use provider_api::Session;

/// Binds `path` with the current security context and the default flags
pub fn open(session: &Session, path: &str) -> Result<Object> {
    open_as(session, path, &Credentials::current(), BindFlags::client_default())
}

/// Binds `path` with explicit credentials and flags
pub fn open_with(
    session: &Session,
    path: &str,
    credentials: &Credentials,
    flags: BindFlags,
) -> Result<Object> {
    open_as(session, path, credentials, flags)
}

pub fn open_container(session: &Session, path: &str) -> Result<Container> {
    open_as(session, path, &Credentials::current(), BindFlags::client_default())
}

pub fn open_container_with(
    session: &Session,
    path: &str,
    credentials: &Credentials,
    flags: BindFlags,
) -> Result<Container> {
    open_as(session, path, credentials, flags)
}

pub fn open_computer(session: &Session, path: &str) -> Result<Computer> {
    open_as(session, path, &Credentials::current(), BindFlags::client_default())
}

pub fn open_computer_with(
    session: &Session,
    path: &str,
    credentials: &Credentials,
    flags: BindFlags,
) -> Result<Computer> {
    open_as(session, path, credentials, flags)
}

/// Binds `path` through a temporary local registry and narrows it to `H`
pub fn open_as<H: FromInterface>(
    session: &Session,
    path: &str,
    credentials: &Credentials,
    flags: BindFlags,
) -> Result<H> {
    let registry = NamespaceRegistry::open(session, "")?;
    let handle = registry.resolve_as(path, credentials, flags);
    registry.close();
    handle
}
