//! Generic directory object handle

use crate::container::Container;
use crate::error::Result;
use crate::handle::{DirectoryHandle, FromInterface, HandleCell};
use crate::{Computer, Group, User};
use ads_types::Capability;
use provider_api::{DirectoryObject, Interface, RemoteRef, SessionLease};
use std::fmt;

/// Handle to any directory entry
pub struct Object {
    cell: HandleCell<dyn DirectoryObject>,
}

impl Object {
    pub(crate) fn new(iface: Box<dyn DirectoryObject>, lease: SessionLease) -> Self {
        Self {
            cell: HandleCell::new("object", iface, lease),
        }
    }

    /// Acquires the entry's container capability as a new handle
    pub fn to_container(&self) -> Result<Container> {
        self.narrow()
    }

    /// Acquires the entry's group capability as a new handle
    pub fn to_group(&self) -> Result<Group> {
        self.narrow()
    }

    /// Acquires the entry's user capability as a new handle
    pub fn to_user(&self) -> Result<User> {
        self.narrow()
    }

    /// Acquires the entry's computer capability as a new handle
    pub fn to_computer(&self) -> Result<Computer> {
        self.narrow()
    }

    /// Raw provider interface for any capability
    pub(crate) fn query_interface(&self, capability: Capability) -> Result<Interface> {
        self.cell.with(|obj, _| Ok(obj.query(capability)?))
    }
}

impl DirectoryHandle for Object {
    type Iface = dyn DirectoryObject;

    fn cell(&self) -> &HandleCell<dyn DirectoryObject> {
        &self.cell
    }
}

impl FromInterface for Object {
    const CAPABILITY: Capability = Capability::Object;

    fn from_interface(iface: Interface, lease: SessionLease) -> Result<Self> {
        Ok(Self::new(iface.into_object()?, lease))
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Narrows a freshly bound generic reference to `H`
///
/// The generic reference is released before returning.
pub(crate) fn wrap<H: FromInterface>(remote: RemoteRef, lease: SessionLease) -> Result<H> {
    let iface = remote.query(H::CAPABILITY)?;
    drop(remote);
    H::from_interface(iface, lease)
}
