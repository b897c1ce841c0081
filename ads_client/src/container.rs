//! Container handle

use crate::error::Result;
use crate::handle::{FromInterface, HandleCell};
use crate::iter::ChildIterator;
use crate::object::{wrap, Object};
use ads_types::Capability;
use provider_api::{DirectoryContainer, Interface, SessionLease};
use std::fmt;

/// Handle to a directory entry that holds children
pub struct Container {
    cell: HandleCell<dyn DirectoryContainer>,
}

impl Container {
    pub(crate) fn new(iface: Box<dyn DirectoryContainer>, lease: SessionLease) -> Self {
        Self {
            cell: HandleCell::new("container", iface, lease),
        }
    }

    /// Starts a new enumeration of the container's children
    pub fn children(&self) -> Result<ChildIterator> {
        self.cell
            .with(|c, lease| Ok(ChildIterator::new(c.new_enum()?, lease.clone())))
    }

    /// Object classes the enumeration is restricted to; empty for all
    pub fn filter(&self) -> Result<Vec<String>> {
        self.cell.with(|c, _| Ok(c.filter()?))
    }

    /// Restricts enumeration to the given object classes
    pub fn set_filter<S: AsRef<str>>(&self, classes: &[S]) -> Result<()> {
        let classes: Vec<String> = classes.iter().map(|c| c.as_ref().to_string()).collect();
        self.cell.with(|c, _| Ok(c.set_filter(&classes)?))
    }

    /// Binds a direct child by class and relative name
    pub fn object(&self, class: &str, name: &str) -> Result<Object> {
        self.child(class, name)
    }

    /// Binds a direct child by class and relative name as a container
    pub fn container(&self, class: &str, name: &str) -> Result<Container> {
        self.child(class, name)
    }

    /// Acquires the object capability of this entry as a new handle
    pub fn to_object(&self) -> Result<Object> {
        self.narrow()
    }

    /// Acquires a new, independently owned handle for another capability
    pub fn narrow<H: FromInterface>(&self) -> Result<H> {
        self.cell.with(|c, lease| {
            let iface = c.query(H::CAPABILITY)?;
            H::from_interface(iface, lease.clone())
        })
    }

    fn child<H: FromInterface>(&self, class: &str, name: &str) -> Result<H> {
        self.cell
            .with(|c, lease| wrap(c.get_object(class, name)?, lease.clone()))
    }

    /// Releases the remote reference; later calls do nothing
    pub fn close(&self) {
        self.cell.close();
    }

    /// Returns true once the handle has been closed
    pub fn is_closed(&self) -> bool {
        self.cell.is_closed()
    }
}

impl FromInterface for Container {
    const CAPABILITY: Capability = Capability::Container;

    fn from_interface(iface: Interface, lease: SessionLease) -> Result<Self> {
        Ok(Self::new(iface.into_container()?, lease))
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("closed", &self.is_closed())
            .finish()
    }
}
