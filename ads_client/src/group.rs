//! Group handle

use crate::error::Result;
use crate::handle::{DirectoryHandle, FromInterface, HandleCell};
use crate::members::Members;
use ads_types::Capability;
use provider_api::{DirectoryGroup, Interface, SessionLease};
use std::fmt;

/// Handle to a group entry
pub struct Group {
    cell: HandleCell<dyn DirectoryGroup>,
}

impl Group {
    pub fn description(&self) -> Result<String> {
        self.cell.with(|g, _| Ok(g.description()?))
    }

    /// Acquires the member collection as a new handle
    pub fn members(&self) -> Result<Members> {
        self.cell
            .with(|g, lease| Ok(Members::new(g.members()?, lease.clone())))
    }

    /// Adds the entry at `path` to the group
    pub fn add(&self, path: &str) -> Result<()> {
        self.cell.with(|g, _| Ok(g.add(path)?))
    }

    /// Removes the entry at `path` from the group
    pub fn remove(&self, path: &str) -> Result<()> {
        self.cell.with(|g, _| Ok(g.remove(path)?))
    }
}

impl DirectoryHandle for Group {
    type Iface = dyn DirectoryGroup;

    fn cell(&self) -> &HandleCell<dyn DirectoryGroup> {
        &self.cell
    }
}

impl FromInterface for Group {
    const CAPABILITY: Capability = Capability::Group;

    fn from_interface(iface: Interface, lease: SessionLease) -> Result<Self> {
        Ok(Self {
            cell: HandleCell::new("group", iface.into_group()?, lease),
        })
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("closed", &self.cell.is_closed())
            .finish()
    }
}
