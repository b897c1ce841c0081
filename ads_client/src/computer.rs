//! Computer handle

use crate::error::Result;
use crate::handle::{DirectoryHandle, FromInterface, HandleCell};
use ads_types::Capability;
use provider_api::{DirectoryComputer, Interface, SessionLease};
use std::fmt;

/// Handle to a computer account entry
pub struct Computer {
    cell: HandleCell<dyn DirectoryComputer>,
}

impl Computer {
    /// Machine identifier reported by the provider
    pub fn id(&self) -> Result<String> {
        self.cell.with(|c, _| Ok(c.computer_id()?))
    }

    pub fn site(&self) -> Result<String> {
        self.cell.with(|c, _| Ok(c.site()?))
    }

    pub fn operating_system(&self) -> Result<String> {
        self.cell.with(|c, _| Ok(c.operating_system()?))
    }
}

impl DirectoryHandle for Computer {
    type Iface = dyn DirectoryComputer;

    fn cell(&self) -> &HandleCell<dyn DirectoryComputer> {
        &self.cell
    }
}

impl FromInterface for Computer {
    const CAPABILITY: Capability = Capability::Computer;

    fn from_interface(iface: Interface, lease: SessionLease) -> Result<Self> {
        Ok(Self {
            cell: HandleCell::new("computer", iface.into_computer()?, lease),
        })
    }
}

impl fmt::Debug for Computer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computer")
            .field("closed", &self.cell.is_closed())
            .finish()
    }
}
