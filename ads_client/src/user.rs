//! User handle

use crate::error::Result;
use crate::handle::{DirectoryHandle, FromInterface, HandleCell};
use ads_types::Capability;
use provider_api::{DirectoryUser, Interface, SessionLease};
use std::fmt;

/// Handle to a user account entry
pub struct User {
    cell: HandleCell<dyn DirectoryUser>,
}

impl User {
    pub fn account_disabled(&self) -> Result<bool> {
        self.cell.with(|u, _| Ok(u.account_disabled()?))
    }

    /// Stages the disabled flag; commit with [`DirectoryHandle::set_info`]
    pub fn set_account_disabled(&self, disabled: bool) -> Result<()> {
        self.cell.with(|u, _| Ok(u.set_account_disabled(disabled)?))
    }

    pub fn full_name(&self) -> Result<String> {
        self.cell.with(|u, _| Ok(u.full_name()?))
    }
}

impl DirectoryHandle for User {
    type Iface = dyn DirectoryUser;

    fn cell(&self) -> &HandleCell<dyn DirectoryUser> {
        &self.cell
    }
}

impl FromInterface for User {
    const CAPABILITY: Capability = Capability::User;

    fn from_interface(iface: Interface, lease: SessionLease) -> Result<Self> {
        Ok(Self {
            cell: HandleCell::new("user", iface.into_user()?, lease),
        })
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("closed", &self.cell.is_closed())
            .finish()
    }
}
