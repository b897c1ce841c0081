//! Group member collection handle

use crate::error::Result;
use crate::handle::HandleCell;
use crate::iter::ChildIterator;
use provider_api::{DirectoryMembers, SessionLease};
use std::fmt;

/// Handle to the members of a group
pub struct Members {
    cell: HandleCell<dyn DirectoryMembers>,
}

impl Members {
    pub(crate) fn new(iface: Box<dyn DirectoryMembers>, lease: SessionLease) -> Self {
        Self {
            cell: HandleCell::new("members", iface, lease),
        }
    }

    /// Starts a new enumeration of the members
    pub fn iter(&self) -> Result<ChildIterator> {
        self.cell
            .with(|m, lease| Ok(ChildIterator::new(m.new_enum()?, lease.clone())))
    }

    pub fn filter(&self) -> Result<Vec<String>> {
        self.cell.with(|m, _| Ok(m.filter()?))
    }

    pub fn set_filter<S: AsRef<str>>(&self, classes: &[S]) -> Result<()> {
        let classes: Vec<String> = classes.iter().map(|c| c.as_ref().to_string()).collect();
        self.cell.with(|m, _| Ok(m.set_filter(&classes)?))
    }

    pub fn close(&self) {
        self.cell.close();
    }

    pub fn is_closed(&self) -> bool {
        self.cell.is_closed()
    }
}

impl fmt::Debug for Members {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Members")
            .field("closed", &self.cell.is_closed())
            .finish()
    }
}
