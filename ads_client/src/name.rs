//! Name translation
//!
//! A [`NameTranslator`] converts the name of one directory entry between
//! formats, for example from `EXAMPLE\alice` to its distinguished name. The
//! directory does the conversion. Calls follow a fixed order: one
//! [`NameTranslator::init`], then [`NameTranslator::set`] with the input
//! name, then any number of [`NameTranslator::get`] calls.

use crate::error::Result;
use crate::handle::{FromInterface, HandleCell};
use crate::object::wrap;
use ads_types::{Capability, NameFormat, NameInitType};
use provider_api::{Interface, NameTranslate, Session, SessionLease};
use std::fmt;
use tracing::debug;

/// Handle to a provider name translator
pub struct NameTranslator {
    cell: HandleCell<dyn NameTranslate>,
}

impl NameTranslator {
    /// Creates a translator served by `server`
    ///
    /// An empty server means the local machine.
    pub fn open(session: &Session, server: &str) -> Result<Self> {
        let lease = session.lease();
        let remote = lease.host().name_translator(server)?;
        let translator = wrap(remote, lease)?;
        debug!(server, "name translator opened");
        Ok(translator)
    }

    /// Selects the directory that answers
    ///
    /// `path` names the domain or server; it is ignored for
    /// [`NameInitType::Gc`].
    pub fn init(&self, path: &str, init_type: NameInitType) -> Result<()> {
        self.cell.with(|t, _| Ok(t.init(path, init_type)?))
    }

    /// Sets the name to translate, written in `format`
    pub fn set(&self, name: &str, format: NameFormat) -> Result<()> {
        self.cell.with(|t, _| Ok(t.set(name, format)?))
    }

    /// Returns the name set last, written in `format`
    pub fn get(&self, format: NameFormat) -> Result<String> {
        self.cell.with(|t, _| Ok(t.get(format)?))
    }

    /// Shorthand for [`Self::set`] followed by [`Self::get`]
    pub fn translate(&self, name: &str, from: NameFormat, to: NameFormat) -> Result<String> {
        self.cell.with(|t, _| {
            t.set(name, from)?;
            Ok(t.get(to)?)
        })
    }

    /// Releases the translator; later calls do nothing
    pub fn close(&self) {
        self.cell.close();
    }

    /// Returns true once the translator has been closed
    pub fn is_closed(&self) -> bool {
        self.cell.is_closed()
    }
}

impl FromInterface for NameTranslator {
    const CAPABILITY: Capability = Capability::NameTranslate;

    fn from_interface(iface: Interface, lease: SessionLease) -> Result<Self> {
        Ok(Self {
            cell: HandleCell::new("name translator", iface.into_name_translate()?, lease),
        })
    }
}

impl fmt::Debug for NameTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameTranslator")
            .field("closed", &self.cell.is_closed())
            .finish()
    }
}
