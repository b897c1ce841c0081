//! Lazy child enumeration

use crate::error::{DirectoryError, Result};
use crate::handle::HandleCell;
use crate::object::{wrap, Object};
use provider_api::{AttrValue, ObjectEnumerator, SessionLease};
use std::fmt;

struct Cursor {
    enumerator: Box<dyn ObjectEnumerator>,
    exhausted: bool,
}

/// Forward-only sequence of child handles
///
/// Not restartable: once the provider reports the end, every later call to
/// [`ChildIterator::next`] reports the end again. Each yielded handle is
/// independently owned and outlives the iterator.
pub struct ChildIterator {
    cell: HandleCell<Cursor>,
}

impl ChildIterator {
    pub(crate) fn new(enumerator: Box<dyn ObjectEnumerator>, lease: SessionLease) -> Self {
        let cursor = Cursor {
            enumerator,
            exhausted: false,
        };
        Self {
            cell: HandleCell::new("iterator", Box::new(cursor), lease),
        }
    }

    /// Binds the next child, or returns `None` at the end
    ///
    /// Fails with [`DirectoryError::NonDispatchVariant`] if the provider
    /// yields something other than an object reference.
    pub fn next(&self) -> Result<Option<Object>> {
        self.cell.with_mut(|cursor, lease| {
            if cursor.exhausted {
                return Ok(None);
            }
            match cursor.enumerator.next()? {
                None => {
                    cursor.exhausted = true;
                    Ok(None)
                }
                Some(AttrValue::ObjectRef(remote)) => wrap(remote, lease.clone()).map(Some),
                Some(_) => Err(DirectoryError::NonDispatchVariant),
            }
        })
    }

    /// Adapts the iterator to `std::iter::Iterator`
    pub fn iter(&self) -> impl Iterator<Item = Result<Object>> + '_ {
        std::iter::from_fn(move || self.next().transpose())
    }

    /// Releases the enumerator; yielded handles are unaffected
    pub fn close(&self) {
        self.cell.close();
    }

    /// Returns true once the iterator has been closed
    pub fn is_closed(&self) -> bool {
        self.cell.is_closed()
    }
}

impl fmt::Debug for ChildIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildIterator")
            .field("closed", &self.is_closed())
            .finish()
    }
}
