//! Handle ownership and the common object accessors
//!
//! A handle owns exactly one remote reference plus a session lease. It is
//! either open or closed; closing releases both and is one-way. Every
//! accessor serializes on the handle's own lock, so a read can never race a
//! close on the same handle, while distinct handles never contend.

use crate::attr::AttributeCoder;
use crate::error::{DirectoryError, Result};
use ads_types::{decode_guid, Capability};
use provider_api::{AttrValue, DirectoryObject, Interface, RemoteObject, SessionLease};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;
use uuid::Uuid;

struct Bound<T: ?Sized> {
    // Field order matters: the reference is released before the lease.
    iface: Box<T>,
    lease: SessionLease,
}

/// Open/closed slot holding one remote reference
#[doc(hidden)]
pub struct HandleCell<T: ?Sized> {
    kind: &'static str,
    slot: Mutex<Option<Bound<T>>>,
}

impl<T: ?Sized> HandleCell<T> {
    pub(crate) fn new(kind: &'static str, iface: Box<T>, lease: SessionLease) -> Self {
        Self {
            kind,
            slot: Mutex::new(Some(Bound { iface, lease })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Bound<T>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the open reference, or fails with `Closed`
    pub(crate) fn with<R>(&self, f: impl FnOnce(&T, &SessionLease) -> Result<R>) -> Result<R> {
        let guard = self.lock();
        let bound = guard.as_ref().ok_or(DirectoryError::Closed)?;
        f(&bound.iface, &bound.lease)
    }

    /// Like [`Self::with`], with mutable access to the reference
    pub(crate) fn with_mut<R>(
        &self,
        f: impl FnOnce(&mut T, &SessionLease) -> Result<R>,
    ) -> Result<R> {
        let mut guard = self.lock();
        let bound = guard.as_mut().ok_or(DirectoryError::Closed)?;
        f(&mut bound.iface, &bound.lease)
    }

    /// Releases the reference; returns false if it was already closed
    pub(crate) fn close(&self) -> bool {
        let released = self.lock().take();
        match released {
            Some(bound) => {
                drop(bound);
                trace!(kind = self.kind, "handle closed");
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.lock().is_none()
    }
}

/// A handle type that can be built from a provider interface
pub trait FromInterface: Sized {
    /// Capability queried to obtain this handle type
    const CAPABILITY: Capability;

    /// Wraps an interface returned for [`Self::CAPABILITY`]
    fn from_interface(iface: Interface, lease: SessionLease) -> Result<Self>;
}

/// Accessors shared by every handle over a directory entry
///
/// Implemented by [`crate::Object`], [`crate::Group`], [`crate::User`] and
/// [`crate::Computer`].
pub trait DirectoryHandle {
    /// Provider interface held by this handle
    type Iface: DirectoryObject + ?Sized;

    #[doc(hidden)]
    fn cell(&self) -> &HandleCell<Self::Iface>;

    /// Relative name of the entry
    fn name(&self) -> Result<String> {
        self.cell().with(|obj, _| Ok(obj.name()?))
    }

    /// Schema class of the entry
    fn class(&self) -> Result<String> {
        self.cell().with(|obj, _| Ok(obj.class()?))
    }

    /// Identifier of the entry
    ///
    /// Bare hex identifiers are byte-order corrected, see [`decode_guid`].
    fn guid(&self) -> Result<Uuid> {
        let text = self.cell().with(|obj, _| Ok(obj.guid()?))?;
        Ok(decode_guid(&text)?)
    }

    /// Full path of the entry
    fn path(&self) -> Result<String> {
        self.cell().with(|obj, _| Ok(obj.ads_path()?))
    }

    /// Path of the parent entry
    fn parent(&self) -> Result<String> {
        self.cell().with(|obj, _| Ok(obj.parent()?))
    }

    /// Path of the schema class entry
    fn schema(&self) -> Result<String> {
        self.cell().with(|obj, _| Ok(obj.schema()?))
    }

    /// Prefetches the named attributes into the provider cache
    ///
    /// Does nothing for an empty list.
    fn pull<S: AsRef<str>>(&self, names: &[S]) -> Result<()>
    where
        Self: Sized,
    {
        self.cell().with(|obj, _| {
            if names.is_empty() {
                return Ok(());
            }
            let names: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
            Ok(obj.get_info_ex(&names)?)
        })
    }

    /// Every value of an attribute, of any kind
    fn attr(&self, name: &str) -> Result<Vec<AttrValue>> {
        self.cell()
            .with(|obj, _| AttributeCoder::elements(name, obj.get_ex(name)?))
    }

    /// String values of an attribute; other kinds are dropped
    fn attr_strings(&self, name: &str) -> Result<Vec<String>> {
        Ok(AttributeCoder::strings(self.attr(name)?))
    }

    /// First string value of an attribute, or empty
    fn attr_string(&self, name: &str) -> Result<String> {
        Ok(first_or_default(self.attr_strings(name)?))
    }

    /// Boolean values of an attribute; other kinds are dropped
    fn attr_bools(&self, name: &str) -> Result<Vec<bool>> {
        Ok(AttributeCoder::bools(self.attr(name)?))
    }

    /// First boolean value of an attribute, or false
    fn attr_bool(&self, name: &str) -> Result<bool> {
        Ok(first_or_default(self.attr_bools(name)?))
    }

    /// 32-bit integer values of an attribute
    ///
    /// 64-bit values are kept only when they fit; other kinds are dropped.
    fn attr_ints(&self, name: &str) -> Result<Vec<i32>> {
        Ok(AttributeCoder::ints(self.attr(name)?))
    }

    /// First 32-bit integer value of an attribute, or zero
    fn attr_int(&self, name: &str) -> Result<i32> {
        Ok(first_or_default(self.attr_ints(name)?))
    }

    /// 64-bit integer values of an attribute, including large-integer objects
    fn attr_int64s(&self, name: &str) -> Result<Vec<i64>> {
        AttributeCoder::int64s(name, self.attr(name)?)
    }

    /// First 64-bit integer value of an attribute, or zero
    fn attr_int64(&self, name: &str) -> Result<i64> {
        Ok(first_or_default(self.attr_int64s(name)?))
    }

    /// Byte-string values of an attribute; other kinds are dropped
    fn attr_bytes_values(&self, name: &str) -> Result<Vec<Vec<u8>>> {
        Ok(AttributeCoder::bytes(self.attr(name)?))
    }

    /// First byte-string value of an attribute, or empty
    fn attr_bytes(&self, name: &str) -> Result<Vec<u8>> {
        Ok(first_or_default(self.attr_bytes_values(name)?))
    }

    /// Identifier values of an attribute; unparseable values are dropped
    fn attr_guids(&self, name: &str) -> Result<Vec<Uuid>> {
        Ok(AttributeCoder::guids(self.attr(name)?))
    }

    /// First identifier value of an attribute, or nil
    fn attr_guid(&self, name: &str) -> Result<Uuid> {
        Ok(first_or_default(self.attr_guids(name)?))
    }

    /// Stages a value for the attribute; see [`Self::set_info`]
    fn put(&self, name: &str, value: impl Into<AttrValue>) -> Result<()>
    where
        Self: Sized,
    {
        let value = value.into();
        self.cell().with(|obj, _| Ok(obj.put(name, value)?))
    }

    /// Commits staged values to the directory
    fn set_info(&self) -> Result<()> {
        self.cell().with(|obj, _| Ok(obj.set_info()?))
    }

    /// Acquires a new, independently owned handle for another capability
    fn narrow<H: FromInterface>(&self) -> Result<H>
    where
        Self: Sized,
    {
        self.cell().with(|obj, lease| {
            let iface = obj.query(H::CAPABILITY)?;
            H::from_interface(iface, lease.clone())
        })
    }

    /// Releases the remote reference; later calls do nothing
    fn close(&self) {
        self.cell().close();
    }

    /// Returns true once the handle has been closed
    fn is_closed(&self) -> bool {
        self.cell().is_closed()
    }
}

fn first_or_default<T: Default>(values: Vec<T>) -> T {
    values.into_iter().next().unwrap_or_default()
}
