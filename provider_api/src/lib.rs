//! # Provider API
//!
//! This crate defines the contract between the directory client and the
//! namespace providers it drives.
//!
//! ## Philosophy
//!
//! The client provides **routing and ownership**, providers provide **transport**:
//! - Binding a path (not opening sockets)
//! - Querying capabilities (not casting pointers)
//! - Fetching attributes (not decoding wire formats)
//! - Releasing references (by dropping them)
//!
//! ## Design Goals
//!
//! 1. **Testability**: Every provider trait can be implemented in memory
//! 2. **Explicitness**: Runtime setup is a [`Session`] value, never global state
//! 3. **Closed vocabularies**: Values and errors are tagged unions
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A wire protocol
//! - An authentication scheme
//! - A schema catalog

pub mod error;
pub mod remote;
pub mod session;
pub mod value;

pub use error::{ProviderError, ProviderResult};
pub use remote::{
    DirectoryComputer, DirectoryContainer, DirectoryGroup, DirectoryMembers, DirectoryObject,
    DirectoryUser, Interface, LargeInteger, NameTranslate, ObjectBinder, ObjectEnumerator,
    RemoteObject, RemoteRef,
};
pub use session::{ProviderHost, Session, SessionLease};
pub use value::{AttrValue, AttributeArray, AttributeData};
