//! # Directory Client
//!
//! This crate binds application code to directory objects through pluggable
//! namespace providers.
//!
//! ## Philosophy
//!
//! - **Paths route, providers bind**: the registry only picks a provider by scheme
//! - **Handles own references**: one remote reference per handle, released on close or drop
//! - **Narrowing is acquisition**: `to_container`, `to_group` and friends return new handles
//! - **Lossy by contract**: typed attribute accessors drop values of other kinds
//!
//! ## Example
//!
//! ```no_run
//! use ads_client::{DirectoryHandle, NamespaceRegistry};
//! # fn run(session: &provider_api::Session) -> ads_client::Result<()> {
//! let registry = NamespaceRegistry::open(session, "")?;
//! let users = registry.open_container("LDAP://CN=Users,DC=example,DC=com")?;
//! let children = users.children()?;
//! while let Some(child) = children.next()? {
//!     println!("{} {}", child.class()?, child.name()?);
//! }
//! registry.close();
//! # Ok(())
//! # }
//! ```

pub mod attr;
pub mod computer;
pub mod container;
pub mod error;
pub mod handle;
pub mod group;
pub mod iter;
pub mod members;
pub mod name;
pub mod object;
pub mod open;
pub mod registry;
pub mod user;

pub use attr::AttributeCoder;
pub use computer::Computer;
pub use container::Container;
pub use error::{DirectoryError, Result};
pub use group::Group;
pub use handle::{DirectoryHandle, FromInterface};
pub use iter::ChildIterator;
pub use members::Members;
pub use name::NameTranslator;
pub use object::Object;
pub use open::{
    open, open_as, open_computer, open_computer_with, open_container, open_container_with,
    open_with,
};
pub use registry::{NamespaceInfo, NamespaceRegistry};
pub use user::User;
