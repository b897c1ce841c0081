//! # Directory Types
//!
//! This crate defines the small value types shared by every layer of the
//! directory binding stack.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Credentials and bind flags are passed, never ambient.
//! - **Capabilities are tags**: Narrowing a handle names the capability it wants.
//! - **Identifiers are values**: GUID text from a provider is decoded once, here.
//!
//! ## Key Types
//!
//! - [`Capability`]: A tag naming one interface a remote object may expose
//! - [`BindFlags`]: Authentication and connection options for a bind
//! - [`Credentials`]: An optional user/password pair supplied out-of-band
//! - [`ProviderId`]: Identifier of an installed namespace provider
//! - [`decode_guid`]: Provider GUID text to [`uuid::Uuid`]
//! - [`NameFormat`], [`NameInitType`]: Name translation codes

pub mod capability;
pub mod flags;
pub mod guid;
pub mod ids;
pub mod names;

pub use capability::Capability;
pub use flags::{BindFlags, Credentials};
pub use guid::{decode_guid, GuidError};
pub use ids::ProviderId;
pub use names::{NameFormat, NameInitType};
