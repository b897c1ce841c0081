//! Remote object contracts
//!
//! Every reference a provider hands out is an owned box. Dropping the box
//! releases the reference; there is no separate release call. Narrowing is an
//! explicit [`RemoteObject::query`] that returns a new, independently owned
//! reference tagged with the capability it satisfies.

use crate::{AttrValue, AttributeData, ProviderError, ProviderResult};
use ads_types::{BindFlags, Capability, Credentials, NameFormat, NameInitType};

/// Owned generic reference to a remote entity
pub type RemoteRef = Box<dyn RemoteObject>;

/// Any remote entity
pub trait RemoteObject: Send + Sync {
    /// Acquires a new reference to the same entity exposing `capability`
    ///
    /// Fails with [`ProviderError::NoInterface`] when the entity lacks it.
    fn query(&self, capability: Capability) -> ProviderResult<Interface>;
}

/// Identity accessors and the attribute store of a directory entry
pub trait DirectoryObject: RemoteObject {
    fn name(&self) -> ProviderResult<String>;
    fn class(&self) -> ProviderResult<String>;
    /// Identifier text, braced or bare hex depending on the provider
    fn guid(&self) -> ProviderResult<String>;
    fn ads_path(&self) -> ProviderResult<String>;
    fn parent(&self) -> ProviderResult<String>;
    fn schema(&self) -> ProviderResult<String>;

    /// Fetches every value of an attribute
    fn get_ex(&self, name: &str) -> ProviderResult<AttributeData>;

    /// Stages a value in the provider-side cache
    fn put(&self, name: &str, value: AttrValue) -> ProviderResult<()>;

    /// Commits staged values
    fn set_info(&self) -> ProviderResult<()>;

    /// Prefetches the named attributes into the provider-side cache
    fn get_info_ex(&self, names: &[String]) -> ProviderResult<()>;
}

/// Child enumeration and lookup
pub trait DirectoryContainer: RemoteObject {
    fn new_enum(&self) -> ProviderResult<Box<dyn ObjectEnumerator>>;

    /// Object classes the enumeration is restricted to; empty for all
    fn filter(&self) -> ProviderResult<Vec<String>>;
    fn set_filter(&self, classes: &[String]) -> ProviderResult<()>;

    /// Binds the direct child with the given class and relative name
    fn get_object(&self, class: &str, name: &str) -> ProviderResult<RemoteRef>;
}

/// Group membership management
pub trait DirectoryGroup: DirectoryObject {
    fn description(&self) -> ProviderResult<String>;
    fn members(&self) -> ProviderResult<Box<dyn DirectoryMembers>>;
    /// Adds the entry at `path` to the group
    fn add(&self, path: &str) -> ProviderResult<()>;
    /// Removes the entry at `path` from the group
    fn remove(&self, path: &str) -> ProviderResult<()>;
}

/// Collection of a group's members
pub trait DirectoryMembers: RemoteObject {
    fn new_enum(&self) -> ProviderResult<Box<dyn ObjectEnumerator>>;
    fn filter(&self) -> ProviderResult<Vec<String>>;
    fn set_filter(&self, classes: &[String]) -> ProviderResult<()>;
}

/// User account properties
pub trait DirectoryUser: DirectoryObject {
    fn account_disabled(&self) -> ProviderResult<bool>;
    fn set_account_disabled(&self, disabled: bool) -> ProviderResult<()>;
    fn full_name(&self) -> ProviderResult<String>;
}

/// Computer account properties
pub trait DirectoryComputer: DirectoryObject {
    fn computer_id(&self) -> ProviderResult<String>;
    fn site(&self) -> ProviderResult<String>;
    fn operating_system(&self) -> ProviderResult<String>;
}

/// Binds paths within one namespace
pub trait ObjectBinder: RemoteObject {
    fn open_ds_object(
        &self,
        path: &str,
        credentials: &Credentials,
        flags: BindFlags,
    ) -> ProviderResult<RemoteRef>;
}

/// A 64-bit integer reported as two 32-bit halves
pub trait LargeInteger: RemoteObject {
    fn high_part(&self) -> ProviderResult<i32>;
    fn low_part(&self) -> ProviderResult<i32>;
}

/// Converts object names between formats
///
/// Calls run in order: [`Self::init`] once, [`Self::set`] for each input
/// name, then [`Self::get`] for each output format.
pub trait NameTranslate: RemoteObject {
    /// Selects the directory that answers; `path` names the domain or server
    fn init(&self, path: &str, init_type: NameInitType) -> ProviderResult<()>;
    /// Sets the name to translate, written in `format`
    fn set(&self, name: &str, format: NameFormat) -> ProviderResult<()>;
    /// Returns the current name written in `format`
    fn get(&self, format: NameFormat) -> ProviderResult<String>;
}

/// Forward-only cursor over a provider collection
///
/// Yields `Ok(None)` once exhausted.
pub trait ObjectEnumerator: Send {
    fn next(&mut self) -> ProviderResult<Option<AttrValue>>;
}

/// A reference returned by [`RemoteObject::query`], tagged by capability
pub enum Interface {
    Unknown(RemoteRef),
    Object(Box<dyn DirectoryObject>),
    Container(Box<dyn DirectoryContainer>),
    Group(Box<dyn DirectoryGroup>),
    User(Box<dyn DirectoryUser>),
    Computer(Box<dyn DirectoryComputer>),
    Members(Box<dyn DirectoryMembers>),
    Binder(Box<dyn ObjectBinder>),
    LargeInteger(Box<dyn LargeInteger>),
    NameTranslate(Box<dyn NameTranslate>),
}

macro_rules! into_variant {
    ($(#[$doc:meta])* $fn:ident, $variant:ident, $iface:ty) => {
        $(#[$doc])*
        pub fn $fn(self) -> ProviderResult<Box<$iface>> {
            match self {
                Interface::$variant(iface) => Ok(iface),
                _ => Err(ProviderError::NoInterface),
            }
        }
    };
}

impl Interface {
    /// The capability this reference satisfies
    pub fn capability(&self) -> Capability {
        match self {
            Interface::Unknown(_) => Capability::Unknown,
            Interface::Object(_) => Capability::Object,
            Interface::Container(_) => Capability::Container,
            Interface::Group(_) => Capability::Group,
            Interface::User(_) => Capability::User,
            Interface::Computer(_) => Capability::Computer,
            Interface::Members(_) => Capability::Members,
            Interface::Binder(_) => Capability::OpenDsObject,
            Interface::LargeInteger(_) => Capability::LargeInteger,
            Interface::NameTranslate(_) => Capability::NameTranslate,
        }
    }

    into_variant!(
        /// Unwraps a generic reference
        into_unknown, Unknown, dyn RemoteObject
    );
    into_variant!(
        /// Unwraps an object reference
        into_object, Object, dyn DirectoryObject
    );
    into_variant!(
        /// Unwraps a container reference
        into_container, Container, dyn DirectoryContainer
    );
    into_variant!(
        /// Unwraps a group reference
        into_group, Group, dyn DirectoryGroup
    );
    into_variant!(
        /// Unwraps a user reference
        into_user, User, dyn DirectoryUser
    );
    into_variant!(
        /// Unwraps a computer reference
        into_computer, Computer, dyn DirectoryComputer
    );
    into_variant!(
        /// Unwraps a members collection
        into_members, Members, dyn DirectoryMembers
    );
    into_variant!(
        /// Unwraps a binder
        into_binder, Binder, dyn ObjectBinder
    );
    into_variant!(
        /// Unwraps a large integer
        into_large_integer, LargeInteger, dyn LargeInteger
    );
    into_variant!(
        /// Unwraps a name translator
        into_name_translate, NameTranslate, dyn NameTranslate
    );
}

impl std::fmt::Debug for Interface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interface({})", self.capability())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl RemoteObject for Bare {
        fn query(&self, capability: Capability) -> ProviderResult<Interface> {
            match capability {
                Capability::Unknown => Ok(Interface::Unknown(Box::new(Bare))),
                _ => Err(ProviderError::NoInterface),
            }
        }
    }

    struct Half(i32, i32);

    impl RemoteObject for Half {
        fn query(&self, _capability: Capability) -> ProviderResult<Interface> {
            Err(ProviderError::NoInterface)
        }
    }

    impl LargeInteger for Half {
        fn high_part(&self) -> ProviderResult<i32> {
            Ok(self.0)
        }

        fn low_part(&self) -> ProviderResult<i32> {
            Ok(self.1)
        }
    }

    #[test]
    fn test_interface_capability_tag() {
        let iface = Bare.query(Capability::Unknown).unwrap();
        assert_eq!(iface.capability(), Capability::Unknown);
        assert_eq!(format!("{:?}", iface), "Interface(Unknown)");
    }

    #[test]
    fn test_into_matching_variant() {
        let iface = Interface::LargeInteger(Box::new(Half(1, 2)));
        let large = iface.into_large_integer().unwrap();
        assert_eq!(large.high_part(), Ok(1));
        assert_eq!(large.low_part(), Ok(2));
    }

    #[test]
    fn test_into_mismatched_variant() {
        let iface = Interface::Unknown(Box::new(Bare));
        assert!(matches!(
            iface.into_container(),
            Err(ProviderError::NoInterface)
        ));
    }

    #[test]
    fn test_query_missing_capability() {
        assert!(matches!(
            Bare.query(Capability::Group),
            Err(ProviderError::NoInterface)
        ));
    }
}
