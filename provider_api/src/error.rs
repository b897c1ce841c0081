//! Provider error taxonomy
//!
//! Providers report failures as numeric result codes. Recognized codes map to
//! named variants; anything else is carried verbatim with its diagnostic text.

use thiserror::Error;

/// Result type for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors reported by a namespace provider
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provided name or namespace is invalid
    #[error("The provided name or namespace is invalid")]
    InvalidNamespace,

    /// Access denied
    #[error("Access denied")]
    AccessDenied,

    /// The entity does not expose the requested capability
    #[error("The object does not support the requested interface")]
    NoInterface,

    /// One or more errors occurred during a query
    #[error("During a query, one or more errors occurred")]
    QueryFailed,

    /// The search reached the last row
    #[error("The search operation has reached the last row")]
    NoMoreRows,

    /// The search reached the last column of the current row
    #[error("The search operation has reached the last column for the current row")]
    NoMoreColumns,

    /// An invalid pathname was passed
    #[error("An invalid directory pathname was passed")]
    BadPathname,

    /// An unknown domain object was requested
    #[error("An unknown directory domain object was requested")]
    InvalidDomainObject,

    /// An unknown user object was requested
    #[error("An unknown directory user object was requested")]
    InvalidUserObject,

    /// An unknown computer object was requested
    #[error("An unknown directory computer object was requested")]
    InvalidComputerObject,

    /// An unknown object was requested
    #[error("An unknown directory object was requested")]
    UnknownObject,

    /// The property was not set
    #[error("The specified directory property was not set")]
    PropertyNotSet,

    /// The property is not supported
    #[error("The specified directory property is not supported")]
    PropertyNotSupported,

    /// The property is invalid
    #[error("The specified directory property is invalid")]
    PropertyInvalid,

    /// One or more parameters are invalid
    #[error("One or more input parameters are invalid")]
    BadParameter,

    /// The object is not bound to a remote resource
    #[error("The specified directory object is not bound to a remote resource")]
    ObjectUnbound,

    /// The object has not been modified
    #[error("The specified directory object has not been modified")]
    PropertyNotModified,

    /// The object has been modified
    #[error("The specified directory object has been modified")]
    PropertyModified,

    /// The value cannot be converted to or from a native directory type
    #[error("The data type cannot be converted to/from a native directory data type")]
    CantConvertDatatype,

    /// The property is not in the cache
    #[error("The property cannot be found in the cache")]
    PropertyNotFound,

    /// The object already exists
    #[error("The directory object exists")]
    ObjectExists,

    /// The action violates schema rules
    #[error("The attempted action violates the directory service schema rules")]
    SchemaViolation,

    /// The column was not set
    #[error("The specified column was not set")]
    ColumnNotSet,

    /// The search filter is invalid
    #[error("The specified search filter is invalid")]
    InvalidFilter,

    /// Unrecognized failure
    #[error("Provider error 0x{code:08X}: {message}")]
    Other { code: u32, message: String },
}

const E_INVALID_NAMESPACE: u32 = 0x8004_100E;
const E_ACCESS_DENIED: u32 = 0x8004_1003;
const E_NOINTERFACE: u32 = 0x8000_4002;
const S_ADS_ERRORSOCCURRED: u32 = 0x0000_5011;
const S_ADS_NOMORE_ROWS: u32 = 0x0000_5012;
const S_ADS_NOMORE_COLUMNS: u32 = 0x0000_5013;
const E_ADS_BAD_PATHNAME: u32 = 0x8000_5000;
const E_ADS_INVALID_DOMAIN_OBJECT: u32 = 0x8000_5001;
const E_ADS_INVALID_USER_OBJECT: u32 = 0x8000_5002;
const E_ADS_INVALID_COMPUTER_OBJECT: u32 = 0x8000_5003;
const E_ADS_UNKNOWN_OBJECT: u32 = 0x8000_5004;
const E_ADS_PROPERTY_NOT_SET: u32 = 0x8000_5005;
const E_ADS_PROPERTY_NOT_SUPPORTED: u32 = 0x8000_5006;
const E_ADS_PROPERTY_INVALID: u32 = 0x8000_5007;
const E_ADS_BAD_PARAMETER: u32 = 0x8000_5008;
const E_ADS_OBJECT_UNBOUND: u32 = 0x8000_5009;
const E_ADS_PROPERTY_NOT_MODIFIED: u32 = 0x8000_500A;
const E_ADS_PROPERTY_MODIFIED: u32 = 0x8000_500B;
const E_ADS_CANT_CONVERT_DATATYPE: u32 = 0x8000_500C;
const E_ADS_PROPERTY_NOT_FOUND: u32 = 0x8000_500D;
const E_ADS_OBJECT_EXISTS: u32 = 0x8000_500E;
const E_ADS_SCHEMA_VIOLATION: u32 = 0x8000_500F;
const E_ADS_COLUMN_NOT_SET: u32 = 0x8000_5010;
const E_ADS_INVALID_FILTER: u32 = 0x8000_5014;

impl ProviderError {
    /// Maps a provider result code to an error
    ///
    /// The message is kept only when the code is not recognized.
    pub fn from_code(code: u32, message: impl Into<String>) -> Self {
        match code {
            E_INVALID_NAMESPACE => ProviderError::InvalidNamespace,
            E_ACCESS_DENIED => ProviderError::AccessDenied,
            E_NOINTERFACE => ProviderError::NoInterface,
            S_ADS_ERRORSOCCURRED => ProviderError::QueryFailed,
            S_ADS_NOMORE_ROWS => ProviderError::NoMoreRows,
            S_ADS_NOMORE_COLUMNS => ProviderError::NoMoreColumns,
            E_ADS_BAD_PATHNAME => ProviderError::BadPathname,
            E_ADS_INVALID_DOMAIN_OBJECT => ProviderError::InvalidDomainObject,
            E_ADS_INVALID_USER_OBJECT => ProviderError::InvalidUserObject,
            E_ADS_INVALID_COMPUTER_OBJECT => ProviderError::InvalidComputerObject,
            E_ADS_UNKNOWN_OBJECT => ProviderError::UnknownObject,
            E_ADS_PROPERTY_NOT_SET => ProviderError::PropertyNotSet,
            E_ADS_PROPERTY_NOT_SUPPORTED => ProviderError::PropertyNotSupported,
            E_ADS_PROPERTY_INVALID => ProviderError::PropertyInvalid,
            E_ADS_BAD_PARAMETER => ProviderError::BadParameter,
            E_ADS_OBJECT_UNBOUND => ProviderError::ObjectUnbound,
            E_ADS_PROPERTY_NOT_MODIFIED => ProviderError::PropertyNotModified,
            E_ADS_PROPERTY_MODIFIED => ProviderError::PropertyModified,
            E_ADS_CANT_CONVERT_DATATYPE => ProviderError::CantConvertDatatype,
            E_ADS_PROPERTY_NOT_FOUND => ProviderError::PropertyNotFound,
            E_ADS_OBJECT_EXISTS => ProviderError::ObjectExists,
            E_ADS_SCHEMA_VIOLATION => ProviderError::SchemaViolation,
            E_ADS_COLUMN_NOT_SET => ProviderError::ColumnNotSet,
            E_ADS_INVALID_FILTER => ProviderError::InvalidFilter,
            _ => ProviderError::Other {
                code,
                message: message.into(),
            },
        }
    }

    /// Returns the provider result code for this error
    pub fn code(&self) -> u32 {
        match self {
            ProviderError::InvalidNamespace => E_INVALID_NAMESPACE,
            ProviderError::AccessDenied => E_ACCESS_DENIED,
            ProviderError::NoInterface => E_NOINTERFACE,
            ProviderError::QueryFailed => S_ADS_ERRORSOCCURRED,
            ProviderError::NoMoreRows => S_ADS_NOMORE_ROWS,
            ProviderError::NoMoreColumns => S_ADS_NOMORE_COLUMNS,
            ProviderError::BadPathname => E_ADS_BAD_PATHNAME,
            ProviderError::InvalidDomainObject => E_ADS_INVALID_DOMAIN_OBJECT,
            ProviderError::InvalidUserObject => E_ADS_INVALID_USER_OBJECT,
            ProviderError::InvalidComputerObject => E_ADS_INVALID_COMPUTER_OBJECT,
            ProviderError::UnknownObject => E_ADS_UNKNOWN_OBJECT,
            ProviderError::PropertyNotSet => E_ADS_PROPERTY_NOT_SET,
            ProviderError::PropertyNotSupported => E_ADS_PROPERTY_NOT_SUPPORTED,
            ProviderError::PropertyInvalid => E_ADS_PROPERTY_INVALID,
            ProviderError::BadParameter => E_ADS_BAD_PARAMETER,
            ProviderError::ObjectUnbound => E_ADS_OBJECT_UNBOUND,
            ProviderError::PropertyNotModified => E_ADS_PROPERTY_NOT_MODIFIED,
            ProviderError::PropertyModified => E_ADS_PROPERTY_MODIFIED,
            ProviderError::CantConvertDatatype => E_ADS_CANT_CONVERT_DATATYPE,
            ProviderError::PropertyNotFound => E_ADS_PROPERTY_NOT_FOUND,
            ProviderError::ObjectExists => E_ADS_OBJECT_EXISTS,
            ProviderError::SchemaViolation => E_ADS_SCHEMA_VIOLATION,
            ProviderError::ColumnNotSet => E_ADS_COLUMN_NOT_SET,
            ProviderError::InvalidFilter => E_ADS_INVALID_FILTER,
            ProviderError::Other { code, .. } => *code,
        }
    }

    /// Returns true for the two informational search codes, which are not failures
    pub fn is_informational(&self) -> bool {
        self.code() & 0x8000_0000 == 0
    }
}
