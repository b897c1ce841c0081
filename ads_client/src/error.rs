//! Directory client errors

use ads_path::PathError;
use ads_types::GuidError;
use provider_api::ProviderError;
use thiserror::Error;

/// Result type for directory client operations
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Errors returned by registries, handles and iterators
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The registry, handle or iterator has been closed
    #[error("The object has been closed")]
    Closed,

    /// The path could not be parsed
    #[error(transparent)]
    Path(#[from] PathError),

    /// No provider is registered under the path's scheme
    #[error("No namespace provider is registered for scheme {0:?}")]
    InvalidNamespace(String),

    /// The provider did not return an array for the attribute
    #[error("Attribute {name:?} did not return an array")]
    NonArrayAttribute { name: String },

    /// The provider returned an array with more than one dimension
    #[error("Attribute {name:?} returned an array with {dimensions} dimensions")]
    MultiDimArrayAttribute { name: String, dimensions: u32 },

    /// The provider returned an array whose elements carry no type tag
    #[error("Attribute {name:?} returned an array of untagged values")]
    NonVariantArrayAttribute { name: String },

    /// An enumerator yielded something other than an object reference
    #[error("The enumerator returned a value that is not an object reference")]
    NonDispatchVariant,

    /// Identifier text could not be decoded
    #[error(transparent)]
    Guid(#[from] GuidError),

    /// One element of an attribute could not be converted
    #[error("Attribute {name:?} value {index}: {source}")]
    AttributeElement {
        name: String,
        index: usize,
        source: ProviderError,
    },

    /// Failure reported by the provider
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl DirectoryError {
    /// Returns the provider error carried by this error, if any
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            DirectoryError::Provider(err) => Some(err),
            DirectoryError::AttributeElement { source, .. } => Some(source),
            _ => None,
        }
    }
}
