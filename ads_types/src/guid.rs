//! Provider GUID decoding
//!
//! Providers report object identifiers as text in one of two shapes:
//!
//! - 38 characters: the canonical hyphenated form wrapped in braces,
//!   e.g. `{67452301-AB89-EFCD-0123-456789ABCDEF}`
//! - 32 characters: the raw 16 bytes of the identifier hex-encoded in the
//!   byte order of the originating (little-endian) system
//!
//! The second shape must have its first three fields byte-swapped before it
//! names the same identifier as the first.

use thiserror::Error;
use uuid::Uuid;

/// Length of the braced canonical form
pub const BRACED_LEN: usize = 38;

/// Length of the bare hex form
pub const HEX_LEN: usize = 32;

/// Errors that can occur while decoding identifier text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuidError {
    /// The text is not a recognizable identifier
    #[error("Invalid GUID {text:?}: {reason}")]
    Invalid { text: String, reason: String },
}

impl GuidError {
    fn invalid(text: &str, reason: impl ToString) -> Self {
        GuidError::Invalid {
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Decodes identifier text returned by a provider
///
/// # Examples
///
/// ```
/// use ads_types::decode_guid;
///
/// let braced = decode_guid("{67452301-AB89-EFCD-0123-456789ABCDEF}").unwrap();
/// let octets = decode_guid("0123456789ABCDEF0123456789ABCDEF").unwrap();
/// assert_eq!(braced, octets);
/// ```
pub fn decode_guid(text: &str) -> Result<Uuid, GuidError> {
    match text.len() {
        BRACED_LEN => {
            let inner = text
                .get(1..BRACED_LEN - 1)
                .ok_or_else(|| GuidError::invalid(text, "not ASCII"))?;
            Uuid::parse_str(inner).map_err(|e| GuidError::invalid(text, e))
        }
        HEX_LEN => {
            let mut octets = [0u8; 16];
            hex::decode_to_slice(text, &mut octets).map_err(|e| GuidError::invalid(text, e))?;
            Ok(from_little_endian_octets(octets))
        }
        _ => Uuid::parse_str(text).map_err(|e| GuidError::invalid(text, e)),
    }
}

/// Reorders raw little-endian identifier octets into field order
///
/// The first 4 bytes reverse as a unit, the next 2 and the 2 after that
/// reverse as units, and the final 8 bytes are kept as they are.
pub fn from_little_endian_octets(octets: [u8; 16]) -> Uuid {
    Uuid::from_bytes_le(octets)
}
