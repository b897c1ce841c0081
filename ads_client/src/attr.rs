//! Attribute coercion
//!
//! Providers return attributes as arrays of self-describing values whose
//! kinds may be mixed. The typed accessors filter such an array down to one
//! kind. Elements of any other kind are dropped without error, and remote
//! references among them are released as they are dropped.

use crate::error::{DirectoryError, Result};
use ads_types::Capability;
use provider_api::{AttrValue, AttributeData, ProviderResult, RemoteObject};
use uuid::Uuid;

/// Converts provider attribute data into typed values
pub struct AttributeCoder;

impl AttributeCoder {
    /// Validates the shape of `data` and returns its elements
    ///
    /// Only one-dimensional arrays of self-describing values are accepted.
    pub fn elements(name: &str, data: AttributeData) -> Result<Vec<AttrValue>> {
        let array = match data {
            AttributeData::Array(array) => array,
            AttributeData::Scalar(_) => {
                return Err(DirectoryError::NonArrayAttribute {
                    name: name.to_string(),
                })
            }
        };

        if array.dimensions() != 1 {
            return Err(DirectoryError::MultiDimArrayAttribute {
                name: name.to_string(),
                dimensions: array.dimensions(),
            });
        }

        if !array.is_self_describing() {
            return Err(DirectoryError::NonVariantArrayAttribute {
                name: name.to_string(),
            });
        }

        Ok(array.into_elements())
    }

    pub fn strings(values: Vec<AttrValue>) -> Vec<String> {
        values
            .into_iter()
            .filter_map(|value| match value {
                AttrValue::String(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn bools(values: Vec<AttrValue>) -> Vec<bool> {
        values
            .into_iter()
            .filter_map(|value| match value {
                AttrValue::Bool(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    /// 64-bit values that do not fit are dropped like any other mismatch
    pub fn ints(values: Vec<AttrValue>) -> Vec<i32> {
        values
            .into_iter()
            .filter_map(|value| match value {
                AttrValue::Int32(v) => Some(v),
                AttrValue::Int64(v) => i32::try_from(v).ok(),
                _ => None,
            })
            .collect()
    }

    /// Widens 32-bit values and decodes large-integer objects
    ///
    /// An object reference lacking the large-integer capability is dropped; a
    /// large integer whose halves cannot be read fails the whole call.
    pub fn int64s(name: &str, values: Vec<AttrValue>) -> Result<Vec<i64>> {
        let mut out = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match value {
                AttrValue::Int32(v) => out.push(i64::from(v)),
                AttrValue::Int64(v) => out.push(v),
                AttrValue::ObjectRef(obj) => {
                    if let Some(v) = large_integer(obj.as_ref()).map_err(|source| {
                        DirectoryError::AttributeElement {
                            name: name.to_string(),
                            index,
                            source,
                        }
                    })? {
                        out.push(v);
                    }
                }
                _ => {}
            }
        }
        Ok(out)
    }

    pub fn bytes(values: Vec<AttrValue>) -> Vec<Vec<u8>> {
        values
            .into_iter()
            .filter_map(|value| match value {
                AttrValue::Bytes(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    /// Accepts identifiers, parseable identifier text and 16-byte strings
    ///
    /// Byte strings are taken in field order as-is; only the bare hex text of
    /// an entry's own identifier is byte-order corrected.
    pub fn guids(values: Vec<AttrValue>) -> Vec<Uuid> {
        values
            .into_iter()
            .filter_map(|value| match value {
                AttrValue::Identifier(id) => Some(id),
                AttrValue::String(s) => Uuid::parse_str(&s).ok(),
                AttrValue::Bytes(b) => Uuid::from_slice(&b).ok(),
                _ => None,
            })
            .collect()
    }
}

/// Joins the two halves of a large-integer object
///
/// The low half is reinterpreted as unsigned before joining.
fn large_integer(obj: &dyn RemoteObject) -> ProviderResult<Option<i64>> {
    let iface = match obj.query(Capability::LargeInteger) {
        Ok(iface) => iface.into_large_integer()?,
        Err(provider_api::ProviderError::NoInterface) => return Ok(None),
        Err(err) => return Err(err),
    };
    let high = iface.high_part()?;
    let low = iface.low_part()?;
    Ok(Some(join_halves(high, low)))
}

fn join_halves(high: i32, low: i32) -> i64 {
    (i64::from(high) << 32) | i64::from(low as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use provider_api::{AttributeArray, Interface, LargeInteger, ProviderError};

    struct Large(i32, i32);

    impl RemoteObject for Large {
        fn query(&self, capability: Capability) -> ProviderResult<Interface> {
            match capability {
                Capability::LargeInteger => Ok(Interface::LargeInteger(Box::new(Large(
                    self.0, self.1,
                )))),
                _ => Err(ProviderError::NoInterface),
            }
        }
    }

    impl LargeInteger for Large {
        fn high_part(&self) -> ProviderResult<i32> {
            Ok(self.0)
        }

        fn low_part(&self) -> ProviderResult<i32> {
            Ok(self.1)
        }
    }

    struct Opaque;

    impl RemoteObject for Opaque {
        fn query(&self, _capability: Capability) -> ProviderResult<Interface> {
            Err(ProviderError::NoInterface)
        }
    }

    struct Broken;

    impl RemoteObject for Broken {
        fn query(&self, _capability: Capability) -> ProviderResult<Interface> {
            Err(ProviderError::AccessDenied)
        }
    }

    fn mixed() -> Vec<AttrValue> {
        vec![
            AttrValue::from("text"),
            AttrValue::from(42),
            AttrValue::from(true),
            AttrValue::from(1i64 << 40),
            AttrValue::from(vec![1u8, 2, 3]),
        ]
    }

    #[test]
    fn test_elements_accepts_flat_array() {
        let data = AttributeData::Array(AttributeArray::new(mixed()));
        assert_eq!(AttributeCoder::elements("x", data).unwrap().len(), 5);
    }

    #[test]
    fn test_elements_rejects_scalar() {
        let data = AttributeData::Scalar(AttrValue::from("x"));
        assert_eq!(
            AttributeCoder::elements("cn", data).unwrap_err(),
            DirectoryError::NonArrayAttribute {
                name: "cn".to_string()
            }
        );
    }

    #[test]
    fn test_elements_rejects_multi_dimensional() {
        let data = AttributeData::Array(AttributeArray::new(mixed()).with_dimensions(2));
        assert_eq!(
            AttributeCoder::elements("cn", data).unwrap_err(),
            DirectoryError::MultiDimArrayAttribute {
                name: "cn".to_string(),
                dimensions: 2
            }
        );
    }

    #[test]
    fn test_elements_rejects_untagged() {
        let data = AttributeData::Array(AttributeArray::new(mixed()).untagged());
        assert!(matches!(
            AttributeCoder::elements("cn", data),
            Err(DirectoryError::NonVariantArrayAttribute { .. })
        ));
    }

    #[test]
    fn test_ints_keep_only_integers() {
        let values = vec![AttrValue::from("seven"), AttrValue::from(7)];
        assert_eq!(AttributeCoder::ints(values), vec![7]);
    }

    #[test]
    fn test_ints_drop_wide_values() {
        let values = vec![AttrValue::from(5i64), AttrValue::from(i64::MAX)];
        assert_eq!(AttributeCoder::ints(values), vec![5]);
    }

    #[test]
    fn test_filters_by_kind() {
        assert_eq!(AttributeCoder::strings(mixed()), vec!["text".to_string()]);
        assert_eq!(AttributeCoder::bools(mixed()), vec![true]);
        assert_eq!(AttributeCoder::bytes(mixed()), vec![vec![1u8, 2, 3]]);
        assert_eq!(
            AttributeCoder::int64s("x", mixed()).unwrap(),
            vec![42, 1i64 << 40]
        );
    }

    #[test]
    fn test_int64s_decode_large_integer() {
        let values = vec![
            AttrValue::ObjectRef(Box::new(Large(0x01D9_A1B2, -1))),
            AttrValue::ObjectRef(Box::new(Opaque)),
        ];
        assert_eq!(
            AttributeCoder::int64s("pwdLastSet", values).unwrap(),
            vec![0x01D9_A1B2_FFFF_FFFF]
        );
    }

    #[test]
    fn test_int64s_report_failed_element() {
        let values = vec![AttrValue::from(1), AttrValue::ObjectRef(Box::new(Broken))];
        assert_eq!(
            AttributeCoder::int64s("lastLogon", values).unwrap_err(),
            DirectoryError::AttributeElement {
                name: "lastLogon".to_string(),
                index: 1,
                source: ProviderError::AccessDenied,
            }
        );
    }

    #[test]
    fn test_join_halves() {
        assert_eq!(join_halves(0, -1), 0xFFFF_FFFF);
        assert_eq!(join_halves(-1, -1), -1);
        assert_eq!(join_halves(1, 0), 1 << 32);
    }

    #[test]
    fn test_guids_accept_three_encodings() {
        let id = Uuid::parse_str("67452301-ab89-efcd-0123-456789abcdef").unwrap();
        let values = vec![
            AttrValue::Identifier(id),
            AttrValue::from("{67452301-AB89-EFCD-0123-456789ABCDEF}"),
            AttrValue::from(id.as_bytes().to_vec()),
            AttrValue::from("not a guid"),
            AttrValue::from(vec![0u8; 4]),
        ];
        assert_eq!(AttributeCoder::guids(values), vec![id, id, id]);
    }
}
