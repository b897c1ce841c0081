//! Provider result code contract tests
//!
//! These tests pin the numeric result codes of the recognized provider
//! failures. Providers report these codes on the wire; changing one breaks
//! every caller that matches on it.

use provider_api::ProviderError;

// ===== Canonical Code Table =====
pub fn code_table() -> Vec<(ProviderError, u32)> {
    vec![
        (ProviderError::InvalidNamespace, 0x8004_100E),
        (ProviderError::AccessDenied, 0x8004_1003),
        (ProviderError::NoInterface, 0x8000_4002),
        (ProviderError::QueryFailed, 0x0000_5011),
        (ProviderError::NoMoreRows, 0x0000_5012),
        (ProviderError::NoMoreColumns, 0x0000_5013),
        (ProviderError::BadPathname, 0x8000_5000),
        (ProviderError::InvalidDomainObject, 0x8000_5001),
        (ProviderError::InvalidUserObject, 0x8000_5002),
        (ProviderError::InvalidComputerObject, 0x8000_5003),
        (ProviderError::UnknownObject, 0x8000_5004),
        (ProviderError::PropertyNotSet, 0x8000_5005),
        (ProviderError::PropertyNotSupported, 0x8000_5006),
        (ProviderError::PropertyInvalid, 0x8000_5007),
        (ProviderError::BadParameter, 0x8000_5008),
        (ProviderError::ObjectUnbound, 0x8000_5009),
        (ProviderError::PropertyNotModified, 0x8000_500A),
        (ProviderError::PropertyModified, 0x8000_500B),
        (ProviderError::CantConvertDatatype, 0x8000_500C),
        (ProviderError::PropertyNotFound, 0x8000_500D),
        (ProviderError::ObjectExists, 0x8000_500E),
        (ProviderError::SchemaViolation, 0x8000_500F),
        (ProviderError::ColumnNotSet, 0x8000_5010),
        (ProviderError::InvalidFilter, 0x8000_5014),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn test_code_table_contract() {
        for (error, code) in code_table() {
            verify_code_contract(error, code);
        }
    }

    #[test]
    fn test_informational_codes_contract() {
        let informational: Vec<ProviderError> = code_table()
            .into_iter()
            .map(|(error, _)| error)
            .filter(ProviderError::is_informational)
            .collect();
        assert_eq!(
            informational,
            vec![
                ProviderError::QueryFailed,
                ProviderError::NoMoreRows,
                ProviderError::NoMoreColumns
            ]
        );
    }

    #[test]
    fn test_unrecognized_code_contract() {
        let error = ProviderError::from_code(0x8007_2030, "There is no such object on the server.");
        assert_eq!(error.code(), 0x8007_2030);
        assert_eq!(
            error.to_string(),
            "Provider error 0x80072030: There is no such object on the server."
        );
    }
}
