//! # Directory Contract Tests
//!
//! This crate provides "golden" tests for the surfaces that must stay
//! bit-exact over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Contracts are written as literal tables
//! - **Testability first**: Contract tests fail when a surface changes
//! - **Mechanism not policy**: Define what must be stable, not how to use it
//!
//! ## Structure
//!
//! Each surface has a module with contract tests that verify:
//! - Path parsing and formatting
//! - Provider result codes
//! - Capability interface identifiers
//! - Settings file layout

pub mod capabilities;
pub mod paths;
pub mod provider_errors;
pub mod settings;

/// Common test helpers for contract validation
pub mod test_helpers {
    use ads_path::AdsPath;
    use provider_api::ProviderError;

    /// Verifies a raw path parses to the expected parts
    pub fn verify_path_contract(raw: &str, scheme: &str, host: &str, path: &str) {
        let parsed = AdsPath::parse(raw)
            .unwrap_or_else(|err| panic!("Path {:?} no longer parses: {}", raw, err));
        assert_eq!(
            (parsed.scheme(), parsed.host(), parsed.path()),
            (scheme, host, path),
            "Parts of {:?} changed",
            raw
        );
    }

    /// Verifies formatting a parsed path re-parses to an equal path
    pub fn verify_format_is_stable(raw: &str) {
        let parsed = AdsPath::parse(raw).unwrap_or_else(|err| panic!("{:?}: {}", raw, err));
        let formatted = parsed.to_string();
        let reparsed = AdsPath::parse(&formatted)
            .unwrap_or_else(|err| panic!("Formatted {:?} no longer parses: {}", formatted, err));
        assert_eq!(reparsed, parsed, "Formatting {:?} is not stable", raw);
    }

    /// Verifies an error maps to the expected result code and back
    pub fn verify_code_contract(error: ProviderError, expected_code: u32) {
        assert_eq!(
            error.code(),
            expected_code,
            "Result code of {:?} changed: expected 0x{:08X}, got 0x{:08X}",
            error,
            expected_code,
            error.code()
        );
        assert_eq!(
            ProviderError::from_code(expected_code, "ignored"),
            error,
            "Code 0x{:08X} no longer maps to {:?}",
            expected_code,
            error
        );
    }
}
