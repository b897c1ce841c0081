//! Settings file contract tests
//!
//! These tests define the on-disk layout of client settings.

// ===== Settings Format Version =====
pub const SETTINGS_VERSION: u32 = 1;
