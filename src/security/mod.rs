//! Input-security components for the inventory client.
//!
//! This module provides the surface the form layer runs raw user input
//! through before it reaches the CRUD layer:
//! - Injection-pattern classification (SQL / XSS / markup)
//! - Per-field validation with structured pass/fail results
//! - Password strength scoring for live registration feedback
//! - Symmetric encryption of audit payloads

pub mod crypto;
pub mod password;
pub mod patterns;
pub mod validator;

pub use crypto::{CryptoBox, CryptoError, PayloadValue};
pub use password::{PasswordAssessment, PasswordStrength, StrengthScorer};
pub use patterns::{InjectionScan, InjectionScanner};
pub use validator::FieldValidator;

/// Outcome of a single field validation.
///
/// Constructed once per validation call and never mutated. A failed result
/// carries a human-readable, user-correctable reason; validation failures
/// are values, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the input passed every rule for its field type.
    pub is_valid: bool,
    /// Reason for the first failing rule; empty when valid.
    pub error_message: String,
}

impl ValidationResult {
    /// A passing result.
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error_message: String::new(),
        }
    }

    /// A failing result with the given reason.
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: reason.into(),
        }
    }
}
