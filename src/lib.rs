//! Session & Input-Security Guard for the inventory client.
//!
//! A small security subsystem the host application composes with its UI
//! and remote-store glue:
//!
//! - **SessionGuard**: idle-timeout state machine that force-logs-out a
//!   user after a window of input inactivity, with a redundant backup
//!   timer.
//! - **FieldValidator**: per-field-type input validation that rejects
//!   SQL/XSS-like payloads before they reach the CRUD layer.
//! - **StrengthScorer**: password strength tiers plus the full unmet
//!   requirement list for live registration feedback.
//! - **CryptoBox**: static-secret key derivation and randomized-IV
//!   symmetric encryption of flat audit records.
//!
//! # Boundaries
//!
//! The guard does not authenticate users; it supervises session liveness
//! and validates input. The host must forward every pointer/touch event to
//! [`session::SessionGuard::on_activity`], run each user-entered field
//! through the matching [`security::FieldValidator`] function before
//! submission, and supply a logout callback that tears down the session at
//! the external credential authority. Validation and scoring are pure and
//! synchronous; encryption is synchronous and bounded; nothing here blocks
//! the caller.

pub mod config;
pub mod security;
pub mod session;
pub mod telemetry;

pub use config::{load_config, EnvConfig};
pub use security::{
    CryptoBox, CryptoError, FieldValidator, InjectionScan, InjectionScanner, PasswordAssessment,
    PasswordStrength, PayloadValue, StrengthScorer, ValidationResult,
};
pub use session::{SessionConfig, SessionGuard};
pub use telemetry::{init_logging, LogConfig, LogError, LogFormat};
