//! Credential checking for the CourseHub backend.
//!
//! Provides:
//! - A bcrypt password context, configured once and shared read-only
//! - The `UserDirectory` lookup seam and an in-memory implementation
//! - `CredentialVerifier`, which decides whether an email/password pair matches
//! - Authentication and password error types

use thiserror::Error;

mod directory;
mod password;
mod verifier;

pub use directory::{InMemoryDirectory, UserDirectory, UserRecord};
pub use password::{DeprecatedPolicy, PasswordContext, Scheme};
pub use secrecy::SecretString;
pub use verifier::CredentialVerifier;

// ============================================================================
// Errors
// ============================================================================

/// Message returned to clients for any rejected login.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Authentication errors that can surface during request processing.
#[derive(Debug, Error, Clone)]
pub enum AuthError {
    /// Unknown email or wrong password. The two cases are deliberately not told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("user directory is unavailable: {0}")]
    DirectoryUnavailable(String),
    #[error("authentication subsystem is unavailable: {0}")]
    Subsystem(String),
}

/// Password-related errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    HashingFailed(String),
    #[error("password verification failed")]
    VerificationFailed,
    #[error("invalid hash format")]
    InvalidHashFormat,
    #[error("bcrypt cost {0} is outside the supported range 4..=31")]
    InvalidCost(u32),
    #[error("unknown deprecation policy: {0}")]
    UnknownPolicy(String),
}
