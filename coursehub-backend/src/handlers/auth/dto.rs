use coursehub_auth::SecretString;
use serde::{Deserialize, Serialize};

/// Body of `POST /login`.
///
/// The password is redacted from `Debug` output and zeroised when dropped.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

/// Body returned by a successful login.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub message: &'static str,
}

impl LoginResponse {
    pub const SUCCESS_MESSAGE: &'static str = "Login successful";

    pub fn success() -> Self {
        Self {
            message: Self::SUCCESS_MESSAGE,
        }
    }
}
