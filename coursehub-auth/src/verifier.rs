use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::{AuthError, PasswordContext, PasswordError, UserDirectory};

/// Decides whether an email/password pair matches a stored user.
///
/// Holds no per-request state; clone it freely.
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    context: Arc<PasswordContext>,
}

impl CredentialVerifier {
    pub fn new(context: Arc<PasswordContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &PasswordContext {
        &self.context
    }

    /// Check `password` for the user registered under `email`.
    ///
    /// Unknown emails and wrong passwords both produce `AuthError::InvalidCredentials`.
    /// Directory failures are returned as-is. The password is moved into the
    /// blocking hash check and dropped there.
    pub async fn verify<D>(
        &self,
        directory: &mut D,
        email: &str,
        password: SecretString,
    ) -> Result<(), AuthError>
    where
        D: UserDirectory + ?Sized,
    {
        let Some(record) = directory.find_by_email(email).await? else {
            debug!(%email, "login rejected: no such user");
            return Err(AuthError::InvalidCredentials);
        };

        let context = Arc::clone(&self.context);
        let stored = record.hashed_password;
        let (outcome, needs_update) = tokio::task::spawn_blocking(move || {
            let outcome = context.verify(password.expose_secret(), &stored);
            let needs_update = outcome.is_ok() && context.needs_update(&stored);
            (outcome, needs_update)
        })
        .await
        .map_err(|e| AuthError::Subsystem(format!("password verification task failed: {e}")))?;

        match outcome {
            Ok(()) => {
                if needs_update {
                    debug!(%email, "stored password hash uses deprecated settings");
                }
                Ok(())
            }
            Err(PasswordError::VerificationFailed) => {
                debug!(%email, "login rejected: password mismatch");
                Err(AuthError::InvalidCredentials)
            }
            Err(error) => {
                warn!(%email, %error, "{}", failure_reason(&error));
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

/// Log message for a verification that failed for a reason other than a mismatch.
fn failure_reason(error: &PasswordError) -> &'static str {
    match error {
        PasswordError::InvalidHashFormat => "stored password hash is not a recognised bcrypt hash",
        _ => "password verification could not be completed",
    }
}
