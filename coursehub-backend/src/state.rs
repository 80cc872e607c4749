use std::sync::Arc;

use coursehub_auth::{CredentialVerifier, PasswordContext};

/// Shared application state passed to every route handler.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: Arc<coursehub_db::DbPool>,
    verifier: CredentialVerifier,
}

impl AppState {
    /// Build the state from a pool and the process-wide password settings.
    pub fn new(db_pool: coursehub_db::DbPool, passwords: PasswordContext) -> Self {
        Self {
            db_pool: Arc::new(db_pool),
            verifier: CredentialVerifier::new(Arc::new(passwords)),
        }
    }

    pub fn verifier(&self) -> &CredentialVerifier {
        &self.verifier
    }
}
