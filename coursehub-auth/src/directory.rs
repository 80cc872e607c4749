use std::collections::HashMap;

use crate::AuthError;

/// What the verifier needs to know about a stored user.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub email: String,
    pub hashed_password: String,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("email", &self.email)
            .field("hashed_password", &"<redacted>")
            .finish()
    }
}

/// Lookup of users by email. Implement this for production and test stores.
///
/// Takes `&mut self` so an implementation can own a single pooled connection
/// for the duration of one request.
#[async_trait::async_trait]
pub trait UserDirectory: Send {
    /// Return the record whose email equals `email`, if there is one.
    ///
    /// Infrastructure failures are reported as `AuthError::DirectoryUnavailable`.
    async fn find_by_email(&mut self, email: &str) -> Result<Option<UserRecord>, AuthError>;
}

/// Test helper directory backed by a map.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDirectory {
    users: HashMap<String, String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, email: impl Into<String>, hashed_password: impl Into<String>) -> Self {
        self.insert(email, hashed_password);
        self
    }

    pub fn insert(&mut self, email: impl Into<String>, hashed_password: impl Into<String>) {
        self.users.insert(email.into(), hashed_password.into());
    }
}

#[async_trait::async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_by_email(&mut self, email: &str) -> Result<Option<UserRecord>, AuthError> {
        Ok(self.users.get(email).map(|hashed| UserRecord {
            email: email.to_string(),
            hashed_password: hashed.clone(),
        }))
    }
}
