use async_trait::async_trait;
use passport_model::{BearerToken, StudentId};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedInUser {
    pub email: String,
    pub display_name: Option<String>,
}

impl SignedInUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
        }
    }

    /// Student id is the email's local part.
    pub fn student_id(&self) -> Option<StudentId> {
        StudentId::from_email(&self.email)
    }
}

/// Account provider the attendance endpoint trusts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<SignedInUser>;

    /// Fresh or cached id token. `Ok(None)` means the provider answered
    /// without a token.
    async fn id_token(&self, force_refresh: bool) -> Result<Option<BearerToken>>;
}
