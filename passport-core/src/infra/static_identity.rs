use async_trait::async_trait;
use passport_model::BearerToken;

use crate::error::Result;
use crate::traits::{IdentityProvider, SignedInUser};

/// Identity fixed at construction, e.g. a token pasted on the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<SignedInUser>,
    token: Option<BearerToken>,
}

impl StaticIdentity {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(email: impl Into<String>, token: Option<BearerToken>) -> Self {
        Self {
            user: Some(SignedInUser::new(email)),
            token,
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<SignedInUser> {
        self.user.clone()
    }

    async fn id_token(&self, _force_refresh: bool) -> Result<Option<BearerToken>> {
        Ok(self.token.clone())
    }
}
