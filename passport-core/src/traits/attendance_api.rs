use async_trait::async_trait;
use passport_model::{AttendanceRequest, AttendanceResponse, BearerToken};

use crate::error::Result;

/// The HTTPS check-in endpoint. Any HTTP status is a successful call;
/// `Err` is reserved for transport failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceApi: Send + Sync {
    async fn attend(
        &self,
        request: &AttendanceRequest,
        token: &BearerToken,
    ) -> Result<AttendanceResponse>;
}
