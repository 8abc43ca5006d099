use std::time::Duration;

use async_trait::async_trait;
use passport_model::{AttendanceRequest, AttendanceResponse, BearerToken};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::constants::attendance as api;
use crate::error::{CoreError, Result};
use crate::traits::AttendanceApi;

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// reqwest-backed [`AttendanceApi`].
#[derive(Clone)]
pub struct HttpAttendanceClient {
    client: Client,
    endpoint: Url,
}

impl std::fmt::Debug for HttpAttendanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAttendanceClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl HttpAttendanceClient {
    /// Client for the production endpoint with the default timeout.
    pub fn production() -> Result<Self> {
        Self::new(api::ENDPOINT, Duration::from_secs(api::TIMEOUT_SECS))
    }

    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            CoreError::Internal(format!("invalid attendance endpoint {endpoint}: {e}"))
        })?;
        if endpoint.scheme() != "https" {
            warn!(%endpoint, "Attendance endpoint is not https");
        }

        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub(crate) fn build_request(
        &self,
        request: &AttendanceRequest,
        token: &BearerToken,
    ) -> Result<reqwest::Request> {
        let body = serde_json::to_vec(request)?;
        let built = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))
            .bearer_auth(token.expose())
            .body(body)
            .build()?;
        Ok(built)
    }
}

#[async_trait]
impl AttendanceApi for HttpAttendanceClient {
    async fn attend(
        &self,
        request: &AttendanceRequest,
        token: &BearerToken,
    ) -> Result<AttendanceResponse> {
        let http_request = self.build_request(request, token)?;
        debug!(
            endpoint = %self.endpoint,
            event_id = %request.event_id,
            "Posting attendance"
        );

        let response = self.client.execute(http_request).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, "Attendance response received");

        Ok(AttendanceResponse { status, body })
    }
}
