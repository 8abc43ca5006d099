use std::sync::Arc;

use passport_model::{
    AttendanceReply, AttendanceRequest, EventId, LeaderDocument, StudentId,
};
use tracing::{debug, info, warn};

use super::error::AttendanceError;
use crate::constants::attendance as api;
use crate::traits::{AttendanceApi, DocumentStore, IdentityProvider};

/// Successful round-trip to the attendance endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceOutcome {
    /// Check-in recorded now or earlier; show the confirmation screen.
    Confirmed { message: String, title: String },
    /// 2xx with any other message; shown as a short notice only.
    Informational { message: String },
}

impl AttendanceOutcome {
    /// Toast text for this outcome.
    pub fn notice(&self) -> String {
        match self {
            Self::Confirmed { message, title } => format!("{message} {title}"),
            Self::Informational { message } => message.clone(),
        }
    }
}

/// Event id check, token, profile lookup, POST, classification.
#[derive(Clone)]
pub struct AttendanceFlow {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn DocumentStore>,
    api: Arc<dyn AttendanceApi>,
}

impl std::fmt::Debug for AttendanceFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttendanceFlow").finish_non_exhaustive()
    }
}

impl AttendanceFlow {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
        api: Arc<dyn AttendanceApi>,
    ) -> Self {
        Self {
            identity,
            store,
            api,
        }
    }

    /// Submit attendance for an extracted event id. Nothing touches the
    /// network until the id is valid and a token is in hand.
    pub async fn submit(
        &self,
        event_id: &str,
    ) -> Result<AttendanceOutcome, AttendanceError> {
        let event_id = EventId::parse(event_id)
            .map_err(|_| AttendanceError::InvalidEventId(event_id.to_owned()))?;

        let user = self
            .identity
            .current_user()
            .ok_or(AttendanceError::NotSignedIn)?;

        let token = match self.identity.id_token(false).await {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return Err(AttendanceError::MissingToken),
            Err(err) => return Err(AttendanceError::TokenFailed(err.to_string())),
        };

        let (full_name, address) = self.saved_profile(&user.email).await;
        let request = AttendanceRequest {
            event_id,
            full_name,
            address,
        };

        let response = self
            .api
            .attend(&request, &token)
            .await
            .map_err(|err| AttendanceError::Network(err.to_string()))?;

        if !response.is_success() {
            warn!(status = response.status, "Attendance rejected by server");
            return Err(AttendanceError::Server {
                status: response.status,
                body: preview(&response.body, api::BODY_PREVIEW_CHARS),
                sent: serde_json::to_string_pretty(&request)
                    .unwrap_or_default(),
            });
        }

        let reply: AttendanceReply = serde_json::from_str(&response.body)
            .map_err(|err| AttendanceError::MalformedReply(err.to_string()))?;
        if reply.is_confirmed() {
            info!(
                event_id = %request.event_id,
                message = %reply.message,
                "Attendance confirmed"
            );
            Ok(AttendanceOutcome::Confirmed {
                message: reply.message,
                title: reply.title,
            })
        } else {
            debug!(message = %reply.message, "Attendance informational reply");
            Ok(AttendanceOutcome::Informational {
                message: reply.message,
            })
        }
    }

    /// Saved full name and address from `leaders/{studentId}`. Lookup
    /// failures fall back to empty strings.
    async fn saved_profile(&self, email: &str) -> (String, String) {
        let Some(student_id) = StudentId::from_email(email) else {
            return Default::default();
        };

        match self
            .store
            .get(api::LEADERS_COLLECTION, student_id.as_str())
            .await
        {
            Ok(Some(doc)) => {
                let leader = LeaderDocument::from(&doc);
                (
                    leader.full_name.trim().to_owned(),
                    leader.address.trim().to_owned(),
                )
            }
            Ok(None) => Default::default(),
            Err(err) => {
                warn!(%student_id, error = %err, "Profile lookup failed; sending empty profile");
                Default::default()
            }
        }
    }
}

/// First `max_chars` characters of `body`.
fn preview(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => body[..idx].to_owned(),
        None => body.to_owned(),
    }
}
