//! Attendance wire types.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ids::EventId;

/// Body posted to the attendance endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRequest {
    pub event_id: EventId,
    pub full_name: String,
    pub address: String,
}

/// Raw HTTP outcome of an attendance call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceResponse {
    pub status: u16,
    pub body: String,
}

impl AttendanceResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// JSON body of a 2xx attendance response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReply {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub title: String,
}

impl AttendanceReply {
    pub const ATTENDED: &'static str = "attended";
    pub const ALREADY_ATTENDED: &'static str = "already attended.";

    /// Both "attended" and "already attended." count as a confirmed check-in.
    pub fn is_confirmed(&self) -> bool {
        self.message == Self::ATTENDED || self.message == Self::ALREADY_ATTENDED
    }
}

/// Identity-provider token sent as `Authorization: Bearer`. Wiped on drop and
/// never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_keys() {
        let request = AttendanceRequest {
            event_id: EventId::parse("abc123").unwrap(),
            full_name: "Ada Lovelace".into(),
            address: "1 Main St, Springfield, IL 62701".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["eventId"], "abc123");
        assert_eq!(json["fullName"], "Ada Lovelace");
        assert_eq!(json["address"], "1 Main St, Springfield, IL 62701");
    }

    #[test]
    fn reply_classification() {
        let reply: AttendanceReply =
            serde_json::from_str(r#"{"message":"already attended.","title":"Gala"}"#)
                .unwrap();
        assert!(reply.is_confirmed());
        let reply: AttendanceReply =
            serde_json::from_str(r#"{"message":"event closed"}"#).unwrap();
        assert!(!reply.is_confirmed());
        assert_eq!(reply.title, "");
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = BearerToken::new("secret-value");
        assert_eq!(format!("{token:?}"), "BearerToken(<redacted>)");
        assert_eq!(token.expose(), "secret-value");
    }
}
