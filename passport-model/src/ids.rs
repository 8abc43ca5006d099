//! Identifier newtypes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, Result};

static EVENT_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{1,200}$").expect("static event id pattern")
});

const EVENT_PATH_MARKER: &str = "/event/";

/// Pull the event id out of a scanned payload.
///
/// Payloads look like `https://pass.contact/event/<id>?ref=...`. The id is
/// the text after `/event/` up to the first `?`. Payloads without the marker
/// are returned unchanged. The result is not validated.
pub fn extract_event_id(raw: &str) -> &str {
    match raw.find(EVENT_PATH_MARKER) {
        Some(idx) => {
            let after = &raw[idx + EVENT_PATH_MARKER.len()..];
            match after.find('?') {
                Some(q) => &after[..q],
                None => after,
            }
        }
        None => raw,
    }
}

/// Validated event document id (`^[A-Za-z0-9_-]{1,200}$`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventId(String);

impl EventId {
    pub fn parse(raw: &str) -> Result<Self> {
        if EVENT_ID_PATTERN.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ModelError::InvalidEventId(raw.to_string()))
        }
    }

    /// Extract and validate in one step.
    pub fn from_payload(raw: &str) -> Result<Self> {
        Self::parse(extract_event_id(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EventId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<EventId> for String {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Student id: the local part of the signed-in email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(String);

impl StudentId {
    /// `None` for a missing or empty local part.
    pub fn from_email(email: &str) -> Option<Self> {
        let local = email.split('@').next().unwrap_or_default().trim();
        if local.is_empty() {
            None
        } else {
            Some(Self(local.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
