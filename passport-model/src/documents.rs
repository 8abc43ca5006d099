//! Typed views over document-store records.
//!
//! The store hands back loosely typed JSON objects. Missing or mistyped
//! string fields read as empty, matching how the hosted database is
//! populated by hand.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record from a document collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// String field, or `None` when missing or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// String field with empty fallback.
    pub fn str_or_empty(&self, key: &str) -> String {
        self.get_str(key).unwrap_or_default().to_string()
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(Value::as_i64)
    }
}

/// Row of the `events` collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDocument {
    pub id: String,
    pub title: String,
    pub date: String,
    pub location: String,
    pub description_link: String,
}

impl From<&Document> for EventDocument {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.str_or_empty("title"),
            date: doc.str_or_empty("date"),
            location: doc.str_or_empty("location"),
            description_link: doc.str_or_empty("descriptionLink"),
        }
    }
}

/// Row of the `leaders` collection, keyed by student id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderDocument {
    pub id: String,
    pub username: Option<String>,
    pub full_name: String,
    pub address: String,
    pub events_attended: Option<i64>,
}

impl From<&Document> for LeaderDocument {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            username: doc.get_str("username").map(str::to_string),
            full_name: doc.str_or_empty("fullName"),
            address: doc.str_or_empty("address"),
            events_attended: doc.get_i64("eventsAttended"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        match value {
            Value::Object(map) => Document::new(id, map),
            _ => Document::new(id, Map::new()),
        }
    }

    #[test]
    fn event_fields_default_to_empty() {
        let event = EventDocument::from(&doc(
            "e1",
            json!({"title": "Gala", "date": 20240101, "descriptionLink": null}),
        ));
        assert_eq!(event.id, "e1");
        assert_eq!(event.title, "Gala");
        assert_eq!(event.date, "");
        assert_eq!(event.description_link, "");
    }

    #[test]
    fn leader_fields() {
        let leader = LeaderDocument::from(&doc(
            "s1",
            json!({"username": "ada", "eventsAttended": 7, "fullName": "Ada L"}),
        ));
        assert_eq!(leader.username.as_deref(), Some("ada"));
        assert_eq!(leader.events_attended, Some(7));
        assert_eq!(leader.full_name, "Ada L");
        assert_eq!(leader.address, "");
    }
}
