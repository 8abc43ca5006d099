use passport_model::{Document, EventDocument, parse_navigable_link};
use serde::Serialize;

use crate::messages::Effect;

/// What the detail screen needs to show directions for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDetail {
    pub id: String,
    pub title: String,
    pub date: String,
    pub location: String,
}

impl From<&EventDocument> for EventDetail {
    fn from(event: &EventDocument) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            date: event.date.clone(),
            location: event.location.clone(),
        }
    }
}

/// `"{date} {title}: {location}"`
pub fn event_label(event: &EventDocument) -> String {
    format!("{} {}: {}", event.date, event.title, event.location)
}

/// Rows of the hub's event list, in store order.
#[derive(Debug, Clone, Default)]
pub struct EventsView {
    events: Vec<EventDocument>,
}

impl EventsView {
    pub fn replace(&mut self, docs: &[Document]) {
        self.events = docs.iter().map(EventDocument::from).collect();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[EventDocument] {
        &self.events
    }

    pub fn labels(&self) -> Vec<String> {
        self.events.iter().map(event_label).collect()
    }

    /// A tap opens the description link when it is a valid https URL and
    /// the detail screen otherwise.
    pub fn tap(&self, index: usize) -> Option<Effect> {
        let event = self.events.get(index)?;
        Some(match parse_navigable_link(&event.description_link) {
            Some(url) => Effect::OpenUrl(url),
            None => Effect::OpenEventDetail(EventDetail::from(event)),
        })
    }

    pub fn long_press(&self, index: usize) -> Option<Effect> {
        self.events
            .get(index)
            .map(|event| Effect::OpenEventDetail(EventDetail::from(event)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn doc(id: &str, value: Value) -> Document {
        match value {
            Value::Object(map) => Document::new(id, map),
            _ => Document::new(id, Default::default()),
        }
    }

    fn view() -> EventsView {
        let mut view = EventsView::default();
        view.replace(&[
            doc(
                "gala",
                json!({
                    "title": "Gala",
                    "date": "2024-05-01",
                    "location": "Hall A",
                    "descriptionLink": "https://pass.contact/gala"
                }),
            ),
            doc(
                "mixer",
                json!({
                    "title": "Mixer",
                    "date": "2024-05-02",
                    "location": "Quad",
                    "descriptionLink": "http://insecure.example/mixer"
                }),
            ),
        ]);
        view
    }

    #[test]
    fn labels_follow_date_title_location() {
        assert_eq!(
            view().labels(),
            vec!["2024-05-01 Gala: Hall A", "2024-05-02 Mixer: Quad"]
        );
    }

    #[test]
    fn tap_opens_https_links_only() {
        let view = view();
        match view.tap(0) {
            Some(Effect::OpenUrl(url)) => {
                assert_eq!(url.as_str(), "https://pass.contact/gala")
            }
            other => panic!("expected link, got {other:?}"),
        }
        match view.tap(1) {
            Some(Effect::OpenEventDetail(detail)) => {
                assert_eq!(detail.id, "mixer");
                assert_eq!(detail.location, "Quad");
            }
            other => panic!("expected detail, got {other:?}"),
        }
        assert!(view.tap(2).is_none());
    }

    #[test]
    fn long_press_always_opens_detail() {
        assert!(matches!(
            view().long_press(0),
            Some(Effect::OpenEventDetail(detail)) if detail.title == "Gala"
        ));
    }
}
