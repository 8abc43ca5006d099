use std::cmp::Reverse;

use passport_model::{Document, LeaderDocument};

const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderRow {
    pub student_id: String,
    pub name: String,
    pub events_attended: i64,
}

impl LeaderRow {
    /// `"{name}: {count}"`
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.events_attended)
    }
}

impl From<&LeaderDocument> for LeaderRow {
    fn from(leader: &LeaderDocument) -> Self {
        let name = match leader.username.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => ANONYMOUS.to_string(),
        };
        Self {
            student_id: leader.id.clone(),
            name,
            events_attended: leader.events_attended.unwrap_or(0),
        }
    }
}

/// Leaders ordered by events attended, most first. Ties keep store order.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardView {
    rows: Vec<LeaderRow>,
}

impl LeaderboardView {
    pub fn replace(&mut self, docs: &[Document]) {
        let mut rows: Vec<LeaderRow> = docs
            .iter()
            .map(|doc| LeaderRow::from(&LeaderDocument::from(doc)))
            .collect();
        rows.sort_by_key(|row| Reverse(row.events_attended));
        self.rows = rows;
    }

    pub fn rows(&self) -> &[LeaderRow] {
        &self.rows
    }

    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(LeaderRow::label).collect()
    }
}
