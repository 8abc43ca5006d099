//! Profile form: stored values, the edited copy, and the save payload.

use passport_model::{
    AddressParts, DirtyFields, Document, LeaderDocument, ProfileFields,
    StudentId,
};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Username,
    FullName,
    Line1,
    Line2,
    City,
    State,
    Zip,
}

impl ProfileField {
    fn slot(self, fields: &mut ProfileFields) -> &mut String {
        match self {
            Self::Username => &mut fields.username,
            Self::FullName => &mut fields.full_name,
            Self::Line1 => &mut fields.address.line1,
            Self::Line2 => &mut fields.address.line2,
            Self::City => &mut fields.address.city,
            Self::State => &mut fields.address.state,
            Self::Zip => &mut fields.address.zip,
        }
    }
}

/// Profile fields as they were last read from the store.
pub fn stored_fields(doc: &Document) -> ProfileFields {
    let leader = LeaderDocument::from(doc);
    let address = AddressParts::parse(leader.address.trim()).unwrap_or_default();
    ProfileFields {
        username: leader.username.unwrap_or_default(),
        full_name: leader.full_name,
        address,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileView {
    student_id: Option<StudentId>,
    stored: ProfileFields,
    edited: ProfileFields,
    saving: bool,
}

impl ProfileView {
    pub fn student_id(&self) -> Option<&StudentId> {
        self.student_id.as_ref()
    }

    /// Header text: the student id or a signed-out notice.
    pub fn heading(&self) -> String {
        self.student_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "Not signed in".to_string())
    }

    /// Switch accounts. The form is cleared until the new profile loads.
    pub fn set_student(&mut self, student_id: Option<StudentId>) {
        if self.student_id != student_id {
            *self = Self {
                student_id,
                ..Self::default()
            };
        }
    }

    /// Apply a fetched leader document; a missing document reads as an
    /// empty profile.
    pub fn load(&mut self, doc: Option<&Document>) {
        self.stored = doc.map(stored_fields).unwrap_or_default();
        self.edited = self.stored.clone();
    }

    pub fn edited(&self) -> &ProfileFields {
        &self.edited
    }

    pub fn stored(&self) -> &ProfileFields {
        &self.stored
    }

    pub fn edit(&mut self, field: ProfileField, value: String) {
        *field.slot(&mut self.edited) = value;
    }

    pub fn dirty(&self) -> DirtyFields {
        self.edited.dirty_against(&self.stored)
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Fields merged into `leaders/{studentId}`. `None` while signed out or
    /// while a save is already running.
    pub fn begin_save(&mut self) -> Option<(StudentId, Map<String, Value>)> {
        if self.saving {
            return None;
        }
        let student_id = self.student_id.clone()?;
        let mut fields = Map::new();
        fields.insert(
            "username".into(),
            Value::String(self.edited.username.clone()),
        );
        fields.insert(
            "fullName".into(),
            Value::String(self.edited.full_name.clone()),
        );
        fields.insert(
            "address".into(),
            Value::String(self.edited.address.compose()),
        );
        self.saving = true;
        Some((student_id, fields))
    }

    /// The store accepted `saved`; it becomes the new baseline.
    pub fn finish_save(&mut self, saved: Option<ProfileFields>) {
        self.saving = false;
        if let Some(saved) = saved {
            self.stored = saved;
        }
    }
}
