//! Profile form fields and the single-line address format stored with them.

use serde::{Deserialize, Serialize};

/// Structured postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressParts {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl AddressParts {
    /// Parse `"line1[, line2], city, STATE ZIP"`. Fewer than three
    /// comma-separated parts is not an address.
    pub fn parse(address: &str) -> Option<Self> {
        let parts: Vec<&str> = address
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() < 3 {
            return None;
        }

        let (line2, city, state_zip) = if parts.len() > 3 {
            (parts[1], parts[2], parts[3])
        } else {
            ("", parts[1], parts[2])
        };
        let mut state_zip = state_zip.split_whitespace();

        Some(Self {
            line1: parts[0].to_string(),
            line2: line2.to_string(),
            city: city.to_string(),
            state: state_zip.next().unwrap_or_default().to_string(),
            zip: state_zip.next().unwrap_or_default().to_string(),
        })
    }

    /// Single-line form. Empty unless line 1, city, state and zip are all
    /// present.
    pub fn compose(&self) -> String {
        if self.line1.is_empty()
            || self.city.is_empty()
            || self.state.is_empty()
            || self.zip.is_empty()
        {
            return String::new();
        }
        if self.line2.is_empty() {
            format!("{}, {}, {} {}", self.line1, self.city, self.state, self.zip)
        } else {
            format!(
                "{}, {}, {}, {} {}",
                self.line1, self.line2, self.city, self.state, self.zip
            )
        }
    }
}

/// Editable profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub username: String,
    pub full_name: String,
    pub address: AddressParts,
}

/// Which form fields differ from the stored profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyFields {
    pub username: bool,
    pub full_name: bool,
    pub line1: bool,
    pub line2: bool,
    pub city: bool,
    pub state: bool,
    pub zip: bool,
}

impl DirtyFields {
    pub fn any(&self) -> bool {
        self.username
            || self.full_name
            || self.line1
            || self.line2
            || self.city
            || self.state
            || self.zip
    }
}

fn differs(edited: &str, stored: &str) -> bool {
    edited.trim() != stored.trim()
}

impl ProfileFields {
    /// Field-by-field comparison ignoring surrounding whitespace.
    pub fn dirty_against(&self, stored: &ProfileFields) -> DirtyFields {
        DirtyFields {
            username: differs(&self.username, &stored.username),
            full_name: differs(&self.full_name, &stored.full_name),
            line1: differs(&self.address.line1, &stored.address.line1),
            line2: differs(&self.address.line2, &stored.address.line2),
            city: differs(&self.address.city, &stored.address.city),
            state: differs(&self.address.state, &stored.address.state),
            zip: differs(&self.address.zip, &stored.address.zip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_three_and_four_part_addresses() {
        let a = AddressParts::parse("1 Main St, Springfield, IL 62701").unwrap();
        assert_eq!(a.line1, "1 Main St");
        assert_eq!(a.line2, "");
        assert_eq!(a.city, "Springfield");
        assert_eq!((a.state.as_str(), a.zip.as_str()), ("IL", "62701"));

        let b =
            AddressParts::parse("1 Main St, Apt 4, Springfield, IL  62701").unwrap();
        assert_eq!(b.line2, "Apt 4");
        assert_eq!(b.zip, "62701");
        assert!(AddressParts::parse("1 Main St, Springfield").is_none());
    }

    #[test]
    fn compose_requires_core_parts() {
        let mut a = AddressParts {
            line1: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip: "62701".into(),
            ..Default::default()
        };
        assert_eq!(a.compose(), "1 Main St, Springfield, IL 62701");
        a.line2 = "Apt 4".into();
        assert_eq!(a.compose(), "1 Main St, Apt 4, Springfield, IL 62701");
        a.zip.clear();
        assert_eq!(a.compose(), "");
    }

    #[test]
    fn compose_then_parse_restores_parts() {
        let a = AddressParts {
            line1: "9 Elm".into(),
            line2: "Unit B".into(),
            city: "Athens".into(),
            state: "OH".into(),
            zip: "45701".into(),
        };
        assert_eq!(AddressParts::parse(&a.compose()), Some(a));
    }

    #[test]
    fn dirty_ignores_whitespace() {
        let stored = ProfileFields {
            username: "ada".into(),
            ..Default::default()
        };
        let mut edited = stored.clone();
        edited.username = "  ada ".into();
        assert!(!edited.dirty_against(&stored).any());
        edited.address.city = "Athens".into();
        let dirty = edited.dirty_against(&stored);
        assert!(dirty.city && !dirty.username);
    }
}
