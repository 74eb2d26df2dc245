use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(NoteId);

/// Record type tag stored alongside every note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    #[default]
    Note,
}

impl NoteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoteKind::Note => "note",
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteKind {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "note" => Ok(NoteKind::Note),
            other => Err(DomainError::UnknownNoteKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: NoteKind,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            kind: NoteKind::Note,
        }
    }

    /// A note with an empty title or empty content has nothing worth saving.
    /// Whitespace counts as content.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() || self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_serializes_kind_as_type_tag() {
        let note = Note::new("T", "C");
        let json = serde_json::to_value(&note).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"title": "T", "content": "C", "type": "note"})
        );
    }

    #[test]
    fn blank_when_either_field_is_empty() {
        assert!(Note::new("", "body").is_blank());
        assert!(Note::new("title", "").is_blank());
        assert!(!Note::new(" ", " ").is_blank());
    }

    #[test]
    fn parses_known_kind_and_rejects_unknown() {
        assert_eq!("note".parse::<NoteKind>().expect("kind"), NoteKind::Note);
        assert!(matches!(
            "memo".parse::<NoteKind>(),
            Err(DomainError::UnknownNoteKind(kind)) if kind == "memo"
        ));
    }
}
