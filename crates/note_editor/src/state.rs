use std::fmt;

use serde::{Deserialize, Serialize};

/// Phase of the note editor screen. Exactly one is current at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ScreenState {
    #[default]
    Start,
    Loading,
    FinishLoading,
    Saving,
    FinishSaving,
    Error(String),
}

impl ScreenState {
    pub fn is_busy(&self) -> bool {
        matches!(self, ScreenState::Loading | ScreenState::Saving)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ScreenState::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for ScreenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenState::Start => f.write_str("start"),
            ScreenState::Loading => f.write_str("loading"),
            ScreenState::FinishLoading => f.write_str("finish_loading"),
            ScreenState::Saving => f.write_str("saving"),
            ScreenState::FinishSaving => f.write_str("finish_saving"),
            ScreenState::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// Everything the rendering layer draws, read in one go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditorSnapshot {
    pub state: ScreenState,
    pub title: String,
    pub content: String,
    pub dialog_visible: bool,
}
