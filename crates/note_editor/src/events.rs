//! Events delivered to the editor controller and the faults it reports.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Started,
    /// Editing an existing note. Not supported yet.
    Edit,
    /// Acknowledging an error from outside the dialog. Not supported yet.
    ErrorAcknowledged,
    BackPressed,
    TitleChanged(String),
    ContentChanged(String),
    DialogConfirmed,
    DialogDismissed,
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Started => "started",
            UiEvent::Edit => "edit",
            UiEvent::ErrorAcknowledged => "error_acknowledged",
            UiEvent::BackPressed => "back_pressed",
            UiEvent::TitleChanged(_) => "title_changed",
            UiEvent::ContentChanged(_) => "content_changed",
            UiEvent::DialogConfirmed => "dialog_confirmed",
            UiEvent::DialogDismissed => "dialog_dismissed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("unsupported operation: '{event}' is not implemented")]
    Unsupported { event: &'static str },
}
