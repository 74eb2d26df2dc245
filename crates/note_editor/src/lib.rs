//! Presentation-layer controller for the note editor screen.
//!
//! [`NoteEditorController`] owns the screen's transient state, turns
//! [`UiEvent`]s into state transitions, and runs the load and save
//! workflows against the injected [`SaveNote`] and [`Navigator`]
//! collaborators.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::domain::Note;
use storage::Storage;

pub mod config;
pub mod controller;
pub mod events;
pub mod state;

pub use config::EditorSettings;
pub use controller::NoteEditorController;
pub use events::{EditorError, UiEvent};
pub use state::{EditorSnapshot, ScreenState};

/// Durable note persistence used by the save workflow.
#[async_trait]
pub trait SaveNote: Send + Sync {
    async fn save(&self, note: Note) -> Result<()>;
}

/// Navigation stack the editor screen lives on.
pub trait Navigator: Send + Sync {
    /// Removes the editor screen from the stack.
    fn pop(&self);
}

pub struct MissingSaveNote;

#[async_trait]
impl SaveNote for MissingSaveNote {
    async fn save(&self, _note: Note) -> Result<()> {
        Err(anyhow!("note persistence is unavailable"))
    }
}

#[async_trait]
impl SaveNote for Storage {
    async fn save(&self, note: Note) -> Result<()> {
        self.insert_note(&note).await.map(|_| ())
    }
}
