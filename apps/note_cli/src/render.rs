//! Terminal rendering of editor state.

use anyhow::Result;
use note_editor::{EditorSnapshot, ScreenState};

pub fn render_state(state: &ScreenState, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(state)?);
    }

    let line = match state {
        ScreenState::Start => "[start]".to_string(),
        ScreenState::Loading => "[loading...]".to_string(),
        ScreenState::FinishLoading => "[ready] type `help` for commands".to_string(),
        ScreenState::Saving => "[saving...]".to_string(),
        ScreenState::FinishSaving => "[saved]".to_string(),
        ScreenState::Error(message) => {
            format!("[error] {message}\n  (dialog open: `confirm` or `dismiss`)")
        }
    };
    Ok(line)
}

pub fn render_snapshot(snapshot: &EditorSnapshot, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(snapshot)?);
    }

    Ok(format!(
        "state:   {}\ntitle:   {}\ncontent: {}\ndialog:  {}",
        snapshot.state,
        snapshot.title,
        snapshot.content.replace('\n', "\\n"),
        if snapshot.dialog_visible { "open" } else { "closed" },
    ))
}
