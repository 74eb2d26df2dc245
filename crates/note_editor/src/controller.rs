//! The note editor screen's state machine.
//!
//! Every observable field lives in a `watch` channel whose sender is held
//! in the controller's shared state; the controller and the tasks it spawns
//! are the only writers. Background work runs in a [`JoinSet`] owned by the
//! controller, so tearing the screen down (or dropping the controller)
//! aborts it before it can touch a dead screen.

use std::sync::Arc;

use shared::domain::Note;
use tokio::{
    sync::{broadcast, watch},
    task::JoinSet,
    time::sleep,
};
use tracing::{debug, info, warn};

use crate::{
    config::EditorSettings,
    events::{EditorError, UiEvent},
    state::{EditorSnapshot, ScreenState},
    Navigator, SaveNote,
};

const TRANSITION_BUFFER: usize = 64;

struct EditorShared {
    state: watch::Sender<ScreenState>,
    transitions: broadcast::Sender<ScreenState>,
    title: watch::Sender<String>,
    content: watch::Sender<String>,
    dialog_visible: watch::Sender<bool>,
    save_note: Arc<dyn SaveNote>,
    navigator: Arc<dyn Navigator>,
    settings: EditorSettings,
}

impl EditorShared {
    fn set_state(&self, next: ScreenState) {
        debug!(state = %next, "screen state transition");
        // Broadcast under the watch write lock so both views agree on the
        // last state when tasks on other workers write at the same time.
        self.state.send_modify(|state| {
            *state = next.clone();
            // Err only means nobody is listening for transitions.
            let _ = self.transitions.send(next);
        });
    }

    fn set_dialog_visible(&self, visible: bool) {
        self.dialog_visible.send_replace(visible);
    }

    async fn finish_loading(&self) {
        sleep(self.settings.load_delay).await;
        self.set_state(ScreenState::FinishLoading);
    }

    async fn save(&self) {
        let title = self.title.borrow().clone();
        let content = self.content.borrow().clone();
        let note = Note::new(title, content);

        // Known quirk: this branch leaves the screen in `Saving`.
        if note.is_blank() {
            info!("nothing to save; leaving note editor");
            self.navigator.pop();
            return;
        }

        match self.save_note.save(note).await {
            Ok(()) => {
                sleep(self.settings.save_settle_delay).await;
                self.set_state(ScreenState::FinishSaving);
                info!("note saved; leaving note editor");
                self.navigator.pop();
            }
            Err(err) => {
                warn!(error = %err, "failed to save note");
                self.set_dialog_visible(true);
                self.set_state(ScreenState::Error(err.to_string()));
            }
        }
    }
}

pub struct NoteEditorController {
    shared: Arc<EditorShared>,
    tasks: JoinSet<()>,
}

impl NoteEditorController {
    pub fn new(save_note: Arc<dyn SaveNote>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_settings(save_note, navigator, EditorSettings::default())
    }

    pub fn with_settings(
        save_note: Arc<dyn SaveNote>,
        navigator: Arc<dyn Navigator>,
        settings: EditorSettings,
    ) -> Self {
        let (transitions, _) = broadcast::channel(TRANSITION_BUFFER);
        Self {
            shared: Arc::new(EditorShared {
                state: watch::Sender::new(ScreenState::Start),
                transitions,
                title: watch::Sender::new(String::new()),
                content: watch::Sender::new(String::new()),
                dialog_visible: watch::Sender::new(false),
                save_note,
                navigator,
                settings,
            }),
            tasks: JoinSet::new(),
        }
    }

    /// Runs the handler for `event`. Spawns background work, so it must be
    /// called from within a tokio runtime.
    pub fn handle_event(&mut self, event: UiEvent) -> Result<(), EditorError> {
        self.reap_finished_tasks();
        let name = event.name();
        debug!(event = name, "handling ui event");

        match event {
            UiEvent::Started => self.on_started(),
            UiEvent::Edit | UiEvent::ErrorAcknowledged => {
                return Err(EditorError::Unsupported { event: name });
            }
            UiEvent::BackPressed => self.on_back_pressed(),
            UiEvent::TitleChanged(title) => {
                self.shared.title.send_replace(title);
            }
            UiEvent::ContentChanged(content) => {
                self.shared.content.send_replace(content);
            }
            UiEvent::DialogConfirmed | UiEvent::DialogDismissed => {
                self.shared.set_dialog_visible(false);
            }
        }

        Ok(())
    }

    fn on_started(&mut self) {
        self.shared.set_state(ScreenState::Start);
        self.shared.set_state(ScreenState::Loading);

        let shared = Arc::clone(&self.shared);
        self.tasks.spawn(async move { shared.finish_loading().await });
    }

    /// Not debounced: each press starts its own save workflow.
    fn on_back_pressed(&mut self) {
        self.shared.set_state(ScreenState::Saving);

        let shared = Arc::clone(&self.shared);
        self.tasks.spawn(async move { shared.save().await });
    }

    fn reap_finished_tasks(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(err) = result {
                if err.is_panic() {
                    warn!(error = %err, "note editor task panicked");
                }
            }
        }
    }

    pub fn current_state(&self) -> ScreenState {
        self.shared.state.borrow().clone()
    }

    pub fn current_title(&self) -> String {
        self.shared.title.borrow().clone()
    }

    pub fn current_content(&self) -> String {
        self.shared.content.borrow().clone()
    }

    pub fn is_dialog_visible(&self) -> bool {
        *self.shared.dialog_visible.borrow()
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            state: self.current_state(),
            title: self.current_title(),
            content: self.current_content(),
            dialog_visible: self.is_dialog_visible(),
        }
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ScreenState> {
        self.shared.state.subscribe()
    }

    /// Every state write in order, including ones a `watch` receiver would
    /// coalesce away (e.g. `Start` right before `Loading`).
    pub fn subscribe_transitions(&self) -> broadcast::Receiver<ScreenState> {
        self.shared.transitions.subscribe()
    }

    pub fn subscribe_title(&self) -> watch::Receiver<String> {
        self.shared.title.subscribe()
    }

    pub fn subscribe_content(&self) -> watch::Receiver<String> {
        self.shared.content.subscribe()
    }

    pub fn subscribe_dialog_visible(&self) -> watch::Receiver<bool> {
        self.shared.dialog_visible.subscribe()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Cancels pending load/save work and waits until it has stopped.
    pub async fn teardown(mut self) {
        let pending = self.tasks.len();
        self.tasks.shutdown().await;
        info!(pending, "note editor torn down");
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
