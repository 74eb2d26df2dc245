use std::{sync::Arc, time::Duration};

use note_editor::{EditorSettings, Navigator, NoteEditorController, ScreenState, UiEvent};
use shared::domain::Note;
use storage::Storage;
use tokio::sync::Notify;

#[derive(Default)]
struct NotifyingNavigator {
    popped: Notify,
}

impl Navigator for NotifyingNavigator {
    fn pop(&self) {
        self.popped.notify_one();
    }
}

fn fast_settings() -> EditorSettings {
    EditorSettings {
        load_delay: Duration::from_millis(5),
        save_settle_delay: Duration::from_millis(5),
    }
}

#[tokio::test]
async fn back_pressed_persists_note_and_leaves_screen() {
    let storage = Arc::new(Storage::new("sqlite::memory:").await.expect("db"));
    let navigator = Arc::new(NotifyingNavigator::default());
    let mut controller =
        NoteEditorController::with_settings(storage.clone(), navigator.clone(), fast_settings());

    controller.handle_event(UiEvent::Started).expect("started");
    controller
        .handle_event(UiEvent::TitleChanged("Shopping".into()))
        .expect("title");
    controller
        .handle_event(UiEvent::ContentChanged("eggs\nmilk".into()))
        .expect("content");
    controller.handle_event(UiEvent::BackPressed).expect("back");

    tokio::time::timeout(Duration::from_secs(5), navigator.popped.notified())
        .await
        .expect("navigator popped");

    assert_eq!(controller.current_state(), ScreenState::FinishSaving);
    let notes = storage.list_notes().await.expect("list");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].as_note(), Note::new("Shopping", "eggs\nmilk"));

    controller.teardown().await;
}

#[tokio::test]
async fn blank_note_is_not_persisted() {
    let storage = Arc::new(Storage::new("sqlite::memory:").await.expect("db"));
    let navigator = Arc::new(NotifyingNavigator::default());
    let mut controller =
        NoteEditorController::with_settings(storage.clone(), navigator.clone(), fast_settings());

    controller
        .handle_event(UiEvent::TitleChanged("title only".into()))
        .expect("title");
    controller.handle_event(UiEvent::BackPressed).expect("back");

    tokio::time::timeout(Duration::from_secs(5), navigator.popped.notified())
        .await
        .expect("navigator popped");

    assert_eq!(storage.count_notes().await.expect("count"), 0);
    assert_eq!(controller.current_state(), ScreenState::Saving);
}

#[tokio::test]
async fn closed_pool_surfaces_storage_error() {
    let storage = Arc::new(Storage::new("sqlite::memory:").await.expect("db"));
    storage.pool().close().await;
    let navigator = Arc::new(NotifyingNavigator::default());
    let mut controller =
        NoteEditorController::with_settings(storage.clone(), navigator, fast_settings());
    let mut state_rx = controller.subscribe_state();

    controller
        .handle_event(UiEvent::TitleChanged("T".into()))
        .expect("title");
    controller
        .handle_event(UiEvent::ContentChanged("C".into()))
        .expect("content");
    controller.handle_event(UiEvent::BackPressed).expect("back");

    let state = tokio::time::timeout(
        Duration::from_secs(5),
        state_rx.wait_for(|state| state.error_message().is_some()),
    )
    .await
    .expect("error in time")
    .expect("state channel open")
    .clone();

    assert_eq!(state.error_message(), Some("failed to insert note"));
    assert!(controller.is_dialog_visible());
}
