//! Line commands typed at the terminal and how they map onto editor events.

use note_editor::UiEvent;

pub const HELP: &str = "commands: title <text> | content <text> | back | confirm | dismiss | edit | ack | start | show | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Show,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (verb, rest) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, Some(rest)),
        None => (line.trim(), None),
    };

    let command = match (verb, rest) {
        ("title", text) => {
            let title = text.unwrap_or_default().to_string();
            Command::Event(UiEvent::TitleChanged(title))
        }
        ("content", text) => {
            let content = unescape_newlines(text.unwrap_or_default());
            Command::Event(UiEvent::ContentChanged(content))
        }
        ("back", None) => Command::Event(UiEvent::BackPressed),
        ("confirm", None) => Command::Event(UiEvent::DialogConfirmed),
        ("dismiss", None) => Command::Event(UiEvent::DialogDismissed),
        ("edit", None) => Command::Event(UiEvent::Edit),
        ("ack", None) => Command::Event(UiEvent::ErrorAcknowledged),
        ("start", None) => Command::Event(UiEvent::Started),
        ("show", None) => Command::Show,
        ("quit", None) | ("exit", None) => Command::Quit,
        _ => return Err(format!("unrecognized command '{line}'; {HELP}")),
    };

    Ok(command)
}

/// Content is entered one line at a time; `\n` stands for a line break.
fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}
