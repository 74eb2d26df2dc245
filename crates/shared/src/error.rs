use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown note kind '{0}'")]
    UnknownNoteKind(String),
}
