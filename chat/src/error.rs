use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("no chat endpoint configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("could not start request thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("cannot delete the last conversation")]
    LastConversation,
    #[error("no conversation with id {0}")]
    UnknownConversation(u64),
}

pub type Result<T> = std::result::Result<T, ChatError>;
