//! chat: assistant window for the samOS desktop
//!
//! Conversations live in memory for the session. Completions come from an
//! OpenAI-compatible HTTP endpoint and are fetched off the UI thread.

pub mod backend;
pub mod error;
pub mod model;
mod view;
pub mod worker;

pub use backend::{ChatBackend, HttpBackend, Unconfigured};
pub use error::{ChatError, Result};
pub use model::{ChatSession, Conversation, Message, Role};
pub use view::ChatApp;
