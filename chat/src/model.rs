//! Conversations and the request lifecycle

use crate::error::{ChatError, Result};
use samcore::safety::truncate_chars;
use serde::{Deserialize, Serialize};

pub const GREETING: &str = "👋 Hello! I'm ChatGPT. How can I help you today?";
pub const EMPTY_REPLY: &str = "Sorry, I couldn't generate a response.";
pub const ERROR_REPLY: &str = "Sorry, an error occurred. Please try again later.";
pub const NEW_CHAT_TITLE: &str = "New Chat";

/// Conversation titles keep this many characters of the first question.
const TITLE_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: u64,
    pub title: String,
    pub messages: Vec<Message>,
}

impl Conversation {
    fn new(id: u64) -> Self {
        Self {
            id,
            title: NEW_CHAT_TITLE.to_string(),
            messages: vec![Message::assistant(GREETING)],
        }
    }

    fn has_user_message(&self) -> bool {
        self.messages.iter().any(|m| m.role == Role::User)
    }
}

/// A completion to fetch: which conversation asked, and everything said so far.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub conversation: u64,
    pub history: Vec<Message>,
}

/// All conversations of the session. There is always at least one, and
/// exactly one is current.
#[derive(Debug)]
pub struct ChatSession {
    conversations: Vec<Conversation>,
    current: u64,
    next_id: u64,
    waiting: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            conversations: vec![Conversation::new(1)],
            current: 1,
            next_id: 2,
            waiting: false,
        }
    }

    /// Newest first.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn current_id(&self) -> u64 {
        self.current
    }

    pub fn current(&self) -> &Conversation {
        // `current` always names a live conversation
        self.conversations
            .iter()
            .find(|c| c.id == self.current)
            .unwrap_or(&self.conversations[0])
    }

    /// A reply is being fetched; sending is disabled.
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    /// Start a fresh conversation at the top of the list and switch to it.
    pub fn new_conversation(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.conversations.insert(0, Conversation::new(id));
        self.current = id;
        id
    }

    pub fn select(&mut self, id: u64) -> Result<()> {
        if self.conversations.iter().any(|c| c.id == id) {
            self.current = id;
            Ok(())
        } else {
            Err(ChatError::UnknownConversation(id))
        }
    }

    /// Remove a conversation. The last remaining one cannot be removed.
    pub fn delete_conversation(&mut self, id: u64) -> Result<()> {
        if self.conversations.len() == 1 {
            return Err(ChatError::LastConversation);
        }
        let index = self
            .conversations
            .iter()
            .position(|c| c.id == id)
            .ok_or(ChatError::UnknownConversation(id))?;
        self.conversations.remove(index);
        if self.current == id {
            self.current = self.conversations[0].id;
        }
        Ok(())
    }

    /// Remove one message of the current conversation. Out-of-range indices
    /// are ignored.
    pub fn delete_message(&mut self, index: usize) {
        let current = self.current;
        if let Some(conv) = self.get_mut(current) {
            if index < conv.messages.len() {
                conv.messages.remove(index);
            }
        }
    }

    /// Reset the current conversation to the greeting.
    pub fn clear(&mut self) {
        let current = self.current;
        if let Some(conv) = self.get_mut(current) {
            conv.messages = vec![Message::assistant(GREETING)];
        }
    }

    /// Add the user's message to the current conversation and build the
    /// request for the reply. `None` when the input is blank or a reply is
    /// still pending.
    pub fn send(&mut self, input: &str) -> Option<PendingRequest> {
        let text = input.trim();
        if text.is_empty() || self.waiting {
            return None;
        }
        let current = self.current;
        let conv = self.get_mut(current)?;
        if !conv.has_user_message() {
            conv.title = truncate_chars(text, TITLE_CHARS);
        }
        conv.messages.push(Message::user(text));
        let request = PendingRequest { conversation: conv.id, history: conv.messages.clone() };
        self.waiting = true;
        Some(request)
    }

    /// Deliver the outcome of a request to the conversation that made it.
    pub fn receive(&mut self, conversation: u64, reply: Result<String>) {
        self.waiting = false;
        let content = match reply {
            Ok(text) if text.trim().is_empty() => EMPTY_REPLY.to_string(),
            Ok(text) => text,
            Err(e) => {
                log::error!("chat request failed: {}", e);
                ERROR_REPLY.to_string()
            }
        };
        match self.get_mut(conversation) {
            Some(conv) => conv.messages.push(Message::assistant(content)),
            None => log::warn!("dropping reply for deleted conversation {}", conversation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_greeting() {
        let s = ChatSession::new();
        assert_eq!(s.conversations().len(), 1);
        assert_eq!(s.current().title, NEW_CHAT_TITLE);
        assert_eq!(s.current().messages, vec![Message::assistant(GREETING)]);
    }

    #[test]
    fn test_send_and_receive() {
        let mut s = ChatSession::new();
        let req = s.send("  hi there  ").unwrap();
        assert_eq!(req.history.len(), 2);
        assert_eq!(req.history[1], Message::user("hi there"));
        assert!(s.is_waiting());
        assert_eq!(s.send("again"), None);
        s.receive(req.conversation, Ok("hello!".into()));
        assert!(!s.is_waiting());
        assert_eq!(s.current().messages.last(), Some(&Message::assistant("hello!")));
    }

    #[test]
    fn test_blank_input_ignored() {
        let mut s = ChatSession::new();
        assert_eq!(s.send("   \n"), None);
        assert!(!s.is_waiting());
        assert_eq!(s.current().messages.len(), 1);
    }

    #[test]
    fn test_first_message_names_conversation() {
        let mut s = ChatSession::new();
        let req = s.send("What is the airspeed velocity of an unladen swallow?").unwrap();
        assert_eq!(s.current().title, "What is the airspeed velocity ...");
        s.receive(req.conversation, Ok("African or European?".into()));
        s.send("European").unwrap();
        assert_eq!(s.current().title, "What is the airspeed velocity ...");
    }

    #[test]
    fn test_short_title_kept_whole() {
        let mut s = ChatSession::new();
        s.send("hello").unwrap();
        assert_eq!(s.current().title, "hello");
    }

    #[test]
    fn test_fallback_replies() {
        let mut s = ChatSession::new();
        let req = s.send("one").unwrap();
        s.receive(req.conversation, Ok("   ".into()));
        assert_eq!(s.current().messages.last().unwrap().content, EMPTY_REPLY);
        let req = s.send("two").unwrap();
        s.receive(req.conversation, Err(ChatError::NotConfigured));
        assert_eq!(s.current().messages.last().unwrap().content, ERROR_REPLY);
    }

    #[test]
    fn test_reply_goes_to_origin() {
        let mut s = ChatSession::new();
        let req = s.send("question").unwrap();
        let other = s.new_conversation();
        s.receive(req.conversation, Ok("answer".into()));
        assert_eq!(s.current_id(), other);
        assert_eq!(s.current().messages.len(), 1);
        s.select(req.conversation).unwrap();
        assert_eq!(s.current().messages.len(), 3);
    }

    #[test]
    fn test_reply_for_deleted_conversation_dropped() {
        let mut s = ChatSession::new();
        let req = s.send("question").unwrap();
        s.new_conversation();
        s.delete_conversation(req.conversation).unwrap();
        s.receive(req.conversation, Ok("answer".into()));
        assert!(!s.is_waiting());
        assert_eq!(s.conversations().len(), 1);
    }

    #[test]
    fn test_cannot_delete_last() {
        let mut s = ChatSession::new();
        assert!(matches!(s.delete_conversation(1), Err(ChatError::LastConversation)));
        let id = s.new_conversation();
        assert_eq!(s.conversations()[0].id, id);
        s.delete_conversation(id).unwrap();
        assert_eq!(s.current_id(), 1);
        assert!(matches!(s.delete_conversation(99), Err(ChatError::LastConversation)));
    }

    #[test]
    fn test_delete_unknown() {
        let mut s = ChatSession::new();
        s.new_conversation();
        assert!(matches!(s.delete_conversation(99), Err(ChatError::UnknownConversation(99))));
        assert!(s.select(99).is_err());
    }

    #[test]
    fn test_delete_message_and_clear() {
        let mut s = ChatSession::new();
        let req = s.send("a").unwrap();
        s.receive(req.conversation, Ok("b".into()));
        s.delete_message(1);
        assert_eq!(s.current().messages, vec![Message::assistant(GREETING), Message::assistant("b")]);
        s.delete_message(10);
        assert_eq!(s.current().messages.len(), 2);
        s.clear();
        assert_eq!(s.current().messages, vec![Message::assistant(GREETING)]);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("x")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"x"}"#);
    }
}
