//! Background completion requests
//!
//! Each request runs on its own thread; results come back over a channel
//! the UI drains once per frame.

use crate::backend::ChatBackend;
use crate::error::Result;
use crate::model::PendingRequest;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Outcome of one request, tagged with the conversation that made it.
pub type Reply = (u64, Result<String>);

pub struct RequestWorker {
    backend: Arc<dyn ChatBackend>,
    tx: Sender<Reply>,
    rx: Receiver<Reply>,
}

impl RequestWorker {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        let (tx, rx) = channel();
        Self { backend, tx, rx }
    }

    /// Fetch a reply in the background. `on_done` runs on the worker thread
    /// after the reply is queued (used to wake the UI).
    ///
    /// Fails only when the thread cannot be started; no reply will arrive
    /// for the request then.
    pub fn submit(&self, request: PendingRequest, on_done: impl FnOnce() + Send + 'static) -> Result<()> {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        std::thread::Builder::new()
            .name("chat-request".into())
            .spawn(move || {
                let reply = backend.complete(&request.history);
                if tx.send((request.conversation, reply)).is_err() {
                    log::warn!("chat window gone before reply arrived");
                }
                on_done();
            })?;
        Ok(())
    }

    /// Replies that arrived since the last call.
    pub fn poll(&self) -> Vec<Reply> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatError;
    use crate::model::{ChatSession, Message, ERROR_REPLY};
    use std::time::Duration;

    fn wait(worker: &RequestWorker) -> Reply {
        worker.rx.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    struct Echo;

    impl ChatBackend for Echo {
        fn complete(&self, history: &[Message]) -> Result<String> {
            Ok(format!("echo: {}", history.last().map(|m| m.content.as_str()).unwrap_or("")))
        }
    }

    struct Down;

    impl ChatBackend for Down {
        fn complete(&self, _history: &[Message]) -> Result<String> {
            Err(ChatError::Status(503))
        }
    }

    #[test]
    fn test_round_trip_through_worker() {
        let worker = RequestWorker::new(Arc::new(Echo));
        let mut session = ChatSession::new();
        let request = session.send("ping").unwrap();
        worker.submit(request, || {}).unwrap();
        let (conv, reply) = wait(&worker);
        session.receive(conv, reply);
        assert_eq!(session.current().messages.last().unwrap().content, "echo: ping");
        assert!(worker.poll().is_empty());
    }

    #[test]
    fn test_failure_becomes_fallback() {
        let worker = RequestWorker::new(Arc::new(Down));
        let mut session = ChatSession::new();
        worker.submit(session.send("ping").unwrap(), || {}).unwrap();
        let (conv, reply) = wait(&worker);
        session.receive(conv, reply);
        assert_eq!(session.current().messages.last().unwrap().content, ERROR_REPLY);
    }

    #[test]
    fn test_on_done_runs() {
        let worker = RequestWorker::new(Arc::new(Echo));
        let (done_tx, done_rx) = channel();
        worker
            .submit(PendingRequest { conversation: 7, history: vec![Message::user("x")] }, move || {
                let _ = done_tx.send(());
            })
            .unwrap();
        assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
        let replies = worker.poll();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].0, 7);
    }
}
