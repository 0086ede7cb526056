//! Mock implementation of [`dbot_core::Bot`] for integration tests.
//!
//! Records every `send_message` call so tests can assert on reply text without hitting Telegram.

use async_trait::async_trait;
use dbot_core::{Bot, Chat, DbotError, Result};
use std::sync::Arc;
use tokio::sync::mpsc;

/// One recorded call to `send_message(chat, text)`.
#[derive(Debug, Clone)]
pub struct SentRecord {
    pub chat_id: i64,
    pub text: String,
}

/// Mock Bot that forwards each sent message to a receiver held by the test.
pub struct MockBot {
    sent_tx: mpsc::UnboundedSender<SentRecord>,
    fail: bool,
}

impl MockBot {
    /// Creates a MockBot and returns the receiver for sent records.
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<SentRecord>) {
        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        (Arc::new(Self { sent_tx, fail: false }), sent_rx)
    }

    /// A bot whose every send fails, as if Telegram were unreachable.
    pub fn failing() -> Arc<Self> {
        let (sent_tx, _) = mpsc::unbounded_channel();
        Arc::new(Self { sent_tx, fail: true })
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        if self.fail {
            return Err(DbotError::Bot("network unreachable".to_string()));
        }
        let _ = self.sent_tx.send(SentRecord {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }
}
