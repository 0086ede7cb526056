//! Console conversation: stdin lines in, replies out, through the same handler chain as Telegram.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use dbot_core::{Bot, Chat, DbotError, Message, Result, User};
use handler_chain::HandlerChain;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::error;

/// Conversation id used for the single console game.
pub const CONSOLE_CHAT_ID: i64 = 0;
const QUIT_COMMAND: &str = "/quit";

/// [`Bot`] that writes every message to `W`, followed by a blank line.
pub struct ConsoleBot<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> ConsoleBot<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Takes what has been written so far, even if a writer panicked while holding the lock.
    pub fn take_output(&self) -> W
    where
        W: Default,
    {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *out)
    }
}

#[async_trait]
impl<W: Write + Send> Bot for ConsoleBot<W> {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| DbotError::Unknown("console output lock poisoned".to_string()))?;
        writeln!(out, "{}\n", text)?;
        out.flush()?;
        Ok(())
    }
}

/// Feeds each input line to `chain` as a message in [`CONSOLE_CHAT_ID`] until EOF or `/quit`.
/// Returns the number of messages handled.
pub async fn run_console_conversation<R>(input: R, chain: &HandlerChain) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut handled = 0;
    while let Some(line) = lines.next_line().await? {
        if line.trim() == QUIT_COMMAND {
            break;
        }
        handled += 1;
        let message = Message::incoming(
            handled.to_string(),
            User::anonymous(CONSOLE_CHAT_ID),
            CONSOLE_CHAT_ID,
            line,
        );
        if let Err(e) = chain.handle(&message).await {
            error!(error = %e, "Handler chain failed");
        }
    }
    Ok(handled)
}
