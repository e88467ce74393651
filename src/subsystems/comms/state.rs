//! Shared state for the chat channels.
//!
//! Channels hold an `Arc<CommsState>` and reach the router only through
//! [`CommsState::chat`], which puts every request through one bounded queue:
//! at most `max_concurrent` messages are routed at a time and at most
//! `queue_size` more may wait. Anything beyond that is refused with
//! [`SubmitError::QueueFull`].
//!
//! [`CommsState::report_event`] lets a channel tell the comms manager about
//! lifecycle changes without a return path.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Semaphore, SemaphorePermit, mpsc};
use tracing::{debug, warn};

use crate::chat::{self, History};
use crate::config::HttpConfig;
use crate::router::ResponseRouter;

/// Events a channel sends back to the comms manager.
#[derive(Debug)]
pub enum CommsEvent {
    /// Channel has stopped (clean exit or EOF).
    ChannelShutdown { channel_id: String },
    /// A channel reset its conversation history.
    HistoryCleared { channel_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("request queue is full")]
    QueueFull,
    #[error("request queue is closed")]
    Closed,
}

pub struct CommsState {
    router: Arc<ResponseRouter>,
    bot_name: String,
    /// Every request holds one of these from arrival to reply.
    admission: Semaphore,
    /// Held while the router runs.
    slots: Semaphore,
    event_tx: mpsc::Sender<CommsEvent>,
}

impl CommsState {
    pub fn new(
        router: Arc<ResponseRouter>,
        bot_name: impl Into<String>,
        queue: &HttpConfig,
        event_tx: mpsc::Sender<CommsEvent>,
    ) -> Self {
        let max_concurrent = queue.max_concurrent.max(1);
        Self {
            router,
            bot_name: bot_name.into(),
            admission: Semaphore::new(max_concurrent + queue.queue_size),
            slots: Semaphore::new(max_concurrent),
            event_tx,
        }
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Name of the active model provider.
    pub fn provider_name(&self) -> &'static str {
        self.router.provider().name()
    }

    /// Queue `message` for routing and record the exchange in `history`.
    ///
    /// `Ok(None)` for empty input; `history` is then left as it was.
    pub async fn chat(
        &self,
        channel_id: &str,
        message: &str,
        history: &mut History,
        max_tokens: Option<u32>,
    ) -> Result<Option<String>, SubmitError> {
        let _admitted = self.admit(channel_id)?;
        let _slot = self.slots.acquire().await.map_err(|_| SubmitError::Closed)?;
        debug!(channel_id, turns = history.len(), "routing message");
        Ok(chat::chat_turn(&self.router, message, history, max_tokens).await)
    }

    /// Take a place in the queue, or fail at once if it is full.
    pub(crate) fn admit(&self, channel_id: &str) -> Result<SemaphorePermit<'_>, SubmitError> {
        self.admission.try_acquire().map_err(|_| {
            warn!(channel_id, "request queue full, refusing message");
            SubmitError::QueueFull
        })
    }

    /// Report an event to the comms manager. Dropped with a warning if the
    /// manager is gone or not keeping up.
    pub fn report_event(&self, event: CommsEvent) {
        if let Err(e) = self.event_tx.try_send(event) {
            warn!("comms event dropped: {e}");
        }
    }
}
