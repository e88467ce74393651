//! Comms subsystem: the chat channels people talk to the bot through.
//!
//! Each channel (console, HTTP) implements [`Component`] and is spawned by
//! [`start`] via [`spawn_components`]. Channels capture a shared
//! [`Arc<CommsState>`] at construction; it owns the router handle and the
//! request queue.
//!
//! Channels report lifecycle events over an intra-subsystem [`mpsc`]
//! channel, drained by a short-lived task that ends when every sender is
//! dropped.

#[cfg(feature = "channel-axum")]
pub mod axum_channel;
#[cfg(feature = "channel-pty")]
pub mod pty;
pub mod state;

pub use state::{CommsEvent, CommsState, SubmitError};

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;
use crate::router::ResponseRouter;
use crate::subsystems::runtime::{Component, ComponentFuture, SubsystemHandle, spawn_components};

/// Spawn the configured channels and return a handle that resolves when
/// they have all exited. Returns as soon as the tasks are spawned.
pub fn start(config: &Config, router: Arc<ResponseRouter>, shutdown: CancellationToken) -> SubsystemHandle {
    let (event_tx, event_rx) = mpsc::channel::<CommsEvent>(32);
    let state = Arc::new(CommsState::new(router, config.bot_name.clone(), &config.comms.http, event_tx));

    let mut components: Vec<Box<dyn Component>> = Vec::new();

    #[cfg(feature = "channel-pty")]
    {
        if config.comms.pty.enabled {
            info!("loading pty channel");
            components.push(Box::new(pty::PtyChannel::new("pty0", state.clone())));
        }
    }

    #[cfg(feature = "channel-axum")]
    {
        if config.comms.http.enabled {
            info!(bind = %config.comms.http.bind, "loading axum channel");
            components.push(Box::new(axum_channel::AxumChannel::new(
                "http0",
                config.comms.http.bind.clone(),
                state.clone(),
            )));
        }
    }

    if components.is_empty() {
        info!("no comms channels enabled, waiting for shutdown");
        components.push(Box::new(Idle));
    }
    drop(state);

    tokio::spawn(async move {
        let mut rx = event_rx;
        while let Some(event) = rx.recv().await {
            match event {
                CommsEvent::ChannelShutdown { ref channel_id } => {
                    debug!(channel_id, "channel reported shutdown");
                }
                CommsEvent::HistoryCleared { ref channel_id } => {
                    debug!(channel_id, "channel cleared its history");
                }
            }
        }
    });

    spawn_components(components, shutdown)
}

/// Placeholder that keeps the process up until shutdown when no channel is
/// enabled.
struct Idle;

impl Component for Idle {
    fn id(&self) -> &str {
        "idle"
    }

    fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture {
        Box::pin(async move {
            shutdown.cancelled().await;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmProvider;

    #[tokio::test]
    async fn no_channels_waits_for_shutdown() {
        let config = Config::test_default();
        let router = Arc::new(ResponseRouter::builder(LlmProvider::Disabled).build());
        let shutdown = CancellationToken::new();
        let handle = start(&config, router, shutdown.clone());
        shutdown.cancel();
        assert!(handle.join().await.is_ok());
    }
}
